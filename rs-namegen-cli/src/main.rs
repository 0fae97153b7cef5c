//! Command-line driver for the Markov name generator.
//!
//! Loads a training corpus (one name per line), builds a model of the
//! requested order and prints the generated names.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_namegen_core::NameGenError;
use rs_namegen_core::model::generation_input::GenerationInput;
use rs_namegen_core::model::generator::Generator;
use rs_namegen_core::model::markov_model::MarkovModel;
use serde_json::json;

/// Which training corpus to learn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Category {
    Male,
    Female,
}

impl Category {
    /// Corpus file stem inside the data directory.
    fn corpus_name(self) -> &'static str {
        match self {
            Category::Male => "namesBoys",
            Category::Female => "namesGirls",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Category::Male => "MALE",
            Category::Female => "FEMALE",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "namegen")]
#[command(about = "Generate new names with an N-order Markov model", long_about = None)]
#[command(version)]
struct Cli {
    /// Training corpus to use
    #[arg(short, long, value_enum, default_value_t = Category::Female)]
    category: Category,

    /// Directory holding namesBoys.txt and namesGirls.txt
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Train on this file instead of the category corpus
    #[arg(short, long)]
    training_file: Option<PathBuf>,

    /// Order of the model (context length)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    order: u32,

    /// Number of names to generate
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Minimum name length
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    min_length: u32,

    /// Maximum name length
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u32).range(1..))]
    max_length: u32,

    /// Give up after this many candidates (0 retries forever)
    #[arg(long, default_value_t = 100_000)]
    max_attempts: usize,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Print the names as a JSON document
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_model(cli: &Cli) -> anyhow::Result<MarkovModel> {
    let order = cli.order as usize;
    let model = match &cli.training_file {
        Some(path) => {
            let mut generator = Generator::default();
            let name = generator
                .load_corpus(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            generator.build_model(&name, order)?
        }
        None => {
            let generator = Generator::new(&cli.data_dir)
                .with_context(|| format!("Failed to load corpora from {}", cli.data_dir.display()))?;
            generator.build_model(cli.category.corpus_name(), order)?
        }
    };
    info!("Model ready: order {}, {} contexts", model.order(), model.context_count());
    Ok(model)
}

/// Builds the generation input; `--max-attempts 0` means unbounded.
fn generation_input(cli: &Cli) -> GenerationInput {
    let input = GenerationInput::new(
        cli.count as usize,
        cli.min_length as usize,
        cli.max_length as usize,
    );
    if cli.max_attempts > 0 {
        input.with_max_attempts(cli.max_attempts)
    } else {
        input
    }
}

fn json_document(label: &str, order: usize, input: &GenerationInput, names: &[String]) -> serde_json::Value {
    json!({
        "category": label,
        "order": order,
        "input": input,
        "names": names,
    })
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let input = generation_input(cli);
    input.validate()?;

    let model = load_model(cli)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let names = match model.generate_with(&input, &mut rng) {
        Ok(names) => names,
        Err(NameGenError::InfeasibleConstraints { .. }) => {
            println!("No output for the specified constraints. Relax the model constraints, and try again.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    let label = match cli.training_file {
        Some(_) => "CUSTOM",
        None => cli.category.label(),
    };

    if cli.json {
        let document = json_document(label, model.order(), &input, &names);
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("Random {label} names that satisfy the model constraints:");
        for name in &names {
            println!("{name}");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    run(&cli)
}
