use super::generation_input::GenerationInput;
use super::sampler::WeightedCharSampler;
use crate::error::{NameGenError, Result};
use log::{debug, trace, warn};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Reserved character marking the start of every training name.
///
/// It is repeated `order` times in front of each name, so the first
/// characters of a generated name are drawn like any other one. It is
/// never appended: a word ends when its trailing context has no successor.
pub const BOUNDARY_CHAR: char = '*';

/// N-order character Markov model trained on a list of names.
///
/// The model maps every context of `order` characters seen in the training
/// data to a [`WeightedCharSampler`] holding the characters observed after
/// it. A context only ever seen at the end of a name maps to an empty
/// sampler, which ends generation.
///
/// # Responsibilities
/// - Normalize and window the training names
/// - Generate new names inside a length window
/// - Reject names already present in the training data
///
/// # Invariants
/// - `order` is always >= 1
/// - Every key of `contexts` is exactly `order` characters long
/// - `contexts` is never mutated after construction
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// Number of preceding characters used as context
	order: usize,

	/// Copy of the training names, as supplied
	training_data: Vec<String>,

	/// Normalized training names, for novelty checks
	known_names: HashSet<String>,

	/// Mapping from a context (length `order`) to its successors
	contexts: HashMap<String, WeightedCharSampler>,
}

impl MarkovModel {
	/// Builds a model of the given `order` from `training_data`.
	///
	/// Each name is trimmed, lower-cased, stripped of [`BOUNDARY_CHAR`] and
	/// prefixed with `order` boundary characters before windowing. Blank
	/// names are skipped.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `order` is 0, if `training_data` is empty,
	/// or if every entry is blank.
	pub fn new<S: AsRef<str>>(order: usize, training_data: &[S]) -> Result<Self> {
		if order == 0 {
			return Err(NameGenError::InvalidConfig("order must be >= 1".to_owned()));
		}
		if training_data.is_empty() {
			return Err(NameGenError::InvalidConfig("training data is empty".to_owned()));
		}

		let mut model = Self {
			order,
			training_data: training_data.iter().map(|s| s.as_ref().to_owned()).collect(),
			known_names: HashSet::new(),
			contexts: HashMap::new(),
		};

		let boundary: String = std::iter::repeat_n(BOUNDARY_CHAR, order).collect();
		let mut formatted_names = Vec::with_capacity(model.training_data.len());
		for name in &model.training_data {
			let normalized = Self::normalize(name);
			if normalized.is_empty() {
				continue;
			}
			let formatted: Vec<char> = boundary
				.chars()
				.chain(normalized.chars())
				.collect();
			formatted_names.push(formatted);
			model.known_names.insert(normalized);
		}

		if formatted_names.is_empty() {
			return Err(NameGenError::InvalidConfig("training data only contains blank names".to_owned()));
		}

		for formatted in &formatted_names {
			model.add_name(formatted);
		}

		debug!(
			"Built order-{} model from {} names ({} contexts)",
			order,
			model.training_data.len(),
			model.contexts.len()
		);
		Ok(model)
	}

	/// Lower-cases and trims a name, dropping any [`BOUNDARY_CHAR`].
	fn normalize(name: &str) -> String {
		name.trim()
			.to_lowercase()
			.chars()
			.filter(|c| *c != BOUNDARY_CHAR)
			.collect()
	}

	/// Slides a window of width `order` over a formatted name.
	///
	/// For every window, the following character (if any) is recorded as a
	/// successor. The last window only ensures its context exists, so a
	/// context ending one name keeps the successors recorded from others.
	fn add_name(&mut self, formatted: &[char]) {
		// Formatted names always start with `order` boundary characters
		for i in 0..=formatted.len() - self.order {
			let context: String = formatted[i..i + self.order].iter().collect();
			let sampler = self.contexts.entry(context).or_default();
			if let Some(next_char) = formatted.get(i + self.order) {
				sampler.add_member(*next_char);
			}
		}
	}

	/// Returns the order of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the training names as supplied to [`new`](Self::new).
	pub fn training_data(&self) -> &[String] {
		&self.training_data
	}

	/// Returns the number of distinct contexts learned.
	pub fn context_count(&self) -> usize {
		self.contexts.len()
	}

	/// Returns the sampler attached to `context`, if the context was seen.
	pub fn sampler(&self, context: &str) -> Option<&WeightedCharSampler> {
		self.contexts.get(context)
	}

	/// Returns `true` if `name` matches a training name, ignoring case and
	/// surrounding whitespace.
	pub fn is_known(&self, name: &str) -> bool {
		self.known_names.contains(&Self::normalize(name))
	}

	/// Generates `count` names with thread-local randomness.
	///
	/// # Notes
	/// - Retries without limit. If the corpus cannot produce `count`
	///   distinct names of the requested length that are not training
	///   names, this never returns. Use [`generate_with`](Self::generate_with)
	///   and a capped [`GenerationInput`] to bound the work.
	/// - `max_length >= min_length` is not checked.
	pub fn generate_text(&self, count: usize, min_length: usize, max_length: usize) -> Vec<String> {
		let input = GenerationInput::new(count, min_length, max_length);
		let (names, _) = self.generate_until(&input, &mut rand::rng());
		names
	}

	/// Generates names as described by `input`, drawing from `rng`.
	///
	/// Names are returned in acceptance order.
	///
	/// # Errors
	/// Returns `InfeasibleConstraints` if `input.max_attempts` candidates were
	/// drawn before `input.count` names were accepted. Without a cap this
	/// function only returns `Ok`, or does not return at all.
	pub fn generate_with<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> Result<Vec<String>> {
		let (names, attempts) = self.generate_until(input, rng);
		if names.len() < input.count {
			warn!(
				"Gave up after {} attempts with {} of {} names",
				attempts,
				names.len(),
				input.count
			);
			return Err(NameGenError::InfeasibleConstraints {
				requested: input.count,
				accepted: names.len(),
				attempts,
			});
		}
		Ok(names)
	}

	/// Draws candidates until `input.count` are accepted or the attempt cap
	/// is reached. Returns the accepted names and the number of attempts.
	fn generate_until<R: Rng + ?Sized>(&self, input: &GenerationInput, rng: &mut R) -> (Vec<String>, usize) {
		let mut names = Vec::with_capacity(input.count);
		let mut accepted = HashSet::new();
		let mut attempts = 0;

		while names.len() < input.count {
			if input.max_attempts.is_some_and(|max| attempts >= max) {
				break;
			}
			attempts += 1;

			let candidate = match self.draw_candidate(rng, input.max_length) {
				Some(raw) => Self::format_candidate(&raw),
				None => {
					trace!("Rejected candidate: longer than {}", input.max_length);
					continue;
				}
			};

			if !input.accepts_length(candidate.chars().count()) {
				trace!("Rejected {candidate:?}: length out of range");
				continue;
			}
			if self.is_known(&candidate) {
				trace!("Rejected {candidate:?}: training name");
				continue;
			}
			if !accepted.insert(candidate.clone()) {
				trace!("Rejected {candidate:?}: duplicate");
				continue;
			}
			names.push(candidate);
		}

		debug!("Generated {} names in {} attempts", names.len(), attempts);
		(names, attempts)
	}

	/// Walks the chain from the all-boundary context until a context has no
	/// successor. Returns the raw buffer, boundary characters included.
	///
	/// Returns `None` as soon as more than `max_length` characters were
	/// generated: such a candidate can only be rejected, and stopping early
	/// keeps cyclic chains from running forever.
	fn draw_candidate<R: Rng + ?Sized>(&self, rng: &mut R, max_length: usize) -> Option<Vec<char>> {
		let mut buffer = vec![BOUNDARY_CHAR; self.order];

		loop {
			let context: String = buffer[buffer.len() - self.order..].iter().collect();
			let next_char = self.contexts.get(&context).and_then(|sampler| sampler.sample(rng));
			match next_char {
				Some(c) => buffer.push(c),
				None => return Some(buffer),
			}
			if buffer.len() - self.order > max_length {
				return None;
			}
		}
	}

	/// Strips boundary characters and capitalizes the first character.
	fn format_candidate(raw: &[char]) -> String {
		let mut chars = raw.iter().copied().filter(|c| *c != BOUNDARY_CHAR);
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const NAMES: [&str; 20] = [
		"Abigail", "Adeline", "Amelia", "Aurora", "Bella", "Camila", "Charlotte", "Clara", "Delilah", "Eleanor",
		"Ella", "Emilia", "Evelyn", "Hazel", "Isabella", "Luna", "Madeline", "Mila", "Nora", "Stella",
	];

	fn members(model: &MarkovModel, context: &str) -> Vec<char> {
		model.sampler(context).expect("context should exist").members().to_vec()
	}

	#[test]
	fn rejects_zero_order() {
		assert!(matches!(MarkovModel::new(0, &NAMES), Err(NameGenError::InvalidConfig(_))));
	}

	#[test]
	fn rejects_empty_training_data() {
		let empty: [&str; 0] = [];
		assert!(matches!(MarkovModel::new(2, &empty), Err(NameGenError::InvalidConfig(_))));
		assert!(matches!(MarkovModel::new(2, &["  ", ""]), Err(NameGenError::InvalidConfig(_))));
	}

	#[test]
	fn builds_contexts_with_boundary_prefix() {
		let model = MarkovModel::new(2, &["ab"]).unwrap();

		assert_eq!(model.context_count(), 3);
		assert_eq!(members(&model, "**"), vec!['a']);
		assert_eq!(members(&model, "*a"), vec!['b']);
		assert!(model.sampler("ab").unwrap().is_empty());
	}

	#[test]
	fn final_window_keeps_recorded_successors() {
		for corpus in [["ab", "abc"], ["abc", "ab"]] {
			let model = MarkovModel::new(2, &corpus).unwrap();
			assert_eq!(members(&model, "ab"), vec!['c']);
			assert!(model.sampler("bc").unwrap().is_empty());
		}
	}

	#[test]
	fn training_is_case_insensitive() {
		let model = MarkovModel::new(2, &["Ann", " ann "]).unwrap();

		assert_eq!(members(&model, "**"), vec!['a', 'a']);
		assert_eq!(members(&model, "*a"), vec!['n', 'n']);
		assert_eq!(members(&model, "an"), vec!['n', 'n']);
		assert!(model.sampler("nn").unwrap().is_empty());
		assert!(model.is_known("ANN"));
		assert_eq!(model.training_data(), &["Ann".to_owned(), " ann ".to_owned()]);
	}

	#[test]
	fn boundary_char_in_training_data_is_ignored() {
		let model = MarkovModel::new(1, &["a*b"]).unwrap();
		assert_eq!(members(&model, "a"), vec!['b']);
		assert_eq!(model.context_count(), 3);
	}

	#[test]
	fn boundary_char_is_ignored_by_novelty_check() {
		// "A*b" trains exactly the chain that produces "Ab"
		let model = MarkovModel::new(1, &["ßa", "A*b"]).unwrap();
		assert!(model.is_known("Ab"));

		let input = GenerationInput::new(3, 1, 3).with_max_attempts(500);
		match model.generate_with(&input, &mut StdRng::seed_from_u64(4)) {
			Err(NameGenError::InfeasibleConstraints { accepted, .. }) => assert_eq!(accepted, 0),
			other => panic!("expected infeasible constraints, got {other:?}"),
		}
	}

	#[test]
	fn raw_candidates_start_with_boundary() {
		let mut rng = StdRng::seed_from_u64(3);
		for order in 1..=4 {
			let model = MarkovModel::new(order, &NAMES).unwrap();
			for _ in 0..50 {
				if let Some(raw) = model.draw_candidate(&mut rng, 64) {
					assert!(raw.len() > order);
					assert!(raw[..order].iter().all(|c| *c == BOUNDARY_CHAR));
					assert!(raw[order..].iter().all(|c| *c != BOUNDARY_CHAR));
				}
			}
		}
	}

	#[test]
	fn generated_names_satisfy_constraints() {
		let model = MarkovModel::new(2, &NAMES).unwrap();
		let input = GenerationInput::new(8, 4, 7).with_max_attempts(200_000);
		let names = model.generate_with(&input, &mut StdRng::seed_from_u64(11)).unwrap();

		assert_eq!(names.len(), 8);
		let distinct: HashSet<_> = names.iter().collect();
		assert_eq!(distinct.len(), names.len());
		for name in &names {
			let length = name.chars().count();
			assert!((4..=7).contains(&length), "{name} has length {length}");
			assert!(!model.is_known(name), "{name} is a training name");
			assert!(name.chars().next().unwrap().is_uppercase());
		}
	}

	#[test]
	fn generation_is_reproducible_with_seed() {
		let model = MarkovModel::new(2, &NAMES).unwrap();
		let input = GenerationInput::new(5, 3, 9).with_max_attempts(100_000);

		let first = model.generate_with(&input, &mut StdRng::seed_from_u64(99)).unwrap();
		let second = model.generate_with(&input, &mut StdRng::seed_from_u64(99)).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn single_name_corpus_never_yields_novel_output() {
		let model = MarkovModel::new(2, &["ab"]).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..10 {
			let raw = model.draw_candidate(&mut rng, 10).unwrap();
			assert_eq!(MarkovModel::format_candidate(&raw), "Ab");
		}

		let input = GenerationInput::new(1, 1, 10).with_max_attempts(50);
		match model.generate_with(&input, &mut rng) {
			Err(NameGenError::InfeasibleConstraints { requested, accepted, attempts }) => {
				assert_eq!((requested, accepted, attempts), (1, 0, 50));
			}
			other => panic!("expected infeasible constraints, got {other:?}"),
		}
	}

	#[test]
	fn novelty_check_ignores_case_and_whitespace() {
		// Order 1 over these names can only produce abc, abd, xbc and xbd
		let model = MarkovModel::new(1, &[" ABC ", "xbd"]).unwrap();

		let mut names = model.generate_text(2, 3, 3);
		names.sort();
		assert_eq!(names, vec!["Abd", "Xbc"]);

		let input = GenerationInput::new(3, 3, 3).with_max_attempts(1_000);
		assert!(matches!(
			model.generate_with(&input, &mut StdRng::seed_from_u64(1)),
			Err(NameGenError::InfeasibleConstraints { accepted: 2, .. })
		));
	}

	#[test]
	fn cyclic_chain_is_cut_at_max_length() {
		// "a" always has a successor, so the chain never ends on its own
		let model = MarkovModel::new(1, &["aaaa"]).unwrap();
		let mut rng = StdRng::seed_from_u64(8);
		assert_eq!(model.draw_candidate(&mut rng, 6), None);

		let input = GenerationInput::new(1, 1, 6).with_max_attempts(20);
		assert!(model.generate_with(&input, &mut rng).is_err());
	}

	#[test]
	fn model_can_be_shared_across_threads() {
		fn assert_send_sync<T: Send + Sync>() {}
		assert_send_sync::<MarkovModel>();
	}
}
