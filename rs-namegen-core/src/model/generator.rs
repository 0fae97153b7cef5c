use crate::error::{NameGenError, Result};
use crate::io;
use crate::model::markov_model::MarkovModel;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Library of named training corpora.
///
/// # Responsibilities
/// - Load every `.txt` corpus from a directory (one name per line)
/// - Expose the loaded corpus names
/// - Build a `MarkovModel` of any order from a named corpus
#[derive(Debug, Default)]
pub struct Generator {
	corpora: HashMap<String, Vec<String>>,
}

impl Generator {
	/// Creates a generator by loading all `.txt` corpora from a directory.
	///
	/// # Parameters
	/// - `filepath`: Path to a directory containing corpus files.
	///   Both `"folder"` and `"folder/"` are accepted.
	///
	/// # Behavior
	/// - Lists all files with the `.txt` extension in the given directory.
	/// - The corpus name is derived from the file name (without extension).
	/// - Blank lines are dropped.
	///
	/// # Errors
	/// - Returns `InvalidConfig` if the path is not a directory.
	/// - Returns `Io` if a corpus file cannot be read.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let path = filepath.as_ref();
		let string_path = path
			.to_str()
			.ok_or_else(|| NameGenError::InvalidConfig(format!("Invalid filepath: {}", path.display())))?;
		let folder = io::normalize_folder(string_path);

		if !folder.is_dir() {
			return Err(NameGenError::InvalidConfig(format!(
				"Expected a directory, got: {}",
				folder.display()
			)));
		}

		let mut generator = Self::default();
		for file in io::list_files(&folder, "txt")? {
			generator.load_corpus(&file)?;
		}

		info!("Loaded {} corpora from {}", generator.corpora.len(), folder.display());
		Ok(generator)
	}

	/// Loads a single corpus file and registers it under its file stem.
	///
	/// Returns the corpus name.
	///
	/// # Errors
	/// Returns `InvalidConfig` if a corpus with the same name is already loaded,
	/// or `Io` if the file cannot be read.
	pub fn load_corpus<P: AsRef<Path>>(&mut self, filepath: P) -> Result<String> {
		let key = io::get_filename(&filepath)?;
		if self.corpora.contains_key(&key) {
			return Err(NameGenError::InvalidConfig(format!("Corpus {key} already loaded")));
		}
		let names = io::read_lines(&filepath)?;
		info!("Loaded corpus {key} ({} names)", names.len());
		self.corpora.insert(key.clone(), names);
		Ok(key)
	}

	/// Returns the sorted list of loaded corpus names.
	pub fn corpus_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.corpora.keys().cloned().collect();
		names.sort();
		names
	}

	/// Returns the names of a loaded corpus.
	///
	/// # Errors
	/// Returns `UnknownCorpus` if no corpus has this name.
	pub fn corpus(&self, name: &str) -> Result<&[String]> {
		self.corpora
			.get(name)
			.map(Vec::as_slice)
			.ok_or_else(|| NameGenError::UnknownCorpus(name.to_owned()))
	}

	/// Builds a model of the given `order` from a loaded corpus.
	///
	/// # Errors
	/// Returns `UnknownCorpus` for an unknown name, or `InvalidConfig` if the
	/// model cannot be built (order 0, empty corpus).
	pub fn build_model(&self, name: &str, order: usize) -> Result<MarkovModel> {
		MarkovModel::new(order, self.corpus(name)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_corpus_is_reported() {
		let generator = Generator::default();
		assert!(generator.corpus_names().is_empty());
		assert!(matches!(generator.corpus("namesBoys"), Err(NameGenError::UnknownCorpus(_))));
		assert!(matches!(
			generator.build_model("namesBoys", 2),
			Err(NameGenError::UnknownCorpus(_))
		));
	}

	#[test]
	fn loading_the_same_corpus_twice_fails() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("namesGirls.txt");
		std::fs::write(&path, "Ada\nGrace\n").unwrap();

		let mut generator = Generator::default();
		assert_eq!(generator.load_corpus(&path).unwrap(), "namesGirls");
		assert!(matches!(generator.load_corpus(&path), Err(NameGenError::InvalidConfig(_))));
	}

	#[test]
	fn missing_directory_is_rejected() {
		assert!(matches!(
			Generator::new("this/directory/does/not/exist"),
			Err(NameGenError::InvalidConfig(_))
		));
	}
}
