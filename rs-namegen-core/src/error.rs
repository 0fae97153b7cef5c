//! Error types for the name generation library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for model construction, generation and corpus loading.
#[derive(Error, Debug)]
pub enum NameGenError {
	/// Invalid model order, empty corpus or inconsistent generation input
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// A capped generation ran out of attempts before collecting enough names
	#[error("Infeasible constraints: accepted {accepted} of {requested} names after {attempts} attempts")]
	InfeasibleConstraints {
		requested: usize,
		accepted: usize,
		attempts: usize,
	},

	/// No corpus loaded under this name
	#[error("Unknown corpus: {0}")]
	UnknownCorpus(String),

	/// I/O error with file context
	#[error("I/O error for {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Result type alias for name generation operations.
pub type Result<T> = std::result::Result<T, NameGenError>;
