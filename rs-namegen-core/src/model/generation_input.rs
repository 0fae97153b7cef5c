use serde::Serialize;

use crate::error::{NameGenError, Result};

/// Parameters for one generation call.
///
/// `GenerationInput` is an immutable value passed to
/// [`MarkovModel::generate_with`](super::markov_model::MarkovModel::generate_with).
/// It carries everything a run needs, so no state is shared between calls.
///
/// # Fields
/// - `count`: number of names to return
/// - `min_length` / `max_length`: inclusive length window, in characters
/// - `max_attempts`: optional cap on generated candidates
///
/// # Notes
/// - With `max_attempts == None` generation retries until `count` names are
///   accepted. If the corpus cannot produce that many distinct, novel names
///   inside the length window, the call never returns.
/// - The model does not call [`validate`](Self::validate); checking the
///   length window is left to the caller.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Number of names to produce.
	pub count: usize,

	/// Minimum accepted length (inclusive).
	pub min_length: usize,

	/// Maximum accepted length (inclusive).
	pub max_length: usize,

	/// Number of candidates to try before giving up. `None` means unbounded.
	pub max_attempts: Option<usize>,
}

impl GenerationInput {
	/// Creates an unbounded generation input.
	pub fn new(count: usize, min_length: usize, max_length: usize) -> Self {
		Self {
			count,
			min_length,
			max_length,
			max_attempts: None,
		}
	}

	/// Returns a copy that stops after `max_attempts` candidates.
	pub fn with_max_attempts(self, max_attempts: usize) -> Self {
		Self {
			max_attempts: Some(max_attempts),
			..self
		}
	}

	/// Returns `true` if a candidate of `length` characters fits the window.
	pub fn accepts_length(&self, length: usize) -> bool {
		length >= self.min_length && length <= self.max_length
	}

	/// Checks that the input describes a satisfiable request shape.
	///
	/// # Errors
	/// Returns `InvalidConfig` if `count` or `min_length` is zero, or if
	/// `max_length < min_length`.
	pub fn validate(&self) -> Result<()> {
		if self.count == 0 {
			return Err(NameGenError::InvalidConfig("count must be >= 1".to_owned()));
		}
		if self.min_length == 0 {
			return Err(NameGenError::InvalidConfig("min_length must be >= 1".to_owned()));
		}
		if self.max_length < self.min_length {
			return Err(NameGenError::InvalidConfig(format!(
				"max_length ({}) must be >= min_length ({})",
				self.max_length, self.min_length
			)));
		}
		Ok(())
	}
}
