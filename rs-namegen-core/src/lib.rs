//! Markov-chain name generation library.
//!
//! This crate provides an N-order character Markov model that learns from a
//! list of example names and samples new, plausible-sounding ones:
//! - Frequency-weighted character sampling
//! - Context windowing with a boundary sentinel
//! - Constrained generation (length window, novelty, uniqueness)
//! - Loading of line-oriented training corpora
//!
//! Randomness is always injected by the caller, so generation is
//! reproducible with a seeded generator.

/// Markov model, sampler, generation input and corpus library.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (line loading, directory listing).
///
/// Not exposed
pub(crate) mod io;

pub use error::{NameGenError, Result};
