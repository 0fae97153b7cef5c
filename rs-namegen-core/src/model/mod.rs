//! Top-level module for the Markov name generation system.
//!
//! This module provides:
//! - A frequency-weighted character sampler (`WeightedCharSampler`)
//! - The N-order character model (`MarkovModel`)
//! - Generation parameters (`GenerationInput`)
//! - A library of named training corpora (`Generator`)

/// Library of training corpora loaded from a directory.
///
/// Maps a corpus name (file stem) to its names and builds models on demand.
pub mod generator;

/// N-order character Markov model (`order >= 1`).
///
/// Handles name normalization, context windowing, and constrained
/// generation of novel names.
pub mod markov_model;

/// Weighted character sampler attached to each model context.
///
/// Stores one entry per observation and draws uniformly among them.
pub mod sampler;

/// Immutable generation parameters.
///
/// Stores the requested count, the length window and the optional
/// attempt cap.
pub mod generation_input;
