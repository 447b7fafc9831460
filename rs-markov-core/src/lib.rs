//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - A word-adjacency graph built from a corpus of sentences
//! - Frequency-weighted random walks generating new sentences
//! - A deterministic text file format, plus a binary snapshot
//! - The tokenizer used to turn sentences into words
//!
//! File helpers are kept internal except the few used by the binaries.

/// Chain, words, codec and generation parameters.
pub mod model;

/// Sentence splitting and word tokenization.
pub mod tokenizer;

/// Error type shared by the public API.
pub mod error;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use error::ChainError;
pub use model::chain::Chain;
pub use model::codec::LoadReport;
pub use model::generation_input::{Direction, GenerationInput, Seed};
pub use model::word::{Word, WordId, WordLink};
