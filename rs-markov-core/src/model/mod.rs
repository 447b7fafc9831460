//! Word-adjacency Markov chain model.
//!
//! This module provides:
//! - Graph nodes and weighted links (`Word`, `WordLink`)
//! - The chain itself: ingestion, generation and merging (`Chain`)
//! - The text persistence format (`codec`)
//! - Generation parameters (`GenerationInput`)

/// The word graph and its sentence generation walks.
///
/// Owns every word, the start/end sentinels and the token order.
pub mod chain;

/// Line-oriented text codec used by `Chain::save` and `Chain::load`.
///
/// Parsing is best-effort and reports how much was recovered.
pub mod codec;

/// Generation parameters: word budget, seed strategy and direction.
pub mod generation_input;

/// A single node of the graph and its frequency-weighted links.
///
/// Holds the weighted random sampling used by the generation walk.
pub mod word;
