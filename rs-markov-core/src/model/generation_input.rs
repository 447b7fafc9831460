use crate::error::ChainError;

/// Directions in which a sentence grows around its seed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
	/// Walk backward only, toward the start sentinel.
	Prefix,
	/// Walk forward only, toward the end sentinel.
	Postfix,
	/// Walk both ways.
	Both,
}

impl Direction {
	pub fn walks_prefix(self) -> bool {
		matches!(self, Direction::Prefix | Direction::Both)
	}

	pub fn walks_postfix(self) -> bool {
		matches!(self, Direction::Postfix | Direction::Both)
	}
}

/// Strategy used to select the seed word of a generated sentence.
///
/// # Variants
/// - `Free`: start from the start sentinel and walk forward only.
/// - `Sentence(String)`: tokenize the sentence, pick one of its words
///   known to the chain, and grow both ways around it.
/// - `Word(String)`: use this exact dictionary word as the seed, walking
///   in the input's `direction`. Unknown words fall back to the start
///   sentinel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
	Free,
	Sentence(String),
	Word(String),
}

/// Input parameters for one generation request.
///
/// # Invariants
/// - `max_words` is at least 1
pub struct GenerationInput {
	/// Word budget shared by both walking directions.
	max_words: usize,

	/// Only used with `Seed::Word`.
	pub direction: Direction,

	pub seed: Seed,
}

impl GenerationInput {
	/// Creates an input producing a free sentence of at most `max_words` words.
	///
	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn new(max_words: usize) -> Result<Self, ChainError> {
		let mut input = Self {
			max_words: 1,
			direction: Direction::Both,
			seed: Seed::Free,
		};
		input.set_max_words(max_words)?;
		Ok(input)
	}

	pub fn max_words(&self) -> usize {
		self.max_words
	}

	/// Sets the word budget.
	///
	/// # Errors
	/// Returns an error if `max_words` is 0.
	pub fn set_max_words(&mut self, max_words: usize) -> Result<(), ChainError> {
		if max_words == 0 {
			return Err(ChainError::InvalidInput("max_words must be >= 1".to_owned()));
		}
		self.max_words = max_words;
		Ok(())
	}

	pub fn with_seed(mut self, seed: Seed) -> Self {
		self.seed = seed;
		self
	}

	pub fn with_direction(mut self, direction: Direction) -> Self {
		self.direction = direction;
		self
	}
}
