use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, info, warn};
use rand::Rng;

use serde::{Deserialize, Serialize};
use crate::error::ChainError;
use crate::io::read_file;
use crate::tokenizer::{split_sentences, tokenize};
use super::codec::{self, LoadReport};
use super::generation_input::{Direction, GenerationInput, Seed};
use super::word::{Word, WordId};

/// Text key of the sentence start sentinel.
pub const START_TEXT: &str = "\u{11}";

/// Text key of the sentence end sentinel.
pub const END_TEXT: &str = "\u{12}";

/// Largest word id accepted from a model file or snapshot.
pub const MAX_WORD_ID: WordId = u32::MAX as WordId;

/// Number of random picks tried when looking for a known word in a seed sentence.
const SEED_ATTEMPTS: usize = 5;

/// A word-adjacency Markov chain built from a corpus of sentences.
///
/// The chain owns every [`Word`] in an arena keyed by [`WordId`]. Words
/// reference their neighbors by id only, so the graph may contain cycles
/// without any shared ownership.
///
/// # Responsibilities
/// - Ingest free text, sentence by sentence, into weighted word links
/// - Generate semi-random sentences by weighted walks over those links
/// - Persist and reload the whole graph (text codec or binary snapshot)
///
/// # Invariants
/// - The `start` and `end` sentinels are always present in the dictionary
/// - `start` never gets a prefix link, `end` never gets a postfix link
/// - No word has an empty text
/// - `next_id` is greater than every id in use
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	/// Word text to id, iterated in lexical order.
	dictionary: BTreeMap<String, WordId>,
	/// Arena owning every word.
	words: BTreeMap<WordId, Word>,
	start: WordId,
	end: WordId,
	/// Number of real words grouped into one token.
	order: usize,
	next_id: WordId,
}

impl Default for Chain {
	fn default() -> Self {
		Self::new()
	}
}

impl Chain {
	/// Creates an empty chain containing only the two sentinels.
	pub fn new() -> Self {
		let mut chain = Self {
			dictionary: BTreeMap::new(),
			words: BTreeMap::new(),
			start: 0,
			end: 0,
			order: 1,
			next_id: 1,
		};
		chain.init_terminators();
		chain
	}

	/// Creates a chain from a file written by [`Chain::save`].
	///
	/// # Errors
	/// Returns an error if the file cannot be opened. Malformed content
	/// is not an error, see [`Chain::load`].
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self, ChainError> {
		let mut chain = Self::new();
		chain.load(filepath)?;
		Ok(chain)
	}

	/// Points `start` and `end` at the sentinels found in the dictionary,
	/// creating any that is missing with an auto-incremented id.
	pub(crate) fn init_terminators(&mut self) {
		self.start = self.fetch_or_create(START_TEXT);
		self.end = self.fetch_or_create(END_TEXT);
	}

	/// Drops every word, sentinels included, and resets the id counter.
	///
	/// Leaves the chain without sentinels: callers must rebind them.
	pub(crate) fn reset_words(&mut self) {
		self.dictionary.clear();
		self.words.clear();
		self.next_id = 1;
	}

	/// Removes all words and reinitializes the sentinels.
	///
	/// The configured order is kept.
	pub fn clear(&mut self) {
		self.reset_words();
		self.init_terminators();
	}

	/// Returns the id of `text`, creating a new word if it is unknown.
	fn fetch_or_create(&mut self, text: &str) -> WordId {
		if let Some(id) = self.dictionary.get(text) {
			return *id;
		}
		let id = self.next_id;
		// Stored ids are capped at MAX_WORD_ID, so the counter cannot wrap.
		self.next_id = id.saturating_add(1);
		self.dictionary.insert(text.to_owned(), id);
		self.words.insert(id, Word::new(id, text));
		id
	}

	/// Inserts a word with an explicit id, as stored in a model file.
	///
	/// The id counter is moved past `id` so future words never collide.
	/// Returns `false` and leaves the chain unchanged when the text or the
	/// id is already taken, or when `id` exceeds [`MAX_WORD_ID`].
	pub(crate) fn insert_word_with_id(&mut self, text: &str, id: WordId) -> bool {
		if id > MAX_WORD_ID || self.dictionary.contains_key(text) || self.words.contains_key(&id) {
			return false;
		}

		self.dictionary.insert(text.to_owned(), id);
		self.words.insert(id, Word::new(id, text));
		if self.next_id <= id {
			self.next_id = id + 1;
		}
		true
	}

	/// Checks the arena against the text index after deserialization and
	/// moves `next_id` past every id in use.
	fn repair_after_snapshot(&mut self) -> Result<(), ChainError> {
		if self.dictionary.len() != self.words.len() {
			return Err(ChainError::InvalidInput("snapshot index and arena disagree".to_owned()));
		}
		for (text, id) in &self.dictionary {
			match self.words.get(id) {
				Some(word) if word.text() == text && word.id() == *id && *id <= MAX_WORD_ID => (),
				_ => return Err(ChainError::InvalidInput(format!("snapshot word {:?} is inconsistent", text))),
			}
		}

		if let Some(max_id) = self.words.keys().next_back() {
			if self.next_id <= *max_id {
				self.next_id = max_id + 1;
			}
		}
		self.init_terminators();
		Ok(())
	}

	pub(crate) fn word_mut(&mut self, id: WordId) -> Option<&mut Word> {
		self.words.get_mut(&id)
	}

	/// Sets the number of real words grouped into one token by future
	/// calls to [`Chain::add_text`]. `0` behaves as `1`.
	pub fn set_order(&mut self, order: usize) {
		self.order = order.max(1);
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the word with the given text, if it exists.
	pub fn word(&self, text: &str) -> Option<&Word> {
		self.id_of(text).and_then(|id| self.words.get(&id))
	}

	pub fn word_by_id(&self, id: WordId) -> Option<&Word> {
		self.words.get(&id)
	}

	pub fn id_of(&self, text: &str) -> Option<WordId> {
		self.dictionary.get(text).copied()
	}

	pub fn start_id(&self) -> WordId {
		self.start
	}

	pub fn end_id(&self) -> WordId {
		self.end
	}

	pub fn is_sentinel(&self, id: WordId) -> bool {
		id == self.start || id == self.end
	}

	/// Iterates over every word, sentinels included, in lexical text order.
	pub fn words(&self) -> impl Iterator<Item = &Word> {
		self.dictionary.values().filter_map(|id| self.words.get(id))
	}

	/// Number of real (non-sentinel) words.
	pub fn word_count(&self) -> usize {
		self.dictionary.values().filter(|id| !self.is_sentinel(**id)).count()
	}

	/// Returns `true` when the chain holds nothing but its sentinels.
	pub fn is_empty(&self) -> bool {
		self.word_count() == 0
	}

	/// Adds free text to the corpus.
	///
	/// The text is split into sentences at each `.` and every sentence
	/// yielding at least one token becomes a path
	/// `start → w1 → … → wn → end` in the graph. Counts accumulate across
	/// calls; nothing is ever removed.
	pub fn add_text(&mut self, text: &str) {
		let mut sentences = 0usize;
		let mut tokens_seen = 0usize;

		for sentence in split_sentences(text) {
			let tokens = tokenize(sentence, self.order);
			if tokens.is_empty() {
				continue;
			}
			tokens_seen += tokens.len();
			sentences += 1;
			self.add_tokens(&tokens);
		}

		debug!("ingested {} sentences ({} tokens), dictionary holds {} words", sentences, tokens_seen, self.dictionary.len());
	}

	/// Reads a whole text file and feeds it to [`Chain::add_text`].
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn add_text_file<P: AsRef<Path>>(&mut self, filepath: P) -> Result<(), ChainError> {
		let text = read_file(&filepath)?;
		info!("training on {}", filepath.as_ref().display());
		self.add_text(&text);
		Ok(())
	}

	/// Links one tokenized sentence into the graph.
	fn add_tokens(&mut self, tokens: &[String]) {
		let start = self.start;
		if let Some(word) = self.word_mut(start) {
			word.add_occurrence();
		}

		let mut previous = start;
		for token in tokens {
			let current = self.fetch_or_create(token);
			if let Some(word) = self.word_mut(current) {
				word.add_occurrence();
			}
			self.link(previous, current);
			previous = current;
		}

		if previous != start {
			let end = self.end;
			if let Some(word) = self.word_mut(end) {
				word.add_occurrence();
			}
			self.link(previous, end);
		}
	}

	/// Records `to` as a postfix of `from` and `from` as a prefix of `to`.
	fn link(&mut self, from: WordId, to: WordId) {
		if let Some(word) = self.word_mut(from) {
			word.add_postfix(to);
		}
		if let Some(word) = self.word_mut(to) {
			word.add_prefix(from);
		}
	}

	/// Generates a free sentence of at most `max_words` words.
	pub fn generate_string(&self, max_words: usize) -> String {
		self.generate_string_with_rng(max_words, &mut rand::rng())
	}

	pub fn generate_string_with_rng<R: Rng>(&self, max_words: usize, rng: &mut R) -> String {
		self.generate_string_around_with_rng(Direction::Postfix, self.start, max_words, rng)
	}

	/// Generates a sentence around a word picked from `seed`.
	///
	/// Up to five random words of the tokenized seed are tried against the
	/// dictionary; when none is known the walk starts from the start
	/// sentinel. The sentence grows in both directions.
	pub fn generate_string_from(&self, seed: &str, max_words: usize) -> String {
		self.generate_string_from_with_rng(seed, max_words, &mut rand::rng())
	}

	pub fn generate_string_from_with_rng<R: Rng>(&self, seed: &str, max_words: usize, rng: &mut R) -> String {
		let tokens = tokenize(seed, self.order);
		let mut seed_id = None;

		if !tokens.is_empty() {
			for _ in 0..SEED_ATTEMPTS {
				let candidate = &tokens[rng.random_range(0..tokens.len())];
				if let Some(id) = self.id_of(candidate) {
					seed_id = Some(id);
					break;
				}
			}
		}

		let seed_id = seed_id.unwrap_or(self.start);
		self.generate_string_around_with_rng(Direction::Both, seed_id, max_words, rng)
	}

	/// Generates a sentence growing from `seed` in the given direction(s).
	pub fn generate_string_around(&self, direction: Direction, seed: WordId, max_words: usize) -> String {
		self.generate_string_around_with_rng(direction, seed, max_words, &mut rand::rng())
	}

	/// Core generation walk.
	///
	/// A backward cursor prepends random prefixes until it reaches `start`,
	/// a forward cursor appends random postfixes until it reaches `end`.
	/// Each added word consumes one unit of `max_words`; in a round where
	/// both cursors move, both consume budget before the budget is checked
	/// again. A cursor whose word has no candidate stops immediately.
	///
	/// The seed itself does not consume budget.
	pub fn generate_string_around_with_rng<R: Rng>(&self, direction: Direction, seed: WordId, max_words: usize, rng: &mut R) -> String {
		let mut sequence: VecDeque<WordId> = VecDeque::new();
		sequence.push_back(seed);

		let mut backward = seed;
		let mut forward = seed;
		let mut start_reached = !direction.walks_prefix() || seed == self.start;
		let mut end_reached = !direction.walks_postfix() || seed == self.end;

		let mut count = 0usize;
		while count < max_words && !(start_reached && end_reached) {
			if !start_reached {
				match self.words.get(&backward).and_then(|word| word.random_prefix(rng)) {
					Some(id) => {
						sequence.push_front(id);
						count += 1;
						backward = id;
						start_reached = id == self.start;
					}
					None => start_reached = true,
				}
			}

			if !end_reached {
				match self.words.get(&forward).and_then(|word| word.random_postfix(rng)) {
					Some(id) => {
						sequence.push_back(id);
						count += 1;
						forward = id;
						end_reached = id == self.end;
					}
					None => end_reached = true,
				}
			}
		}

		// Duplicated boundaries are dropped by the rendering below.
		sequence.push_front(self.start);
		sequence.push_back(self.end);

		let sentence = self.render(&sequence);
		debug!("generated {} words from seed {}", count, seed);
		sentence
	}

	/// Joins word texts with single spaces, skipping the sentinels.
	fn render(&self, sequence: &VecDeque<WordId>) -> String {
		sequence
			.iter()
			.filter(|id| !self.is_sentinel(**id))
			.filter_map(|id| self.words.get(id))
			.map(Word::text)
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Generates a sentence according to `input`.
	pub fn generate(&self, input: &GenerationInput) -> String {
		self.generate_with_rng(input, &mut rand::rng())
	}

	pub fn generate_with_rng<R: Rng>(&self, input: &GenerationInput, rng: &mut R) -> String {
		match &input.seed {
			Seed::Free => self.generate_string_with_rng(input.max_words(), rng),
			Seed::Sentence(sentence) => self.generate_string_from_with_rng(sentence, input.max_words(), rng),
			Seed::Word(text) => {
				let seed = self.id_of(text).unwrap_or(self.start);
				self.generate_string_around_with_rng(input.direction, seed, input.max_words(), rng)
			}
		}
	}

	/// Merges another chain into this one.
	///
	/// Words are matched by text. Occurrence and link counts are summed;
	/// words unknown to `self` are created with fresh ids.
	pub fn merge(&mut self, other: &Self) {
		let mut mapping: HashMap<WordId, WordId> = HashMap::new();
		for (text, other_id) in &other.dictionary {
			mapping.insert(*other_id, self.fetch_or_create(text));
		}

		for (other_id, other_word) in &other.words {
			let Some(id) = mapping.get(other_id) else { continue };
			let Some(word) = self.words.get_mut(id) else { continue };

			word.add_occurrences(other_word.occurrences());
			for (neighbor, link) in other_word.links() {
				if let Some(neighbor) = mapping.get(&neighbor) {
					word.merge_link(*neighbor, link);
				}
			}
		}

		debug!("merged {} words, dictionary holds {} words", other.dictionary.len(), self.dictionary.len());
	}

	/// Replaces this chain with the one stored in `filepath`.
	///
	/// # Behavior
	/// - If the file cannot be opened, the chain is left untouched and an
	///   error is returned.
	/// - Otherwise the chain is cleared and rebuilt. Parsing stops at the
	///   first malformed line; the returned [`LoadReport`] tells how much
	///   was recovered.
	pub fn load<P: AsRef<Path>>(&mut self, filepath: P) -> Result<LoadReport, ChainError> {
		let file = File::open(&filepath)?;
		let report = codec::unserialize(self, BufReader::new(file));

		if report.complete {
			info!("loaded {} words from {}", report.header_words, filepath.as_ref().display());
		} else {
			warn!(
				"model file {} is truncated or malformed: {} words, {} link blocks recovered",
				filepath.as_ref().display(),
				report.header_words,
				report.linked_words
			);
		}
		Ok(report)
	}

	/// Writes the chain to `filepath`, overwriting it.
	///
	/// # Errors
	/// Returns an error if the file cannot be created or written. The
	/// in-memory chain is never affected.
	pub fn save<P: AsRef<Path>>(&self, filepath: P) -> Result<(), ChainError> {
		let file = File::create(&filepath)?;
		let mut writer = BufWriter::new(file);
		codec::serialize(self, &mut writer)?;
		writer.flush()?;

		info!("saved {} words to {}", self.dictionary.len(), filepath.as_ref().display());
		Ok(())
	}

	/// Writes a compact binary snapshot of the chain using `postcard`.
	pub fn save_snapshot<P: AsRef<Path>>(&self, filepath: P) -> Result<(), ChainError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(filepath, bytes)?;
		Ok(())
	}

	/// Reads a snapshot written by [`Chain::save_snapshot`].
	///
	/// Unlike the text format, a damaged or inconsistent snapshot is
	/// rejected as a whole.
	pub fn load_snapshot<P: AsRef<Path>>(filepath: P) -> Result<Self, ChainError> {
		let bytes = std::fs::read(filepath)?;
		let mut chain: Self = postcard::from_bytes(&bytes)?;
		chain.repair_after_snapshot()?;
		Ok(chain)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn cat_and_dog() -> Chain {
		let mut chain = Chain::new();
		chain.add_text("The cat sat. The dog ran.");
		chain
	}

	#[test]
	fn new_chain_has_only_sentinels() {
		let chain = Chain::new();
		assert!(chain.is_empty());
		assert_eq!(chain.words().count(), 2);
		assert_eq!(chain.word(START_TEXT).map(Word::id), Some(chain.start_id()));
		assert_eq!(chain.word(END_TEXT).map(Word::id), Some(chain.end_id()));
		assert_eq!(chain.order(), 1);
	}

	#[test]
	fn add_text_builds_the_graph() {
		let chain = cat_and_dog();
		assert_eq!(chain.word_count(), 5);

		let the = chain.word("The").unwrap();
		assert_eq!(the.occurrences(), 2);

		let start = chain.word_by_id(chain.start_id()).unwrap();
		assert_eq!(start.occurrences(), 2);
		assert_eq!(start.links().count(), 1);
		assert_eq!(start.link(the.id()).unwrap().postfix_occurrences, 2);

		let cat = chain.word("cat").unwrap();
		let dog = chain.word("dog").unwrap();
		assert_eq!(the.link(cat.id()).unwrap().postfix_occurrences, 1);
		assert_eq!(the.link(dog.id()).unwrap().postfix_occurrences, 1);
		assert_eq!(cat.link(the.id()).unwrap().prefix_occurrences, 1);

		let end = chain.word_by_id(chain.end_id()).unwrap();
		assert_eq!(end.occurrences(), 2);
		assert_eq!(end.link(chain.word("sat").unwrap().id()).unwrap().prefix_occurrences, 1);
		assert_eq!(end.link(chain.word("ran").unwrap().id()).unwrap().prefix_occurrences, 1);
	}

	#[test]
	fn case_is_preserved() {
		let mut chain = Chain::new();
		chain.add_text("The end. the end.");
		assert!(chain.word("The").is_some());
		assert!(chain.word("the").is_some());
		assert_eq!(chain.word("end").unwrap().occurrences(), 2);
	}

	#[test]
	fn occurrences_match_link_weights() {
		let mut chain = Chain::new();
		chain.add_text("a b a c. b a. c c c. a.");
		for word in chain.words() {
			let postfix: usize = word.links().map(|(_, l)| l.postfix_occurrences).sum();
			let prefix: usize = word.links().map(|(_, l)| l.prefix_occurrences).sum();
			if word.id() != chain.end_id() {
				assert_eq!(word.occurrences(), postfix, "postfix sum of {:?}", word.text());
			}
			if word.id() != chain.start_id() {
				assert_eq!(word.occurrences(), prefix, "prefix sum of {:?}", word.text());
			}
		}
	}

	#[test]
	fn empty_sentences_are_skipped() {
		let mut chain = Chain::new();
		chain.add_text("... !! .");
		assert!(chain.is_empty());
		assert_eq!(chain.word_by_id(chain.start_id()).unwrap().occurrences(), 0);
		assert_eq!(chain.word_by_id(chain.end_id()).unwrap().links().count(), 0);
	}

	#[test]
	fn trailing_sentence_without_period_is_kept() {
		let mut chain = Chain::new();
		chain.add_text("first one. second one");
		assert!(chain.word("second").is_some());
		assert_eq!(chain.word_by_id(chain.start_id()).unwrap().occurrences(), 2);
	}

	#[test]
	fn order_groups_tokens() {
		let mut chain = Chain::new();
		chain.set_order(2);
		chain.add_text("one two three four.");
		assert_eq!(chain.word_count(), 2);
		assert!(chain.word("one two").is_some());
		assert!(chain.word("three four").is_some());
	}

	#[test]
	fn free_generation_respects_budget() {
		let chain = cat_and_dog();
		let mut rng = StdRng::seed_from_u64(11);
		for _ in 0..100 {
			let sentence = chain.generate_string_with_rng(3, &mut rng);
			assert!(sentence == "The cat sat" || sentence == "The dog ran", "{}", sentence);
		}
		for _ in 0..100 {
			let sentence = chain.generate_string_with_rng(1, &mut rng);
			assert_eq!(sentence, "The");
		}
	}

	#[test]
	fn generation_never_emits_sentinels() {
		let mut chain = Chain::new();
		chain.add_text("One fish. Two fish. Red fish. Blue fish. Fish swim fast.");
		let mut rng = StdRng::seed_from_u64(5);
		for _ in 0..200 {
			let sentence = chain.generate_string_with_rng(20, &mut rng);
			assert!(!sentence.contains(START_TEXT) && !sentence.contains(END_TEXT));
			assert!(!sentence.starts_with(' ') && !sentence.ends_with(' '));
		}
	}

	#[test]
	fn generation_on_empty_chain_is_empty() {
		let chain = Chain::new();
		assert_eq!(chain.generate_string(10), "");
		assert_eq!(chain.generate_string_from("anything at all", 10), "");
	}

	#[test]
	fn seeded_generation_contains_the_seed() {
		let chain = cat_and_dog();
		let mut rng = StdRng::seed_from_u64(9);
		for _ in 0..50 {
			assert_eq!(chain.generate_string_from_with_rng("dog!", 10, &mut rng), "The dog ran");
		}
	}

	#[test]
	fn unknown_seed_falls_back_to_start() {
		let chain = cat_and_dog();
		let mut rng = StdRng::seed_from_u64(1);
		let sentence = chain.generate_string_from_with_rng("zebra", 10, &mut rng);
		assert!(sentence.starts_with("The "), "{}", sentence);
	}

	#[test]
	fn prefix_only_walk_stops_at_seed() {
		let chain = cat_and_dog();
		let sat = chain.word("sat").unwrap().id();
		let mut rng = StdRng::seed_from_u64(2);
		let sentence = chain.generate_string_around_with_rng(Direction::Prefix, sat, 10, &mut rng);
		assert!(sentence.ends_with(" sat"), "{}", sentence);
		assert!(sentence.starts_with("The "), "{}", sentence);
	}

	#[test]
	fn generate_dispatches_on_seed() {
		let chain = cat_and_dog();
		let mut rng = StdRng::seed_from_u64(4);
		let input = GenerationInput::new(10)
			.unwrap()
			.with_seed(Seed::Word("cat".to_owned()))
			.with_direction(Direction::Postfix);
		assert_eq!(chain.generate_with_rng(&input, &mut rng), "cat sat");
	}

	#[test]
	fn clear_resets_to_sentinels() {
		let mut chain = cat_and_dog();
		chain.set_order(3);
		chain.clear();
		let mut fresh = Chain::new();
		fresh.set_order(3);
		assert_eq!(chain, fresh);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = Chain::new();
		left.add_text("The cat sat.");
		let mut right = Chain::new();
		right.add_text("The dog sat.");
		left.merge(&right);

		let mut expected = Chain::new();
		expected.add_text("The cat sat. The dog sat.");

		for word in expected.words() {
			let merged = left.word(word.text()).unwrap();
			assert_eq!(merged.occurrences(), word.occurrences(), "{:?}", word.text());
			for (neighbor, link) in word.links() {
				let neighbor_text = expected.word_by_id(neighbor).unwrap().text();
				let merged_neighbor = left.id_of(neighbor_text).unwrap();
				assert_eq!(merged.link(merged_neighbor), Some(link));
			}
		}
	}

	#[test]
	fn explicit_ids_advance_the_counter() {
		let mut chain = Chain::new();
		assert!(chain.insert_word_with_id("late", 40));
		chain.add_text("fresh.");
		assert_eq!(chain.word("fresh").unwrap().id(), 41);
	}

	#[test]
	fn explicit_ids_never_evict_existing_words() {
		let mut chain = Chain::new();
		assert!(chain.insert_word_with_id("first", 10));
		assert!(!chain.insert_word_with_id("second", 10));
		assert!(!chain.insert_word_with_id("first", 11));
		assert!(!chain.insert_word_with_id("huge", usize::MAX));

		assert_eq!(chain.id_of("first"), Some(10));
		assert!(chain.word("second").is_none());
		assert!(chain.word("huge").is_none());
		assert_eq!(chain.word_count(), 1);
	}

	#[test]
	fn snapshot_with_stale_counter_keeps_ids_unique() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("stale.bin");

		let mut chain = cat_and_dog();
		chain.next_id = 1;
		std::fs::write(&path, postcard::to_stdvec(&chain).unwrap()).unwrap();

		let mut loaded = Chain::load_snapshot(&path).unwrap();
		let max_id = loaded.words().map(Word::id).max().unwrap();
		loaded.add_text("A bird flew.");

		let cat = loaded.word("cat").unwrap().id();
		assert_eq!(loaded.word_by_id(cat).unwrap().text(), "cat");
		assert!(loaded.word("bird").unwrap().id() > max_id);
		assert_eq!(loaded.words().count(), loaded.words.len());
	}

	#[test]
	fn inconsistent_snapshot_is_rejected() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("broken.bin");

		let mut chain = cat_and_dog();
		let cat = chain.id_of("cat").unwrap();
		chain.dictionary.insert("alias".to_owned(), cat);
		std::fs::write(&path, postcard::to_stdvec(&chain).unwrap()).unwrap();

		assert!(matches!(Chain::load_snapshot(&path), Err(ChainError::InvalidInput(_))));
	}
}
