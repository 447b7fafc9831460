use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::generation_input::Direction;

/// Identifier of a word inside its owning chain.
///
/// Ids are only meaningful for the chain that assigned them.
pub type WordId = usize;

/// Directional weights between a word and one of its neighbors.
///
/// A link is created with both counters at zero the first time a
/// neighbor is observed, then exactly one counter is incremented per
/// observation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WordLink {
	/// How many times the neighbor was observed right before the word.
	pub prefix_occurrences: usize,
	/// How many times the neighbor was observed right after the word.
	pub postfix_occurrences: usize,
}

/// A node of the word graph.
///
/// A `Word` never owns its neighbors: links are keyed by the neighbor's
/// [`WordId`] and resolved through the owning chain.
///
/// # Invariants
/// - `text` is never empty
/// - For words built by ingestion, `occurrences` equals both the sum of
///   postfix weights and the sum of prefix weights over `links`
///   (sentinels excepted on the side they never have)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Word {
	id: WordId,
	text: String,
	occurrences: usize,
	/// Neighbors in id order. Sampling walks them in this order.
	links: BTreeMap<WordId, WordLink>,
}

impl Word {
	pub(crate) fn new(id: WordId, text: &str) -> Self {
		Self {
			id,
			text: text.to_owned(),
			occurrences: 0,
			links: BTreeMap::new(),
		}
	}

	pub fn id(&self) -> WordId {
		self.id
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	/// Total number of times this word was observed in the corpus.
	pub fn occurrences(&self) -> usize {
		self.occurrences
	}

	/// Returns the link toward `neighbor`, if one was ever observed.
	pub fn link(&self, neighbor: WordId) -> Option<&WordLink> {
		self.links.get(&neighbor)
	}

	/// Iterates over `(neighbor id, link)` pairs in id order.
	pub fn links(&self) -> impl Iterator<Item = (WordId, &WordLink)> {
		self.links.iter().map(|(id, link)| (*id, link))
	}

	pub fn add_occurrence(&mut self) {
		self.occurrences += 1;
	}

	pub(crate) fn add_occurrences(&mut self, count: usize) {
		self.occurrences += count;
	}

	pub(crate) fn set_occurrences(&mut self, occurrences: usize) {
		self.occurrences = occurrences;
	}

	/// Records that `neighbor` followed this word once more.
	pub fn add_postfix(&mut self, neighbor: WordId) {
		self.links.entry(neighbor).or_default().postfix_occurrences += 1;
	}

	/// Records that `neighbor` preceded this word once more.
	pub fn add_prefix(&mut self, neighbor: WordId) {
		self.links.entry(neighbor).or_default().prefix_occurrences += 1;
	}

	/// Replaces (or inserts) a link with exact counts. Used when loading.
	pub(crate) fn set_link(&mut self, neighbor: WordId, link: WordLink) {
		self.links.insert(neighbor, link);
	}

	/// Adds both counters of `link` onto the link toward `neighbor`.
	pub(crate) fn merge_link(&mut self, neighbor: WordId, link: &WordLink) {
		let existing = self.links.entry(neighbor).or_default();
		existing.prefix_occurrences += link.prefix_occurrences;
		existing.postfix_occurrences += link.postfix_occurrences;
	}

	/// Picks a word observed after this one, weighted by frequency.
	///
	/// Returns `None` when the word has no links (the end sentinel).
	pub fn random_postfix<R: Rng>(&self, rng: &mut R) -> Option<WordId> {
		self.random_by_occurrences(rng, |link| link.postfix_occurrences)
	}

	/// Picks a word observed before this one, weighted by frequency.
	///
	/// Returns `None` when the word has no links (the start sentinel).
	pub fn random_prefix<R: Rng>(&self, rng: &mut R) -> Option<WordId> {
		self.random_by_occurrences(rng, |link| link.prefix_occurrences)
	}

	/// Picks a neighbor on the side(s) selected by `direction`.
	///
	/// With `Direction::Both`, each link weighs the sum of its two
	/// counters, so a neighbor seen on either side can be returned.
	pub fn random_neighbor<R: Rng>(&self, direction: Direction, rng: &mut R) -> Option<WordId> {
		match direction {
			Direction::Prefix => self.random_prefix(rng),
			Direction::Postfix => self.random_postfix(rng),
			Direction::Both => {
				let weight = |link: &WordLink| link.prefix_occurrences.saturating_add(link.postfix_occurrences);
				let total = self.links.values().fold(0usize, |sum, link| sum.saturating_add(weight(link)));
				self.random_by(rng, total, weight)
			}
		}
	}

	/// Weighted random choice among the links.
	fn random_by_occurrences<R, F>(&self, rng: &mut R, weight: F) -> Option<WordId>
	where
		R: Rng,
		F: Fn(&WordLink) -> usize,
	{
		self.random_by(rng, self.occurrences, weight)
	}

	/// Draws `r` in `[0, total)` then performs a cumulative subtraction
	/// over the links in id order: the first link whose weight exceeds the
	/// remainder wins. Each neighbor is therefore selected with
	/// probability `weight / total`.
	fn random_by<R, F>(&self, rng: &mut R, total: usize, weight: F) -> Option<WordId>
	where
		R: Rng,
		F: Fn(&WordLink) -> usize,
	{
		if self.links.is_empty() || total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (id, link) in &self.links {
			let w = weight(link);
			if w == 0 {
				continue;
			}
			if r < w {
				return Some(*id);
			}
			r -= w;
		}

		// Only reachable when `total` exceeds the summed weights, which
		// ingestion never produces.
		None
	}
}
