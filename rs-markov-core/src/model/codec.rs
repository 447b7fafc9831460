//! Line-oriented text format of a chain.
//!
//! ```text
//! <word text>          ┐ header: one pair per word,
//! <word id>            ┘ in lexical text order
//! ...
//!                        blank line
//! <word text>          ┐ body: one block per word,
//! <occurrences>        │ same order
//! <neighbor text>      │ ┐
//! <postfix count>      │ │ zero or more link groups,
//! <prefix count>       │ ┘ in neighbor id order
//!                      ┘ blank line
//! ```
//!
//! Output is deterministic, so saving a reloaded chain reproduces the
//! same file byte for byte.

use std::io::{self, BufRead, Write};

use super::chain::Chain;
use super::word::{WordId, WordLink};

/// Outcome of parsing a model file.
///
/// Parsing never fails hard: it stops at the first line that does not
/// match the expected grammar and keeps whatever was rebuilt so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	/// Words created from the header.
	pub header_words: usize,
	/// Body blocks fully parsed.
	pub linked_words: usize,
	/// `false` if parsing stopped early on truncated or malformed input.
	pub complete: bool,
}

/// Writes `chain` in the text format.
pub fn serialize<W: Write>(chain: &Chain, writer: &mut W) -> io::Result<()> {
	for word in chain.words() {
		writeln!(writer, "{}", word.text())?;
		writeln!(writer, "{}", word.id())?;
	}
	writeln!(writer)?;

	for word in chain.words() {
		writeln!(writer, "{}", word.text())?;
		writeln!(writer, "{}", word.occurrences())?;

		for (neighbor, link) in word.links() {
			let text = match chain.word_by_id(neighbor) {
				Some(neighbor) if !neighbor.text().is_empty() => neighbor.text(),
				_ => continue,
			};
			writeln!(writer, "{}", text)?;
			writeln!(writer, "{}", link.postfix_occurrences)?;
			writeln!(writer, "{}", link.prefix_occurrences)?;
		}
		writeln!(writer)?;
	}

	Ok(())
}

/// Replaces the content of `chain` with the model read from `reader`.
///
/// Words are first created from the header with their stored ids, then
/// the body restores occurrence counts and links, resolving neighbors by
/// text. The sentinels are rebound afterwards (and recreated if the
/// input lacked them), so the chain is always usable.
///
/// A read error (such as invalid UTF-8) is treated as the end of input.
pub fn unserialize<R: BufRead>(chain: &mut Chain, reader: R) -> LoadReport {
	let mut report = LoadReport::default();
	let mut lines = reader.lines().map_while(Result::ok);

	chain.reset_words();
	let header_complete = read_header(chain, &mut lines, &mut report);
	report.complete = header_complete && read_body(chain, &mut lines, &mut report);
	chain.init_terminators();

	report
}

/// Reads `text`/`id` pairs until the blank separator line.
///
/// Returns `false` if the header is truncated, an id does not parse, or
/// a pair repeats a text or id already read or carries an id above
/// [`MAX_WORD_ID`](super::chain::MAX_WORD_ID).
fn read_header<I>(chain: &mut Chain, lines: &mut I, report: &mut LoadReport) -> bool
where
	I: Iterator<Item = String>,
{
	loop {
		let Some(text) = lines.next() else { return false };
		if text.is_empty() {
			return true;
		}
		let Some(id) = parse_count(lines.next()) else { return false };

		if !chain.insert_word_with_id(&text, id) {
			return false;
		}
		report.header_words += 1;
	}
}

/// Reads word blocks until the end of input.
///
/// Returns `false` as soon as a block names an unknown word, holds a
/// count that does not parse, or is cut in the middle of a link group.
/// The links read before the failure are kept.
fn read_body<I>(chain: &mut Chain, lines: &mut I, report: &mut LoadReport) -> bool
where
	I: Iterator<Item = String>,
{
	while let Some(text) = lines.next() {
		if text.is_empty() {
			continue;
		}
		let Some(id) = chain.id_of(&text) else { return false };
		let Some(occurrences) = parse_count(lines.next()) else { return false };

		let mut links: Vec<(WordId, WordLink)> = Vec::new();
		let mut valid = true;
		// A missing final blank line simply ends the block.
		while let Some(neighbor) = lines.next() {
			if neighbor.is_empty() {
				break;
			}
			let postfix = parse_count(lines.next());
			let prefix = parse_count(lines.next());
			match (chain.id_of(&neighbor), postfix, prefix) {
				(Some(neighbor), Some(postfix_occurrences), Some(prefix_occurrences)) => {
					links.push((neighbor, WordLink { prefix_occurrences, postfix_occurrences }));
				}
				_ => {
					valid = false;
					break;
				}
			}
		}

		if let Some(word) = chain.word_mut(id) {
			word.set_occurrences(occurrences);
			for (neighbor, link) in links {
				word.set_link(neighbor, link);
			}
		}

		if !valid {
			return false;
		}
		report.linked_words += 1;
	}

	true
}

fn parse_count(line: Option<String>) -> Option<usize> {
	line?.trim().parse().ok()
}
