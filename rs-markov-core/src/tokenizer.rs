//! Sentence splitting and word tokenization.
//!
//! Both functions are pure: they never touch a chain and allocate only
//! the returned tokens.

/// Splits free text into sentences at each `.`.
///
/// The terminating period stays attached to its sentence. A trailing
/// piece without a period is still yielded.
///
/// Example:
/// `"The cat sat. The dog"` → `["The cat sat.", " The dog"]`
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
	text.split_inclusive('.')
}

/// Breaks a sentence into cleaned word tokens.
///
/// - Splits on Unicode whitespace
/// - Groups `order` consecutive words into one token (`0` behaves as `1`)
/// - Strips non-alphabetic characters from both ends of each token,
///   interior punctuation is preserved (`"don't"`, `"well-known"`)
/// - Drops tokens left empty by the cleaning step
///
/// Case is preserved.
pub fn tokenize(text: &str, order: usize) -> Vec<String> {
	let order = order.max(1);
	let words: Vec<&str> = text.split_whitespace().collect();

	words
		.chunks(order)
		.map(|group| group.join(" "))
		.filter_map(|token| {
			let cleaned = clean_token(&token);
			if cleaned.is_empty() { None } else { Some(cleaned.to_owned()) }
		})
		.collect()
}

/// Trims non-letter characters from both ends of a token.
fn clean_token(token: &str) -> &str {
	token.trim_matches(|c: char| !c.is_alphabetic())
}
