use std::fs;

use rs_markov_core::{Chain, ChainError};

const CORPUS: &str = "The quick brown fox jumps over the lazy dog. \
	The dog sleeps. A fox runs, and the dog barks! \
	Nothing else happens... The end.";

fn trained_chain() -> Chain {
	let mut chain = Chain::new();
	chain.add_text(CORPUS);
	chain
}

#[test]
fn save_then_load_reproduces_the_chain() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.chain");

	let chain = trained_chain();
	chain.save(&path).unwrap();

	let mut loaded = Chain::new();
	let report = loaded.load(&path).unwrap();

	assert!(report.complete);
	assert_eq!(report.header_words, chain.words().count());
	assert_eq!(loaded, chain);
	for word in chain.words() {
		let other = loaded.word(word.text()).unwrap();
		assert_eq!(other.id(), word.id());
		assert_eq!(other.occurrences(), word.occurrences());
		assert_eq!(other.links().collect::<Vec<_>>(), word.links().collect::<Vec<_>>());
	}
}

#[test]
fn resaving_is_byte_identical() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("first.chain");
	let second = dir.path().join("second.chain");

	trained_chain().save(&first).unwrap();
	Chain::from_file(&first).unwrap().save(&second).unwrap();

	assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn loaded_chain_keeps_growing_without_id_collisions() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.chain");
	trained_chain().save(&path).unwrap();

	let mut chain = Chain::from_file(&path).unwrap();
	let max_id = chain.words().map(|w| w.id()).max().unwrap();
	chain.add_text("Zebras gallop.");

	let zebras = chain.word("Zebras").unwrap().id();
	let gallop = chain.word("gallop").unwrap().id();
	assert!(zebras > max_id && gallop > zebras);
}

#[test]
fn missing_file_leaves_chain_untouched() {
	let dir = tempfile::tempdir().unwrap();
	let mut chain = Chain::new();
	let fresh = Chain::new();

	let result = chain.load(dir.path().join("missing.chain"));

	assert!(matches!(result, Err(ChainError::Io(_))));
	assert_eq!(chain, fresh);

	let mut trained = trained_chain();
	let before = trained.clone();
	assert!(trained.load(dir.path().join("missing.chain")).is_err());
	assert_eq!(trained, before);
}

#[test]
fn unwritable_destination_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let chain = trained_chain();
	let before = chain.clone();

	let result = chain.save(dir.path().join("no_such_dir").join("corpus.chain"));

	assert!(matches!(result, Err(ChainError::Io(_))));
	assert_eq!(chain, before);
}

#[test]
fn truncated_file_loads_partially() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.chain");
	trained_chain().save(&path).unwrap();

	let bytes = fs::read(&path).unwrap();
	fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

	let mut chain = Chain::new();
	let report = chain.load(&path).unwrap();

	assert!(!report.complete);
	assert!(report.header_words > 0);
	// Still usable after a partial load.
	chain.add_text("Recovery works.");
	assert!(chain.word("Recovery").is_some());
	chain.generate_string(10);
}

#[test]
fn snapshot_round_trip() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.bin");

	let chain = trained_chain();
	chain.save_snapshot(&path).unwrap();

	assert_eq!(Chain::load_snapshot(&path).unwrap(), chain);
}

#[test]
fn corrupt_snapshot_is_rejected() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.bin");
	fs::write(&path, [0xff, 0xff, 0xff]).unwrap();

	assert!(matches!(Chain::load_snapshot(&path), Err(ChainError::Snapshot(_))));
}

#[test]
fn training_from_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("corpus.txt");
	fs::write(&path, CORPUS).unwrap();

	let mut chain = Chain::new();
	chain.add_text_file(&path).unwrap();

	assert_eq!(chain, trained_chain());
	assert!(chain.add_text_file(dir.path().join("missing.txt")).is_err());
}
