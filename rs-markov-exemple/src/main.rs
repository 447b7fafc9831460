use std::path::PathBuf;

use clap::Parser;
use log::info;

use rs_markov_core::io::model_path_for;
use rs_markov_core::{Chain, Direction, GenerationInput, Seed};

/// Trains a chain on a text corpus, saves it, reloads it and prints sentences.
#[derive(Parser)]
struct Args {
    /// Text corpus to learn from (sentences separated by '.')
    #[arg(default_value = "./data/corpus.txt")]
    corpus: PathBuf,

    /// Number of real words grouped into one token
    #[arg(long, default_value = "1")]
    order: usize,

    /// Maximum number of words per generated sentence
    #[arg(long, default_value = "20")]
    max_words: usize,

    /// Number of sentences to generate
    #[arg(long, default_value = "10")]
    count: usize,

    /// Optional sentence used to seed the generation
    #[arg(long)]
    seed: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Learn from the corpus with the requested token order
    let mut chain = Chain::new();
    chain.set_order(args.order);
    chain.add_text_file(&args.corpus)?;
    println!("Learned {} distinct words", chain.word_count());

    // Save next to the corpus ("data/corpus.txt" -> "data/corpus.chain")
    // then reload, as a real application would on its next start
    let chain_path = model_path_for(&args.corpus, "chain")?;
    chain.save(&chain_path)?;
    let mut chain = Chain::from_file(&chain_path)?;
    chain.set_order(args.order);
    info!("reloaded chain from {}", chain_path.display());

    // 'Free' walks forward from the start of a sentence,
    // 'Sentence' grows both ways around a known word of the seed
    let seed = match args.seed {
        Some(sentence) => Seed::Sentence(sentence),
        None => Seed::Free,
    };
    let input = GenerationInput::new(args.max_words)?.with_seed(seed);

    for i in 0..args.count {
        println!("Generated sentence {}: {}", i + 1, chain.generate(&input));
    }

    // Words can also seed a one-directional walk: here, how sentences end
    if let Some(word) = chain.words().find(|w| !chain.is_sentinel(w.id())) {
        let ending = chain.generate_string_around(Direction::Postfix, word.id(), args.max_words);
        println!("Ending after '{}': {}", word.text(), ending);
    }

    Ok(())
}
