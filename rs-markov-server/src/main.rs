use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{delete, get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{info, warn};

use serde::Deserialize;
use rs_markov_core::io::{list_models, resolve_data_dir};
use rs_markov_core::{Chain, GenerationInput, Seed};

/// Extension of the text model files served from the data directory.
const MODEL_EXTENSION: &str = "chain";

/// Command line configuration of the server
#[derive(Parser)]
struct Args {
	/// Directory holding `.chain` model files
	#[arg(long, default_value = "./data")]
	data: String,

	/// Address to bind
	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	/// Port to bind
	#[arg(long, default_value = "5000")]
	port: u16,

	/// Model loaded at startup (name without extension)
	#[arg(long)]
	model: Option<String>,
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_words: Option<usize>,
	seed: Option<String> // -> none, sentence:<text> or word:<text>
}

#[derive(Deserialize)]
struct ModelQuery {
	name: Option<String>
}

/// The chain is single-owner: every handler goes through this mutex.
struct SharedData {
	chain: Chain,
	data_dir: PathBuf,
}

impl GenerateParams {
	/// Determines the seed strategy for sentence generation.
	fn seed(&self) -> Result<Seed, String> {
		match &self.seed {
			None => Ok(Seed::Free),
			Some(s) if s.to_lowercase() == "none" => Ok(Seed::Free),
			Some(s) if s.to_lowercase().starts_with("sentence:") => {
				let value = &s["sentence:".len()..];
				if value.trim().is_empty() {
					Err("Sentence seed cannot be empty".into())
				} else {
					Ok(Seed::Sentence(value.to_owned()))
				}
			}
			Some(s) if s.to_lowercase().starts_with("word:") => {
				let value = &s["word:".len()..];
				if value.is_empty() {
					Err("Word seed cannot be empty".into())
				} else {
					Ok(Seed::Word(value.to_owned()))
				}
			}
			Some(_) => Err("Seed must start with 'sentence:' or 'word:' or be 'none'".into()),
		}
	}
}

impl ModelQuery {
	/// Returns the model name if it is a plain file stem.
	fn name(&self) -> Result<&str, String> {
		match &self.name {
			Some(s) if !s.trim().is_empty() => {
				let name = s.trim();
				if name.contains(['/', '\\']) || name.starts_with('.') {
					Err("Invalid model name".into())
				} else {
					Ok(name)
				}
			}
			_ => Err("Missing or empty model name".into()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sentence from the current chain based on query parameters.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = match query.seed() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};
	let input = match GenerationInput::new(query.max_words.unwrap_or(20)) {
		Ok(input) => input.with_seed(seed),
		Err(e) => return HttpResponse::BadRequest().body(e.to_string())
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	HttpResponse::Ok().body(shared_data.chain.generate(&input))
}

/// HTTP PUT endpoint `/v1/train`
///
/// Adds the raw request body to the corpus.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	shared_data.chain.add_text(&body);
	HttpResponse::Ok().body(format!("{} words", shared_data.chain.word_count()))
}

#[get("/v1/models")]
async fn get_models(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	match list_models(&data_dir, MODEL_EXTENSION) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models")
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().body(format!("words: {}\norder: {}", shared_data.chain.word_count(), shared_data.chain.order()))
}

/// HTTP PUT endpoint `/v1/load`
///
/// Replaces the current chain with `<data>/<name>.chain`. A missing file
/// leaves the current chain untouched; a damaged one loads partially.
#[put("/v1/load")]
async fn put_load(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let name = match query.name() {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let path = shared_data.data_dir.join(format!("{}.{}", name, MODEL_EXTENSION));
	match shared_data.chain.load(&path) {
		Ok(report) if report.complete => HttpResponse::Ok().body(format!("Loaded {} words", report.header_words)),
		Ok(report) => HttpResponse::Ok().body(format!(
			"Partially loaded {} words ({} with links)",
			report.header_words, report.linked_words
		)),
		Err(e) => HttpResponse::NotFound().body(format!("Failed to load model: {e}")),
	}
}

#[put("/v1/save")]
async fn put_save(data: web::Data<Mutex<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let name = match query.name() {
		Ok(n) => n,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let path = shared_data.data_dir.join(format!("{}.{}", name, MODEL_EXTENSION));
	match shared_data.chain.save(&path) {
		Ok(()) => HttpResponse::Ok().body("Model saved successfully"),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to save model: {e}")),
	}
}

#[delete("/v1/chain")]
async fn delete_chain(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	shared_data.chain.clear();
	HttpResponse::Ok().body("Chain cleared")
}

/// Main entry point for the server.
///
/// Optionally loads a model, wraps the chain in a `Mutex` and starts an
/// Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();
	let args = Args::parse();

	let data_dir = resolve_data_dir(&args.data);
	let mut chain = Chain::new();
	if let Some(name) = &args.model {
		let path = data_dir.join(format!("{}.{}", name, MODEL_EXTENSION));
		if let Err(e) = chain.load(&path) {
			warn!("could not load {}: {}", path.display(), e);
		}
	}

	let shared_data = SharedData { chain, data_dir };
	let shared_chain = web::Data::new(Mutex::new(shared_data));

	info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_chain.clone())
			.service(get_generated)
			.service(put_train)
			.service(get_models)
			.service(get_stats)
			.service(put_load)
			.service(put_save)
			.service(delete_chain)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await
}
