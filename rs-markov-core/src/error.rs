use thiserror::Error;

/// Errors surfaced by the chain's persistence and configuration APIs.
///
/// Malformed model files are not errors: they produce a partial
/// [`LoadReport`](crate::model::codec::LoadReport) instead.
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Snapshot error: {0}")]
	Snapshot(#[from] postcard::Error),

	#[error("Invalid input: {0}")]
	InvalidInput(String),
}
