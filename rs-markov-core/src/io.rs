use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Path of the model file saved next to a corpus.
///
/// Only the extension changes, so `data/corpus.txt` with `"chain"` gives
/// `data/corpus.chain`, and a corpus without extension simply gains one.
///
/// # Errors
/// Returns `InvalidInput` if `corpus` does not name a file.
pub fn model_path_for<P: AsRef<Path>>(corpus: P, extension: &str) -> io::Result<PathBuf> {
	let corpus = corpus.as_ref();
	if corpus.file_stem().is_none() {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("{} does not name a corpus file", corpus.display()),
		));
	}
	Ok(corpus.with_extension(extension))
}

/// Resolves the directory holding model files.
///
/// Trailing separators are dropped; an empty path or `.` means the
/// current working directory.
pub fn resolve_data_dir(input: &str) -> PathBuf {
	let trimmed = input.trim_end_matches(['/', '\\']);
	match trimmed {
		"" if input.starts_with('/') => PathBuf::from("/"),
		"" | "." => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		dir => PathBuf::from(dir),
	}
}

/// Lists the names (without extension) of files with a given extension
/// in a directory, sorted.
pub fn list_models<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut names = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(stem) = path.file_stem() {
				names.push(stem.to_string_lossy().to_string());
			}
		}
	}

	names.sort();
	Ok(names)
}
