use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::error::{NameGenError, Result};

/// Reads a text file and returns its non-blank lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Lines that are empty after trimming are dropped
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let contents = fs::read_to_string(path).map_err(|source| NameGenError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(contents
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_owned)
		.collect())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/namesBoys.txt"` → `"namesBoys"`
/// - `"namesBoys.txt"` → `"namesBoys"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let path = input_path.as_ref();
	let stem = path
		.file_stem()
		.ok_or_else(|| NameGenError::InvalidConfig(format!("Path has no filename: {}", path.display())))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns full paths, sorted so loading order does not depend on the
/// file system.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	let io_err = |source: std::io::Error| NameGenError::Io { path: dir.to_path_buf(), source };

	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(io_err)? {
		let path = entry.map_err(io_err)?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}
	files.sort();

	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn read_lines_drops_blank_lines() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "Anna\n\n  \r\nBella\r\nCora").unwrap();

		let lines = read_lines(file.path()).unwrap();
		assert_eq!(lines, vec!["Anna", "Bella", "Cora"]);
	}

	#[test]
	fn read_lines_reports_missing_file() {
		let err = read_lines("does/not/exist.txt").unwrap_err();
		assert!(matches!(err, NameGenError::Io { .. }));
	}

	#[test]
	fn get_filename_strips_directory_and_extension() {
		assert_eq!(get_filename("./data/namesGirls.txt").unwrap(), "namesGirls");
		assert_eq!(get_filename("namesBoys.txt").unwrap(), "namesBoys");
	}

	#[test]
	fn list_files_filters_by_extension() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.txt"), "x").unwrap();
		fs::write(dir.path().join("a.txt"), "x").unwrap();
		fs::write(dir.path().join("notes.md"), "x").unwrap();

		let files = list_files(dir.path(), "txt").unwrap();
		let names: Vec<_> = files.iter().map(|p| get_filename(p).unwrap()).collect();
		assert_eq!(names, vec!["a", "b"]);
	}
}
