//! Utility functions

use crate::error::SolcIoError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// A regex that matches the release part of a build tagged compiler version
/// as follows: `v0.8.24+commit.e11b9ed9` => `0.8.24`
pub static RE_BUILD_TAGGED_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v(?P<version>.*?)\+").unwrap());

/// Returns the release from a build tagged compiler version:
/// `v0.8.24+commit.e11b9ed9` => `0.8.24`
///
/// Returns `None` if there is no `v...+` section in the input.
pub fn find_build_tagged_version(version: &str) -> Option<&str> {
    RE_BUILD_TAGGED_VERSION.captures(version)?.name("version").map(|m| m.as_str())
}

/// Returns a sorted list of the solidity files directly inside `dir`
///
/// NOTE: unlike a project source walk, this does not descend into sub directories
///
/// # Example
///
/// ```no_run
/// use solc_batch_solc::utils;
/// let sources = utils::source_files("./contracts/0xabc").unwrap();
/// ```
pub fn source_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, SolcIoError> {
    let dir = dir.as_ref();
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            let err = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed"));
            SolcIoError::new(err, path)
        })?;
        if entry.file_type().is_file() && is_sol_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Canonicalize the path, platform-agnostic.
///
/// On windows this avoids `\\?\` UNC prefixes.
pub fn canonicalize(path: impl AsRef<Path>) -> Result<PathBuf, SolcIoError> {
    let path = path.as_ref();
    dunce::canonicalize(path).map_err(|err| SolcIoError::new(err, path))
}

/// Creates `dir` and all of its parents, then returns its canonicalized path.
pub fn create_canonical_dir(dir: impl AsRef<Path>) -> Result<PathBuf, SolcIoError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|err| SolcIoError::new(err, dir))?;
    canonicalize(dir)
}

/// Whether the path has a `.sol` extension
pub fn is_sol_file(path: impl AsRef<Path>) -> bool {
    path.as_ref().extension().map(|ext| ext == "sol").unwrap_or_default()
}
