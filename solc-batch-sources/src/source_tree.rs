use crate::{Result, SourceError};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceTreeEntry {
    pub path: PathBuf,
    pub contents: String,
}

impl SourceTreeEntry {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self { path: path.into(), contents: contents.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceTree {
    pub entries: Vec<SourceTreeEntry>,
}

impl SourceTree {
    /// Flattens the source tree into the provided directory.
    ///
    /// Every entry is written under the base name of its path, directory components are dropped,
    /// so nothing is ever written outside of `dir`. Entries sharing a base name overwrite each
    /// other in order. Returns the written file names.
    pub fn write_flat_to(&self, dir: &Path) -> Result<Vec<String>> {
        create_dir_all(dir).map_err(|err| SourceError::io(err, dir))?;
        let mut written = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let name = base_name(&entry.path)?;
            let joined = dir.join(&name);
            trace!(source = %entry.path.display(), file = %joined.display(), "writing source");
            std::fs::write(&joined, &entry.contents).map_err(|err| SourceError::io(err, joined))?;
            written.push(name);
        }
        Ok(written)
    }
}

/// Returns the file name component of a source path, `contracts/token/Token.sol` => `Token.sol`
fn base_name(path: &Path) -> Result<String> {
    path.file_name().and_then(|name| name.to_str()).map(str::to_string).ok_or_else(|| {
        SourceError::malformed(format!("source path \"{}\" has no file name", path.display()))
    })
}
