use solc_batch_solc::SolcError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("No contracts found in \"{}\"", .0.display())]
    NoSources(PathBuf),
    #[error("No metadata.json or inpage_meta.json found in \"{}\"", .0.display())]
    NoMetadata(PathBuf),
    #[error("Entry file \"{file}\" not found in \"{}\"", .dir.display())]
    EntryNotFound { dir: PathBuf, file: String },
    #[error("Malformed source record: {0}")]
    MalformedRecord(String),
    #[error("Malformed compiler version \"{0}\", expected `v<release>+<build>`")]
    MalformedVersion(String),
    #[error("Failed to parse \"{}\": {err}", .path.display())]
    Serde { path: PathBuf, err: serde_json::Error },
    #[error("\"{}\": {err}", .path.display())]
    Io { path: PathBuf, err: std::io::Error },
    #[error(transparent)]
    Solc(#[from] SolcError),
}

impl SourceError {
    pub(crate) fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        SourceError::Io { path: path.into(), err }
    }

    pub(crate) fn serde(err: serde_json::Error, path: impl Into<PathBuf>) -> Self {
        SourceError::Serde { path: path.into(), err }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        SourceError::MalformedRecord(msg.into())
    }

    /// Whether this error means the directory holds nothing that can be compiled
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SourceError::NoSources(_) | SourceError::NoMetadata(_) | SourceError::EntryNotFound { .. }
        )
    }
}
