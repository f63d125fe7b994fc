//! Scraped source records and the metadata files written next to materialized sources.

use crate::{
    utils::{deserialize_stringified_source_code, read_json},
    Result, SourceError,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};

/// File name of the normalized record written by extraction
pub const INPAGE_META_FILENAME: &str = "inpage_meta.json";

/// File name of pre-existing project metadata
pub const METADATA_FILENAME: &str = "metadata.json";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCodeEntry {
    pub content: String,
}

impl<T: Into<String>> From<T> for SourceCodeEntry {
    fn from(s: T) -> Self {
        Self { content: s.into() }
    }
}

/// The scraped record's SourceCode field.
///
/// The shape is decided once when the record is parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceCode {
    /// Standard json input shape with path mapped sources.
    Bundle {
        /// Programming language of the sources.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
        /// Source path => source code
        sources: BTreeMap<String, SourceCodeEntry>,
        /// Compiler settings the contract was verified with.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        settings: Option<serde_json::Value>,
    },
    /// Path mapped sources without the standard json envelope.
    Files(BTreeMap<String, SourceCodeEntry>),
    /// Contains only the source code.
    Flat(String),
}

impl SourceCode {
    /// Returns the path mapped sources, `None` for a flat source.
    pub fn files(&self) -> Option<&BTreeMap<String, SourceCodeEntry>> {
        match self {
            Self::Bundle { sources, .. } | Self::Files(sources) => Some(sources),
            Self::Flat(_) => None,
        }
    }

    /// Whether this is a single flat source
    pub fn is_flat(&self) -> bool {
        matches!(self, Self::Flat(_))
    }
}

/// A scraped verified contract record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRecord {
    /// The name of the contract.
    pub contract_name: String,

    /// The version that this contract was compiled with, usually build tagged:
    /// `v0.8.24+commit.e11b9ed9`
    pub compiler_version: String,

    /// Either the flat source or the path mapped sources.
    #[serde(deserialize_with = "deserialize_stringified_source_code")]
    pub source_code: SourceCode,
}

impl RawRecord {
    /// Reads and parses the record stored at `path`
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// The normalized metadata extraction writes for this record
    pub fn inpage_meta(&self) -> InpageMeta {
        InpageMeta { contract_name: self.contract_name.clone(), version: self.compiler_version.clone() }
    }
}

/// The normalized per directory record, see [`INPAGE_META_FILENAME`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InpageMeta {
    pub contract_name: String,
    pub version: String,
}

impl InpageMeta {
    /// Reads the `inpage_meta.json` inside `dir`
    pub fn read(dir: impl AsRef<Path>) -> Result<Self> {
        read_json(&dir.as_ref().join(INPAGE_META_FILENAME))
    }

    /// Writes this record as `inpage_meta.json` inside `dir`
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<()> {
        let path = dir.as_ref().join(INPAGE_META_FILENAME);
        let content = serde_json::to_vec(self).map_err(|err| SourceError::serde(err, &path))?;
        fs::write(&path, content).map_err(|err| SourceError::io(err, path))
    }
}

/// Pre-existing project metadata, see [`METADATA_FILENAME`]
///
/// The version is expected to be pinned already and the contract name to be the entry file name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub version: String,
    pub contract_name: String,
}

impl ProjectMetadata {
    /// Reads the `metadata.json` inside `dir`
    pub fn read(dir: impl AsRef<Path>) -> Result<Self> {
        read_json(&dir.as_ref().join(METADATA_FILENAME))
    }
}
