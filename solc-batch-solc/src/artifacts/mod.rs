//! Solc standard-json artifact types
use crate::{
    error::{Result, SolcIoError},
    version,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::debug;

pub mod output_selection;
use output_selection::OutputSelection;

/// An ordered list of source unit names and their source
pub type Sources = BTreeMap<String, Source>;

/// file name -> (library name -> address)
pub type Libraries = BTreeMap<String, BTreeMap<String, String>>;

const SOLIDITY: &str = "Solidity";

/// Input type `solc` expects
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInput {
    pub language: String,
    pub sources: Sources,
    pub settings: Settings,
}

impl CompilerInput {
    /// Creates a new [CompilerInput] with default settings and the given sources
    pub fn with_sources(sources: Sources) -> Self {
        Self { language: SOLIDITY.to_string(), sources, settings: Default::default() }
    }

    /// Builds the compile request for the entry file `filename` inside `dir`.
    ///
    /// The entry file is the only source unit, keyed by `filename`. The settings enable the
    /// optimizer with 200 runs, request [`OutputSelection::batch_output_selection`] and switch to
    /// the IR pipeline if [`version::requires_via_ir`] says so for the pinned `version`.
    pub fn build(dir: impl AsRef<Path>, version: &str, filename: &str) -> Result<Self> {
        let source = Source::read(dir.as_ref().join(filename))?;
        let mut settings = Settings::new(OutputSelection::batch_output_selection());
        settings.optimizer.enable();
        settings.optimizer.runs(200);
        if version::requires_via_ir(version)? {
            settings.via_ir = Some(true);
        }
        debug!(filename, version, via_ir = settings.via_ir.is_some(), "built compiler input");

        Ok(Self::with_sources(Sources::from([(filename.to_string(), source)])).settings(settings))
    }

    /// Sets the settings for compilation
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub optimizer: Optimizer,
    /// This field can be used to select desired outputs based
    /// on file and contract names.
    /// If this field is omitted, then the compiler loads and does type
    /// checking, but will not generate any outputs apart from errors.
    #[serde(default)]
    pub output_selection: OutputSelection,
    /// Change compilation pipeline to go through the Yul intermediate representation. This is
    /// false by default.
    #[serde(rename = "viaIR", default, skip_serializing_if = "Option::is_none")]
    pub via_ir: Option<bool>,
    /// Addresses of the libraries. If not all libraries are given here,
    /// it can result in unlinked objects whose output data is different.
    #[serde(default)]
    pub libraries: Libraries,
}

impl Settings {
    /// Creates a new `Settings` instance with the given `output_selection`
    pub fn new(output_selection: impl Into<OutputSelection>) -> Self {
        Self { output_selection: output_selection.into(), ..Default::default() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Optimizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<usize>,
}

impl Optimizer {
    pub fn runs(&mut self, runs: usize) {
        self.runs = Some(runs);
    }

    pub fn enable(&mut self) {
        self.enabled = Some(true)
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self { enabled: Some(false), runs: Some(200) }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Source {
    pub content: String,
}

impl Source {
    /// Reads the file content
    pub fn read(file: impl AsRef<Path>) -> std::result::Result<Self, SolcIoError> {
        let file = file.as_ref();
        Ok(Self { content: fs::read_to_string(file).map_err(|err| SolcIoError::new(err, file))? })
    }
}

impl<T: Into<String>> From<T> for Source {
    fn from(content: T) -> Self {
        Self { content: content.into() }
    }
}

/// Output type `solc` produces
///
/// Only the diagnostics are typed, contracts and sources are kept as raw json so the document can
/// be persisted unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilerOutput {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<Diagnostic>,
    #[serde(default)]
    pub sources: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

impl CompilerOutput {
    /// Whether the output contains a compiler error
    pub fn has_error(&self) -> bool {
        self.errors.iter().any(|err| err.severity.eq_ignore_ascii_case("error"))
    }
}

/// A single `solc` diagnostic
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_location: Option<serde_json::Value>,
    pub r#type: String,
    pub component: String,
    pub severity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_message: Option<String>,
}
