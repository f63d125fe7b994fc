//! The two pass batch: materialize scraped records, then compile every contract directory.

use crate::{
    config::BatchConfig,
    report::{Report, Reporter},
};
use serde::Deserialize;
use solc_batch_solc::{Compiler, CompilerInput, CompilerOutput, SolcError, SolcIoError};
use solc_batch_sources::{
    extract::{extract_file, has_sources, record_files, ExtractedRecord},
    resolve, ResolvedTarget, SourceError,
};
use std::{
    error::Error as StdError,
    fmt, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

pub type Result<T, E = BatchError> = std::result::Result<T, E>;

/// Coarse classification of a [`BatchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nothing compilable: no sources, no metadata or a missing entry file
    NotFound,
    /// A scraped record or metadata file could not be parsed
    MalformedRecord,
    /// No pinned compiler version could be derived or located
    UnresolvedVersion,
    /// The compiler failed or produced unusable output
    Compiler,
    Io,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Solc(#[from] SolcError),
    #[error(transparent)]
    Io(#[from] SolcIoError),
    #[error("Failed to serialize compiler output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to locate the svm home directory, set it explicitly")]
    NoSvmHome,
}

impl BatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BatchError::Source(err) => source_error_kind(err),
            BatchError::Solc(err) => solc_error_kind(err),
            BatchError::Io(err) => io_error_kind(err.kind()),
            BatchError::Json(_) => ErrorKind::Io,
            BatchError::NoSvmHome => ErrorKind::NotFound,
        }
    }
}

fn source_error_kind(err: &SourceError) -> ErrorKind {
    match err {
        SourceError::NoSources(_) | SourceError::NoMetadata(_) | SourceError::EntryNotFound { .. } => {
            ErrorKind::NotFound
        }
        SourceError::MalformedRecord(_) |
        SourceError::MalformedVersion(_) |
        SourceError::Serde { .. } => ErrorKind::MalformedRecord,
        SourceError::Io { err, .. } => io_error_kind(err.kind()),
        SourceError::Solc(err) => solc_error_kind(err),
    }
}

fn solc_error_kind(err: &SolcError) -> ErrorKind {
    match err {
        SolcError::UnresolvedVersion(_) | SolcError::SemverError(_) => ErrorKind::UnresolvedVersion,
        SolcError::SolcError(_) | SolcError::SerdeJson(_) | SolcError::Message(_) => {
            ErrorKind::Compiler
        }
        SolcError::Io(err) => io_error_kind(err.kind()),
    }
}

fn io_error_kind(kind: io::ErrorKind) -> ErrorKind {
    if kind == io::ErrorKind::NotFound {
        ErrorKind::NotFound
    } else {
        ErrorKind::Io
    }
}

/// The result of compiling a single contract directory
#[derive(Debug)]
pub struct Outcome {
    /// Name of the contract directory
    pub id: String,
    /// The resolved entry file, `None` if resolution failed
    pub entry: Option<String>,
    /// Path of the written compiler output
    pub result: Result<PathBuf>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// The status line of a directory, e.g. `0xabc/Token.sol:COMPLETE`
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(entry) = &self.entry {
            write!(f, "/{entry}")?;
        }
        match &self.result {
            Ok(_) => f.write_str(":COMPLETE"),
            Err(err) => write!(f, ":error: // {err}"),
        }
    }
}

/// A scraped record, or a directory, the extraction pass could not handle
#[derive(Debug)]
pub struct ExtractionFailure {
    pub path: PathBuf,
    pub error: BatchError,
}

/// Everything a batch run did
#[derive(Debug, Default)]
pub struct BatchReport {
    pub extracted: Vec<ExtractedRecord>,
    pub extraction_failures: Vec<ExtractionFailure>,
    /// One entry per contract directory, in name order
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    /// Number of directories whose output was written
    pub fn compiled(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_ok()).count()
    }

    /// Number of directories that failed to compile
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.compiled()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0 || !self.extraction_failures.is_empty()
    }
}

/// Drives extraction and compilation over a contracts root.
///
/// Failures of individual records or directories are persisted as error logs and never abort the
/// batch.
#[derive(Debug)]
pub struct BatchDriver {
    config: BatchConfig,
    report: Report,
}

impl BatchDriver {
    pub fn new(config: BatchConfig) -> Self {
        Self { config, report: Report::none() }
    }

    /// Sets the [`Reporter`] that receives the events of this driver
    #[must_use]
    pub fn reporter(mut self, reporter: impl Reporter + Send + Sync) -> Self {
        self.report = Report::new(reporter);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Runs the enabled passes, extraction first.
    ///
    /// Only a contracts root that can not be listed fails the whole run.
    pub fn run<C: Compiler>(&self, compiler: &C) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        if self.config.extract {
            self.extract_all(&mut report);
        }
        if self.config.compile {
            report.outcomes = self.compile_all(compiler)?;
        }
        info!(
            extracted = report.extracted.len(),
            extraction_failures = report.extraction_failures.len(),
            compiled = report.compiled(),
            failed = report.failed(),
            "batch finished"
        );
        Ok(report)
    }

    /// Extraction pass: materializes the records of every directory below the contracts root
    /// that has no `.sol` file yet.
    pub fn extract_all(&self, report: &mut BatchReport) {
        let walk = WalkDir::new(&self.config.contracts_root).sort_by_file_name();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(%err, "skipping unreadable entry");
                    continue
                }
            };
            if entry.file_type().is_dir() {
                self.extract_dir(entry.path(), report);
            }
        }
    }

    fn extract_dir(&self, dir: &Path, report: &mut BatchReport) {
        match has_sources(dir) {
            Ok(true) => {
                trace!(dir = %dir.display(), "sources present, skipping extraction");
                return
            }
            Ok(false) => {}
            Err(err) => return self.extraction_failed(dir, err.into(), report),
        }
        let records = match record_files(dir) {
            Ok(records) => records,
            Err(err) => return self.extraction_failed(dir, err.into(), report),
        };
        for record in records {
            match extract_file(&record, dir) {
                Ok(extracted) => {
                    debug!(record = %record.display(), files = ?extracted.files, "extracted");
                    report.extracted.push(extracted)
                }
                Err(err) => self.extraction_failed(&record, err.into(), report),
            }
        }
    }

    fn extraction_failed(&self, path: &Path, error: BatchError, report: &mut BatchReport) {
        warn!(path = %path.display(), %error, "extraction failed");
        let name = file_name(path);
        self.write_log(&name, &error);
        self.report.extraction_failure(path, &error);
        report.extraction_failures.push(ExtractionFailure { path: path.to_path_buf(), error });
    }

    /// Compile pass: compiles every immediate child directory of the contracts root in name
    /// order.
    pub fn compile_all<C: Compiler>(&self, compiler: &C) -> Result<Vec<Outcome>> {
        let root = &self.config.contracts_root;
        let mut dirs = Vec::new();
        for entry in fs::read_dir(root).map_err(|err| SolcIoError::new(err, root))? {
            let entry = entry.map_err(|err| SolcIoError::new(err, root))?;
            let path = entry.path();
            if path.is_dir() {
                dirs.push(path);
            } else {
                trace!(path = %path.display(), "skipping non directory");
            }
        }
        dirs.sort();
        Ok(dirs.iter().map(|dir| self.compile_dir(dir, compiler)).collect())
    }

    /// Resolves, builds and compiles a single contract directory.
    ///
    /// The compiler output is written to `<out_dir>/<dir name>.json`, a failure to
    /// `<errors_dir>/<dir name>.log`.
    pub fn compile_dir<C: Compiler>(&self, dir: &Path, compiler: &C) -> Outcome {
        let id = file_name(dir);
        let outcome = match resolve(dir) {
            Ok(target) => {
                self.report.compile_start(&id, &target);
                let result = self.compile_target(&id, dir, &target, compiler);
                Outcome { id, entry: Some(target.entry_filename), result }
            }
            Err(err) => Outcome { id, entry: None, result: Err(err.into()) },
        };

        match &outcome.result {
            Ok(out) => debug!(id = %outcome.id, out = %out.display(), "compiled"),
            Err(error) => {
                warn!(id = %outcome.id, kind = ?error.kind(), %error, "compilation failed");
                self.write_log(&outcome.id, error);
            }
        }
        self.report.outcome(&outcome);
        outcome
    }

    fn compile_target<C: Compiler>(
        &self,
        id: &str,
        dir: &Path,
        target: &ResolvedTarget,
        compiler: &C,
    ) -> Result<PathBuf> {
        let input = CompilerInput::build(dir, &target.version, &target.entry_filename)?;
        let output = compiler.compile(&target.version, &input)?;

        if CompilerOutput::deserialize(&output).map(|typed| typed.has_error()).unwrap_or_default() {
            warn!(id, version = %target.version, "compiler output contains errors");
        }

        let out = self.config.output_file(id);
        let content = serde_json::to_vec(&output)?;
        fs::write(&out, content).map_err(|err| SolcIoError::new(err, &out))?;
        Ok(out)
    }

    /// Persists the error chain as `<errors_dir>/<name>.log`
    fn write_log(&self, name: &str, error: &BatchError) {
        let log = self.config.log_file(name);
        if let Err(err) = fs::write(&log, error_chain(error)) {
            warn!(log = %log.display(), %err, "failed to write error log");
        }
    }
}

/// Renders an error followed by all of its causes
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\n\nCaused by:\n    ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out.push('\n');
    out
}

fn file_name(path: &Path) -> String {
    path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default()
}
