//! Subscribe to events of a batch run

use crate::batch::{BatchError, Outcome};
use solc_batch_sources::ResolvedTarget;
use std::{fmt, path::Path, sync::Arc};

/// Trait representing the functions required to emit information about the steps of a batch run.
///
/// This trait provides a series of callbacks that are invoked by [`crate::BatchDriver::run()`].
///
/// A `Reporter` is entirely passive and only listens to incoming "events".
pub trait Reporter: 'static {
    /// Invoked when a scraped record could not be extracted
    fn on_extraction_failure(&self, _record: &Path, _error: &BatchError) {}

    /// Callback invoked right before a resolved directory is handed to the compiler
    fn on_compile_start(&self, _id: &str, _target: &ResolvedTarget) {}

    /// Invoked once per directory of the compile pass, in processing order
    fn on_outcome(&self, _outcome: &Outcome) {}
}

/// A no-op [`Reporter`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoReporter(());

impl Reporter for NoReporter {}

/// A [`Reporter`] that prints one status line per directory to `stdout`
#[derive(Copy, Clone, Debug, Default)]
pub struct BasicStdoutReporter(());

impl Reporter for BasicStdoutReporter {
    fn on_extraction_failure(&self, record: &Path, error: &BatchError) {
        println!("{}:error: // {}", record.display(), error);
    }

    fn on_outcome(&self, outcome: &Outcome) {
        println!("{outcome}");
    }
}

/// `Report` batch events to a [`Reporter`].
#[derive(Clone)]
pub struct Report {
    reporter: Arc<dyn Reporter + Send + Sync>,
}

impl Report {
    /// Returns a new `Report` that does nothing
    pub fn none() -> Self {
        Report { reporter: Arc::new(NoReporter::default()) }
    }

    /// Returns a `Report` that forwards to the given [`Reporter`].
    pub fn new<S>(reporter: S) -> Self
    where
        S: Reporter + Send + Sync + 'static,
    {
        Self { reporter: Arc::new(reporter) }
    }

    pub(crate) fn extraction_failure(&self, record: &Path, error: &BatchError) {
        self.reporter.on_extraction_failure(record, error)
    }

    pub(crate) fn compile_start(&self, id: &str, target: &ResolvedTarget) {
        self.reporter.on_compile_start(id, target)
    }

    pub(crate) fn outcome(&self, outcome: &Outcome) {
        self.reporter.on_outcome(outcome)
    }
}

impl Default for Report {
    fn default() -> Self {
        Report::none()
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report").finish_non_exhaustive()
    }
}
