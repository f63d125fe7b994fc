//! Where the batch finds scraped contracts and where it writes results.

use crate::batch::{BatchError, Result};
use solc_batch_solc::{
    utils::{canonicalize, create_canonical_dir},
    Solc, SvmSolc,
};
use std::path::{Path, PathBuf};

/// Default root holding one directory per scraped contract
pub const DEFAULT_CONTRACTS_ROOT: &str = "contracts";

/// Default directory for compiler output documents
pub const DEFAULT_OUT_DIR: &str = "compiled_info";

/// Default directory for error logs
pub const DEFAULT_ERRORS_DIR: &str = "error_info";

/// Resolved, absolute paths of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Root holding one directory per contract
    pub contracts_root: PathBuf,
    /// Where `<dir>.json` compiler output is written
    pub out_dir: PathBuf,
    /// Where `<dir>.log` error logs are written
    pub errors_dir: PathBuf,
    /// Where svm keeps installed `solc` releases
    pub svm_home: PathBuf,
    /// Whether the extraction pass runs
    pub extract: bool,
    /// Whether the compile pass runs
    pub compile: bool,
}

impl BatchConfig {
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::default()
    }

    /// Creates a config with the default directory names below `base`.
    pub fn with_base(base: impl AsRef<Path>) -> Result<Self> {
        let base = base.as_ref();
        Self::builder()
            .contracts_root(base.join(DEFAULT_CONTRACTS_ROOT))
            .out_dir(base.join(DEFAULT_OUT_DIR))
            .errors_dir(base.join(DEFAULT_ERRORS_DIR))
            .build()
    }

    /// The compiler runner for the configured svm home
    pub fn svm_solc(&self) -> SvmSolc {
        SvmSolc::new(&self.svm_home)
    }

    /// `<out_dir>/<id>.json`
    pub fn output_file(&self, id: &str) -> PathBuf {
        self.out_dir.join(format!("{id}.json"))
    }

    /// `<errors_dir>/<name>.log`
    pub fn log_file(&self, name: &str) -> PathBuf {
        self.errors_dir.join(format!("{name}.log"))
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfigBuilder {
    contracts_root: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    errors_dir: Option<PathBuf>,
    svm_home: Option<PathBuf>,
    extract: bool,
    compile: bool,
}

impl BatchConfigBuilder {
    #[must_use]
    pub fn contracts_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.contracts_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn out_dir(mut self, out: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(out.into());
        self
    }

    #[must_use]
    pub fn errors_dir(mut self, errors: impl Into<PathBuf>) -> Self {
        self.errors_dir = Some(errors.into());
        self
    }

    #[must_use]
    pub fn svm_home(mut self, svm_home: impl Into<PathBuf>) -> Self {
        self.svm_home = Some(svm_home.into());
        self
    }

    /// Disables the extraction pass
    #[must_use]
    pub fn skip_extract(mut self, skip: bool) -> Self {
        self.extract = !skip;
        self
    }

    /// Disables the compile pass
    #[must_use]
    pub fn skip_compile(mut self, skip: bool) -> Self {
        self.compile = !skip;
        self
    }

    /// Canonicalizes all paths.
    ///
    /// The contracts root must exist, the output and error directories are created if missing.
    /// Without an explicit svm home, `~/.svm` is used.
    pub fn build(self) -> Result<BatchConfig> {
        let Self { contracts_root, out_dir, errors_dir, svm_home, extract, compile } = self;

        let contracts_root = contracts_root.unwrap_or_else(|| DEFAULT_CONTRACTS_ROOT.into());
        let out_dir = out_dir.unwrap_or_else(|| DEFAULT_OUT_DIR.into());
        let errors_dir = errors_dir.unwrap_or_else(|| DEFAULT_ERRORS_DIR.into());

        let contracts_root = canonicalize(contracts_root)?;
        let out_dir = create_canonical_dir(out_dir)?;
        let errors_dir = create_canonical_dir(errors_dir)?;
        let svm_home = svm_home.or_else(Solc::svm_home).ok_or(BatchError::NoSvmHome)?;

        Ok(BatchConfig { contracts_root, out_dir, errors_dir, svm_home, extract, compile })
    }
}

impl Default for BatchConfigBuilder {
    fn default() -> Self {
        Self {
            contracts_root: None,
            out_dir: None,
            errors_dir: None,
            svm_home: None,
            extract: true,
            compile: true,
        }
    }
}
