//! # solc-batch
//!
//! Normalizes scraped, Etherscan style verified contract records into `.sol` source trees tagged
//! with a pinned compiler version and batch compiles them with `solc --standard-json`.
//!
//! ```no_run
//! use solc_batch::{report::BasicStdoutReporter, BatchConfig, BatchDriver};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BatchConfig::builder().contracts_root("contracts").build()?;
//! let compiler = config.svm_solc();
//! let report = BatchDriver::new(config).reporter(BasicStdoutReporter::default()).run(&compiler)?;
//! println!("{} compiled, {} failed", report.compiled(), report.failed());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub use batch::{BatchDriver, BatchError, BatchReport, ErrorKind, Outcome};

pub mod config;
pub use config::{BatchConfig, BatchConfigBuilder};

pub mod report;

/// Version pinning, compiler input building and `solc` invocation
pub mod solc {
    pub use solc_batch_solc::*;
}

/// Scraped records, source extraction and entry resolution
pub mod sources {
    pub use solc_batch_sources::*;
}
