//! Compiler side of solc-batch: pinning scraped compiler versions, building the standard-json
//! input for an entry file and handing it to a `solc` binary.
//!
//! ```no_run
//! use solc_batch_solc::{version, CompilerInput, Compiler, SvmSolc};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pinned = version::normalize("^0.8.0");
//! let input = CompilerInput::build("contracts/0xabc", &pinned, "Token.sol")?;
//! let output = SvmSolc::new("/home/user/.svm").compile(&pinned, &input)?;
//! # Ok(())
//! # }
//! ```

pub mod artifacts;
pub use artifacts::{CompilerInput, CompilerOutput, Settings, Source, Sources};

mod compile;
pub use compile::{Compiler, Solc, SvmSolc, SOLC};

pub mod error;
pub use error::{Result, SolcError, SolcIoError};

pub mod utils;
pub mod version;
