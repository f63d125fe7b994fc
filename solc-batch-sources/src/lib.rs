//! Source side of solc-batch.
//!
//! Turns scraped, Etherscan style `getsourcecode` records into `.sol` files plus an
//! `inpage_meta.json` ([`extract`]) and resolves the entry file and pinned compiler version of a
//! materialized contract directory ([`resolve`]).

pub mod errors;
pub mod extract;
pub mod record;
pub mod resolve;
pub mod source_tree;
pub mod utils;

pub use errors::SourceError;
pub use extract::{extract, extract_dir, Extraction};
pub use record::{InpageMeta, ProjectMetadata, RawRecord, SourceCode};
pub use resolve::{resolve, ResolvedTarget};

pub type Result<T> = std::result::Result<T, SourceError>;
