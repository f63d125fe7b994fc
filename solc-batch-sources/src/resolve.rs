//! Resolves the entry file and pinned compiler version of a contract directory.

use crate::{
    record::{InpageMeta, ProjectMetadata, INPAGE_META_FILENAME, METADATA_FILENAME},
    Result, SourceError,
};
use solc_batch_solc::{
    utils::{find_build_tagged_version, source_files},
    version, SolcError,
};
use std::path::{Path, PathBuf};
use tracing::debug;

const SOL_EXTENSION: &str = ".sol";

/// The compile target of a contract directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Pinned compiler version, e.g. `0.8.24`
    pub version: String,
    /// Name of the entry `.sol` file inside the directory
    pub entry_filename: String,
}

/// Determines the entry file and the pinned version of the contract in `dir`.
///
/// `dir` must contain at least one `.sol` file. `metadata.json` takes precedence over
/// `inpage_meta.json`. The raw version of either is passed through [`version::normalize`].
pub fn resolve(dir: &Path) -> Result<ResolvedTarget> {
    let sol_files = source_files(dir).map_err(SolcError::from)?;
    if sol_files.is_empty() {
        return Err(SourceError::NoSources(dir.to_path_buf()))
    }

    let (raw_version, entry_filename) = if dir.join(METADATA_FILENAME).is_file() {
        resolve_project_metadata(&ProjectMetadata::read(dir)?)
    } else if dir.join(INPAGE_META_FILENAME).is_file() {
        resolve_inpage_meta(&InpageMeta::read(dir)?, &sol_files)?
    } else {
        return Err(SourceError::NoMetadata(dir.to_path_buf()))
    };

    if !is_plain_file_name(&entry_filename) {
        return Err(SourceError::malformed(format!(
            "entry file \"{entry_filename}\" must be a file name inside \"{}\"",
            dir.display()
        )))
    }
    if !dir.join(&entry_filename).is_file() {
        return Err(SourceError::EntryNotFound { dir: dir.to_path_buf(), file: entry_filename })
    }

    let version = version::normalize(&raw_version);
    debug!(dir = %dir.display(), %raw_version, %version, entry = %entry_filename, "resolved target");
    Ok(ResolvedTarget { version, entry_filename })
}

/// Whether `name` is a bare file name, i.e. it can not point outside its directory
fn is_plain_file_name(name: &str) -> bool {
    Path::new(name).file_name().and_then(|file| file.to_str()) == Some(name)
}

/// `metadata.json` already names the entry file and carries a pinned version
fn resolve_project_metadata(meta: &ProjectMetadata) -> (String, String) {
    (meta.version.clone(), meta.contract_name.clone())
}

/// Resolves `(raw version, entry file)` from an `inpage_meta.json`.
///
/// Verified sources are often named `<prefix>_<ContractName>.sol`, such a file is preferred over
/// the bare contract name. The version must be build tagged, `v0.8.24+commit.e11b9ed9`.
fn resolve_inpage_meta(meta: &InpageMeta, sol_files: &[PathBuf]) -> Result<(String, String)> {
    let suffix = format!("_{}{SOL_EXTENSION}", meta.contract_name);
    let mut entry = sol_files
        .iter()
        .filter_map(|file| file.file_name().and_then(|name| name.to_str()))
        .find(|name| name.ends_with(&suffix))
        .unwrap_or(meta.contract_name.as_str())
        .to_string();
    if !entry.ends_with(SOL_EXTENSION) {
        entry.push_str(SOL_EXTENSION);
    }

    let version = find_build_tagged_version(&meta.version)
        .ok_or_else(|| SourceError::MalformedVersion(meta.version.clone()))?;
    Ok((version.to_string(), entry))
}
