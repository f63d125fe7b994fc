//! Materializes scraped records as `.sol` files plus an `inpage_meta.json`.

use crate::{
    record::{InpageMeta, RawRecord, SourceCode, INPAGE_META_FILENAME, METADATA_FILENAME},
    source_tree::{SourceTree, SourceTreeEntry},
    utils::{denest_source_code, read_json, write_json},
    Result, SourceError,
};
use solc_batch_solc::{utils::source_files, SolcError};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// What extraction did with a directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// The directory already contains `.sol` files
    Skipped,
    /// Every record file found in the directory was extracted
    Extracted(Vec<ExtractedRecord>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedRecord {
    /// The record json file
    pub record_file: PathBuf,
    /// The `inpage_meta.json` content written for the record
    pub meta: InpageMeta,
    /// Names of the written `.sol` files
    pub files: Vec<String>,
}

/// Returns the flat source tree of a record.
///
/// A flat source becomes `<ContractName>.sol`, path mapped sources keep their paths and are
/// flattened to base names when written.
pub fn source_tree(record: &RawRecord) -> Result<SourceTree> {
    let entries = match &record.source_code {
        SourceCode::Flat(content) => {
            vec![SourceTreeEntry::new(flat_file_name(&record.contract_name)?, content.as_str())]
        }
        SourceCode::Bundle { sources, .. } | SourceCode::Files(sources) => sources
            .iter()
            .map(|(path, entry)| SourceTreeEntry::new(path, entry.content.as_str()))
            .collect(),
    };
    Ok(SourceTree { entries })
}

/// Writes the record's sources into `target_dir`, followed by its `inpage_meta.json`.
///
/// The metadata is only written once all sources are on disk.
pub fn extract(record: &RawRecord, target_dir: &Path) -> Result<InpageMeta> {
    extract_files(record, target_dir).map(|(meta, _)| meta)
}

fn extract_files(record: &RawRecord, target_dir: &Path) -> Result<(InpageMeta, Vec<String>)> {
    let files = source_tree(record)?.write_flat_to(target_dir)?;
    let meta = record.inpage_meta();
    meta.write(target_dir)?;
    debug!(
        contract = %record.contract_name,
        flat = record.source_code.is_flat(),
        files = files.len(),
        "extracted record"
    );
    Ok((meta, files))
}

/// Decodes a double encoded `SourceCode` inside the record file at `path` and persists the
/// decoded record back to the same file.
///
/// Returns `true` if the file was rewritten.
pub fn denest_record_file(path: &Path) -> Result<bool> {
    let mut record: serde_json::Value = read_json(path)?;
    if !denest_source_code(&mut record)? {
        return Ok(false)
    }
    trace!(file = %path.display(), "persisting denested record");
    write_json(path, &record)?;
    Ok(true)
}

/// Runs the double encoding pre-pass on `record_file`, then extracts it into `target_dir`.
pub fn extract_file(record_file: &Path, target_dir: &Path) -> Result<ExtractedRecord> {
    denest_record_file(record_file)?;
    let record = RawRecord::read(record_file)?;
    let (meta, files) = extract_files(&record, target_dir)?;
    Ok(ExtractedRecord { record_file: record_file.to_path_buf(), meta, files })
}

/// Whether `dir` already contains materialized `.sol` files
pub fn has_sources(dir: &Path) -> Result<bool> {
    let files = source_files(dir).map_err(SolcError::from)?;
    Ok(!files.is_empty())
}

/// Returns the scraped record files in `dir`, sorted by name.
///
/// Every `*.json` file except `inpage_meta.json` and `metadata.json` is considered a record.
pub fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| SourceError::io(err, dir))? {
        let entry = entry.map_err(|err| SourceError::io(err, dir))?;
        let path = entry.path();
        let is_json = path.extension().map(|ext| ext == "json").unwrap_or_default();
        let is_meta = path
            .file_name()
            .map(|name| name == INPAGE_META_FILENAME || name == METADATA_FILENAME)
            .unwrap_or_default();
        if is_json && !is_meta && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extracts every record file of `dir` into `dir` itself.
///
/// Does nothing if the directory already contains a `.sol` file. Stops at the first record that
/// fails.
pub fn extract_dir(dir: &Path) -> Result<Extraction> {
    if has_sources(dir)? {
        trace!(dir = %dir.display(), "sources present, skipping extraction");
        return Ok(Extraction::Skipped)
    }
    record_files(dir)?
        .iter()
        .map(|record_file| extract_file(record_file, dir))
        .collect::<Result<Vec<_>>>()
        .map(Extraction::Extracted)
}

/// `<ContractName>.sol`, the contract name must be a plain file name
fn flat_file_name(contract_name: &str) -> Result<String> {
    let file_name = format!("{contract_name}.sol");
    let is_plain = !contract_name.is_empty()
        && Path::new(&file_name).file_name().and_then(|name| name.to_str()) ==
            Some(file_name.as_str());
    if !is_plain {
        return Err(SourceError::malformed(format!(
            "contract name \"{contract_name}\" is not a valid file name"
        )))
    }
    Ok(file_name)
}
