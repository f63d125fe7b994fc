//! Extraction and resolution over on-disk contract directories

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solc_batch_sources::{
    extract_dir, record::INPAGE_META_FILENAME, resolve, Extraction, InpageMeta, ResolvedTarget,
    SourceError,
};
use std::{fs, path::Path};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn write_record(dir: &Path, name: &str, record: Value) {
    fs::write(dir.join(name), serde_json::to_vec(&record).unwrap()).unwrap();
}

#[test]
fn extracts_then_resolves_double_encoded_bundle() {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    write_record(
        tmp.path(),
        "0x6b175474e89094c44da98b954eedeac495271d0f.json",
        json!({
            "ContractName": "Dai",
            "CompilerVersion": "v0.5.12+commit.7709ece9",
            "SourceCode": "{{\"language\":\"Solidity\",\"sources\":{\"src/0xabc_Dai.sol\":{\"content\":\"contract Dai is LibNote {}\"},\"src/lib.sol\":{\"content\":\"contract LibNote {}\"}},\"settings\":{\"optimizer\":{\"enabled\":false}}}}"
        }),
    );

    let extracted = match extract_dir(tmp.path()).unwrap() {
        Extraction::Extracted(records) => records,
        Extraction::Skipped => panic!("expected extraction"),
    };
    assert_eq!(extracted.len(), 1);
    assert_eq!(extracted[0].files, vec!["0xabc_Dai.sol".to_string(), "lib.sol".to_string()]);

    assert_eq!(
        resolve(tmp.path()).unwrap(),
        ResolvedTarget { version: "0.5.12".to_string(), entry_filename: "0xabc_Dai.sol".to_string() }
    );
}

#[test]
fn extracts_then_resolves_flat_record() {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    write_record(
        tmp.path(),
        "record.json",
        json!({
            "ContractName": "Foo",
            "CompilerVersion": "v0.4.24+commit.e67f0147",
            "SourceCode": "pragma solidity ^0.4.24; contract Foo {}"
        }),
    );

    extract_dir(tmp.path()).unwrap();
    assert_eq!(
        InpageMeta::read(tmp.path()).unwrap(),
        InpageMeta { contract_name: "Foo".to_string(), version: "v0.4.24+commit.e67f0147".to_string() }
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("Foo.sol")).unwrap(),
        "pragma solidity ^0.4.24; contract Foo {}"
    );
    assert_eq!(resolve(tmp.path()).unwrap().version, "0.4.24");
}

#[test]
fn failed_record_leaves_no_metadata() {
    init_tracing();
    let tmp = tempfile::tempdir().unwrap();
    write_record(
        tmp.path(),
        "record.json",
        json!({
            "ContractName": "Foo",
            "CompilerVersion": "v0.8.24+commit.e11b9ed9",
            "SourceCode": "{{not json}}"
        }),
    );

    let err = extract_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, SourceError::MalformedRecord(_)), "{err:?}");
    assert!(!tmp.path().join(INPAGE_META_FILENAME).exists());

    let err = resolve(tmp.path()).unwrap_err();
    assert!(matches!(err, SourceError::NoSources(_)), "{err:?}");
}

#[test]
fn empty_directory_resolves_to_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    assert_eq!(extract_dir(tmp.path()).unwrap(), Extraction::Extracted(Vec::new()));
    assert!(resolve(tmp.path()).unwrap_err().is_not_found());
}
