use crate::{file_names, flat_record, Lines, MockCompiler, Workspace};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use solc_batch::{BatchDriver, BatchError, ErrorKind};
use std::fs;

#[test]
fn compiles_flat_and_bundle_records() {
    let ws = Workspace::new();
    ws.record("0xaaa", "0xaaa.json", flat_record("Foo", "v0.8.24+commit.e11b9ed9"));
    ws.record(
        "0xbbb",
        "0xbbb.json",
        json!({
            "ContractName": "Token",
            "CompilerVersion": "v0.6.12+commit.27d51765",
            "SourceCode": "{{\"language\":\"Solidity\",\"sources\":{\"contracts/Token.sol\":{\"content\":\"contract Token is ERC20 {}\"},\"@oz/ERC20.sol\":{\"content\":\"contract ERC20 {}\"}}}}"
        }),
    );
    ws.contract_dir("0xccc");

    let lines = Lines::default();
    let compiler = MockCompiler::default();
    let config = ws.config();
    let out_dir = config.out_dir.clone();
    let errors_dir = config.errors_dir.clone();
    let report = BatchDriver::new(config).reporter(lines.clone()).run(&compiler).unwrap();

    assert_eq!(report.extracted.len(), 2);
    assert!(report.extraction_failures.is_empty());
    assert_eq!(report.compiled(), 2);
    assert_eq!(report.failed(), 1);

    assert_eq!(file_names(&out_dir), vec!["0xaaa.json", "0xbbb.json"]);
    assert_eq!(file_names(&errors_dir), vec!["0xccc.log"]);

    let lines = lines.get();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0xaaa/Foo.sol:COMPLETE");
    assert_eq!(lines[1], "0xbbb/Token.sol:COMPLETE");
    assert!(lines[2].starts_with("0xccc:error: // No contracts found in"), "{}", lines[2]);

    let calls = compiler.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "0.8.24");
    assert_eq!(calls[0].1.settings.via_ir, Some(true));
    assert_eq!(calls[0].1.sources["Foo.sol"].content, "contract Foo {}");
    assert_eq!(calls[1].0, "0.6.12");
    assert_eq!(calls[1].1.settings.via_ir, None);
    assert_eq!(calls[1].1.sources["Token.sol"].content, "contract Token is ERC20 {}");

    let written: Value =
        serde_json::from_slice(&fs::read(out_dir.join("0xaaa.json")).unwrap()).unwrap();
    assert!(written["contracts"]["Foo.sol"].is_object());

    let outcome = report.outcomes.iter().find(|outcome| outcome.id == "0xccc").unwrap();
    assert!(outcome.entry.is_none());
    assert_eq!(outcome.result.as_ref().unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn record_rewrite_keeps_other_fields() {
    let ws = Workspace::new();
    let record = ws.record(
        "0xaaa",
        "0xaaa.json",
        json!({
            "ContractName": "A",
            "CompilerVersion": "v0.7.6+commit.7338295f",
            "SourceCode": "{{\"A.sol\":{\"content\":\"contract A {}\"}}}",
            "ABI": "[]",
            "Runs": "200"
        }),
    );

    BatchDriver::new(ws.config()).run(&MockCompiler::default()).unwrap();

    let persisted: Value = serde_json::from_slice(&fs::read(record).unwrap()).unwrap();
    assert!(persisted["SourceCode"].is_object());
    assert_eq!(persisted["ABI"], "[]");
    assert_eq!(persisted["Runs"], "200");
}

#[test]
fn logs_malformed_record_and_continues() {
    let ws = Workspace::new();
    ws.record(
        "0xaaa",
        "broken.json",
        json!({ "ContractName": "A", "CompilerVersion": "v0.8.24+commit.e11b9ed9", "SourceCode": 42 }),
    );
    ws.record("0xbbb", "0xbbb.json", flat_record("B", "v0.5.17+commit.d19bba13"));

    let lines = Lines::default();
    let config = ws.config();
    let errors_dir = config.errors_dir.clone();
    let report =
        BatchDriver::new(config).reporter(lines.clone()).run(&MockCompiler::default()).unwrap();

    assert_eq!(report.extraction_failures.len(), 1);
    assert_eq!(report.extraction_failures[0].error.kind(), ErrorKind::MalformedRecord);
    assert_eq!(file_names(&errors_dir), vec!["0xaaa.log", "broken.json.log"]);

    let lines = lines.get();
    assert!(lines[0].starts_with("0xaaa:error: //"), "{}", lines[0]);
    assert_eq!(lines[1], "0xbbb/B.sol:COMPLETE");
}

#[test]
fn writes_compiler_failure_log() {
    let ws = Workspace::new();
    ws.record("0xaaa", "0xaaa.json", flat_record("Foo", "v0.8.19+commit.7dd6d404"));

    let lines = Lines::default();
    let config = ws.config();
    let errors_dir = config.errors_dir.clone();
    let report = BatchDriver::new(config)
        .reporter(lines.clone())
        .run(&MockCompiler::failing("ParserError: Expected pragma"))
        .unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(lines.get(), vec!["0xaaa/Foo.sol:error: // ParserError: Expected pragma"]);
    let log = fs::read_to_string(errors_dir.join("0xaaa.log")).unwrap();
    assert!(log.contains("ParserError: Expected pragma"));

    let err = report.outcomes[0].result.as_ref().unwrap_err();
    assert!(matches!(err, BatchError::Solc(_)));
    assert_eq!(err.kind(), ErrorKind::Compiler);
}

#[test]
fn untagged_version_fails_loudly() {
    let ws = Workspace::new();
    ws.record("0xaaa", "0xaaa.json", flat_record("Foo", "0.8.19"));

    let compiler = MockCompiler::default();
    let report = BatchDriver::new(ws.config()).run(&compiler).unwrap();

    let err = report.outcomes[0].result.as_ref().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedRecord);
    assert!(compiler.calls.lock().unwrap().is_empty());
}

#[test]
fn metadata_json_wins_and_extraction_is_skipped() {
    let ws = Workspace::new();
    let dir = ws.contract_dir("0xaaa");
    fs::write(dir.join("Impl.sol"), "contract Impl {}").unwrap();
    fs::write(dir.join("metadata.json"), r#"{"version":">=0.6.0","contract_name":"Impl.sol"}"#)
        .unwrap();
    ws.record("0xaaa", "0xaaa.json", flat_record("Other", "v0.8.24+commit.e11b9ed9"));

    let compiler = MockCompiler::default();
    let report = BatchDriver::new(ws.config()).run(&compiler).unwrap();

    assert!(report.extracted.is_empty());
    assert!(!dir.join("Other.sol").exists());
    assert_eq!(report.outcomes[0].entry.as_deref(), Some("Impl.sol"));
    assert_eq!(compiler.calls.lock().unwrap()[0].0, "0.6.12");
}

#[test]
fn skip_passes() {
    let ws = Workspace::new();
    ws.record("0xaaa", "0xaaa.json", flat_record("Foo", "v0.8.24+commit.e11b9ed9"));

    let mut config = ws.config();
    config.compile = false;
    let compiler = MockCompiler::default();
    let report = BatchDriver::new(config.clone()).run(&compiler).unwrap();
    assert_eq!(report.extracted.len(), 1);
    assert!(report.outcomes.is_empty());
    assert!(compiler.calls.lock().unwrap().is_empty());

    config.compile = true;
    config.extract = false;
    let report = BatchDriver::new(config).run(&compiler).unwrap();
    assert!(report.extracted.is_empty());
    assert_eq!(report.compiled(), 1);
}

#[test]
fn extracts_nested_directories() {
    let ws = Workspace::new();
    let nested = ws.contract_dir("0xaaa").join("proxy");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        nested.join("proxy.json"),
        serde_json::to_vec(&flat_record("Proxy", "v0.8.24+commit.e11b9ed9")).unwrap(),
    )
    .unwrap();

    let mut config = ws.config();
    config.compile = false;
    let report = BatchDriver::new(config).run(&MockCompiler::default()).unwrap();

    assert_eq!(report.extracted.len(), 1);
    assert!(nested.join("Proxy.sol").is_file());
    assert!(nested.join("inpage_meta.json").is_file());
}
