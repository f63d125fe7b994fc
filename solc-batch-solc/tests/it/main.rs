//! Runs the compile request against a stand-in `solc` executable

#![cfg(unix)]

use pretty_assertions::assert_eq;
use serde_json::json;
use solc_batch_solc::{Compiler, CompilerInput, Solc, SolcError, SvmSolc};
use std::{fs, os::unix::fs::PermissionsExt, path::Path};

const FAKE_SOLC: &str = r#"#!/bin/sh
if [ "$1" != "--standard-json" ]; then
  echo "unexpected arguments: $*" >&2
  exit 2
fi
input=$(cat)
case "$input" in
  *viaIR*) echo '{"contracts":{"Foo.sol":{"Foo":{"abi":[]}}},"sources":{"Foo.sol":{"id":0}}}' ;;
  *) echo "Error: expected viaIR" >&2; exit 1 ;;
esac
"#;

fn install_fake(svm_home: &Path, version: &str) {
    let dir = svm_home.join(version);
    fs::create_dir_all(&dir).unwrap();
    let bin = dir.join(format!("solc-{version}"));
    fs::write(&bin, FAKE_SOLC).unwrap();
    fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn runs_standard_json_through_svm_install() {
    let tmp = tempfile::tempdir().unwrap();
    let svm_home = tmp.path().join(".svm");
    install_fake(&svm_home, "0.8.24");
    install_fake(&svm_home, "0.7.6");

    let contract = tmp.path().join("0xabc");
    fs::create_dir(&contract).unwrap();
    fs::write(contract.join("Foo.sol"), "contract Foo {}").unwrap();

    let svm = SvmSolc::new(&svm_home);
    let input = CompilerInput::build(&contract, "0.8.24", "Foo.sol").unwrap();
    let output = svm.compile("0.8.24", &input).unwrap();
    assert_eq!(output["contracts"]["Foo.sol"]["Foo"], json!({ "abi": [] }));

    let input = CompilerInput::build(&contract, "0.7.6", "Foo.sol").unwrap();
    let err = svm.compile("0.7.6", &input).unwrap_err();
    match err {
        SolcError::SolcError(stderr) => assert!(stderr.contains("expected viaIR"), "{stderr}"),
        err => panic!("unexpected error {err:?}"),
    }

    let err = svm.compile("0.6.12", &input).unwrap_err();
    assert!(matches!(err, SolcError::UnresolvedVersion(_)), "{err:?}");

    let direct = Solc::new(svm_home.join("0.8.24").join("solc-0.8.24"));
    let input = CompilerInput::build(&contract, "0.8.24", "Foo.sol").unwrap();
    assert_eq!(direct.compile("0.8.24", &input).unwrap(), output);
}
