//! Cross-stage tests over the artifact store and calldata encoder,
//! exercising the file handoffs between pipeline stages without a
//! compiler or network in the loop

use std::str::FromStr;

use ethers::abi::{Address, Token};
use pixshare_scripts::{
    artifacts::{calldata_path, load_artifact, load_calldata, save_artifact, save_calldata},
    compiler::ContractArtifact,
    constants::{LOGIC_ARTIFACT_NAME, PROXY_ARTIFACT_NAME},
    deploy::parse_address,
    encoder::{encode_call, encode_call_hex},
    errors::ScriptError,
};
use tempfile::tempdir;

/// A compiled logic contract, shaped like the compiler's standard-JSON
/// output subset
const LOGIC_ARTIFACT: &str = r#"{
    "abi": [
        {
            "type": "function",
            "name": "initialize",
            "inputs": [{"name": "owner", "type": "address"}],
            "outputs": [],
            "stateMutability": "nonpayable"
        },
        {
            "type": "function",
            "name": "createPost",
            "inputs": [{"name": "content", "type": "string"}],
            "outputs": [],
            "stateMutability": "nonpayable"
        }
    ],
    "evm": {"bytecode": {"object": "608060405234801561001057600080fd5b50"}}
}"#;

/// A compiled proxy contract with the fixed `(address, bytes)` constructor
const PROXY_ARTIFACT: &str = r#"{
    "abi": [
        {
            "type": "constructor",
            "inputs": [
                {"name": "implementation", "type": "address"},
                {"name": "_data", "type": "bytes"}
            ],
            "stateMutability": "payable"
        },
        {"type": "fallback", "stateMutability": "payable"}
    ],
    "evm": {"bytecode": {"object": "60806040526040516104ee38038061"}}
}"#;

#[test]
fn test_artifact_then_encode_then_reload() {
    let dir = tempdir().unwrap();
    let artifacts_dir = dir.path();

    // Stage 1 output: persist both compiled artifacts
    let logic: ContractArtifact = serde_json::from_str(LOGIC_ARTIFACT).unwrap();
    let proxy: ContractArtifact = serde_json::from_str(PROXY_ARTIFACT).unwrap();
    save_artifact(artifacts_dir, LOGIC_ARTIFACT_NAME, &logic).unwrap();
    save_artifact(artifacts_dir, PROXY_ARTIFACT_NAME, &proxy).unwrap();

    assert!(artifacts_dir.join("PostBoard.json").exists());
    assert!(artifacts_dir.join("ERC1967Proxy.json").exists());

    // Stage 3: encode `initialize(owner)` against the reloaded logic artifact
    let reloaded = load_artifact(artifacts_dir, LOGIC_ARTIFACT_NAME).unwrap();
    let owner = Address::from_str("0x3333333333333333333333333333333333333333").unwrap();
    let calldata = encode_call_hex(&reloaded.abi, "initialize", &[Token::Address(owner)]).unwrap();
    save_calldata(artifacts_dir, &calldata).unwrap();

    // Stage 4 reads the blob back verbatim and it still decodes against
    // the ABI that produced it
    let loaded = load_calldata(artifacts_dir).unwrap();
    assert_eq!(loaded, calldata);
    assert!(loaded.starts_with("0xc4d66de8"));

    let raw = hex::decode(loaded.strip_prefix("0x").unwrap()).unwrap();
    let function = reloaded.abi.function("initialize").unwrap();
    let decoded = function.decode_input(&raw[4..]).unwrap();
    assert_eq!(decoded, vec![Token::Address(owner)]);
}

#[test]
fn test_calldata_file_is_raw_hex_text() {
    let dir = tempdir().unwrap();

    save_calldata(dir.path(), "0xc4d66de8aaaa").unwrap();
    let raw = std::fs::read_to_string(calldata_path(dir.path())).unwrap();

    // No JSON wrapping, no trailing whitespace
    assert_eq!(raw, "0xc4d66de8aaaa");
}

#[test]
fn test_proxy_constructor_args_encode_against_its_abi() {
    let proxy: ContractArtifact = serde_json::from_str(PROXY_ARTIFACT).unwrap();
    let logic_address = Address::from_str("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap();
    let init_calldata = hex::decode("c4d66de8").unwrap();

    let constructor = proxy.abi.constructor.as_ref().unwrap();
    assert_eq!(constructor.inputs.len(), 2);

    let encoded = constructor
        .encode_input(
            Vec::new(),
            &[
                Token::Address(logic_address),
                Token::Bytes(init_calldata),
            ],
        )
        .unwrap();
    assert!(!encoded.is_empty());
}

#[test]
fn test_stage_ordering_is_enforced_by_the_store() {
    let dir = tempdir().unwrap();

    // Deploy and encode stages fail cleanly before a compile has run
    let err = load_artifact(dir.path(), LOGIC_ARTIFACT_NAME).unwrap_err();
    assert!(matches!(err, ScriptError::ArtifactNotFound { .. }));
    let err = load_calldata(dir.path()).unwrap_err();
    assert!(matches!(err, ScriptError::CalldataNotFound));
}

#[test]
fn test_malformed_logic_address_fails_before_submission() {
    let err = parse_address("not-an-address").unwrap_err();
    assert!(matches!(err, ScriptError::InvalidAddress { .. }));
}

#[test]
fn test_unknown_initializer_fails() {
    let proxy: ContractArtifact = serde_json::from_str(PROXY_ARTIFACT).unwrap();
    let err = encode_call(&proxy.abi, "initialize", &[]).unwrap_err();
    assert!(matches!(err, ScriptError::FunctionNotFound { .. }));
}
