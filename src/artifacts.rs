//! Persistence of compiled-contract artifacts and the initializer
//! calldata blob
//!
//! One JSON file per contract name under the artifacts directory, plus a
//! single raw-hex text file for the encoded initializer call. An artifact
//! is only ever written whole: a compile that produced no usable output
//! never leaves a partial file behind.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ethers::abi::Abi;

use crate::{
    compiler::ContractArtifact,
    constants::INIT_CALLDATA_FILE,
    errors::ScriptError,
};

/// The path of a named contract's artifact file
pub fn artifact_path(artifacts_dir: &Path, name: &str) -> PathBuf {
    artifacts_dir.join(format!("{name}.json"))
}

/// The path of the initializer-calldata file
pub fn calldata_path(artifacts_dir: &Path) -> PathBuf {
    artifacts_dir.join(INIT_CALLDATA_FILE)
}

/// Persist a contract artifact as canonical JSON, creating the artifacts
/// directory if absent
///
/// Refuses to write an artifact whose ABI or bytecode is empty.
pub fn save_artifact(
    artifacts_dir: &Path,
    name: &str,
    artifact: &ContractArtifact,
) -> Result<PathBuf, ScriptError> {
    if abi_is_empty(&artifact.abi) || artifact.evm.bytecode.object.trim().is_empty() {
        return Err(ScriptError::IncompleteArtifact {
            contract_name: name.to_string(),
        });
    }

    fs::create_dir_all(artifacts_dir).map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    let path = artifact_path(artifacts_dir, name);
    let contents = serde_json::to_string_pretty(artifact)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
    fs::write(&path, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    Ok(path)
}

/// Load a previously persisted contract artifact
pub fn load_artifact(artifacts_dir: &Path, name: &str) -> Result<ContractArtifact, ScriptError> {
    let path = artifact_path(artifacts_dir, name);
    if !path.exists() {
        return Err(ScriptError::ArtifactNotFound {
            name: name.to_string(),
        });
    }

    let contents = fs::read_to_string(&path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
}

/// Persist the encoded initializer calldata as raw hex text
pub fn save_calldata(artifacts_dir: &Path, calldata: &str) -> Result<PathBuf, ScriptError> {
    fs::create_dir_all(artifacts_dir).map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    let path = calldata_path(artifacts_dir);
    fs::write(&path, calldata.trim()).map_err(|e| ScriptError::WriteFile(e.to_string()))?;

    Ok(path)
}

/// Load the encoded initializer calldata, trimmed of surrounding whitespace
pub fn load_calldata(artifacts_dir: &Path) -> Result<String, ScriptError> {
    let path = calldata_path(artifacts_dir);
    if !path.exists() {
        return Err(ScriptError::CalldataNotFound);
    }

    let contents = fs::read_to_string(&path).map_err(|e| ScriptError::ReadFile(e.to_string()))?;
    Ok(contents.trim().to_string())
}

/// Whether an ABI describes no callable surface at all
///
/// A proxy's ABI may legitimately hold only a constructor and a fallback,
/// so every section counts.
fn abi_is_empty(abi: &Abi) -> bool {
    abi.constructor.is_none()
        && abi.functions.is_empty()
        && abi.events.is_empty()
        && abi.errors.is_empty()
        && !abi.fallback
        && !abi.receive
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use tempfile::tempdir;

    use crate::compiler::{BytecodeObject, ContractArtifact, EvmOutput};

    use super::*;

    fn sample_artifact() -> ContractArtifact {
        let abi: Abi = serde_json::from_str(
            r#"[
                {
                    "type": "function",
                    "name": "initialize",
                    "inputs": [{"name": "owner", "type": "address"}],
                    "outputs": [],
                    "stateMutability": "nonpayable"
                }
            ]"#,
        )
        .unwrap();

        ContractArtifact {
            abi,
            evm: EvmOutput {
                bytecode: BytecodeObject {
                    object: "6080604052".to_string(),
                },
            },
        }
    }

    #[test]
    fn test_artifact_round_trip() {
        let dir = tempdir().unwrap();
        let path = save_artifact(dir.path(), "PostBoard", &sample_artifact()).unwrap();
        assert_eq!(path, dir.path().join("PostBoard.json"));

        let loaded = load_artifact(dir.path(), "PostBoard").unwrap();
        assert!(loaded.abi.function("initialize").is_ok());
        assert_eq!(loaded.evm.bytecode.object, "6080604052");
    }

    #[test]
    fn test_artifact_json_orders_abi_before_bytecode() {
        let dir = tempdir().unwrap();
        let path = save_artifact(dir.path(), "PostBoard", &sample_artifact()).unwrap();

        let raw = std::fs::read_to_string(path).unwrap();
        let abi_at = raw.find("\"abi\"").unwrap();
        let evm_at = raw.find("\"evm\"").unwrap();
        assert!(abi_at < evm_at);
        assert!(raw.contains("\"object\""));
    }

    #[test]
    fn test_save_is_idempotent() {
        let dir = tempdir().unwrap();
        save_artifact(dir.path(), "PostBoard", &sample_artifact()).unwrap();
        save_artifact(dir.path(), "PostBoard", &sample_artifact()).unwrap();

        assert!(load_artifact(dir.path(), "PostBoard").is_ok());
    }

    #[test]
    fn test_load_before_save_fails() {
        let dir = tempdir().unwrap();
        let err = load_artifact(dir.path(), "PostBoard").unwrap_err();
        assert!(matches!(err, ScriptError::ArtifactNotFound { .. }));

        let err = load_calldata(dir.path()).unwrap_err();
        assert!(matches!(err, ScriptError::CalldataNotFound));
    }

    #[test]
    fn test_incomplete_artifact_is_never_persisted() {
        let dir = tempdir().unwrap();
        let mut artifact = sample_artifact();
        artifact.evm.bytecode.object = String::new();

        let err = save_artifact(dir.path(), "PostBoard", &artifact).unwrap_err();
        assert!(matches!(err, ScriptError::IncompleteArtifact { .. }));
        assert!(!artifact_path(dir.path(), "PostBoard").exists());
    }

    #[test]
    fn test_calldata_round_trip_trims() {
        let dir = tempdir().unwrap();
        save_calldata(dir.path(), "0xc4d66de8\n").unwrap();
        assert_eq!(load_calldata(dir.path()).unwrap(), "0xc4d66de8");
    }
}
