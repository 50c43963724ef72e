//! The deployments file: the pipeline's persisted record of deployed
//! addresses
//!
//! Each deploy stage appends its confirmed address here, and the proxy
//! stage reads the logic address back when none is passed on the command
//! line. This is what makes the stage sequence resumable across process
//! invocations.

use std::{fs, path::PathBuf, str::FromStr};

use ethers::types::Address;
use json::JsonValue;

use crate::{constants::DEPLOYMENTS_KEY, errors::ScriptError};

/// Parse the deployments file into a JSON value
fn get_json_from_file(file_path: &str) -> Result<JsonValue, ScriptError> {
    let contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::ReadDeployments(e.to_string()))?;

    json::parse(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Read a deployed contract address back out of the deployments file
pub fn read_deployed_address(file_path: &str, contract_key: &str) -> Result<Address, ScriptError> {
    let parsed_json = get_json_from_file(file_path)?;

    Address::from_str(
        parsed_json[DEPLOYMENTS_KEY][contract_key]
            .as_str()
            .ok_or_else(|| {
                ScriptError::ReadDeployments(format!(
                    "no {contract_key} address recorded in {file_path}"
                ))
            })?,
    )
    .map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Record a deployed contract address in the deployments file, creating
/// the file if absent
pub fn write_deployed_address(
    file_path: &str,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    if !PathBuf::from(file_path).exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
    }
    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[DEPLOYMENTS_KEY][contract_key] = JsonValue::String(format!("{address:#x}"));

    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use tempfile::tempdir;

    use crate::constants::{LOGIC_CONTRACT_KEY, PROXY_CONTRACT_KEY};

    use super::*;

    #[test]
    fn test_address_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let path = path.to_str().unwrap();

        let logic = Address::repeat_byte(0xaa);
        let proxy = Address::repeat_byte(0xbb);
        write_deployed_address(path, LOGIC_CONTRACT_KEY, logic).unwrap();
        write_deployed_address(path, PROXY_CONTRACT_KEY, proxy).unwrap();

        assert_eq!(read_deployed_address(path, LOGIC_CONTRACT_KEY).unwrap(), logic);
        assert_eq!(read_deployed_address(path, PROXY_CONTRACT_KEY).unwrap(), proxy);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployments.json");
        let path = path.to_str().unwrap();

        write_deployed_address(path, LOGIC_CONTRACT_KEY, Address::zero()).unwrap();
        let err = read_deployed_address(path, PROXY_CONTRACT_KEY).unwrap_err();
        assert!(matches!(err, ScriptError::ReadDeployments(_)));
    }
}
