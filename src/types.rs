//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use clap::ValueEnum;
use ethers::types::{Address, TxHash};

use crate::{
    constants::{
        LOGIC_ARTIFACT_NAME, LOGIC_CONTRACT_NAME, LOGIC_SOURCE_PATH, PROXY_ARTIFACT_NAME,
        PROXY_CONTRACT_NAME, PROXY_SOURCE_PATH,
    },
    errors::ScriptError,
};

/// The contracts managed by the build & deploy pipeline
#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum TargetContract {
    /// The upgradeable logic (implementation) contract
    Logic,
    /// The minimal proxy holding storage and delegating to the logic contract
    Proxy,
}

impl TargetContract {
    /// The path of the contract's source file, relative to the project root
    pub fn source_path(&self) -> &'static str {
        match self {
            TargetContract::Logic => LOGIC_SOURCE_PATH,
            TargetContract::Proxy => PROXY_SOURCE_PATH,
        }
    }

    /// The contract's name within its source file
    pub fn contract_name(&self) -> &'static str {
        match self {
            TargetContract::Logic => LOGIC_CONTRACT_NAME,
            TargetContract::Proxy => PROXY_CONTRACT_NAME,
        }
    }

    /// The file stem under which the contract's artifact is persisted
    pub fn artifact_name(&self) -> &'static str {
        match self {
            TargetContract::Logic => LOGIC_ARTIFACT_NAME,
            TargetContract::Proxy => PROXY_ARTIFACT_NAME,
        }
    }
}

impl Display for TargetContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetContract::Logic => write!(f, "logic"),
            TargetContract::Proxy => write!(f, "proxy"),
        }
    }
}

/// The terminal state of a deployment transaction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeployStatus {
    /// A receipt with a contract address arrived
    Confirmed,
    /// A receipt arrived indicating execution failure
    Reverted,
    /// No receipt arrived within the configured wait policy
    TimedOut,
}

/// The outcome of one contract-creation transaction
#[derive(Copy, Clone, Debug)]
pub struct DeploymentRecord {
    /// The hash under which the creation transaction was accepted
    pub tx_hash: TxHash,
    /// The address of the created contract, present only when confirmed
    pub contract_address: Option<Address>,
    /// The terminal state the transaction reached
    pub status: DeployStatus,
}

impl DeploymentRecord {
    /// The deployed contract address, or a deployment error for records
    /// that did not confirm with one
    pub fn require_address(&self) -> Result<Address, ScriptError> {
        self.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(
                "deployment record carries no contract address".to_string(),
            )
        })
    }
}

/// Gas parameters applied to deployment transactions
#[derive(Copy, Clone, Debug)]
pub struct GasPolicy {
    /// The gas limit set on the creation transaction
    pub gas_limit: u64,
    /// The gas price in wei, or the network estimate when absent
    pub gas_price: Option<u64>,
}
