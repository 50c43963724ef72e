//! Definitions of errors that can occur during the execution of the
//! contract build & deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use ethers::types::TxHash;

/// Errors that can occur during the execution of the contract build & deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading a source or artifact file
    ReadFile(String),
    /// Error writing a source or artifact file
    WriteFile(String),
    /// Error reading the `deployments.json` file
    ReadDeployments(String),
    /// Error writing the `deployments.json` file
    WriteDeployments(String),
    /// Error launching the Solidity compiler process or exchanging
    /// standard JSON with it
    CompilerExecution(String),
    /// The compiler reported one or more error-severity diagnostics
    Compilation {
        /// The number of error-severity diagnostics reported
        error_count: usize,
    },
    /// The requested contract was absent from the compiler's output,
    /// despite the compiler reporting no errors
    ContractNotFound {
        /// The source file the contract was expected in
        source_file: String,
        /// The name of the missing contract
        contract_name: String,
    },
    /// A compiled artifact was produced without an ABI or bytecode
    IncompleteArtifact {
        /// The name of the offending contract
        contract_name: String,
    },
    /// Error parsing a compilation artifact
    ArtifactParsing(String),
    /// A contract artifact was read before being written
    ArtifactNotFound {
        /// The artifact file stem that could not be found
        name: String,
    },
    /// The initializer calldata blob was read before being written
    CalldataNotFound,
    /// The named function is absent from the artifact's ABI
    FunctionNotFound {
        /// The name of the missing function
        function_name: String,
    },
    /// The arguments supplied for encoding disagree with the function's
    /// parameter list
    ArgumentMismatch {
        /// Description of the expected parameters
        expected: String,
        /// Description of the arguments actually supplied
        got: String,
    },
    /// A string failed the address well-formedness check
    InvalidAddress {
        /// The offending input
        value: String,
    },
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error constructing the contract-creation transaction
    ContractDeployment(String),
    /// The network or signing layer rejected the creation transaction
    Submission(String),
    /// The creation transaction was mined but execution reverted
    Reverted {
        /// The hash of the reverted transaction
        tx_hash: TxHash,
    },
    /// No receipt arrived for the creation transaction within the
    /// configured wait policy
    TimedOut {
        /// The hash of the submitted transaction
        tx_hash: TxHash,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ReadFile(s) => write!(f, "error reading file: {s}"),
            ScriptError::WriteFile(s) => write!(f, "error writing file: {s}"),
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {s}"),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {s}"),
            ScriptError::CompilerExecution(s) => write!(f, "error running compiler: {s}"),
            ScriptError::Compilation { error_count } => {
                write!(f, "compilation failed with {error_count} error(s)")
            }
            ScriptError::ContractNotFound {
                source_file,
                contract_name,
            } => write!(
                f,
                "contract {contract_name} not found in compiler output for {source_file}"
            ),
            ScriptError::IncompleteArtifact { contract_name } => {
                write!(f, "artifact for {contract_name} is missing its abi or bytecode")
            }
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {s}"),
            ScriptError::ArtifactNotFound { name } => {
                write!(f, "artifact {name} not found, run the compile stage first")
            }
            ScriptError::CalldataNotFound => write!(
                f,
                "initializer calldata not found, run the encode stage first"
            ),
            ScriptError::FunctionNotFound { function_name } => {
                write!(f, "function {function_name} not found in artifact abi")
            }
            ScriptError::ArgumentMismatch { expected, got } => {
                write!(f, "argument mismatch: expected {expected}, got {got}")
            }
            ScriptError::InvalidAddress { value } => {
                write!(f, "{value} is not a well-formed address")
            }
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {s}"),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {s}"),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {s}"),
            ScriptError::Submission(s) => write!(f, "error submitting transaction: {s}"),
            ScriptError::Reverted { tx_hash } => {
                write!(f, "deployment transaction {tx_hash:#x} reverted")
            }
            ScriptError::TimedOut { tx_hash } => write!(
                f,
                "no receipt for deployment transaction {tx_hash:#x} within the wait policy"
            ),
        }
    }
}

impl Error for ScriptError {}
