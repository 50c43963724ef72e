//! Constants used in the deploy scripts

/// The path of the logic contract source, relative to the project root
pub const LOGIC_SOURCE_PATH: &str = "contracts/PostBoardUpgradeable.sol";

/// The name of the logic contract within its source file
pub const LOGIC_CONTRACT_NAME: &str = "PostBoardUpgradeable";

/// The artifact file stem under which the logic contract is persisted
pub const LOGIC_ARTIFACT_NAME: &str = "PostBoard";

/// The path of the proxy contract source, relative to the project root
///
/// This is a flattened copy of the OpenZeppelin `ERC1967Proxy`, which forwards
/// all calls to the logic contract set at construction time.
pub const PROXY_SOURCE_PATH: &str = "contracts/ERC1967ProxyFlat.sol";

/// The name of the proxy contract within its source file
pub const PROXY_CONTRACT_NAME: &str = "ERC1967Proxy";

/// The artifact file stem under which the proxy contract is persisted
pub const PROXY_ARTIFACT_NAME: &str = "ERC1967Proxy";

/// The directory into which compilation artifacts are written
pub const ARTIFACTS_DIR: &str = "artifacts";

/// The file within the artifacts directory holding the encoded
/// initializer calldata
pub const INIT_CALLDATA_FILE: &str = "initCalldata.txt";

/// The name of the Solidity compiler binary
pub const SOLC_COMMAND: &str = "solc";

/// The flag selecting the compiler's standard-JSON interface
pub const STANDARD_JSON_FLAG: &str = "--standard-json";

/// The source language named in the compiler's standard-JSON input
pub const SOLIDITY_LANGUAGE: &str = "Solidity";

/// The output-selection key requesting a contract's ABI
pub const ABI_SELECTION: &str = "abi";

/// The output-selection key requesting a contract's creation bytecode
pub const BYTECODE_SELECTION: &str = "evm.bytecode";

/// The wildcard key in an output selection, matching all source files
/// or all contracts
pub const WILDCARD_SELECTION: &str = "*";

/// The directory searched for third-party contract dependencies,
/// e.g. `@openzeppelin/...` imports
pub const NODE_MODULES_DIR: &str = "node_modules";

/// The name of the logic contract's one-time initializer method,
/// invoked through the proxy in place of a constructor
pub const INITIALIZE_FUNCTION: &str = "initialize";

/// The gas limit applied to deployment transactions when none is given
pub const DEFAULT_GAS_LIMIT: u64 = 5_000_000;

/// The number of confirmations to wait for the contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 1;

/// The maximum time to wait for a deployment receipt before giving up
pub const DEPLOY_RECEIPT_TIMEOUT_SECS: u64 = 300;

/// The default path of the deployments file
pub const DEFAULT_DEPLOYMENTS_PATH: &str = "deployments.json";

/// The deployments key in the `deployments.json` file
pub const DEPLOYMENTS_KEY: &str = "deployments";

/// The logic implementation contract key in the `deployments.json` file
pub const LOGIC_CONTRACT_KEY: &str = "logic_contract";

/// The proxy contract key in the `deployments.json` file
pub const PROXY_CONTRACT_KEY: &str = "proxy_contract";
