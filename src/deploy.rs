//! Construction and submission of contract-creation transactions
//!
//! A deployment moves through `built -> submitted -> {confirmed |
//! reverted | timed-out}`: the transaction is built from an artifact's
//! bytecode and constructor arguments, submitted through the signing
//! client, and then awaited under a fixed wait policy. Only a confirmed
//! receipt carries a usable contract address; every other terminal state
//! is an error to the calling stage.

use std::{str::FromStr, sync::Arc, time::Duration};

use ethers::{
    abi::Token,
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, Bytes, TransactionReceipt, TxHash, U64},
};
use tracing::info;

use crate::{
    compiler::ContractArtifact,
    constants::{DEPLOY_RECEIPT_TIMEOUT_SECS, NUM_DEPLOY_CONFIRMATIONS},
    errors::ScriptError,
    types::{DeployStatus, DeploymentRecord, GasPolicy},
};

/// Sets up the client with which to submit transactions, deriving the
/// chain id from the RPC endpoint
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<Arc<impl Middleware>, ScriptError> {
    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    let wallet = LocalWallet::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();
    let client = Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    ));

    Ok(client)
}

/// Check a string for address well-formedness
pub fn parse_address(value: &str) -> Result<Address, ScriptError> {
    Address::from_str(value).map_err(|_| ScriptError::InvalidAddress {
        value: value.to_string(),
    })
}

/// Decode a hex string, tolerating an optional `0x` prefix
pub fn decode_hex(value: &str) -> Result<Vec<u8>, ScriptError> {
    let raw = value.trim().trim_start_matches("0x");
    hex::decode(raw).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Deploy a contract from its artifact, returning the record of the
/// confirmed creation transaction
///
/// Used identically for the logic and proxy deployments; the proxy's
/// constructor arguments are the logic address and the initializer
/// calldata.
pub async fn deploy_contract(
    client: Arc<impl Middleware>,
    artifact: &ContractArtifact,
    constructor_args: Vec<Token>,
    gas: GasPolicy,
) -> Result<DeploymentRecord, ScriptError> {
    let bytecode = Bytes::from(decode_hex(&artifact.evm.bytecode.object)?);
    let factory = ContractFactory::new(artifact.abi.clone(), bytecode, client.clone());

    let deployer = factory
        .deploy_tokens(constructor_args)
        .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

    let mut tx = deployer.tx;
    tx.set_gas(gas.gas_limit);
    if let Some(gas_price) = gas.gas_price {
        tx.set_gas_price(gas_price);
    }

    let pending = client
        .send_transaction(tx, None /* block */)
        .await
        .map_err(|e| ScriptError::Submission(e.to_string()))?;
    let tx_hash = *pending;
    info!("deployment transaction submitted: {tx_hash:#x}");

    let receipt = tokio::time::timeout(
        Duration::from_secs(DEPLOY_RECEIPT_TIMEOUT_SECS),
        pending.confirmations(NUM_DEPLOY_CONFIRMATIONS),
    )
    .await
    .map_err(|_| ScriptError::TimedOut { tx_hash })?
    .map_err(|e| ScriptError::Submission(e.to_string()))?;

    record_from_receipt(tx_hash, receipt)
}

/// Map a receipt (or its absence) onto the deployment state machine's
/// terminal states
fn record_from_receipt(
    tx_hash: TxHash,
    receipt: Option<TransactionReceipt>,
) -> Result<DeploymentRecord, ScriptError> {
    let receipt = receipt.ok_or(ScriptError::TimedOut { tx_hash })?;

    let succeeded = receipt.status == Some(U64::one());
    match (succeeded, receipt.contract_address) {
        (true, Some(contract_address)) => Ok(DeploymentRecord {
            tx_hash,
            contract_address: Some(contract_address),
            status: DeployStatus::Confirmed,
        }),
        _ => Err(ScriptError::Reverted { tx_hash }),
    }
}
