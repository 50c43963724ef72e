//! Implementations of the pipeline stages
//!
//! Each stage reads its inputs from the artifact store (and the
//! deployments file) and persists its own output before returning, so a
//! failed later stage can be re-run without repeating earlier ones.

use std::{path::Path, sync::Arc};

use ethers::{abi::Token, providers::Middleware};
use tracing::{error, info, warn};

use crate::{
    artifacts::{load_artifact, load_calldata, save_artifact, save_calldata},
    cli::{CompileArgs, DeployLogicArgs, DeployProxyArgs, EncodeInitArgs},
    compiler::{compile_source, Severity},
    constants::{ARTIFACTS_DIR, INITIALIZE_FUNCTION, LOGIC_CONTRACT_KEY, PROXY_CONTRACT_KEY},
    deploy::{decode_hex, deploy_contract, parse_address},
    deployments::{read_deployed_address, write_deployed_address},
    encoder::encode_call_hex,
    errors::ScriptError,
    types::TargetContract,
};

/// Compile the selected contract and persist its artifact
pub fn compile(args: CompileArgs) -> Result<(), ScriptError> {
    let contract = args.contract;
    let mut outcome = compile_source(Path::new("."), contract.source_path())?;

    // Every diagnostic is reported, in receipt order, before any failure
    for diagnostic in &outcome.diagnostics {
        match diagnostic.severity {
            Severity::Error => error!("{}", diagnostic.text()),
            Severity::Warning => warn!("{}", diagnostic.text()),
            Severity::Info => info!("{}", diagnostic.text()),
        }
    }

    if outcome.has_errors() {
        return Err(ScriptError::Compilation {
            error_count: outcome.error_count(),
        });
    }

    let artifact = outcome
        .artifacts
        .remove(contract.contract_name())
        .ok_or_else(|| ScriptError::ContractNotFound {
            source_file: contract.source_path().to_string(),
            contract_name: contract.contract_name().to_string(),
        })?;

    let path = save_artifact(Path::new(ARTIFACTS_DIR), contract.artifact_name(), &artifact)?;
    println!("ABI & bytecode saved to {}", path.display());

    Ok(())
}

/// Deploy the logic (implementation) contract and record its address
pub async fn deploy_logic(
    args: DeployLogicArgs,
    client: Arc<impl Middleware>,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    let artifact = load_artifact(
        Path::new(ARTIFACTS_DIR),
        TargetContract::Logic.artifact_name(),
    )?;

    // The upgradeable logic contract takes no constructor arguments;
    // its setup runs through `initialize` on the proxy instead
    let record = deploy_contract(client, &artifact, Vec::new(), args.gas.policy()).await?;
    let address = record.require_address()?;

    println!("Logic contract deployed at {address:#x}");
    write_deployed_address(deployments_path, LOGIC_CONTRACT_KEY, address)?;

    Ok(())
}

/// Encode the logic contract's `initialize` call and persist the calldata
pub fn encode_init(args: EncodeInitArgs) -> Result<(), ScriptError> {
    let owner = parse_address(&args.owner)?;
    let artifact = load_artifact(
        Path::new(ARTIFACTS_DIR),
        TargetContract::Logic.artifact_name(),
    )?;

    let calldata = encode_call_hex(
        &artifact.abi,
        INITIALIZE_FUNCTION,
        &[Token::Address(owner)],
    )?;

    let path = save_calldata(Path::new(ARTIFACTS_DIR), &calldata)?;
    info!("initializer calldata: {calldata}");
    println!("Calldata encoded & saved to {}", path.display());

    Ok(())
}

/// Deploy the proxy contract pointed at the logic contract, with the
/// persisted initializer calldata baked into its construction
pub async fn deploy_proxy(
    args: DeployProxyArgs,
    client: Arc<impl Middleware>,
    deployments_path: &str,
) -> Result<(), ScriptError> {
    // The logic address is checked for well-formedness before anything
    // is submitted
    let logic_address = match &args.logic_address {
        Some(value) => parse_address(value)?,
        None => read_deployed_address(deployments_path, LOGIC_CONTRACT_KEY)?,
    };

    let artifact = load_artifact(
        Path::new(ARTIFACTS_DIR),
        TargetContract::Proxy.artifact_name(),
    )?;
    let init_calldata = decode_hex(&load_calldata(Path::new(ARTIFACTS_DIR))?)?;

    let record = deploy_contract(
        client,
        &artifact,
        vec![Token::Address(logic_address), Token::Bytes(init_calldata)],
        args.gas.policy(),
    )
    .await?;
    let address = record.require_address()?;

    println!("Proxy contract deployed at {address:#x}");
    write_deployed_address(deployments_path, PROXY_CONTRACT_KEY, address)?;

    Ok(())
}
