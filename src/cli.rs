//! Definitions of CLI arguments and commands for the build & deploy scripts

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{compile, deploy_logic, deploy_proxy, encode_init},
    constants::{DEFAULT_DEPLOYMENTS_PATH, DEFAULT_GAS_LIMIT},
    deploy::setup_client,
    errors::ScriptError,
    types::{GasPolicy, TargetContract},
};

/// The top-level CLI: global connection arguments plus one subcommand
/// per pipeline stage
#[derive(Parser)]
pub struct Cli {
    /// Private key of the deployer
    // TODO: Better key management
    #[arg(short, long, env = "PRIVATE_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: String,

    /// Path to the deployments file in which contract addresses are recorded
    #[arg(short, long, default_value = DEFAULT_DEPLOYMENTS_PATH)]
    pub deployments_path: String,

    /// The pipeline stage to run
    #[command(subcommand)]
    pub command: Command,
}

/// The pipeline stages, each independently invokable
#[derive(Subcommand)]
pub enum Command {
    /// Compile a contract and persist its ABI & bytecode artifact
    Compile(CompileArgs),
    /// Deploy the logic (implementation) contract
    DeployLogic(DeployLogicArgs),
    /// Encode the initializer calldata against the logic artifact
    EncodeInit(EncodeInitArgs),
    /// Deploy the proxy pointed at the logic contract
    DeployProxy(DeployProxyArgs),
}

impl Command {
    /// Dispatch the selected stage, setting up the RPC client for the
    /// stages that submit transactions
    pub async fn run(
        self,
        priv_key: &str,
        rpc_url: &str,
        deployments_path: &str,
    ) -> Result<(), ScriptError> {
        match self {
            Command::Compile(args) => compile(args),
            Command::DeployLogic(args) => {
                let client = setup_client(priv_key, rpc_url).await?;
                deploy_logic(args, client, deployments_path).await
            }
            Command::EncodeInit(args) => encode_init(args),
            Command::DeployProxy(args) => {
                let client = setup_client(priv_key, rpc_url).await?;
                deploy_proxy(args, client, deployments_path).await
            }
        }
    }
}

/// Compile one of the managed contracts
#[derive(Args)]
pub struct CompileArgs {
    /// Which contract to compile
    #[arg(short, long)]
    pub contract: TargetContract,
}

/// Deploy the logic contract
#[derive(Args)]
pub struct DeployLogicArgs {
    /// Gas parameters for the deployment transaction
    #[command(flatten)]
    pub gas: GasArgs,
}

/// Encode the logic contract's `initialize` call
#[derive(Args)]
pub struct EncodeInitArgs {
    /// Address of the owner the logic contract is initialized with
    #[arg(short, long, env = "OWNER_ADDRESS")]
    pub owner: String,
}

/// Deploy the proxy contract
#[derive(Args)]
pub struct DeployProxyArgs {
    /// Logic contract address in hex; read from the deployments file
    /// when omitted
    pub logic_address: Option<String>,

    /// Gas parameters for the deployment transaction
    #[command(flatten)]
    pub gas: GasArgs,
}

/// Gas parameters shared by the deployment stages
#[derive(Args)]
pub struct GasArgs {
    /// Gas limit for the deployment transaction
    #[arg(long, env = "GAS_LIMIT", default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Gas price in wei; the network estimate is used when omitted
    #[arg(long, env = "GAS_PRICE_WEI")]
    pub gas_price: Option<u64>,
}

impl GasArgs {
    /// The gas policy these arguments describe
    pub fn policy(&self) -> GasPolicy {
        GasPolicy {
            gas_limit: self.gas_limit,
            gas_price: self.gas_price,
        }
    }
}

#[cfg(test)]
#[allow(clippy::missing_docs_in_private_items)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_proxy_stage_takes_positional_logic_address() {
        let cli = Cli::try_parse_from([
            "pixshare-scripts",
            "-p",
            "0xkey",
            "-r",
            "http://localhost:8545",
            "deploy-proxy",
            "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
        ])
        .unwrap();

        assert_eq!(cli.deployments_path, "deployments.json");
        match cli.command {
            Command::DeployProxy(args) => {
                assert_eq!(
                    args.logic_address.as_deref(),
                    Some("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
                );
                assert_eq!(args.gas.gas_limit, DEFAULT_GAS_LIMIT);
                assert_eq!(args.gas.gas_price, None);
            }
            _ => panic!("expected deploy-proxy"),
        }
    }

    #[test]
    fn test_compile_stage_selects_contract() {
        let cli = Cli::try_parse_from([
            "pixshare-scripts",
            "-p",
            "0xkey",
            "-r",
            "http://localhost:8545",
            "compile",
            "--contract",
            "proxy",
        ])
        .unwrap();

        match cli.command {
            Command::Compile(args) => {
                assert_eq!(args.contract.contract_name(), "ERC1967Proxy");
            }
            _ => panic!("expected compile"),
        }
    }
}
