//! Definitions of CLI arguments for the deploy script

use std::{ffi::OsString, path::PathBuf};

use clap::{error::ErrorKind, Parser};
use tracing::info;

use crate::{
    artifacts::ArtifactStore,
    client::RpcClient,
    commands::deploy_and_save,
    config::DeployConfig,
    constants::{DEFAULT_ADDRESSES_PATH, DEFAULT_ARTIFACTS_DIR, REQUIRED_CONTRACTS},
    errors::ScriptError,
};

/// Deploy the Zecrey Legend contracts and record their addresses
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = "http://localhost:8545")]
    pub rpc_url: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(short, long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Path of the addresses file to write
    #[arg(short, long, default_value = DEFAULT_ADDRESSES_PATH)]
    pub out: PathBuf,

    /// JSON file overriding the default deployment parameters
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse the arguments of the current process
    pub fn parse_args() -> Result<Self, clap::Error> {
        Self::parse_args_from(std::env::args_os())
    }

    /// Parse the given arguments.
    ///
    /// Help & version requests are printed and exit the process successfully.
    /// Any other parse error is returned, to be reported as a failed run.
    pub fn parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => e,
        })
    }

    /// Run the deployment described by the arguments
    pub async fn run(self) -> Result<(), ScriptError> {
        let config = DeployConfig::load(self.config.as_deref())?;
        let store = ArtifactStore::from_dir(&self.artifacts, &REQUIRED_CONTRACTS)?;
        let client = RpcClient::connect(&self.rpc_url, &self.priv_key).await?;

        deploy_and_save(&client, &store, &config, &self.out).await?;

        info!("Deployment complete");
        Ok(())
    }
}
