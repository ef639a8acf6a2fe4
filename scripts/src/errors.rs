//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error writing the addresses file
    WriteDeployments(String),
    /// Error locating or parsing a Hardhat compilation artifact
    ArtifactParsing(String),
    /// Error linking a library address into contract bytecode
    Linking(String),
    /// Error loading or validating the deployment configuration
    Config(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error locating or decoding an event in a transaction receipt
    EventDecoding(String),
}

impl ScriptError {
    /// Prefix a deployment error with the name of the contract being deployed
    pub(crate) fn for_contract(self, contract: &str) -> Self {
        match self {
            ScriptError::ContractDeployment(s) => {
                ScriptError::ContractDeployment(format!("{contract}: {s}"))
            }
            other => other,
        }
    }
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::Linking(s) => write!(f, "error linking bytecode: {}", s),
            ScriptError::Config(s) => write!(f, "invalid configuration: {}", s),
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::EventDecoding(s) => write!(f, "error decoding event: {}", s),
        }
    }
}

impl Error for ScriptError {}
