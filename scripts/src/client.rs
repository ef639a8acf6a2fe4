//! The client through which the scripts submit transactions

use std::str::FromStr;

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, Log, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use tracing::info;

use crate::{errors::ScriptError, types::DeployedContract};

/// A signing connection to a chain.
///
/// Every method resolves only once the relevant transaction has been mined.
#[allow(async_fn_in_trait)]
pub trait DeployClient {
    /// The address that signs & pays for every transaction
    fn sender(&self) -> Address;

    /// Submit a contract creation transaction with the given payload
    async fn deploy(&self, code: Bytes) -> Result<DeployedContract, ScriptError>;

    /// Submit a call to `to` with the given calldata, returning the
    /// transaction hash
    async fn transact(&self, to: Address, calldata: Bytes) -> Result<B256, ScriptError>;

    /// Fetch the logs emitted by a mined transaction
    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<Log>, ScriptError>;
}

/// A [`DeployClient`] backed by an HTTP JSON-RPC provider and a local key
#[derive(Clone)]
pub struct RpcClient {
    /// The wallet-filled provider
    provider: DynProvider,
    /// The address of the local key
    sender: Address,
}

impl RpcClient {
    /// Connect to the given RPC url, signing with the given private key
    pub async fn connect(rpc_url: &str, priv_key: &str) -> Result<Self, ScriptError> {
        let signer = PrivateKeySigner::from_str(priv_key)
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let sender = signer.address();

        let url =
            Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
        info!("Connected to chain {} as {}", chain_id, sender);

        Ok(Self {
            provider: DynProvider::new(provider),
            sender,
        })
    }
}

impl DeployClient for RpcClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn deploy(&self, code: Bytes) -> Result<DeployedContract, ScriptError> {
        let tx = TransactionRequest::default().with_deploy_code(code);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "creation transaction {} reverted",
                receipt.transaction_hash
            )));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "no contract address in receipt of {}",
                receipt.transaction_hash
            ))
        })?;

        Ok(DeployedContract {
            address,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn transact(&self, to: Address, calldata: Bytes) -> Result<B256, ScriptError> {
        let tx = TransactionRequest::default().with_to(to).with_input(calldata);
        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        if !receipt.status() {
            return Err(ScriptError::ContractInteraction(format!(
                "transaction {} to {} reverted",
                receipt.transaction_hash, to
            )));
        }

        Ok(receipt.transaction_hash)
    }

    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<Log>, ScriptError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .ok_or_else(|| {
                ScriptError::ContractInteraction(format!("no receipt found for {tx_hash}"))
            })?;

        Ok(receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A well-formed private key
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_bad_key_fails_initialization() {
        let res = RpcClient::connect("http://localhost:8545", "garbage").await;
        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }

    #[tokio::test]
    async fn test_bad_url_fails_initialization() {
        let res = RpcClient::connect("not a url", TEST_KEY).await;
        assert!(matches!(res, Err(ScriptError::ClientInitialization(_))));
    }
}
