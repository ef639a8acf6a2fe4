//! Type definitions used throughout the scripts

use alloy::primitives::{Address, Bytes, B256};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{
    constants::{
        ASSET_GOVERNANCE_KEY, GOVERNANCE_KEY, TOKEN_KEY_SUFFIX, UPGRADE_GATEKEEPER_KEY,
        VERIFIER_PROXY_KEY, ZECREY_LEGEND_PROXY_KEY, ZNS_CONTROLLER_PROXY_KEY,
        ZNS_RESOLVER_PROXY_KEY,
    },
    solidity::IDeployFactory::Addresses,
};

/// A contract whose creation transaction has been mined
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// The address of the contract
    pub address: Address,
    /// The hash of the creation transaction
    pub tx_hash: B256,
}

/// Fully linked creation bytecode for a named contract
#[derive(Clone, Debug)]
pub struct ContractFactory {
    /// The name of the contract
    pub name: &'static str,
    /// The creation bytecode
    pub bytecode: Bytes,
}

impl ContractFactory {
    /// The payload of a creation transaction: the bytecode followed by the
    /// ABI-encoded constructor arguments
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + constructor_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(constructor_args);
        code.into()
    }
}

/// The addresses created by the deploy factory, as emitted in its
/// `Addresses` event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProxyAddresses {
    /// The governance proxy
    pub governance: Address,
    /// The asset governance contract
    pub asset_governance: Address,
    /// The verifier proxy
    pub verifier: Address,
    /// The ZNS controller proxy
    pub zns_controller: Address,
    /// The ZNS resolver proxy
    pub zns_resolver: Address,
    /// The Zecrey Legend proxy
    pub zecrey_legend: Address,
    /// The upgrade gatekeeper
    pub gatekeeper: Address,
}

impl From<Addresses> for ProxyAddresses {
    fn from(event: Addresses) -> Self {
        Self {
            governance: event.governance,
            asset_governance: event.assetGovernance,
            verifier: event.verifier,
            zns_controller: event.znsController,
            zns_resolver: event.znsResolver,
            zecrey_legend: event.zecreyLegend,
            gatekeeper: event.gatekeeper,
        }
    }
}

/// A deployed ERC20 token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedToken {
    /// The token symbol
    pub symbol: String,
    /// The token address
    pub address: Address,
}

/// The result of a full deployment, as persisted to the addresses file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedAddresses {
    /// The contracts created by the deploy factory
    pub proxies: ProxyAddresses,
    /// The tokens, in deployment order
    pub tokens: Vec<DeployedToken>,
}

impl DeployedAddresses {
    /// The addresses keyed as in the addresses file, in file order
    pub fn entries(&self) -> Vec<(String, Address)> {
        let ProxyAddresses {
            governance,
            asset_governance,
            verifier,
            zns_controller,
            zns_resolver,
            zecrey_legend,
            gatekeeper,
        } = self.proxies;

        let mut entries = vec![
            (GOVERNANCE_KEY.to_string(), governance),
            (ASSET_GOVERNANCE_KEY.to_string(), asset_governance),
            (VERIFIER_PROXY_KEY.to_string(), verifier),
            (ZNS_CONTROLLER_PROXY_KEY.to_string(), zns_controller),
            (ZNS_RESOLVER_PROXY_KEY.to_string(), zns_resolver),
            (ZECREY_LEGEND_PROXY_KEY.to_string(), zecrey_legend),
            (UPGRADE_GATEKEEPER_KEY.to_string(), gatekeeper),
        ];
        entries.extend(
            self.tokens
                .iter()
                .map(|token| (format!("{}{}", token.symbol, TOKEN_KEY_SUFFIX), token.address)),
        );

        entries
    }
}

impl Serialize for DeployedAddresses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, address) in entries {
            map.serialize_entry(&key, &address.to_checksum(None))?;
        }
        map.end()
    }
}
