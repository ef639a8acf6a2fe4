//! An in-process chain for exercising the deployment without a node

#![allow(dead_code)]

use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use alloy::{
    primitives::{address, keccak256, Address, Bytes, Log, B256},
    sol_types::SolEvent,
};
use scripts::{
    artifacts::{Artifact, ArtifactStore, LinkOffset},
    client::DeployClient,
    constants::{
        EXPECTED_ADDRESSES_LOG_INDEX, REQUIRED_CONTRACTS, UTILS_LIBRARY, ZECREY_LEGEND_CONTRACT,
    },
    errors::ScriptError,
    solidity::IDeployFactory::Addresses,
    types::{DeployedContract, ProxyAddresses},
};

/// The account the mock chain signs with
pub const DEPLOYER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

/// The byte offset of the `Utils` placeholder in the Zecrey Legend bytecode
pub const UTILS_LINK_OFFSET: usize = 4;

/// A solc library placeholder
const PLACEHOLDER: &str = "__$9a5f7c6e1b2d3c4a5b6c7d8e9f0a1b2c3d$__";

/// The four-byte creation bytecode standing in for the given contract
pub fn bytecode_of(contract: &str) -> Bytes {
    Bytes::copy_from_slice(&keccak256(contract.as_bytes())[..4])
}

/// Artifacts for every contract in a deployment. The Zecrey Legend bytecode
/// references `Utils` right after its four-byte prefix.
pub fn test_store() -> ArtifactStore {
    ArtifactStore::from_artifacts(REQUIRED_CONTRACTS.iter().map(|&name| {
        let prefix = hex::encode(bytecode_of(name));
        if name == ZECREY_LEGEND_CONTRACT {
            Artifact {
                contract_name: name.to_string(),
                source_name: format!("contracts/{name}.sol"),
                bytecode: format!("0x{prefix}{PLACEHOLDER}00"),
                link_references: BTreeMap::from([(
                    "contracts/lib/Utils.sol".to_string(),
                    BTreeMap::from([(
                        UTILS_LIBRARY.to_string(),
                        vec![LinkOffset {
                            start: UTILS_LINK_OFFSET,
                            length: 20,
                        }],
                    )]),
                )]),
            }
        } else {
            Artifact {
                contract_name: name.to_string(),
                source_name: format!("contracts/{name}.sol"),
                bytecode: format!("0x{prefix}"),
                link_references: BTreeMap::new(),
            }
        }
    }))
}

/// The proxies the mock deploy factory reports for a factory at `factory`
pub fn proxy_addresses(factory: Address) -> ProxyAddresses {
    ProxyAddresses {
        governance: factory.create(1),
        asset_governance: factory.create(2),
        verifier: factory.create(3),
        zns_controller: factory.create(4),
        zns_resolver: factory.create(5),
        zecrey_legend: factory.create(6),
        gatekeeper: factory.create(7),
    }
}

/// The `Addresses` log a deploy factory at `factory` emits
pub fn addresses_log(factory: Address) -> Log {
    let proxies = proxy_addresses(factory);
    let event = Addresses {
        governance: proxies.governance,
        assetGovernance: proxies.asset_governance,
        verifier: proxies.verifier,
        znsController: proxies.zns_controller,
        znsResolver: proxies.zns_resolver,
        zecreyLegend: proxies.zecrey_legend,
        gatekeeper: proxies.gatekeeper,
    };
    Log {
        address: factory,
        data: event.encode_log_data(),
    }
}

/// The recorded activity of a [`MockClient`]
#[derive(Default)]
pub struct MockState {
    /// The next nonce of the deployer
    nonce: u64,
    /// The payloads of successful creation transactions, in order
    pub deployments: Vec<(Address, Bytes)>,
    /// The calls made, in order
    pub calls: Vec<(Address, Bytes)>,
    /// The logs of every mined transaction
    receipts: HashMap<B256, Vec<Log>>,
}

/// A [`DeployClient`] that mines every transaction instantly.
///
/// Deploying the deploy factory emits an `Addresses` event among a number of
/// unrelated logs, mimicking the proxies' own initialization events.
pub struct MockClient {
    /// The bytecode prefix identifying the deploy factory
    factory_code: Bytes,
    /// A bytecode prefix whose deployments revert
    revert_code: Option<Bytes>,
    /// Where to place the `Addresses` event in the factory's logs, if at all
    addresses_log_index: Option<usize>,
    /// The recorded activity
    pub state: Mutex<MockState>,
}

impl MockClient {
    /// A mock chain on which the given bytecode acts as the deploy factory
    pub fn new(factory_code: Bytes) -> Self {
        Self {
            factory_code,
            revert_code: None,
            addresses_log_index: Some(EXPECTED_ADDRESSES_LOG_INDEX),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Revert every deployment whose payload starts with `code`
    pub fn revert_on(mut self, code: Bytes) -> Self {
        self.revert_code = Some(code);
        self
    }

    /// Place the `Addresses` event at the given log index, or omit it
    pub fn with_addresses_log_index(mut self, index: Option<usize>) -> Self {
        self.addresses_log_index = index;
        self
    }

    /// The successful deployments so far
    pub fn deployments(&self) -> Vec<(Address, Bytes)> {
        self.state.lock().unwrap().deployments.clone()
    }

    /// The calls made so far
    pub fn calls(&self) -> Vec<(Address, Bytes)> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Build the receipt logs of a deploy factory creation
    fn factory_logs(&self, factory: Address) -> Vec<Log> {
        let upgraded = keccak256("Upgraded(address)");
        let filler = |i: u64| {
            Log::new_unchecked(
                factory.create(i % 7 + 1),
                vec![upgraded, B256::left_padding_from(&i.to_be_bytes())],
                Bytes::new(),
            )
        };

        let Some(index) = self.addresses_log_index else {
            return (0..10).map(filler).collect();
        };

        let mut logs: Vec<Log> = (0..index as u64).map(filler).collect();
        logs.push(addresses_log(factory));
        logs.push(filler(index as u64 + 1));
        logs
    }
}

impl DeployClient for MockClient {
    fn sender(&self) -> Address {
        DEPLOYER
    }

    async fn deploy(&self, code: Bytes) -> Result<DeployedContract, ScriptError> {
        if self
            .revert_code
            .as_ref()
            .is_some_and(|revert| code.starts_with(revert))
        {
            return Err(ScriptError::ContractDeployment(
                "execution reverted".to_string(),
            ));
        }

        let mut state = self.state.lock().unwrap();
        let address = DEPLOYER.create(state.nonce);
        let tx_hash = keccak256(address);
        state.nonce += 1;

        let logs = if code.starts_with(&self.factory_code) {
            self.factory_logs(address)
        } else {
            Vec::new()
        };
        state.receipts.insert(tx_hash, logs);
        state.deployments.push((address, code));

        Ok(DeployedContract { address, tx_hash })
    }

    async fn transact(&self, to: Address, calldata: Bytes) -> Result<B256, ScriptError> {
        let mut state = self.state.lock().unwrap();
        let tx_hash = keccak256([to.as_slice(), &state.nonce.to_be_bytes()].concat());
        state.nonce += 1;

        state.receipts.insert(tx_hash, Vec::new());
        state.calls.push((to, calldata));

        Ok(tx_hash)
    }

    async fn receipt_logs(&self, tx_hash: B256) -> Result<Vec<Log>, ScriptError> {
        self.state
            .lock()
            .unwrap()
            .receipts
            .get(&tx_hash)
            .cloned()
            .ok_or_else(|| ScriptError::ContractInteraction(format!("no receipt for {tx_hash}")))
    }
}
