//! The deployment of the Zecrey Legend contracts

use std::{collections::HashMap, path::Path};

use alloy::{
    primitives::{Address, Log, B256},
    sol_types::{SolCall, SolEvent, SolValue},
};
use tracing::{info, warn};

use crate::{
    artifacts::ArtifactStore,
    client::DeployClient,
    config::DeployConfig,
    constants::{
        DEPLOY_FACTORY_CONTRACT, EXPECTED_ADDRESSES_LOG_INDEX, GOVERNANCE_CONTRACT,
        TOKEN_CONTRACT, UTILS_LIBRARY, VERIFIER_CONTRACT, ZECREY_LEGEND_CONTRACT,
        ZNS_CONTROLLER_CONTRACT, ZNS_PRICE_ORACLE_CONTRACT, ZNS_REGISTRY_CONTRACT,
        ZNS_RESOLVER_CONTRACT,
    },
    errors::ScriptError,
    solidity::{IAssetGovernance, IDeployFactory::Addresses, IZNSRegistry},
    types::{ContractFactory, DeployedAddresses, DeployedContract, DeployedToken, ProxyAddresses},
    utils::write_deployed_addresses,
    zns::{labelhash, namehash},
};

/// The creation bytecode of every contract in a deployment
#[derive(Clone, Debug)]
pub struct ContractFactories {
    /// The ERC20 token
    pub token: ContractFactory,
    /// The ZNS registry
    pub zns_registry: ContractFactory,
    /// The ZNS resolver
    pub zns_resolver: ContractFactory,
    /// The ZNS price oracle
    pub zns_price_oracle: ContractFactory,
    /// The ZNS controller
    pub zns_controller: ContractFactory,
    /// The governance contract
    pub governance: ContractFactory,
    /// The verifier
    pub verifier: ContractFactory,
    /// The Zecrey Legend contract, linked against `utils`
    pub zecrey_legend: ContractFactory,
    /// The deploy factory
    pub deploy_factory: ContractFactory,
    /// The address of the deployed `Utils` library
    pub utils: Address,
}

/// Resolve the contract factories for a deployment.
///
/// This deploys a fresh `Utils` library and links the Zecrey Legend contract
/// against it.
pub async fn contract_factories<C: DeployClient>(
    client: &C,
    store: &ArtifactStore,
) -> Result<ContractFactories, ScriptError> {
    let utils_factory = unlinked_factory(store, UTILS_LIBRARY)?;
    let token = unlinked_factory(store, TOKEN_CONTRACT)?;
    let zns_registry = unlinked_factory(store, ZNS_REGISTRY_CONTRACT)?;
    let zns_resolver = unlinked_factory(store, ZNS_RESOLVER_CONTRACT)?;
    let zns_price_oracle = unlinked_factory(store, ZNS_PRICE_ORACLE_CONTRACT)?;
    let zns_controller = unlinked_factory(store, ZNS_CONTROLLER_CONTRACT)?;
    let governance = unlinked_factory(store, GOVERNANCE_CONTRACT)?;
    let verifier = unlinked_factory(store, VERIFIER_CONTRACT)?;
    let deploy_factory = unlinked_factory(store, DEPLOY_FACTORY_CONTRACT)?;
    let zecrey_legend_artifact = store.get(ZECREY_LEGEND_CONTRACT)?;

    let utils = deploy_contract(client, &utils_factory, &[]).await?.address;
    let libraries = HashMap::from([(UTILS_LIBRARY.to_string(), utils)]);
    let zecrey_legend = ContractFactory {
        name: ZECREY_LEGEND_CONTRACT,
        bytecode: zecrey_legend_artifact.link(&libraries)?,
    };

    Ok(ContractFactories {
        token,
        zns_registry,
        zns_resolver,
        zns_price_oracle,
        zns_controller,
        governance,
        verifier,
        zecrey_legend,
        deploy_factory,
        utils,
    })
}

/// Deploy & wire together the full set of Zecrey Legend contracts, returning
/// the addresses to persist.
///
/// Every step waits for its transaction to be mined before the next begins.
/// Contracts deployed before a failing step are left on-chain.
pub async fn deploy_legend<C: DeployClient>(
    client: &C,
    store: &ArtifactStore,
    config: &DeployConfig,
) -> Result<DeployedAddresses, ScriptError> {
    config.validate()?;
    let owner = client.sender();
    info!("Deploying Zecrey Legend contracts from {}", owner);

    let factories = contract_factories(client, store).await?;
    info!("{} linked against {} at {}", ZECREY_LEGEND_CONTRACT, UTILS_LIBRARY, factories.utils);

    // Step 1: deploy the ZNS registry
    let zns_registry = deploy_contract(client, &factories.zns_registry, &[]).await?;

    // Step 2: deploy the implementations proxied by the deploy factory
    let governance = deploy_contract(client, &factories.governance, &[]).await?;
    let verifier = deploy_contract(client, &factories.verifier, &[]).await?;
    let zecrey_legend = deploy_contract(client, &factories.zecrey_legend, &[]).await?;
    let zns_controller = deploy_contract(client, &factories.zns_controller, &[]).await?;
    let zns_resolver = deploy_contract(client, &factories.zns_resolver, &[]).await?;

    // Step 3: deploy the price oracle, the tokens & the deploy factory
    let zns_price_oracle = deploy_contract(
        client,
        &factories.zns_price_oracle,
        &(config.rent_prices(),).abi_encode_params(),
    )
    .await?;

    let total_supply = config.total_supply_wei()?;
    let mut tokens = Vec::with_capacity(config.tokens.len());
    for token in &config.tokens {
        info!("Deploying {} token...", token.symbol);
        let args = (total_supply, token.name.clone(), token.symbol.clone()).abi_encode_params();
        let deployed = deploy_contract(client, &factories.token, &args).await?;
        tokens.push(DeployedToken {
            symbol: token.symbol.clone(),
            address: deployed.address,
        });
    }

    let listing_token = tokens
        .first()
        .ok_or_else(|| ScriptError::Config("no listing token deployed".to_string()))?
        .address;
    let base_node = namehash(&config.base_domain);
    let deploy_factory_args = (
        governance.address,
        verifier.address,
        zecrey_legend.address,
        zns_controller.address,
        zns_resolver.address,
        config.genesis_account_root,
        config.validator.unwrap_or(verifier.address),
        config.governor.unwrap_or(owner),
        listing_token,
        config.listing_fee_wei()?,
        config.listing_cap,
        zns_registry.address,
        zns_price_oracle.address,
        base_node,
    )
        .abi_encode_params();
    let deploy_factory =
        deploy_contract(client, &factories.deploy_factory, &deploy_factory_args).await?;

    // Recover the proxies created by the deploy factory from its receipt
    let logs = client.receipt_logs(deploy_factory.tx_hash).await?;
    let proxies = find_addresses_event(deploy_factory.address, &logs)?;
    info!(
        "Deploy factory created governance {}, asset governance {}, gatekeeper {}",
        proxies.governance, proxies.asset_governance, proxies.gatekeeper
    );

    // Step 4: register the tokens as assets
    for token in &tokens {
        info!("Adding {} to the asset governance asset list...", token.symbol);
        let calldata = IAssetGovernance::addAssetCall {
            asset: token.address,
        }
        .abi_encode();
        client
            .transact(proxies.asset_governance, calldata.into())
            .await?;
    }

    // Step 5: hand the base node to the ZNS controller
    info!("Registering ZNS base node `{}`...", config.base_domain);
    let calldata = IZNSRegistry::setSubnodeOwnerCall {
        node: namehash(""),
        label: labelhash(&config.base_domain),
        owner: proxies.zns_controller,
        pubKey: B256::ZERO,
    }
    .abi_encode();
    client.transact(zns_registry.address, calldata.into()).await?;

    Ok(DeployedAddresses { proxies, tokens })
}

/// Run a full deployment and write the resulting addresses to `out_path`.
///
/// Nothing is written unless every step succeeds.
pub async fn deploy_and_save<C: DeployClient>(
    client: &C,
    store: &ArtifactStore,
    config: &DeployConfig,
    out_path: &Path,
) -> Result<DeployedAddresses, ScriptError> {
    let addresses = deploy_legend(client, store, config).await?;

    info!("Saving deployed contract addresses to {}", out_path.display());
    write_deployed_addresses(out_path, &addresses)?;

    Ok(addresses)
}

/// Locate & decode the `Addresses` event emitted by the deploy factory
pub fn find_addresses_event(factory: Address, logs: &[Log]) -> Result<ProxyAddresses, ScriptError> {
    let mut matches = logs.iter().enumerate().filter(|(_, log)| {
        log.address == factory && log.data.topics().first() == Some(&Addresses::SIGNATURE_HASH)
    });

    let (index, log) = matches.next().ok_or_else(|| {
        ScriptError::EventDecoding(format!(
            "no `{}` event from {} among {} logs",
            Addresses::SIGNATURE,
            factory,
            logs.len()
        ))
    })?;
    if matches.next().is_some() {
        return Err(ScriptError::EventDecoding(format!(
            "multiple `{}` events from {}",
            Addresses::SIGNATURE,
            factory
        )));
    }

    if index != EXPECTED_ADDRESSES_LOG_INDEX {
        warn!(
            "`Addresses` event found at log index {}, expected {}; the deploy factory's log order has changed",
            index, EXPECTED_ADDRESSES_LOG_INDEX
        );
    }

    let event =
        Addresses::decode_log_data(&log.data).map_err(|e| ScriptError::EventDecoding(e.to_string()))?;
    Ok(event.into())
}

/// Build a factory for a contract without library references
fn unlinked_factory(
    store: &ArtifactStore,
    name: &'static str,
) -> Result<ContractFactory, ScriptError> {
    Ok(ContractFactory {
        name,
        bytecode: store.get(name)?.unlinked_bytecode()?,
    })
}

/// Deploy a contract & wait for its creation to be mined
async fn deploy_contract<C: DeployClient>(
    client: &C,
    factory: &ContractFactory,
    constructor_args: &[u8],
) -> Result<DeployedContract, ScriptError> {
    info!("Deploying {}...", factory.name);
    let deployed = client
        .deploy(factory.deploy_code(constructor_args))
        .await
        .map_err(|e| e.for_contract(factory.name))?;
    info!("{} deployed at {}", factory.name, deployed.address);

    Ok(deployed)
}
