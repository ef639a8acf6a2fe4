//! Constants used in the deploy scripts

use alloy::primitives::{b256, B256};

// ------------------
// | Contract names |
// ------------------

/// The utility library linked into the `ZecreyLegend` contract
pub const UTILS_LIBRARY: &str = "Utils";

/// The ERC20 token contract, deployed once per configured token
pub const TOKEN_CONTRACT: &str = "ZecreyRelatedERC20";

/// The ZNS registry contract
pub const ZNS_REGISTRY_CONTRACT: &str = "ZNSRegistry";

/// The ZNS resolver contract
pub const ZNS_RESOLVER_CONTRACT: &str = "PublicResolver";

/// The ZNS price oracle contract
pub const ZNS_PRICE_ORACLE_CONTRACT: &str = "StablePriceOracle";

/// The ZNS controller contract
pub const ZNS_CONTROLLER_CONTRACT: &str = "ZNSController";

/// The governance contract
pub const GOVERNANCE_CONTRACT: &str = "Governance";

/// The verifier contract
pub const VERIFIER_CONTRACT: &str = "ZecreyVerifier";

/// The main Zecrey Legend contract
pub const ZECREY_LEGEND_CONTRACT: &str = "ZecreyLegend";

/// The factory which proxies and wires together the contracts above
pub const DEPLOY_FACTORY_CONTRACT: &str = "DeployFactory";

/// Every contract whose artifact a deployment needs
pub const REQUIRED_CONTRACTS: [&str; 10] = [
    UTILS_LIBRARY,
    TOKEN_CONTRACT,
    ZNS_REGISTRY_CONTRACT,
    ZNS_RESOLVER_CONTRACT,
    ZNS_PRICE_ORACLE_CONTRACT,
    ZNS_CONTROLLER_CONTRACT,
    GOVERNANCE_CONTRACT,
    VERIFIER_CONTRACT,
    ZECREY_LEGEND_CONTRACT,
    DEPLOY_FACTORY_CONTRACT,
];

// -------------
// | Artifacts |
// -------------

/// The default directory containing the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The extension of an artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The suffix of the Hardhat debug files written next to each artifact
pub const DEBUG_ARTIFACT_SUFFIX: &str = ".dbg.json";

/// The Hardhat directory holding full compiler inputs & outputs, never an artifact
pub const BUILD_INFO_DIR: &str = "build-info";

/// The number of bytes in an Ethereum address
pub const NUM_BYTES_ADDRESS: usize = 20;

// -----------------
// | Addresses file |
// -----------------

/// The default path of the addresses file
pub const DEFAULT_ADDRESSES_PATH: &str = "info/addresses.json";

/// The governance proxy key in the addresses file
pub const GOVERNANCE_KEY: &str = "governance";

/// The asset governance key in the addresses file
pub const ASSET_GOVERNANCE_KEY: &str = "assetGovernance";

/// The verifier proxy key in the addresses file
pub const VERIFIER_PROXY_KEY: &str = "verifierProxy";

/// The ZNS controller proxy key in the addresses file
pub const ZNS_CONTROLLER_PROXY_KEY: &str = "znsControllerProxy";

/// The ZNS resolver proxy key in the addresses file
pub const ZNS_RESOLVER_PROXY_KEY: &str = "znsResolverProxy";

/// The Zecrey Legend proxy key in the addresses file
pub const ZECREY_LEGEND_PROXY_KEY: &str = "zecreyLegendProxy";

/// The upgrade gatekeeper key in the addresses file
pub const UPGRADE_GATEKEEPER_KEY: &str = "upgradeGateKeeper";

/// The suffix appended to a token's symbol to form its key in the addresses file
pub const TOKEN_KEY_SUFFIX: &str = "Token";

// ------------------
// | Factory event |
// ------------------

/// The position of the `Addresses` event in the deploy factory's receipt logs,
/// as observed against the current factory contract. Only used for diagnostics;
/// the event is located by its signature.
pub const EXPECTED_ADDRESSES_LOG_INDEX: usize = 8;

// ---------------------
// | Deployment params |
// ---------------------

/// The default total supply of each token, in whole tokens
pub const DEFAULT_TOKEN_TOTAL_SUPPLY: &str = "100000000";

/// The default listing fee, in whole listing tokens
pub const DEFAULT_LISTING_FEE: &str = "100";

/// The default cap on the number of listed assets
pub const DEFAULT_LISTING_CAP: u16 = u16::MAX;

/// The default rent prices passed to the price oracle
pub const DEFAULT_RENT_PRICES: [u64; 3] = [0, 1, 2];

/// The default root of the genesis account tree
pub const DEFAULT_GENESIS_ACCOUNT_ROOT: B256 =
    b256!("01ef55cdf3b9b0d65e6fb6317f79627534d971fd96c811281af618c0028d5e7a");

/// The default ZNS domain under which the controller registers names
pub const DEFAULT_BASE_DOMAIN: &str = "legend";

/// The default tokens to deploy, as `(name, symbol)` pairs.
/// The first is used as the listing token.
pub const DEFAULT_TOKENS: [(&str, &str); 2] = [("LEG", "LEG"), ("REY", "REY")];
