//! Parameters of a deployment, with defaults matching the production launch

use std::{collections::HashSet, fs, path::Path};

use alloy::primitives::{utils::parse_ether, Address, B256, U256};
use serde::Deserialize;

use crate::{
    constants::{
        DEFAULT_BASE_DOMAIN, DEFAULT_GENESIS_ACCOUNT_ROOT, DEFAULT_LISTING_CAP,
        DEFAULT_LISTING_FEE, DEFAULT_RENT_PRICES, DEFAULT_TOKENS, DEFAULT_TOKEN_TOTAL_SUPPLY,
    },
    errors::ScriptError,
};

/// An ERC20 token to deploy & register as an asset
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct TokenConfig {
    /// The token name
    pub name: String,
    /// The token symbol, also used to key the token in the addresses file
    pub symbol: String,
}

/// The constructor parameters of a deployment.
///
/// Any field missing from a config file takes its default value.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// The tokens to deploy, in order. The first is the listing token.
    pub tokens: Vec<TokenConfig>,
    /// The total supply of each token, in whole tokens (18 decimals)
    pub token_total_supply: String,
    /// The rent prices handed to the price oracle
    pub rent_prices: Vec<u64>,
    /// The root of the genesis account tree
    pub genesis_account_root: B256,
    /// The fee for listing a new asset, in whole listing tokens (18 decimals)
    pub listing_fee: String,
    /// The cap on the number of listed assets
    pub listing_cap: u16,
    /// The ZNS domain registered under the root node for the controller
    pub base_domain: String,
    /// The validator address, defaulting to the verifier implementation
    pub validator: Option<Address>,
    /// The governor address, defaulting to the deployer
    pub governor: Option<Address>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            tokens: DEFAULT_TOKENS
                .iter()
                .map(|(name, symbol)| TokenConfig {
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                })
                .collect(),
            token_total_supply: DEFAULT_TOKEN_TOTAL_SUPPLY.to_string(),
            rent_prices: DEFAULT_RENT_PRICES.to_vec(),
            genesis_account_root: DEFAULT_GENESIS_ACCOUNT_ROOT,
            listing_fee: DEFAULT_LISTING_FEE.to_string(),
            listing_cap: DEFAULT_LISTING_CAP,
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            validator: None,
            governor: None,
        }
    }
}

impl DeployConfig {
    /// Load and validate the config at the given path, or the defaults if no
    /// path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ScriptError> {
        let config = match path {
            Some(path) => {
                let contents = fs::read_to_string(path).map_err(|e| {
                    ScriptError::Config(format!("reading {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&contents)
                    .map_err(|e| ScriptError::Config(format!("parsing {}: {}", path.display(), e)))?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a deployable set of contracts
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.tokens.is_empty() {
            return Err(ScriptError::Config(
                "at least one token is required to act as the listing token".to_string(),
            ));
        }

        let mut symbols = HashSet::new();
        for token in &self.tokens {
            if token.symbol.is_empty() || token.name.is_empty() {
                return Err(ScriptError::Config(
                    "token name and symbol must be non-empty".to_string(),
                ));
            }
            if !symbols.insert(token.symbol.as_str()) {
                return Err(ScriptError::Config(format!(
                    "duplicate token symbol `{}`",
                    token.symbol
                )));
            }
        }

        self.total_supply_wei()?;
        self.listing_fee_wei()?;

        if self.base_domain.is_empty() || self.base_domain.contains('.') {
            return Err(ScriptError::Config(format!(
                "base domain `{}` must be a single non-empty label",
                self.base_domain
            )));
        }

        Ok(())
    }

    /// The token total supply in base units
    pub fn total_supply_wei(&self) -> Result<U256, ScriptError> {
        parse_ether_amount("token_total_supply", &self.token_total_supply)
    }

    /// The listing fee in base units
    pub fn listing_fee_wei(&self) -> Result<U256, ScriptError> {
        parse_ether_amount("listing_fee", &self.listing_fee)
    }

    /// The rent prices as `uint256` values
    pub fn rent_prices(&self) -> Vec<U256> {
        self.rent_prices.iter().copied().map(U256::from).collect()
    }
}

/// Parse a decimal amount of whole tokens into base units
fn parse_ether_amount(field: &str, amount: &str) -> Result<U256, ScriptError> {
    parse_ether(amount)
        .map_err(|e| ScriptError::Config(format!("{field} `{amount}` is not an amount: {e}")))
}
