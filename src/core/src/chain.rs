//! Chain registry and address-to-chain resolution.

use crate::address::{
    address_kind, is_namada_address, is_shielded_address, is_transparent_address, AddressKind,
};
use crate::errors::{AddressError, CoreError};
use crate::types::{Address, Amount, Asset, ChainId, GasConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Registry name of the home chain.
pub const NAMADA_CHAIN_NAME: &str = "namada";

/// Registry name of the chain the native token is bridged to.
pub const OSMOSIS_CHAIN_NAME: &str = "osmosis";

/// Default gas limit for IBC transfers paid from an external wallet.
pub const DEFAULT_IBC_GAS_LIMIT: u64 = 222_000;

const BUILTIN_REGISTRY: &str = include_str!("../registry/chains.json");

/// Gas costs published for specific message types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasCosts {
    /// Cost of a plain send
    #[serde(default)]
    pub cosmos_send: Option<Amount>,
    /// Cost of an IBC transfer
    #[serde(default)]
    pub ibc_transfer: Option<Amount>,
}

/// A token accepted for fees on a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeToken {
    /// Fee denomination
    pub denom: String,
    #[serde(default)]
    pub fixed_min_gas_price: Option<Amount>,
    #[serde(default)]
    pub low_gas_price: Option<Amount>,
    #[serde(default)]
    pub average_gas_price: Option<Amount>,
    #[serde(default)]
    pub high_gas_price: Option<Amount>,
    #[serde(default)]
    pub gas_costs: Option<GasCosts>,
}

fn default_supported() -> bool {
    true
}

/// A chain entry of the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Registry name, e.g. "osmosis"
    pub chain_name: String,
    /// Chain id, e.g. "osmosis-1"
    pub chain_id: ChainId,
    /// Display name
    #[serde(default)]
    pub pretty_name: Option<String>,
    /// Human readable part of the chain's account addresses
    #[serde(default)]
    pub bech32_prefix: Option<String>,
    /// Tokens accepted for fees
    #[serde(default)]
    pub fee_tokens: Vec<FeeToken>,
    /// Whether transfers to this chain are offered
    #[serde(default = "default_supported")]
    pub supported: bool,
}

impl Chain {
    /// Name shown to users.
    pub fn display_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.chain_name)
    }
}

/// Known chains, passed explicitly to whatever needs chain lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRegistry {
    chains: Vec<Chain>,
}

impl ChainRegistry {
    /// Creates a registry from a list of chains.
    pub fn new(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    /// The registry shipped with the crate.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_REGISTRY)
    }

    /// Parses a registry from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let registry: ChainRegistry = serde_json::from_str(json)?;
        debug!("Loaded chain registry with {} chains", registry.chains.len());
        Ok(registry)
    }

    /// Loads a registry from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        Self::from_json(&contents)
    }

    /// All chains in registration order.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Looks up a chain by its id.
    pub fn by_chain_id(&self, chain_id: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.chain_id == chain_id)
    }

    /// Looks up a chain by its registry name.
    pub fn by_chain_name(&self, chain_name: &str) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.chain_name == chain_name)
    }

    /// The home chain entry.
    pub fn namada(&self) -> Option<&Chain> {
        self.by_chain_name(NAMADA_CHAIN_NAME)
    }

    /// Chain an address belongs to.
    ///
    /// Namada addresses resolve to the home chain; anything else resolves to
    /// the first chain whose bech32 prefix starts the address.
    pub fn chain_from_address(&self, address: &str) -> Option<&Chain> {
        if is_namada_address(address) {
            return self.namada();
        }
        self.chains.iter().find(|chain| match &chain.bech32_prefix {
            Some(prefix) if !prefix.is_empty() => address.starts_with(prefix.as_str()),
            _ => false,
        })
    }

    /// Chain an asset is native to.
    ///
    /// The native token is reported as bridged to Osmosis; IBC assets map to
    /// their first trace's counterparty; anything else is a Namada asset.
    pub fn chain_from_asset(&self, asset: &Asset) -> Option<&Chain> {
        if asset.is_native() {
            return self.by_chain_name(OSMOSIS_CHAIN_NAME);
        }
        match asset.origin_chain_name() {
            Some(chain_name) => self.by_chain_name(chain_name),
            None => self.namada(),
        }
    }

    /// Label shown next to an address.
    pub fn address_label(&self, address: &str, kind: AddressKind) -> String {
        match kind {
            AddressKind::Transparent => "Namada Transparent".to_string(),
            AddressKind::Shielded => "Namada Shielded".to_string(),
            AddressKind::Ibc => self
                .chain_from_address(address)
                .map(|chain| chain.display_name().to_string())
                .unwrap_or_else(|| "IBC Address".to_string()),
        }
    }

    /// Checks a destination address typed in by the user.
    pub fn validate_address(&self, address: &str) -> Result<AddressKind, AddressError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AddressError::Empty);
        }

        if is_transparent_address(address) {
            return Ok(AddressKind::Transparent);
        }
        if is_shielded_address(address) {
            return Ok(AddressKind::Shielded);
        }

        match (address_kind(address), self.chain_from_address(address)) {
            (Some(AddressKind::Ibc), Some(chain)) if chain.supported => Ok(AddressKind::Ibc),
            (Some(AddressKind::Ibc), Some(chain)) => {
                Err(AddressError::UnsupportedChain(chain.display_name().to_string()))
            }
            _ => Err(AddressError::InvalidFormat),
        }
    }
}

/// Gas configuration for a transfer paid in a foreign chain's fee token.
///
/// The low gas price is preferred; the other published prices are fallbacks
/// in order, and a token with no price at all gets zero.
pub fn ibc_gas_config(fee_token: &FeeToken, gas_limit: u64) -> GasConfig {
    let price = fee_token
        .low_gas_price
        .or(fee_token.average_gas_price)
        .or(fee_token.fixed_min_gas_price)
        .or(fee_token.high_gas_price)
        .or_else(|| fee_token.gas_costs.as_ref().and_then(|c| c.ibc_transfer))
        .or_else(|| fee_token.gas_costs.as_ref().and_then(|c| c.cosmos_send))
        .unwrap_or(Decimal::ZERO);

    GasConfig {
        gas_price_in_min_denom: price,
        gas_limit: Decimal::from(gas_limit),
        gas_token: fee_token.denom.clone(),
    }
}

/// Gas configuration for the first fee token of a chain.
pub fn default_ibc_gas_config(chain: &Chain) -> Option<GasConfig> {
    chain
        .fee_tokens
        .first()
        .map(|token| ibc_gas_config(token, DEFAULT_IBC_GAS_LIMIT))
}

/// Label for an address of any recognised family.
pub fn label_for(registry: &ChainRegistry, address: &Address) -> Option<String> {
    address_kind(address).map(|kind| registry.address_label(address, kind))
}
