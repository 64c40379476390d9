//! Address shape predicates.
//!
//! Addresses are never decoded here: the classifier and the validator only
//! need to know which family an address string belongs to, and that is
//! decided by its human readable prefix.

use serde::{Deserialize, Serialize};

/// Prefix of transparent Namada addresses.
pub const TRANSPARENT_PREFIX: &str = "tnam";

/// Prefixes of shielded payment addresses and viewing keys.
pub const SHIELDED_PREFIXES: [&str; 2] = ["znam", "zvknam"];

/// Bech32 separator between the human readable part and the data.
const BECH32_SEPARATOR: char = '1';

/// Family an address belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Transparent,
    Shielded,
    Ibc,
}

/// Returns `true` for a transparent Namada address.
pub fn is_transparent_address(address: &str) -> bool {
    address.starts_with(TRANSPARENT_PREFIX)
}

/// Returns `true` for a shielded payment address or viewing key.
pub fn is_shielded_address(address: &str) -> bool {
    SHIELDED_PREFIXES
        .iter()
        .any(|prefix| address.starts_with(prefix))
}

/// Returns `true` for any address native to Namada.
pub fn is_namada_address(address: &str) -> bool {
    is_transparent_address(address) || is_shielded_address(address)
}

/// Returns `true` for an address on another chain reachable over IBC.
pub fn is_ibc_address(address: &str) -> bool {
    !address.is_empty() && !is_namada_address(address) && bech32_prefix(address).is_some()
}

/// Human readable part of a bech32-shaped address.
///
/// Returns `None` unless the address is `<hrp>1<data>` with a lowercase
/// alphanumeric hrp and alphanumeric data.
pub fn bech32_prefix(address: &str) -> Option<&str> {
    let separator = address.rfind(BECH32_SEPARATOR)?;
    let (hrp, data) = (&address[..separator], &address[separator + 1..]);

    let hrp_ok = !hrp.is_empty()
        && hrp
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let data_ok = !data.is_empty() && data.chars().all(|c| c.is_ascii_alphanumeric());

    if hrp_ok && data_ok {
        Some(hrp)
    } else {
        None
    }
}

/// Classifies an address string, `None` when it fits no family.
pub fn address_kind(address: &str) -> Option<AddressKind> {
    if is_transparent_address(address) {
        Some(AddressKind::Transparent)
    } else if is_shielded_address(address) {
        Some(AddressKind::Shielded)
    } else if is_ibc_address(address) {
        Some(AddressKind::Ibc)
    } else {
        None
    }
}
