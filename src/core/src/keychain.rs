//! Keychain capability checks.

use crate::errors::CoreError;
use std::fmt;
use std::str::FromStr;

/// First keychain release able to build shielded-pool transactions.
pub const MASP_MIN_KEYCHAIN_VERSION: KeychainVersion = KeychainVersion::new(0, 3, 0);

/// A `major.minor.patch` keychain version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeychainVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl KeychainVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for KeychainVersion {
    type Err = CoreError;

    /// Accepts an optional leading `v` and ignores pre-release or build
    /// suffixes (`0.4.1-beta.2` parses as `0.4.1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core = trimmed
            .split(|c| c == '-' || c == '+')
            .next()
            .unwrap_or_default();

        let parts = core
            .split('.')
            .map(|part| part.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CoreError::InvalidVersion(s.to_string()))?;

        match parts.as_slice() {
            [major, minor, patch] => Ok(Self::new(*major, *minor, *patch)),
            _ => Err(CoreError::InvalidVersion(s.to_string())),
        }
    }
}

impl fmt::Display for KeychainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Whether a keychain of the given version can sign shielded transfers.
///
/// Versions that do not parse are treated as incompatible.
pub fn is_keychain_compatible_with_masp(version: &str) -> bool {
    version
        .parse::<KeychainVersion>()
        .map(|v| v >= MASP_MIN_KEYCHAIN_VERSION)
        .unwrap_or(false)
}
