//! Recent addresses command for the CLI wallet.

use crate::context::WalletContext;
use crate::errors::WalletError;
use wallet_core::recent::RecentAddress;

/// Lists recent destinations, newest first.
pub fn list(ctx: &WalletContext) -> Result<Vec<RecentAddress>, WalletError> {
    Ok(ctx.recent_addresses()?.list())
}

/// Forgets every recent destination.
pub fn clear(ctx: &WalletContext) -> Result<(), WalletError> {
    ctx.preferences.update(|preferences| {
        preferences.recent_addresses.clear();
    })?;
    Ok(())
}
