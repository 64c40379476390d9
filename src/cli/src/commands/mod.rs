//! Commands for the CLI wallet.

pub mod balance;
pub mod classify;
pub mod faucet;
pub mod faucet_url;
pub mod fees;
pub mod recent;
pub mod stake;
pub mod transfer;
pub mod validate;
