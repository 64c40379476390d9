//! Tests for transfer form validation.

use crate::mocks::{dec, NATIVE_TOKEN, OSMOSIS, SHIELDED, TRANSPARENT};
use rand::Rng;
use std::collections::HashMap;
use wallet_cli::config::native_asset;
use wallet_core::chain::ChainRegistry;
use wallet_core::types::{Address, Amount, Asset, AssetWithAmount, GasConfig, LedgerAccountInfo};
use wallet_core::validation::{
    validate_transfer_form, TransferDestination, TransferSource, ValidationContext,
    ValidationResult,
};

fn gas_config() -> GasConfig {
    GasConfig {
        gas_price_in_min_denom: dec("1"),
        gas_limit: dec("50000"),
        gas_token: NATIVE_TOKEN.to_string(),
    }
}

fn nam_balance(amount: &str) -> HashMap<Address, AssetWithAmount> {
    let mut assets = HashMap::new();
    assets.insert(
        NATIVE_TOKEN.to_string(),
        AssetWithAmount {
            asset: native_asset(NATIVE_TOKEN),
            amount: dec(amount),
        },
    );
    assets
}

fn source(address: &str, amount: Option<Amount>) -> TransferSource {
    TransferSource {
        address: Some(address.to_string()),
        asset: Some(native_asset(NATIVE_TOKEN)),
        selected_asset_symbol: Some("NAM".to_string()),
        amount,
        ..TransferSource::default()
    }
}

fn destination(address: &str) -> TransferDestination {
    TransferDestination {
        address: Some(address.to_string()),
        is_shielded_address: address.starts_with("znam"),
    }
}

struct Fixture {
    registry: ChainRegistry,
    gas_config: GasConfig,
    assets: HashMap<Address, AssetWithAmount>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            registry: ChainRegistry::builtin().unwrap(),
            gas_config: gas_config(),
            assets: nam_balance("100"),
        }
    }

    fn context(&self) -> ValidationContext<'_> {
        ValidationContext {
            registry: &self.registry,
            gas_config: Some(&self.gas_config),
            available_amount_minus_fees: Some(dec("99.95")),
            keychain_version: Some("0.3.1"),
            available_assets: Some(&self.assets),
            display_gas_fee_amount: Some(dec("0.05")),
        }
    }
}

/// A complete form passes.
#[test]
fn test_complete_form_is_ok() {
    let fixture = Fixture::new();
    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("10"))),
        &destination(SHIELDED),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::Ok);
}

/// The same address on both sides is rejected before anything else.
#[test]
fn test_same_address_rejected_first() {
    let fixture = Fixture::new();
    let mut rng = rand::thread_rng();
    let addresses = [TRANSPARENT, SHIELDED, OSMOSIS, "", "garbage"];

    for _ in 0..200 {
        let address = addresses[rng.gen_range(0..addresses.len())];
        let mut src = TransferSource {
            address: Some(address.to_string()),
            ..TransferSource::default()
        };
        if rng.gen_bool(0.5) {
            src.selected_asset_symbol = Some("NAM".to_string());
        }
        if rng.gen_bool(0.5) {
            src.amount = Some(Amount::from(rng.gen_range(0..1_000_000u64)));
        }
        if rng.gen_bool(0.3) {
            src.ledger_account_info = Some(LedgerAccountInfo {
                device_connected: false,
            });
        }

        let mut ctx = fixture.context();
        if rng.gen_bool(0.5) {
            ctx.gas_config = None;
        }
        if rng.gen_bool(0.5) {
            ctx.keychain_version = Some("0.1.0");
        }

        let result = validate_transfer_form(&src, &destination(address), &ctx);
        assert_eq!(result, ValidationResult::TheSameAddress, "{}", address);
    }
}

/// Tests a zero amount with everything else in place.
#[test]
fn test_zero_amount() {
    let fixture = Fixture::new();
    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(Amount::ZERO)),
        &destination(SHIELDED),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::NoAmount);

    let result = validate_transfer_form(
        &source(TRANSPARENT, None),
        &destination(SHIELDED),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::NoAmount);
}

/// Tests that the asset must be selected.
#[test]
fn test_no_selected_asset() {
    let fixture = Fixture::new();
    let mut src = source(TRANSPARENT, Some(dec("1")));
    src.selected_asset_symbol = None;

    let result = validate_transfer_form(&src, &destination(SHIELDED), &fixture.context());
    assert_eq!(result, ValidationResult::NoSelectedAsset);
}

/// The native token may only leave Namada for Osmosis.
#[test]
fn test_destination_must_match_chain() {
    let fixture = Fixture::new();

    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("1"))),
        &destination(OSMOSIS),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::Ok);

    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("1"))),
        &destination("cosmos1hsk6jryyqjfhp5dhc55tc9jtckygx0eph6dd02"),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::CustomAddressNotMatchingChain);
}

/// Tests the keychain gate on shielded operations.
#[test]
fn test_old_keychain() {
    let fixture = Fixture::new();
    let mut ctx = fixture.context();
    ctx.keychain_version = Some("0.2.9");

    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("1"))),
        &destination(SHIELDED),
        &ctx,
    );
    assert_eq!(result, ValidationResult::KeychainNotCompatibleWithMasp);

    // Transparent transfers do not care about the keychain
    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("1"))),
        &destination("tnam1qqshvryx9pngpk7mmzpzkjkm6klelgusuvmkc0uz"),
        &ctx,
    );
    assert_eq!(result, ValidationResult::Ok);
}

/// Tests the fee and balance checks.
#[test]
fn test_balances() {
    let mut fixture = Fixture::new();

    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("99.96"))),
        &destination(SHIELDED),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::NotEnoughBalance);

    // The fee token balance must exceed the fee
    fixture.assets = nam_balance("0.05");
    let result = validate_transfer_form(
        &source(TRANSPARENT, Some(dec("0.01"))),
        &destination(SHIELDED),
        &fixture.context(),
    );
    assert_eq!(result, ValidationResult::NotEnoughBalanceForFees);
}

/// IBC deposits pay fees from the external wallet.
#[test]
fn test_ibc_source_skips_fee_check() {
    let fixture = Fixture::new();
    let osmo = Asset {
        symbol: "OSMO".to_string(),
        ..native_asset("tnam1osmo")
    };
    let src = TransferSource {
        address: Some(OSMOSIS.to_string()),
        asset: Some(osmo),
        selected_asset_symbol: Some("OSMO".to_string()),
        amount: Some(dec("5")),
        ..TransferSource::default()
    };

    let mut ctx = fixture.context();
    ctx.available_assets = None;
    ctx.available_amount_minus_fees = Some(dec("10"));

    let result = validate_transfer_form(&src, &destination(TRANSPARENT), &ctx);
    assert_eq!(result, ValidationResult::Ok);
}

/// A disconnected hardware wallet blocks shielded operations.
#[test]
fn test_ledger_disconnected() {
    let fixture = Fixture::new();
    let mut src = source(TRANSPARENT, Some(dec("1")));
    src.ledger_account_info = Some(LedgerAccountInfo {
        device_connected: false,
    });

    let result = validate_transfer_form(&src, &destination(SHIELDED), &fixture.context());
    assert_eq!(result, ValidationResult::NoLedgerConnected);
}

/// Tests a missing destination.
#[test]
fn test_no_destination() {
    let fixture = Fixture::new();
    let src = source(TRANSPARENT, Some(dec("1")));
    let dst = TransferDestination::default();

    let result = validate_transfer_form(&src, &dst, &fixture.context());
    assert_eq!(result, ValidationResult::NoDestinationWallet);
}
