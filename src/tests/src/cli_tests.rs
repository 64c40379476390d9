//! Tests for the CLI wallet commands.

use crate::mocks::{
    dec, test_context, MockIndexer, MockSdk, NATIVE_TOKEN, OSMOSIS, SHIELDED, TRANSPARENT,
    VALIDATOR,
};
use serial_test::serial;
use std::env;
use std::sync::Arc;
use tempfile::tempdir;
use tokio::runtime::Runtime;
use wallet_cli::commands::{
    balance, classify, faucet, faucet_url, fees, recent, stake, transfer, validate,
};
use wallet_cli::{TransferForm, WalletError};
use wallet_core::address::AddressKind;
use wallet_core::staking::StakingCommitment;
use wallet_core::types::{TransferType, TxKind};
use wallet_core::validation::ValidationResult;
use wallet_services::errors::ServiceError;
use wallet_services::faucet::{PROXY_ENV, PROXY_PORT_ENV};

/// 100 NAM held by the transparent test account.
fn funded_indexer() -> MockIndexer {
    MockIndexer::new().with_balance(TRANSPARENT, NATIVE_TOKEN, dec("100000000"))
}

fn shield_form(amount: &str) -> TransferForm {
    TransferForm {
        source: Some(TRANSPARENT.to_string()),
        destination: Some(SHIELDED.to_string()),
        symbol: Some("NAM".to_string()),
        amount: Some(dec(amount)),
        ..TransferForm::default()
    }
}

/// Tests the classify command.
#[test]
fn test_classify() {
    let dir = tempdir().unwrap();
    let ctx = test_context(MockIndexer::new(), Arc::new(MockSdk::default()), dir.path());

    let classification = classify::run(&ctx.registry, OSMOSIS, &format!(" {} ", TRANSPARENT));
    assert_eq!(classification.transfer_type, TransferType::IbcDeposit);
    assert_eq!(classification.tx_kind, TxKind::IbcTransfer);
    assert!(classification.requires_ibc_channels);
    assert_eq!(classification.source_label.as_deref(), Some("Osmosis"));
    assert_eq!(
        classification.destination_label.as_deref(),
        Some("Namada Transparent")
    );
}

/// A funded shielding form validates with the fee reserved.
#[test]
fn test_validate_against_live_balances() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let ctx = test_context(funded_indexer(), Arc::new(MockSdk::default()), dir.path());

    rt.block_on(async {
        let check = validate::run(&ctx, &shield_form("10")).await.unwrap();
        assert_eq!(check.result, ValidationResult::Ok);
        assert_eq!(check.transfer_type, TransferType::Shield);
        assert_eq!(check.display_fee, Some(dec("0.05")));
        assert_eq!(check.available_amount_minus_fees, Some(dec("99.95")));
        assert_eq!(check.button_text, "Submit");

        let check = validate::run(&ctx, &shield_form("0")).await.unwrap();
        assert_eq!(check.result, ValidationResult::NoAmount);
        assert_eq!(check.button_text, "Define an amount to shield");
    });
}

/// A valid transfer is broadcast and its destination remembered.
#[test]
fn test_transfer_submits_and_records() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let sdk = Arc::new(MockSdk::default());
    let ctx = test_context(funded_indexer(), sdk.clone(), dir.path());

    rt.block_on(async {
        let hash = transfer::run(&ctx, &shield_form("10"), Some("thanks".to_string()))
            .await
            .unwrap();
        assert_eq!(hash, "TX1");
    });

    let transfers = sdk.transfers.lock().unwrap();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].transfer_type, TransferType::Shield);
    assert_eq!(transfers[0].amount_in_base_denom, dec("10000000"));
    assert_eq!(transfers[0].token, NATIVE_TOKEN);
    assert_eq!(transfers[0].memo.as_deref(), Some("thanks"));

    let recent = recent::list(&ctx).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].address, SHIELDED);
    assert_eq!(recent[0].kind, AddressKind::Shielded);

    recent::clear(&ctx).unwrap();
    assert!(recent::list(&ctx).unwrap().is_empty());
}

/// Nothing is sent when the form does not validate.
#[test]
fn test_transfer_rejects_invalid_form() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let sdk = Arc::new(MockSdk::default());
    let ctx = test_context(funded_indexer(), sdk.clone(), dir.path());

    rt.block_on(async {
        let err = transfer::run(&ctx, &shield_form("99.99"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::ValidationFailed(ValidationResult::NotEnoughBalance)
        ));
    });

    assert!(sdk.transfers.lock().unwrap().is_empty());
    assert!(recent::list(&ctx).unwrap().is_empty());
}

/// SDK errors reach the user as one generic message.
#[test]
fn test_transfer_failure_is_generic() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let ctx = test_context(funded_indexer(), Arc::new(MockSdk::failing()), dir.path());

    rt.block_on(async {
        let err = transfer::run(&ctx, &shield_form("1"), None).await.unwrap_err();
        assert_eq!(err.to_string(), "Transaction failed");
    });
}

/// Tests the balance report.
#[test]
fn test_balance_report() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let indexer = funded_indexer().with_balance(TRANSPARENT, "tnam1unknown", dec("5"));
    let ctx = test_context(indexer, Arc::new(MockSdk::default()), dir.path());

    rt.block_on(async {
        let report = balance::run(&ctx, TRANSPARENT).await.unwrap();
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.total_native, dec("100"));
        assert_eq!(report.total_dollar, dec("5"));
    });
}

/// IBC sources pay with the foreign chain's fee token.
#[test]
fn test_fees_for_ibc_source() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let ctx = test_context(MockIndexer::new(), Arc::new(MockSdk::default()), dir.path());

    rt.block_on(async {
        let quote = fees::run(&ctx, OSMOSIS, TRANSPARENT).await.unwrap();
        assert_eq!(quote.gas_config.gas_token, "uosmo");
        assert_eq!(quote.gas_config.gas_limit, dec("222000"));
        assert_eq!(quote.total_display_amount, dec("555"));
        assert_eq!(quote.symbol, None);

        let quote = fees::run(&ctx, TRANSPARENT, SHIELDED).await.unwrap();
        assert_eq!(quote.gas_config.gas_token, NATIVE_TOKEN);
        assert_eq!(quote.symbol.as_deref(), Some("NAM"));
    });
}

/// Claims come first and only rewarded validators are re-bonded.
#[test]
fn test_claim_and_stake() {
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let sdk = Arc::new(MockSdk::default());
    let indexer = funded_indexer().with_reward(VALIDATOR, dec("500"));
    let ctx = test_context(indexer, sdk.clone(), dir.path());

    rt.block_on(async {
        let validators = vec![VALIDATOR.to_string(), "tnam1idle".to_string()];
        let hash = stake::run(&ctx, TRANSPARENT, &validators).await.unwrap();
        assert_eq!(hash, "STAKE1");
    });

    let stakes = sdk.stakes.lock().unwrap();
    let commitments = &stakes[0];
    assert_eq!(commitments.len(), 3);
    assert!(matches!(commitments[0], StakingCommitment::ClaimRewards(_)));
    assert!(matches!(commitments[1], StakingCommitment::ClaimRewards(_)));
    match &commitments[2] {
        StakingCommitment::Bond(bond) => {
            assert_eq!(bond.validator, VALIDATOR);
            assert_eq!(bond.amount, dec("500"));
        }
        other => panic!("unexpected commitment {:?}", other),
    }
}

/// Tests storing and resetting the faucet URL.
#[test]
#[serial]
fn test_faucet_url() {
    env::remove_var(PROXY_ENV);
    env::remove_var(PROXY_PORT_ENV);
    let dir = tempdir().unwrap();
    let ctx = test_context(MockIndexer::new(), Arc::new(MockSdk::default()), dir.path());

    let stored = faucet_url::set(&ctx, "https://faucet.example.com/api/v1/faucet/").unwrap();
    assert_eq!(stored, "https://faucet.example.com");
    assert_eq!(
        faucet_url::show(&ctx).unwrap(),
        "https://faucet.example.com/api/v1/faucet"
    );

    assert!(faucet_url::set(&ctx, "not a url").is_err());

    faucet_url::reset(&ctx).unwrap();
    assert_eq!(
        faucet_url::show(&ctx).unwrap(),
        "http://localhost:5000/api/v1/faucet"
    );
}

/// The proxy takes over the faucet endpoint.
#[test]
#[serial]
fn test_faucet_proxy() {
    env::set_var(PROXY_ENV, "true");
    env::set_var(PROXY_PORT_ENV, "9100");
    let dir = tempdir().unwrap();
    let ctx = test_context(MockIndexer::new(), Arc::new(MockSdk::default()), dir.path());

    let url = faucet_url::show(&ctx).unwrap();
    env::remove_var(PROXY_ENV);
    env::remove_var(PROXY_PORT_ENV);

    assert_eq!(url, "http://localhost:9100/proxy");
}

/// Faucet requests are checked before anything is sent.
#[test]
#[serial]
fn test_faucet_rejects_bad_requests() {
    env::remove_var(PROXY_ENV);
    let rt = Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let ctx = test_context(MockIndexer::new(), Arc::new(MockSdk::default()), dir.path());

    rt.block_on(async {
        let err = faucet::run(&ctx, OSMOSIS, "NAM", dec("1")).await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAddress(_)));

        let err = faucet::run(&ctx, TRANSPARENT, "ATOM", dec("1")).await.unwrap_err();
        assert!(matches!(err, WalletError::UnknownAsset(_)));

        // 2000 NAM is above the default limit of 10^9 base units
        let err = faucet::run(&ctx, TRANSPARENT, "nam", dec("2000")).await.unwrap_err();
        assert!(matches!(
            err,
            WalletError::ServiceError(ServiceError::AmountAboveLimit { .. })
        ));
    });
}
