//! Tests for the dashboard daemon against the shared mocks.

use crate::mocks::{
    dec, MockIndexer, MockSdk, NATIVE_TOKEN, OSMOSIS, OTHER_TRANSPARENT, SHIELDED, TRANSPARENT,
};
use dashboard::api::{evaluate, ValidateRequest};
use dashboard::{routes, ApiState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::runtime::Runtime;
use wallet_core::chain::ChainRegistry;
use wallet_core::types::{GasConfig, TransferType};
use wallet_core::validation::ValidationResult;
use wallet_services::prices::StaticPriceFeed;

fn request(body: Value) -> ValidateRequest {
    serde_json::from_value(body).unwrap()
}

fn form(source: &str, destination: &str, amount: &str) -> Value {
    json!({
        "source": {
            "address": source,
            "selected_asset_symbol": "NAM",
            "amount": amount
        },
        "destination": { "address": destination },
        "gas_config": {
            "gas_price_in_min_denom": "1",
            "gas_limit": "50000",
            "gas_token": NATIVE_TOKEN
        },
        "display_gas_fee_amount": "0.05",
        "available_amount_minus_fees": "20",
        "available_assets": {
            NATIVE_TOKEN: {
                "asset": { "symbol": "NAM", "base": "unam", "display": "nam" },
                "amount": "20.05"
            }
        }
    })
}

/// Tests validation outcomes for the main flows.
#[test]
fn test_evaluate_flows() {
    let registry = ChainRegistry::builtin().unwrap();

    let response = evaluate(&request(form(TRANSPARENT, OTHER_TRANSPARENT, "5")), &registry);
    assert_eq!(response.result, ValidationResult::Ok);
    assert_eq!(response.transfer_type, TransferType::NamadaTransfer);

    let response = evaluate(&request(form(SHIELDED, TRANSPARENT, "0")), &registry);
    assert_eq!(response.result, ValidationResult::NoAmount);
    assert_eq!(response.transfer_type, TransferType::Unshield);
    assert_eq!(response.button_text, "Define an amount to unshield");

    let response = evaluate(&request(form(TRANSPARENT, TRANSPARENT, "5")), &registry);
    assert_eq!(response.result, ValidationResult::TheSameAddress);
    assert_eq!(response.message, "Source and destination addresses are the same");

    let mut submitting = request(form(TRANSPARENT, SHIELDED, "5"));
    submitting.is_submitting = true;
    assert_eq!(evaluate(&submitting, &registry).button_text, "Submitting...");
}

/// Fee configuration and submission run against the same services.
#[test]
fn test_fee_config_then_submit() {
    let rt = Runtime::new().unwrap();

    rt.block_on(async {
        let sdk = Arc::new(MockSdk::default());
        let mut prices = HashMap::new();
        prices.insert(NATIVE_TOKEN.to_string(), dec("0.05"));
        let state = Arc::new(ApiState {
            registry: ChainRegistry::builtin().unwrap(),
            indexer: Arc::new(
                MockIndexer::new().with_balance(TRANSPARENT, NATIVE_TOKEN, dec("100000000")),
            ),
            sdk: sdk.clone(),
            prices: Arc::new(StaticPriceFeed::new(prices)),
            native_token: NATIVE_TOKEN.to_string(),
        });
        let api = routes(state);

        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/fees/config")
            .json(&json!({ "source": TRANSPARENT, "destination": OSMOSIS }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);
        let gas_config: GasConfig = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(gas_config.gas_token, NATIVE_TOKEN);

        let response = warp::test::request()
            .method("POST")
            .path("/api/v1/transfer/submit")
            .json(&json!({
                "transfer_type": "ibc-withdraw",
                "chain_id": "namada.5f5de2dd1b88cba30586420",
                "source": TRANSPARENT,
                "destination": OSMOSIS,
                "token": NATIVE_TOKEN,
                "amount_in_base_denom": "2500000",
                "gas_config": gas_config
            }))
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);
        let body: Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(body["hash"], "TX1");
        let transfers = sdk.transfers.lock().unwrap();
        assert_eq!(transfers[0].transfer_type, TransferType::IbcWithdraw);
    });
}
