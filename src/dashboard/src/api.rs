//! HTTP API of the dashboard daemon.

use crate::metrics::{
    metrics_route, FEE_LOOKUP_TIME, REQUEST_COUNTER, TRANSFERS_FAILED, TRANSFERS_SUBMITTED,
    TRANSFER_TYPES, VALIDATION_OUTCOMES,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, warn};
use wallet_core::address::AddressKind;
use wallet_core::amount::{available_amount_minus_fees, balance_of, display_gas_fee};
use wallet_core::chain::ChainRegistry;
use wallet_core::classifier::{determine_transfer_type, tx_kind_for};
use wallet_core::fees::{find_cheapest_token, gas_config_for};
use wallet_core::types::{
    Address, Amount, Asset, AssetWithAmount, GasConfig, GasPriceEntry, TokenBalance,
    TransferParams, TransferType, TxKind,
};
use wallet_core::validation::{
    button_text, shield_button_overrides, unshield_button_overrides, validate_transfer_form,
    TransferDestination, TransferSource, ValidationContext, ValidationResult,
};
use wallet_services::indexer::{estimate_gas_or_default, IndexerApi};
use wallet_services::prices::PriceFeed;
use wallet_services::sdk::{submit_transfer, TransactionSdk};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Shared state of the API handlers.
pub struct ApiState {
    /// Known chains
    pub registry: ChainRegistry,
    /// Chain indexer
    pub indexer: Arc<dyn IndexerApi>,
    /// Transaction-building SDK
    pub sdk: Arc<dyn TransactionSdk>,
    /// Token price feed
    pub prices: Arc<dyn PriceFeed>,
    /// Native token address
    pub native_token: Address,
}

#[derive(Debug, Deserialize)]
pub struct TransferTypeRequest {
    #[serde(default)]
    pub source: Option<Address>,
    #[serde(default)]
    pub destination: Option<Address>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferTypeResponse {
    pub transfer_type: TransferType,
    pub tx_kind: TxKind,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub source: TransferSource,
    pub destination: TransferDestination,
    #[serde(default)]
    pub gas_config: Option<GasConfig>,
    #[serde(default)]
    pub keychain_version: Option<String>,
    #[serde(default)]
    pub available_assets: Option<HashMap<Address, AssetWithAmount>>,
    /// Computed from the selected asset's balance when omitted
    #[serde(default)]
    pub available_amount_minus_fees: Option<Amount>,
    /// Computed from the gas configuration when omitted
    #[serde(default)]
    pub display_gas_fee_amount: Option<Amount>,
    #[serde(default)]
    pub is_submitting: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub result: ValidationResult,
    pub message: String,
    pub button_text: String,
    pub transfer_type: TransferType,
}

#[derive(Debug, Deserialize)]
pub struct CheapestTokenRequest {
    pub gas_price_table: Vec<GasPriceEntry>,
    pub balances: Vec<TokenBalance>,
    pub gas_limit: Amount,
    #[serde(default)]
    pub usd_prices: HashMap<Address, Amount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheapestTokenResponse {
    pub token: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct FeeConfigRequest {
    pub source: Address,
    #[serde(default)]
    pub destination: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct AddressValidateRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressValidateResponse {
    pub valid: bool,
    #[serde(default)]
    pub kind: Option<AddressKind>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Provides the API state to handlers.
fn with_state(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (Arc<ApiState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

/// All routes of the daemon, including `/metrics`.
pub fn routes(
    state: Arc<ApiState>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let health = warp::path!("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    let transfer_type = warp::path!("api" / "v1" / "transfer" / "type")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(handle_transfer_type);

    let validate = warp::path!("api" / "v1" / "transfer" / "validate")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handle_validate);

    let cheapest = warp::path!("api" / "v1" / "fees" / "cheapest")
        .and(warp::post())
        .and(warp::body::json())
        .and_then(handle_cheapest_token);

    let fee_config = warp::path!("api" / "v1" / "fees" / "config")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handle_fee_config);

    let submit = warp::path!("api" / "v1" / "transfer" / "submit")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handle_submit);

    let address = warp::path!("api" / "v1" / "address" / "validate")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(handle_validate_address);

    health
        .or(transfer_type)
        .or(validate)
        .or(cheapest)
        .or(fee_config)
        .or(submit)
        .or(address)
        .or(metrics_route())
        .recover(handle_rejection)
}

async fn handle_transfer_type(request: TransferTypeRequest) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["transfer_type"]).inc();

    let source = request.source.unwrap_or_default();
    let destination = request.destination.unwrap_or_default();
    let transfer_type = determine_transfer_type(&source, &destination);
    TRANSFER_TYPES
        .with_label_values(&[transfer_type.as_str()])
        .inc();

    Ok(warp::reply::json(&TransferTypeResponse {
        transfer_type,
        tx_kind: tx_kind_for(&source, &destination),
    }))
}

/// Fills in what the caller left out and runs the validation chain.
pub fn evaluate(request: &ValidateRequest, registry: &ChainRegistry) -> ValidateResponse {
    let source_address = request.source.address.clone().unwrap_or_default();
    let destination_address = request.destination.address.clone().unwrap_or_default();
    let transfer_type = determine_transfer_type(&source_address, &destination_address);

    let display_fee = request.display_gas_fee_amount.or_else(|| {
        let config = request.gas_config.as_ref()?;
        let assets: HashMap<Address, Asset> = request
            .available_assets
            .as_ref()?
            .iter()
            .map(|(address, entry)| (address.clone(), entry.asset.clone()))
            .collect();
        display_gas_fee(config, &assets)
            .map(|fee| fee.total_display_amount)
            .ok()
    });

    let selected_token = request
        .source
        .asset
        .as_ref()
        .and_then(|asset| asset.address.as_deref());
    let available = request.available_amount_minus_fees.or_else(|| {
        let balance = request
            .available_assets
            .as_ref()
            .zip(selected_token)
            .and_then(|(assets, token)| balance_of(assets, token));
        available_amount_minus_fees(
            balance,
            selected_token,
            request.gas_config.as_ref(),
            display_fee,
        )
    });

    let ctx = ValidationContext {
        registry,
        gas_config: request.gas_config.as_ref(),
        available_amount_minus_fees: available,
        keychain_version: request.keychain_version.as_deref(),
        available_assets: request.available_assets.as_ref(),
        display_gas_fee_amount: display_fee,
    };
    let result = validate_transfer_form(&request.source, &request.destination, &ctx);

    let overrides = match transfer_type {
        TransferType::Shield => shield_button_overrides(),
        TransferType::Unshield => unshield_button_overrides(),
        _ => HashMap::new(),
    };

    ValidateResponse {
        result,
        message: result.message().to_string(),
        button_text: button_text(request.is_submitting, result, available, &overrides),
        transfer_type,
    }
}

async fn handle_validate(
    request: ValidateRequest,
    state: Arc<ApiState>,
) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["validate"]).inc();

    let response = evaluate(&request, &state.registry);
    let outcome = format!("{:?}", response.result);
    VALIDATION_OUTCOMES.with_label_values(&[outcome.as_str()]).inc();

    Ok(warp::reply::json(&response))
}

async fn handle_cheapest_token(request: CheapestTokenRequest) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["fees_cheapest"]).inc();

    let token = find_cheapest_token(
        &request.gas_price_table,
        &request.balances,
        request.gas_limit,
        &request.usd_prices,
    );
    Ok(warp::reply::json(&CheapestTokenResponse { token }))
}

async fn handle_fee_config(
    request: FeeConfigRequest,
    state: Arc<ApiState>,
) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["fees_config"]).inc();
    let timer = FEE_LOOKUP_TIME.start_timer();

    let destination = request.destination.unwrap_or_default();
    let kinds = [tx_kind_for(&request.source, &destination)];

    let (table, balances, estimate) = tokio::join!(
        state.indexer.gas_price_table(),
        state.indexer.account_balances(&request.source),
        estimate_gas_or_default(state.indexer.as_ref(), &kinds),
    );

    let table = match table {
        Ok(table) => table,
        Err(e) => {
            warn!("Gas price table unavailable: {}", e);
            return Ok(error_reply(StatusCode::BAD_GATEWAY, &e.to_string()));
        }
    };
    let balances = balances.unwrap_or_else(|e| {
        warn!("Balances of {} unavailable: {}", request.source, e);
        Vec::new()
    });

    let tokens: Vec<Address> = table.iter().map(|entry| entry.token.clone()).collect();
    let prices = state.prices.usd_prices(&tokens).await.unwrap_or_else(|e| {
        warn!("Token prices unavailable: {}", e);
        HashMap::new()
    });

    let reply = match gas_config_for(&table, &balances, &estimate, &prices, &state.native_token) {
        Ok(config) => {
            debug!("Gas config for {}: {:?}", request.source, config);
            warp::reply::with_status(warp::reply::json(&config), StatusCode::OK)
        }
        Err(e) => error_reply(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string()),
    };
    timer.observe_duration();
    Ok(reply)
}

async fn handle_submit(
    params: TransferParams,
    state: Arc<ApiState>,
) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["submit"]).inc();

    let expected = determine_transfer_type(&params.source, &params.destination);
    if expected != params.transfer_type {
        return Ok(error_reply(
            StatusCode::BAD_REQUEST,
            &format!(
                "Transfer type {} does not match addresses, expected {}",
                params.transfer_type, expected
            ),
        ));
    }

    TRANSFERS_SUBMITTED.inc();
    match submit_transfer(state.sdk.as_ref(), &params).await {
        Ok(hash) => Ok(warp::reply::with_status(
            warp::reply::json(&json!({ "hash": hash })),
            StatusCode::OK,
        )),
        Err(e) => {
            TRANSFERS_FAILED.inc();
            Ok(error_reply(StatusCode::BAD_GATEWAY, &e.to_string()))
        }
    }
}

async fn handle_validate_address(
    request: AddressValidateRequest,
    state: Arc<ApiState>,
) -> Result<impl Reply, Rejection> {
    REQUEST_COUNTER.with_label_values(&["address_validate"]).inc();

    let address = request.address.trim();
    let response = match state.registry.validate_address(address) {
        Ok(kind) => AddressValidateResponse {
            valid: true,
            kind: Some(kind),
            label: Some(state.registry.address_label(address, kind)),
            error: None,
        },
        Err(e) => AddressValidateResponse {
            valid: false,
            kind: None,
            label: None,
            error: Some(e.to_string()),
        },
    };
    Ok(warp::reply::json(&response))
}

/// Turns rejections into JSON errors.
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
    };
    Ok(error_reply(status, &message))
}
