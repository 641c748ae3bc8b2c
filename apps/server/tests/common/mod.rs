#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use capex_market_data::{ExchangeRateProvider, RateError};
use capex_server::{api::app_router, build_state_with_provider, config::Config};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

/// Fixed USD-based rate table.
pub struct StubRates;

#[async_trait]
impl ExchangeRateProvider for StubRates {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn get_exchange_rate(&self, from: &str, to: &str) -> Result<Decimal, RateError> {
        if from != "USD" {
            return Err(RateError::CurrencyNotSupported(from.to_string()));
        }
        match to {
            "EUR" => Ok(dec!(0.9)),
            "TTD" => Ok(dec!(6.78)),
            _ => Err(RateError::RateNotFound(to.to_string())),
        }
    }
}

pub async fn app() -> Router {
    app_with(Config::default()).await
}

pub async fn app_with(config: Config) -> Router {
    let state = build_state_with_provider(&config, Arc::new(StubRates))
        .await
        .unwrap();
    app_router(state, &config)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
