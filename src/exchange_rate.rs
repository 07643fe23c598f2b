use std::time::Duration;

use reqwest::StatusCode;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde_json::Value;
use thiserror::Error;

use crate::constants::CARD_RATE_MARKUP;

/// Reasons a quote could not be turned into a card rate
#[derive(Debug, Error)]
pub enum RateError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("response has no usable blue.value_sell")]
    MissingQuote,
}

/// Client for the public dollar quote endpoint
///
/// One GET per call, bounded by the client timeout. No retry; rates are not
/// cached between calls.
#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    client: reqwest::Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bolso-ledger/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Blue sell rate times the card markup, or `None` if unavailable
    pub async fn fetch_card_rate(&self) -> Option<Decimal> {
        match self.try_fetch_card_rate().await {
            Ok(rate) => {
                tracing::info!("Fetched card dollar rate: {}", rate);
                Some(rate)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch exchange rate: {}", e);
                None
            }
        }
    }

    async fn try_fetch_card_rate(&self) -> Result<Decimal, RateError> {
        let response = self.client.get(&self.url).send().await?;

        if response.status() != StatusCode::OK {
            return Err(RateError::Status(response.status()));
        }

        let body: Value = response.json().await?;
        let sell = extract_blue_sell(&body).ok_or(RateError::MissingQuote)?;

        Ok(sell * CARD_RATE_MARKUP)
    }
}

/// `blue.value_sell` as a positive decimal
fn extract_blue_sell(body: &Value) -> Option<Decimal> {
    let sell = body.get("blue")?.get("value_sell")?.as_f64()?;
    if !sell.is_finite() || sell <= 0.0 {
        return None;
    }
    Decimal::from_f64(sell)
}
