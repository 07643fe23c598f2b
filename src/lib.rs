//! Bolso Ledger Server Library
//!
//! Personal income/expense ledger served as HTML forms. This module exports
//! the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod exchange_rate;
pub mod models;
pub mod routes;
pub mod security;
pub mod session;
pub mod views;

pub use config::Config;
pub use db::{open_storage, Storage};
pub use error::{AppError, Result};
pub use exchange_rate::ExchangeRateClient;
pub use routes::router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub config: Config,
    pub rates: ExchangeRateClient,
}

impl AppState {
    /// Create a new AppState with the given storage and configuration
    pub fn new(storage: Storage, config: Config) -> std::result::Result<Self, reqwest::Error> {
        let rates = ExchangeRateClient::new(
            config.exchange_rate_url.clone(),
            config.exchange_rate_timeout(),
        )?;

        Ok(Self {
            storage,
            config,
            rates,
        })
    }
}
