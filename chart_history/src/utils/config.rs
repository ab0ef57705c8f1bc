// @file: chart_history/src/utils/config.rs
// @description: Application configuration: endpoints, guest token, timeout and default request.
// @author: LAS.

use std::time::Duration;
use serde::Deserialize;
use config::{Config, ConfigError, File, Environment};
use crate::core::models::{Endpoint, HistoryRequest, Interval};
use crate::core::orchestrator::ClientSettings;

//
// TYPE DEFINITIONS
//

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,

    // Chart Socket
    pub ws_url: String,
    pub ws_origin: String,
    pub auth_token: String,
    pub ws_timeout_ms: u64,

    // Symbol Search
    pub search_url: String,
    pub search_origin: String,

    // Request Defaults
    pub default_symbol: String,
    pub default_interval: Interval,
    pub default_bars: u32,
    pub default_extended: bool,
    pub default_currency: String,
}

impl AppConfig {
    //
    // PUBLIC INTERFACE
    //

    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("log_level", "info")?

            // Chart Socket
            .set_default("ws_url", "wss://data.tradingview.com/socket.io/websocket")?
            .set_default("ws_origin", "https://data.tradingview.com")?
            .set_default("auth_token", "unauthorized_user_token")?
            .set_default("ws_timeout_ms", 5000)?

            // Symbol Search
            .set_default("search_url", "https://symbol-search.tradingview.com/symbol_search/v3/")?
            .set_default("search_origin", "https://www.tradingview.com")?

            // Request Defaults
            .set_default("default_symbol", "NASDAQ:AAPL")?
            .set_default("default_interval", "1D")?
            .set_default("default_bars", 10)?
            .set_default("default_extended", false)?
            .set_default("default_currency", "USD")?

            // File & Env Overrides
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("APP"));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: Endpoint {
                url: self.ws_url.clone(),
                origin: self.ws_origin.clone(),
            },
            auth_token: self.auth_token.clone(),
            timeout: Duration::from_millis(self.ws_timeout_ms),
        }
    }

    pub fn default_request(&self) -> HistoryRequest {
        HistoryRequest::new(self.default_symbol.clone())
            .interval(self.default_interval)
            .bars(self.default_bars)
            .extended(self.default_extended)
            .currency(self.default_currency.clone())
    }
}
