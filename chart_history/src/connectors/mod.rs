// @file: chart_history/src/connectors/mod.rs
// @description: Network-facing implementations: the chart socket and symbol search.
// @author: LAS.

pub mod symbol_search;
pub mod tradingview;

use std::sync::Arc;
use crate::core::orchestrator::HistoryClient;
use crate::utils::config::AppConfig;
use self::tradingview::WsConnector;

//
// FACTORY FUNCTION
//

/// History client wired to the live WebSocket endpoint from config.
pub fn websocket_client(app_config: &AppConfig) -> HistoryClient {
    HistoryClient::new(Arc::new(WsConnector), app_config.client_settings())
}
