// @file: chart_history/src/lib.rs
// @description: Exposes the protocol session core, its connectors and configuration.
// @author: LAS.

pub mod core;
pub mod connectors;
pub mod utils;
mod tests;

pub use crate::core::errors::{ExtractError, FetchError};
pub use crate::core::models::{HistoryOutcome, HistoryRequest, Interval, OhlcvSeries, SymbolMatch};
pub use crate::core::orchestrator::{ClientSettings, HistoryClient};
