// @file: chart_history/src/core/errors.rs
// @description: Failure kinds surfaced by a history fetch.
// @author: LAS.

use std::time::Duration;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection could not be opened, broke, or was closed before the series completed.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("series not completed within {0:?}")]
    Timeout(Duration),

    /// The service answered with an error frame instead of data.
    #[error("service rejected request: {0}")]
    Service(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("frame encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}


/// Bar list scanning failures. Offsets are byte positions in the fetch buffer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("bar {index} at byte {offset}: expected 5 or 6 values, found {found}")]
    MalformedBar { index: usize, offset: usize, found: usize },

    #[error("unexpected {found:?} at byte {offset}, expected {expected}")]
    Unexpected { offset: usize, expected: &'static str, found: char },

    #[error("invalid number {text:?} at byte {offset}")]
    InvalidNumber { offset: usize, text: String },

    #[error("bar list truncated at byte {offset}")]
    Truncated { offset: usize },
}
