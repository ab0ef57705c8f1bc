// @file: chart_history/src/core/interfaces.rs
// @description: Transport seam between the protocol orchestrator and the socket implementation.
// @author: LAS.

use crate::core::errors::FetchError;
use crate::core::models::Endpoint;
use async_trait::async_trait;

//
// TRAIT DEFINITIONS
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Text(String),
    Closed,
    Error(String),
}

/// One opened duplex connection.
#[async_trait]
pub trait TransportSession: Send {
    async fn send_text(&mut self, text: String) -> Result<(), FetchError>;

    // #1. Next inbound event. Never resolves while the peer is silent.
    async fn next_event(&mut self) -> TransportEvent;

    async fn close(&mut self) -> Result<(), FetchError>;
}

#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, endpoint: &Endpoint) -> Result<Box<dyn TransportSession>, FetchError>;
}
