// @file: chart_history/src/core/orchestrator.rs
// @description: Per-fetch protocol state machine: connect, setup sequence, accumulate, complete.
// @author: LAS.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info, warn};
use tokio::time::timeout;
use crate::core::currency;
use crate::core::errors::FetchError;
use crate::core::extractor::{extract, Extraction};
use crate::core::frame::{encode, is_heartbeat, Command};
use crate::core::interfaces::{Connector, TransportEvent, TransportSession};
use crate::core::models::{Endpoint, HistoryOutcome, HistoryRequest};
use crate::core::session::SessionPair;


//
// CONSTANTS
//

pub const COMPLETION_SENTINEL: &str = "series_completed";

const SERVICE_ERRORS: [&str; 3] = [
    "\"m\":\"critical_error\"",
    "\"m\":\"series_error\"",
    "\"m\":\"symbol_error\"",
];

// Longest marker we search for; earlier text has already been checked.
const LOOKBACK: usize = 24;


//
// TYPE DEFINITIONS
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Disconnected,
    Connecting,
    SessionSetup,
    AwaitingSeries,
    Completed,
    Failed,
}

impl fmt::Display for FetchState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: Endpoint,
    pub auth_token: String,
    /// Upper bound on the wait between the last setup frame and the sentinel.
    pub timeout: Duration,
}


//
// FETCH CONTEXT
//

/// Everything mutable about one fetch. Built fresh per call, dropped with it.
pub struct FetchContext {
    sessions: SessionPair,
    state: FetchState,
    trail: Vec<FetchState>,
    buffer: String,
}

impl FetchContext {
    pub fn new(sessions: SessionPair) -> Self {
        FetchContext {
            sessions,
            state: FetchState::Disconnected,
            trail: vec![FetchState::Disconnected],
            buffer: String::new(),
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    /// Every state visited so far, in order.
    pub fn trail(&self) -> &[FetchState] {
        &self.trail
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn transition(&mut self, next: FetchState) {
        debug!("[{}] {} -> {}", self.sessions.chart, self.state, next);
        self.state = next;
        self.trail.push(next);
    }

    /// Outbound sequence for one fetch. `resolve_symbol` must precede
    /// `create_series`, which refers to the handle it establishes.
    pub fn setup_commands(&self, auth_token: &str, request: &HistoryRequest) -> Vec<Command> {
        let quote = &self.sessions.quote;
        let chart = &self.sessions.chart;

        vec![
            Command::SetAuthToken { token: auth_token.to_string() },
            Command::ChartCreateSession { chart: chart.clone() },
            Command::QuoteCreateSession { quote: quote.clone() },
            Command::QuoteSetFields { quote: quote.clone() },
            Command::QuoteAddSymbols { quote: quote.clone(), symbol: request.symbol.clone() },
            Command::QuoteFastSymbols { quote: quote.clone(), symbol: request.symbol.clone() },
            Command::ResolveSymbol {
                chart: chart.clone(),
                symbol: request.symbol.clone(),
                extended: request.extended,
                currency: request.currency_code.clone(),
            },
            Command::CreateSeries { chart: chart.clone(), interval: request.interval, bars: request.bars },
            Command::SwitchTimezone { chart: chart.clone() },
        ]
    }

    pub async fn run(
        &mut self,
        connector: &dyn Connector,
        settings: &ClientSettings,
        request: &HistoryRequest,
    ) -> Result<HistoryOutcome, FetchError> {
        let result = self.drive(connector, settings, request).await;
        if result.is_err() {
            self.transition(FetchState::Failed);
        }
        result
    }

    async fn drive(
        &mut self,
        connector: &dyn Connector,
        settings: &ClientSettings,
        request: &HistoryRequest,
    ) -> Result<HistoryOutcome, FetchError> {
        // #1. Open the single connection this fetch gets
        self.transition(FetchState::Connecting);
        let mut transport: Box<dyn TransportSession> = connector.open(&settings.endpoint).await?;

        // #2. Setup sequence, no acknowledgements awaited. The series is
        // requested once create_series is out; switch_timezone follows it.
        self.transition(FetchState::SessionSetup);
        for command in self.setup_commands(&settings.auth_token, request) {
            let requests_series: bool = matches!(command, Command::CreateSeries { .. });
            let frame: String = encode(&command)?;
            debug!("Sending: {}", frame);
            transport.send_text(frame).await?;
            if requests_series {
                self.transition(FetchState::AwaitingSeries);
            }
        }

        // #3. Accumulate until the sentinel, bounded by the timeout
        let waited = timeout(settings.timeout, self.await_series(transport.as_mut())).await;
        match waited {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                if let Err(e) = transport.close().await {
                    debug!("Close after timeout failed: {}", e);
                }
                return Err(FetchError::Timeout(settings.timeout));
            }
        }

        // #4. Sentinel seen: release the socket, then parse
        if let Err(e) = transport.close().await {
            debug!("Close after completion failed: {}", e);
        }

        let outcome: HistoryOutcome = match extract(&self.buffer)? {
            Extraction::Bars(series) => HistoryOutcome { series, no_data: false },
            Extraction::NoData => {
                warn!("No data for {}, please check the exchange and symbol", request.symbol);
                HistoryOutcome { series: Default::default(), no_data: true }
            }
        };

        self.transition(FetchState::Completed);
        self.buffer.clear();
        Ok(outcome)
    }

    async fn await_series(&mut self, transport: &mut dyn TransportSession) -> Result<(), FetchError> {
        loop {
            match transport.next_event().await {
                TransportEvent::Text(text) => {
                    if is_heartbeat(&text) {
                        debug!("Echoing heartbeat {}", text);
                        transport.send_text(text).await?;
                        continue;
                    }
                    if self.accumulate(&text)? {
                        return Ok(());
                    }
                }
                TransportEvent::Error(e) => return Err(FetchError::Transport(e)),
                TransportEvent::Closed => {
                    return Err(FetchError::Transport(
                        "connection closed before series completed".to_string(),
                    ));
                }
            }
        }
    }

    /// Appends inbound text. Returns true once the sentinel is present,
    /// including when it straddles two messages.
    fn accumulate(&mut self, text: &str) -> Result<bool, FetchError> {
        let mut from: usize = self.buffer.len().saturating_sub(LOOKBACK);
        while !self.buffer.is_char_boundary(from) {
            from -= 1;
        }

        self.buffer.push_str(text);
        let fresh: &str = &self.buffer[from..];

        if let Some(marker) = SERVICE_ERRORS.iter().find(|marker| fresh.contains(*marker)) {
            let method: &str = marker.trim_start_matches("\"m\":").trim_matches('"');
            return Err(FetchError::Service(method.to_string()));
        }

        Ok(fresh.contains(COMPLETION_SENTINEL))
    }
}


//
// CLIENT
//

/// Holds the instance's two session ids and the way to reach the service.
/// Each `get_hist` call runs its own `FetchContext` over its own connection.
#[derive(Clone)]
pub struct HistoryClient {
    sessions: SessionPair,
    connector: Arc<dyn Connector>,
    settings: ClientSettings,
}

impl HistoryClient {
    pub fn new(connector: Arc<dyn Connector>, settings: ClientSettings) -> Self {
        HistoryClient {
            sessions: SessionPair::new(),
            connector,
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionPair {
        &self.sessions
    }

    pub async fn get_hist(&self, request: &HistoryRequest) -> Result<HistoryOutcome, FetchError> {
        if currency::lookup(&request.currency_code).is_none() {
            warn!("Unknown currency code {}, sending as-is", request.currency_code);
        }

        info!(
            "Fetching {} x {} bars for {} ({})",
            request.bars,
            request.interval,
            request.symbol,
            if request.extended { "extended" } else { "regular" }
        );

        let mut context = FetchContext::new(self.sessions.clone());
        let outcome: HistoryOutcome = context
            .run(self.connector.as_ref(), &self.settings, request)
            .await?;

        info!("Fetched {} bars for {}", outcome.series.len(), request.symbol);
        Ok(outcome)
    }
}
