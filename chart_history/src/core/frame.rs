// @file: chart_history/src/core/frame.rs
// @description: Typed outbound commands and the `~m~<len>~m~<payload>` envelope.
// @author: LAS.

use serde::Serialize;
use serde_json::{json, Value};
use crate::core::errors::FetchError;
use crate::core::models::Interval;
use crate::core::session::SessionId;


//
// CONSTANTS
//

const FRAME_MARKER: &str = "~m~";
const HEARTBEAT_MARKER: &str = "~h~";

/// Symbol handle shared by `resolve_symbol` and `create_series`.
pub const SYMBOL_HANDLE: &str = "symbol_1";
pub const SERIES_ID: &str = "s1";

pub const QUOTE_FIELDS: [&str; 23] = [
    "ch", "chp", "current_session", "description", "local_description",
    "language", "exchange", "fractional", "is_tradable", "lp", "lp_time",
    "minmov", "minmove2", "original_name", "pricescale", "pro_name",
    "short_name", "type", "update_mode", "volume", "currency_code",
    "rchp", "rtc",
];


//
// COMMANDS
//

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetAuthToken { token: String },
    ChartCreateSession { chart: SessionId },
    QuoteCreateSession { quote: SessionId },
    QuoteSetFields { quote: SessionId },
    QuoteAddSymbols { quote: SessionId, symbol: String },
    QuoteFastSymbols { quote: SessionId, symbol: String },
    ResolveSymbol { chart: SessionId, symbol: String, extended: bool, currency: String },
    CreateSeries { chart: SessionId, interval: Interval, bars: u32 },
    SwitchTimezone { chart: SessionId },
}

// Key order matters on the wire: symbol, adjustment, session, currency-id.
#[derive(Serialize)]
struct SymbolDescriptor<'a> {
    symbol: &'a str,
    adjustment: &'a str,
    session: &'a str,
    #[serde(rename = "currency-id")]
    currency_id: &'a str,
}

impl Command {
    pub fn method(&self) -> &'static str {
        match self {
            Command::SetAuthToken { .. } => "set_auth_token",
            Command::ChartCreateSession { .. } => "chart_create_session",
            Command::QuoteCreateSession { .. } => "quote_create_session",
            Command::QuoteSetFields { .. } => "quote_set_fields",
            Command::QuoteAddSymbols { .. } => "quote_add_symbols",
            Command::QuoteFastSymbols { .. } => "quote_fast_symbols",
            Command::ResolveSymbol { .. } => "resolve_symbol",
            Command::CreateSeries { .. } => "create_series",
            Command::SwitchTimezone { .. } => "switch_timezone",
        }
    }

    pub fn params(&self) -> Result<Vec<Value>, serde_json::Error> {
        let params: Vec<Value> = match self {
            Command::SetAuthToken { token } => vec![json!(token)],
            Command::ChartCreateSession { chart } => vec![json!(chart.as_str()), json!("")],
            Command::QuoteCreateSession { quote } => vec![json!(quote.as_str())],
            Command::QuoteSetFields { quote } => {
                let mut p: Vec<Value> = Vec::with_capacity(QUOTE_FIELDS.len() + 1);
                p.push(json!(quote.as_str()));
                p.extend(QUOTE_FIELDS.iter().map(|field| json!(field)));
                p
            }
            Command::QuoteAddSymbols { quote, symbol } => vec![
                json!(quote.as_str()),
                json!(symbol),
                json!({ "flags": ["force_permission"] }),
            ],
            Command::QuoteFastSymbols { quote, symbol } => vec![json!(quote.as_str()), json!(symbol)],
            Command::ResolveSymbol { chart, symbol, extended, currency } => {
                let descriptor: String = serde_json::to_string(&SymbolDescriptor {
                    symbol,
                    adjustment: "splits",
                    session: if *extended { "extended" } else { "regular" },
                    currency_id: currency,
                })?;
                vec![json!(chart.as_str()), json!(SYMBOL_HANDLE), json!(format!("={}", descriptor))]
            }
            Command::CreateSeries { chart, interval, bars } => vec![
                json!(chart.as_str()),
                json!(SERIES_ID),
                json!(SERIES_ID),
                json!(SYMBOL_HANDLE),
                json!(interval.code()),
                json!(bars),
            ],
            Command::SwitchTimezone { chart } => vec![json!(chart.as_str()), json!("exchange")],
        };
        Ok(params)
    }
}


//
// ENVELOPE
//

#[derive(Serialize)]
struct Envelope<'a> {
    m: &'a str,
    p: &'a [Value],
}

pub fn encode(command: &Command) -> Result<String, FetchError> {
    let params: Vec<Value> = command.params()?;
    encode_raw(command.method(), &params)
}

/// Length prefix is the UTF-8 byte length of the payload, not its char count.
pub fn encode_raw(method: &str, params: &[Value]) -> Result<String, FetchError> {
    let payload: String = serde_json::to_string(&Envelope { m: method, p: params })?;
    Ok(format!("{}{}{}{}", FRAME_MARKER, payload.len(), FRAME_MARKER, payload))
}

/// `~m~<n>~m~~h~<k>`: keep-alive the service expects to be echoed back.
pub fn is_heartbeat(text: &str) -> bool {
    let Some(rest) = text.strip_prefix(FRAME_MARKER) else { return false };
    let Some((len, payload)) = rest.split_once(FRAME_MARKER) else { return false };

    !len.is_empty()
        && len.bytes().all(|b| b.is_ascii_digit())
        && len.parse::<usize>().ok() == Some(payload.len())
        && payload.starts_with(HEARTBEAT_MARKER)
}
