// @file: chart_history/src/core/models.rs
// @description: Domain types shared by the protocol session, the extractor and the search client.
// @author: LAS.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


//
// OHLCV SERIES
//

/// Six index-aligned columns, one entry per bar in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcvSeries {
    pub timestamp: Vec<f64>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp_ms: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvSeries {
    pub fn push(&mut self, bar: Bar) {
        self.timestamp.push(bar.timestamp_ms);
        self.open.push(bar.open);
        self.high.push(bar.high);
        self.low.push(bar.low);
        self.close.push(bar.close);
        self.volume.push(bar.volume);
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// Row view over the columns.
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        (0..self.len()).map(move |i| Bar {
            timestamp_ms: self.timestamp[i],
            open: self.open[i],
            high: self.high[i],
            low: self.low[i],
            close: self.close[i],
            volume: self.volume[i],
        })
    }
}


//
// INTERVALS
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    Min1,
    Min3,
    Min5,
    Min15,
    Min30,
    Min45,
    Hour1,
    Hour2,
    Hour3,
    Hour4,
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    pub const ALL: [Interval; 13] = [
        Interval::Min1, Interval::Min3, Interval::Min5, Interval::Min15,
        Interval::Min30, Interval::Min45, Interval::Hour1, Interval::Hour2,
        Interval::Hour3, Interval::Hour4, Interval::Daily, Interval::Weekly,
        Interval::Monthly,
    ];

    /// Code sent verbatim in `create_series`.
    pub fn code(&self) -> &'static str {
        match self {
            Interval::Min1 => "1",
            Interval::Min3 => "3",
            Interval::Min5 => "5",
            Interval::Min15 => "15",
            Interval::Min30 => "30",
            Interval::Min45 => "45",
            Interval::Hour1 => "1H",
            Interval::Hour2 => "2H",
            Interval::Hour3 => "3H",
            Interval::Hour4 => "4H",
            Interval::Daily => "1D",
            Interval::Weekly => "1W",
            Interval::Monthly => "1M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.code() == s)
            .ok_or_else(|| format!("unknown interval code: {}", s))
    }
}

impl TryFrom<String> for Interval {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.code().to_string()
    }
}


//
// REQUESTS & RESULTS
//

/// Where the chart socket lives and which `Origin` it insists on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub origin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    /// Composite `EXCHANGE:TICKER` identifier, e.g. `NASDAQ:AAPL`.
    pub symbol: String,
    pub interval: Interval,
    pub bars: u32,
    pub extended: bool,
    pub currency_code: String,
}

impl HistoryRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        HistoryRequest {
            symbol: symbol.into(),
            interval: Interval::Daily,
            bars: 10,
            extended: false,
            currency_code: "USD".to_string(),
        }
    }

    pub fn interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn bars(mut self, bars: u32) -> Self {
        self.bars = bars;
        self
    }

    pub fn extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryOutcome {
    pub series: OhlcvSeries,
    /// Set when the service completed the series without any bar list in the stream.
    pub no_data: bool,
}


//
// SYMBOL SEARCH
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    #[serde(rename = "type")]
    pub kind: String,
    pub exchange: String,
    pub symbol: String,
    pub description: String,
    pub currency_code: Option<String>,
}
