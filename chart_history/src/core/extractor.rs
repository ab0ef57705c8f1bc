// @file: chart_history/src/core/extractor.rs
// @description: Scanner for the bar list embedded in the accumulated chart stream.
// @author: LAS.

use crate::core::errors::ExtractError;
use crate::core::models::{Bar, OhlcvSeries};


//
// PUBLIC INTERFACE
//

/// Start of the bar list inside a `timescale_update` payload.
pub const SERIES_MARKER: &str = "\"s\":[";

const BAR_WIDTH: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Bars(OhlcvSeries),
    /// The stream carried no bar list at all (unknown symbol, empty range).
    NoData,
}

impl Extraction {
    pub fn into_series(self) -> OhlcvSeries {
        match self {
            Extraction::Bars(series) => series,
            Extraction::NoData => OhlcvSeries::default(),
        }
    }
}

/// Scans the first bar list in `buffer`.
///
/// The surrounding stream is a concatenation of frames, so only the list itself
/// is parsed: `[{..."v":[ts, o, h, l, c, v]...}, ...]`. A bar without the
/// volume entry gets `NaN` volume. Keys other than `v` are
/// skipped. The list must be closed; a buffer that ends inside it is `Truncated`.
pub fn extract(buffer: &str) -> Result<Extraction, ExtractError> {
    let Some(start) = buffer.find(SERIES_MARKER) else {
        return Ok(Extraction::NoData);
    };

    // Position on the opening bracket.
    let mut scanner = Scanner { text: buffer, pos: start + SERIES_MARKER.len() - 1 };
    scanner.bar_list().map(Extraction::Bars)
}


//
// SCANNER
//

struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: &'static str) -> ExtractError {
        match self.text[self.pos..].chars().next() {
            Some(found) => ExtractError::Unexpected { offset: self.pos, expected, found },
            None => ExtractError::Truncated { offset: self.pos },
        }
    }

    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ExtractError> {
        self.skip_ws();
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes `,` and returns true, or consumes `close` and returns false.
    fn separator(&mut self, close: u8, expected: &'static str) -> Result<bool, ExtractError> {
        self.skip_ws();
        match self.peek() {
            Some(b',') => {
                self.pos += 1;
                Ok(true)
            }
            Some(b) if b == close => {
                self.pos += 1;
                Ok(false)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn closes_immediately(&mut self, close: u8) -> bool {
        self.skip_ws();
        if self.peek() == Some(close) {
            self.pos += 1;
            return true;
        }
        false
    }

    fn bar_list(&mut self) -> Result<OhlcvSeries, ExtractError> {
        self.expect(b'[', "'['")?;
        let mut series = OhlcvSeries::default();

        if self.closes_immediately(b']') {
            return Ok(series);
        }

        loop {
            let bar: Bar = self.bar(series.len())?;
            series.push(bar);

            if !self.separator(b']', "',' or ']'")? {
                return Ok(series);
            }
        }
    }

    fn bar(&mut self, index: usize) -> Result<Bar, ExtractError> {
        self.skip_ws();
        let offset: usize = self.pos;
        self.expect(b'{', "'{'")?;

        let mut values: Vec<f64> = Vec::new();

        if !self.closes_immediately(b'}') {
            loop {
                let key: &str = self.string()?;
                self.expect(b':', "':'")?;

                if key == "v" {
                    values = self.number_array()?;
                } else {
                    self.skip_value()?;
                }

                if !self.separator(b'}', "',' or '}'")? {
                    break;
                }
            }
        }

        match values.as_slice() {
            &[ts, open, high, low, close, volume] => Ok(Bar {
                timestamp_ms: ts * 1000.0,
                open,
                high,
                low,
                close,
                volume,
            }),
            // Instruments without a volume column (indices) send five values.
            &[ts, open, high, low, close] => Ok(Bar {
                timestamp_ms: ts * 1000.0,
                open,
                high,
                low,
                close,
                volume: f64::NAN,
            }),
            other => Err(ExtractError::MalformedBar { index, offset, found: other.len() }),
        }
    }

    fn string(&mut self) -> Result<&'a str, ExtractError> {
        self.expect(b'"', "string")?;
        let start: usize = self.pos;

        loop {
            match self.peek() {
                None => return Err(ExtractError::Truncated { offset: self.pos }),
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    let text: &'a str = self.text;
                    let value: &'a str = &text[start..self.pos];
                    self.pos += 1;
                    return Ok(value);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn number(&mut self) -> Result<f64, ExtractError> {
        self.skip_ws();
        let start: usize = self.pos;

        while matches!(self.peek(), Some(b) if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E')) {
            self.pos += 1;
        }

        if start == self.pos {
            return Err(self.unexpected("number"));
        }

        let raw: &str = &self.text[start..self.pos];
        raw.parse::<f64>().map_err(|_| ExtractError::InvalidNumber {
            offset: start,
            text: raw.to_string(),
        })
    }

    fn number_array(&mut self) -> Result<Vec<f64>, ExtractError> {
        self.expect(b'[', "'['")?;
        let mut out: Vec<f64> = Vec::with_capacity(BAR_WIDTH);

        if self.closes_immediately(b']') {
            return Ok(out);
        }

        loop {
            out.push(self.number()?);
            if !self.separator(b']', "',' or ']'")? {
                return Ok(out);
            }
        }
    }

    fn skip_value(&mut self) -> Result<(), ExtractError> {
        self.skip_ws();
        match self.peek() {
            None => Err(ExtractError::Truncated { offset: self.pos }),
            Some(b'"') => self.string().map(|_| ()),
            Some(b'[') | Some(b'{') => self.skip_nested(),
            Some(_) => {
                // number, true, false, null
                let start: usize = self.pos;
                while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'+' | b'.')) {
                    self.pos += 1;
                }
                if start == self.pos {
                    return Err(self.unexpected("value"));
                }
                Ok(())
            }
        }
    }

    fn skip_nested(&mut self) -> Result<(), ExtractError> {
        let mut depth: usize = 0;

        loop {
            match self.peek() {
                None => return Err(ExtractError::Truncated { offset: self.pos }),
                Some(b'"') => {
                    self.string()?;
                    continue;
                }
                Some(b'[') | Some(b'{') => depth += 1,
                Some(b']') | Some(b'}') => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(());
                    }
                }
                Some(_) => {}
            }
            self.pos += 1;
        }
    }
}
