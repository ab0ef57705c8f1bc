// @file: chart_history/src/connectors/symbol_search.rs
// @description: HTTP client for the symbol search endpoint. Never fails the caller.
// @author: LAS.

use log::error;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use url::Url;
use crate::core::models::SymbolMatch;
use crate::utils::config::AppConfig;


const BROWSER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36";


//
// WIRE MODELS
//

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    symbols: Vec<RawSymbol>,
}

#[derive(Deserialize)]
struct RawSymbol {
    #[serde(rename = "type", default)] kind: String,
    #[serde(default)] exchange: String,
    #[serde(default)] symbol: String,
    #[serde(default)] description: String,
    prefix: Option<String>,
    source_id: Option<String>,
    currency_code: Option<String>,
}


//
// PUBLIC INTERFACE
//

pub struct SymbolSearch {
    client: Client,
    base_url: String,
    origin: String,
}

impl SymbolSearch {
    pub fn new(config: &AppConfig) -> Self {
        SymbolSearch {
            client: Client::new(),
            base_url: config.search_url.clone(),
            origin: config.search_origin.clone(),
        }
    }

    /// Errors are logged and reported as an empty list.
    pub async fn search(&self, text: &str, exchange: &str) -> Vec<SymbolMatch> {
        match self.try_search(text, exchange).await {
            Ok(matches) => matches,
            Err(e) => {
                error!("Search error: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, text: &str, exchange: &str) -> Result<Vec<SymbolMatch>, String> {
        // #1. Construct URL
        let url: Url = Url::parse_with_params(&self.base_url, &[
            ("text", text),
            ("hl", "1"),
            ("exchange", exchange),
            ("lang", "en"),
            ("search_type", "undefined"),
            ("domain", "production"),
            ("sort_by_country", "US"),
            ("promo", "true"),
        ])
        .map_err(|e| format!("URL Parse Error: {}", e))?;

        // #2. Execute Request
        let response = self.client
            .get(url)
            .headers(self.browser_headers()?)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API Error: {}", response.status()));
        }

        let json: Value = response.json().await
            .map_err(|e| format!("JSON Parse Error: {}", e))?;

        // #3. Normalize
        normalize_results(json).map_err(|e| format!("Unexpected response shape: {}", e))
    }

    fn browser_headers(&self) -> Result<HeaderMap, String> {
        let referer: String = format!("{}/", self.origin.trim_end_matches('/'));
        let mut headers = HeaderMap::new();

        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_AGENT));
        headers.insert(ORIGIN, HeaderValue::from_str(&self.origin).map_err(|e| e.to_string())?);
        headers.insert(REFERER, HeaderValue::from_str(&referer).map_err(|e| e.to_string())?);

        Ok(headers)
    }
}


//
// INTERNAL HELPERS
//

/// Maps the raw search payload to `SymbolMatch`es. The composite symbol is
/// `<prefix or source_id>:<ticker>` with highlight markup removed.
pub fn normalize_results(json: Value) -> Result<Vec<SymbolMatch>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_value(json)?;

    let matches: Vec<SymbolMatch> = response.symbols
        .into_iter()
        .map(|raw| {
            let ticker: String = raw.symbol.replace("<em>", "").replace("</em>", "");
            let namespace: String = raw.prefix
                .or(raw.source_id)
                .unwrap_or_else(|| raw.exchange.clone());

            SymbolMatch {
                kind: raw.kind,
                exchange: raw.exchange,
                symbol: format!("{}:{}", namespace, ticker),
                description: raw.description,
                currency_code: raw.currency_code,
            }
        })
        .collect();

    Ok(matches)
}
