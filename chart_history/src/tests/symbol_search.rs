// @file: chart_history/src/tests/symbol_search.rs
// @description: Search payload normalization and the never-fail contract.
// @author: LAS.

#[cfg(test)]
mod symbol_search_tests {
    use crate::connectors::symbol_search::{normalize_results, SymbolSearch};
    use crate::utils::config::AppConfig;
    use serde_json::json;

    #[test]
    fn test_normalize_strips_highlight_and_builds_composite() {
        let payload = json!({
            "symbols_remaining": 0,
            "symbols": [
                {
                    "symbol": "<em>AAPL</em>",
                    "description": "Apple Inc.",
                    "type": "stock",
                    "exchange": "NASDAQ",
                    "currency_code": "USD",
                    "prefix": "NASDAQ",
                    "source_id": "NASDAQ"
                },
                {
                    "symbol": "<em>AAPL</em>USDT",
                    "description": "Apple tokenized",
                    "type": "spot",
                    "exchange": "Bybit",
                    "source_id": "BYBIT"
                }
            ]
        });

        let results = normalize_results(payload).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].symbol, "NASDAQ:AAPL");
        assert_eq!(results[0].kind, "stock");
        assert_eq!(results[0].currency_code.as_deref(), Some("USD"));
        assert_eq!(results[1].symbol, "BYBIT:AAPLUSDT");
        assert_eq!(results[1].exchange, "Bybit");
        assert_eq!(results[1].currency_code, None);
    }

    #[test]
    fn test_normalize_falls_back_to_exchange_and_tolerates_empty() {
        let results = normalize_results(json!({
            "symbols": [{ "symbol": "EURUSD", "type": "forex", "exchange": "FX_IDC" }]
        }))
        .unwrap();
        assert_eq!(results[0].symbol, "FX_IDC:EURUSD");
        assert_eq!(results[0].description, "");

        assert!(normalize_results(json!({})).unwrap().is_empty());
        assert!(normalize_results(json!({ "symbols": "nope" })).is_err());
    }

    #[tokio::test]
    async fn test_search_failure_yields_empty_list() {
        let mut config = AppConfig::load().unwrap();
        // Nothing listens on port 9; the request fails fast.
        config.search_url = "http://127.0.0.1:9/symbol_search/v3/".to_string();

        let search = SymbolSearch::new(&config);
        assert!(search.search("AAPL", "").await.is_empty());

        config.search_url = "not a url".to_string();
        let search = SymbolSearch::new(&config);
        assert!(search.search("AAPL", "NASDAQ").await.is_empty());
    }
}
