// @file: chart_history/src/tests/frame_codec.rs
// @description: Envelope length, key order and per-command parameter shapes.
// @author: LAS.

#[cfg(test)]
mod frame_codec_tests {
    use crate::core::frame::{encode, encode_raw, is_heartbeat, Command, QUOTE_FIELDS};
    use crate::core::models::Interval;
    use crate::core::session::SessionId;
    use serde_json::{json, Value};

    /// Splits `~m~<len>~m~<payload>` and checks the declared length.
    fn unwrap_frame(frame: &str) -> (usize, &str) {
        let rest = frame.strip_prefix("~m~").expect("missing leading marker");
        let (len, payload) = rest.split_once("~m~").expect("missing second marker");
        (len.parse().expect("length is not a number"), payload)
    }

    #[test]
    fn test_exact_wire_format() {
        let frame = encode(&Command::SetAuthToken { token: "unauthorized_user_token".to_string() }).unwrap();

        let payload = r#"{"m":"set_auth_token","p":["unauthorized_user_token"]}"#;
        assert_eq!(frame, format!("~m~{}~m~{}", payload.len(), payload));
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let samples: Vec<(&str, Vec<Value>)> = vec![
            ("quote_add_symbols", vec![json!("qs_1"), json!("TSE:7203 トヨタ")]),
            ("m", vec![json!("€£¥₹"), json!(1.5), json!(null)]),
            ("emoji_📈", vec![json!({"k": ["ü", "ß"]}), json!([])]),
            ("empty", vec![]),
        ];

        for (method, params) in samples {
            let frame = encode_raw(method, &params).unwrap();
            let (declared, payload) = unwrap_frame(&frame);

            assert_eq!(declared, payload.len(), "byte length mismatch for {}", method);
            if payload.chars().count() != payload.len() {
                assert_ne!(declared, payload.chars().count());
            }

            // Keys are emitted in m, p order.
            assert!(payload.starts_with("{\"m\":"));
            let back: Value = serde_json::from_str(payload).unwrap();
            assert_eq!(back["m"], json!(method));
            assert_eq!(back["p"], Value::Array(params));
        }
    }

    #[test]
    fn test_quote_set_fields_spreads_23_fields_after_session() {
        let quote = SessionId::generate("qs");
        let params = Command::QuoteSetFields { quote: quote.clone() }.params().unwrap();

        assert_eq!(params.len(), 24);
        assert_eq!(params[0], json!(quote.as_str()));
        assert_eq!(params[1], json!("ch"));
        assert_eq!(params[23], json!("rtc"));
        assert_eq!(QUOTE_FIELDS.len(), 23);
    }

    #[test]
    fn test_resolve_symbol_descriptor_text() {
        let chart = SessionId::generate("cs");
        let command = Command::ResolveSymbol {
            chart: chart.clone(),
            symbol: "NASDAQ:AAPL".to_string(),
            extended: true,
            currency: "EUR".to_string(),
        };

        let params = command.params().unwrap();

        assert_eq!(command.method(), "resolve_symbol");
        assert_eq!(params[0], json!(chart.as_str()));
        assert_eq!(params[1], json!("symbol_1"));
        assert_eq!(
            params[2],
            json!(r#"={"symbol":"NASDAQ:AAPL","adjustment":"splits","session":"extended","currency-id":"EUR"}"#)
        );
    }

    #[test]
    fn test_create_series_and_other_shapes() {
        let chart = SessionId::generate("cs");
        let quote = SessionId::generate("qs");

        let series = Command::CreateSeries { chart: chart.clone(), interval: Interval::Hour4, bars: 250 };
        assert_eq!(
            series.params().unwrap(),
            vec![json!(chart.as_str()), json!("s1"), json!("s1"), json!("symbol_1"), json!("4H"), json!(250)]
        );

        let add = Command::QuoteAddSymbols { quote: quote.clone(), symbol: "BINANCE:BTCUSDT".to_string() };
        assert_eq!(add.params().unwrap()[2], json!({"flags": ["force_permission"]}));

        assert_eq!(
            Command::ChartCreateSession { chart: chart.clone() }.params().unwrap(),
            vec![json!(chart.as_str()), json!("")]
        );
        assert_eq!(
            Command::SwitchTimezone { chart: chart.clone() }.params().unwrap(),
            vec![json!(chart.as_str()), json!("exchange")]
        );
        assert_eq!(Command::QuoteCreateSession { quote: quote.clone() }.method(), "quote_create_session");
        assert_eq!(Command::QuoteFastSymbols { quote, symbol: "X".to_string() }.method(), "quote_fast_symbols");
    }

    #[test]
    fn test_heartbeat_detection() {
        assert!(is_heartbeat("~m~4~m~~h~1"));
        assert!(is_heartbeat("~m~7~m~~h~1234"));

        assert!(!is_heartbeat("~m~5~m~~h~1"));
        assert!(!is_heartbeat("~m~~m~~h~1"));
        assert!(!is_heartbeat(r#"~m~15~m~{"m":"qsd","p":[]}"#));
        assert!(!is_heartbeat("~h~1"));
    }
}
