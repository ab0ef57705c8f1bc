// @file: chart_history/src/tests/config_defaults.rs
// @description: AppConfig defaults and their mapping to client settings and the default request.
// @author: LAS.

#[cfg(test)]
mod config_tests {
    use crate::core::currency;
    use crate::core::models::Interval;
    use crate::utils::config::AppConfig;
    use std::time::Duration;

    #[test]
    fn test_defaults_map_to_settings_and_request() {
        let config = AppConfig::load().unwrap();

        let settings = config.client_settings();
        assert_eq!(settings.endpoint.url, config.ws_url);
        assert_eq!(settings.endpoint.origin, config.ws_origin);
        assert_eq!(settings.timeout, Duration::from_millis(config.ws_timeout_ms));
        assert_eq!(settings.auth_token, config.auth_token);

        let request = config.default_request();
        assert_eq!(request.symbol, config.default_symbol);
        assert_eq!(request.interval, config.default_interval);
        assert_eq!(request.bars, config.default_bars);
        assert_eq!(request.currency_code, config.default_currency);
    }

    #[test]
    fn test_interval_codes_round_trip() {
        for interval in Interval::ALL {
            assert_eq!(interval.code().parse::<Interval>().unwrap(), interval);
        }
        assert_eq!("1D".parse::<Interval>().unwrap(), Interval::Daily);
        assert!("2D".parse::<Interval>().is_err());
    }

    #[test]
    fn test_currency_lookup_is_case_insensitive() {
        assert_eq!(currency::lookup("usd").map(|c| c.name), Some("US Dollar"));
        assert_eq!(currency::lookup("EUR").map(|c| c.symbol), Some("€"));
        assert!(currency::lookup("XXX").is_none());
    }
}
