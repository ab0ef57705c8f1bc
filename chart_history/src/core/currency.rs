// @file: chart_history/src/core/currency.rs
// @description: Static currency metadata used to sanity-check `currency-id` in requests.
// @author: LAS.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn currency(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency { code, name, symbol }
}

pub const CURRENCIES: &[Currency] = &[
    currency("USD", "US Dollar", "$"),
    currency("EUR", "Euro", "€"),
    currency("GBP", "British Pound", "£"),
    currency("JPY", "Japanese Yen", "¥"),
    currency("CHF", "Swiss Franc", "Fr"),
    currency("CAD", "Canadian Dollar", "C$"),
    currency("AUD", "Australian Dollar", "A$"),
    currency("NZD", "New Zealand Dollar", "NZ$"),
    currency("CNY", "Chinese Yuan", "¥"),
    currency("HKD", "Hong Kong Dollar", "HK$"),
    currency("SGD", "Singapore Dollar", "S$"),
    currency("INR", "Indian Rupee", "₹"),
    currency("KRW", "South Korean Won", "₩"),
    currency("SEK", "Swedish Krona", "kr"),
    currency("NOK", "Norwegian Krone", "kr"),
    currency("DKK", "Danish Krone", "kr"),
    currency("PLN", "Polish Zloty", "zł"),
    currency("BRL", "Brazilian Real", "R$"),
    currency("MXN", "Mexican Peso", "Mex$"),
    currency("ZAR", "South African Rand", "R"),
    currency("TRY", "Turkish Lira", "₺"),
    currency("RUB", "Russian Ruble", "₽"),
    currency("BTC", "Bitcoin", "₿"),
    currency("ETH", "Ethereum", "Ξ"),
    currency("USDT", "Tether", "₮"),
];

pub fn lookup(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}
