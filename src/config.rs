use crate::domain::logging::LogLevel;
use crate::domain::market_data::{Resolution, TickerSymbol, value_objects::DEFAULT_TICKER};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://benchmarks.pyth.network/v1";

/// Runtime settings, optionally supplied as JSON by the host page
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub base_url: String,
    pub default_ticker: String,
    pub resolution: Resolution,
    pub lookback_days: u64,
    pub search_limit: usize,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_ticker: DEFAULT_TICKER.to_string(),
            resolution: Resolution::default(),
            lookback_days: 30,
            search_limit: 3,
            log_level: LogLevel::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Config handed over by the host page; absent or blank means defaults
    pub fn from_optional_json(json: Option<&str>) -> Result<Self, serde_json::Error> {
        match json.map(str::trim).filter(|json| !json.is_empty()) {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }

    pub fn lookback_seconds(&self) -> u64 {
        self.lookback_days.saturating_mul(24 * 60 * 60)
    }

    /// `(from, to)` in Unix seconds for a request issued at `now_secs`
    pub fn time_window(&self, now_secs: u64) -> (u64, u64) {
        (now_secs.saturating_sub(self.lookback_seconds()), now_secs)
    }

    pub fn default_ticker(&self) -> TickerSymbol {
        TickerSymbol::new(&self.default_ticker).unwrap_or_default()
    }

    /// Ticker from a `?ticker=` query string, `None` when absent or blank
    pub fn ticker_from_query(query: &str) -> Option<TickerSymbol> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "ticker")
            .and_then(|(_, value)| {
                urlencoding::decode(&value.replace('+', " ")).ok().map(|v| v.into_owned())
            })
            .and_then(|value| TickerSymbol::new(&value).ok())
    }

    /// Query string that selects `ticker`
    pub fn ticker_query(ticker: &TickerSymbol) -> String {
        format!("?ticker={}", urlencoding::encode(ticker.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"lookbackDays": 7, "logLevel": "warn"}"#).unwrap();
        assert_eq!(config.lookback_days, 7);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.resolution, Resolution::OneHour);
    }

    #[test]
    fn missing_host_config_uses_defaults() {
        assert_eq!(AppConfig::from_optional_json(None).unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_optional_json(Some("  ")).unwrap(), AppConfig::default());
        assert!(AppConfig::from_optional_json(Some("{")).is_err());
    }

    #[test]
    fn window_ends_now() {
        let config = AppConfig::default();
        assert_eq!(config.time_window(3_000_000), (3_000_000 - 2_592_000, 3_000_000));
        assert_eq!(config.time_window(10), (0, 10));
    }

    #[test]
    fn huge_lookback_starts_at_the_epoch() {
        let config = AppConfig::from_json(r#"{"lookbackDays": 300000000000000}"#).unwrap();
        assert_eq!(config.lookback_seconds(), u64::MAX);
        assert_eq!(config.time_window(1_700_000_000), (0, 1_700_000_000));
    }

    #[test]
    fn ticker_query_round_trips() {
        let ticker = TickerSymbol::new("SOL/USD").unwrap();
        let query = AppConfig::ticker_query(&ticker);
        assert_eq!(query, "?ticker=SOL%2FUSD");
        assert_eq!(AppConfig::ticker_from_query(&query), Some(ticker));
        assert_eq!(AppConfig::ticker_from_query("?ticker=eth/usd&x=1").unwrap().value(), "ETH/USD");
        assert_eq!(AppConfig::ticker_from_query("?ticker="), None);
        assert_eq!(AppConfig::ticker_from_query(""), None);
    }
}
