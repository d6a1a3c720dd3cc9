use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Value Object - Price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - Volume
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - Timestamp in milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, From, Into, Deref, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }

    /// Benchmark payloads carry whole seconds; `None` when the millisecond value overflows
    pub fn from_unix_seconds(seconds: u64) -> Option<Self> {
        seconds.checked_mul(1000).map(Self)
    }
}

/// Value Object - OHLCV
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct OHLCV {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

pub const DEFAULT_TICKER: &str = "BTC/USD";

/// Value Object - ticker as shown to the user, e.g. `BTC/USD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct TickerSymbol(String);

impl TickerSymbol {
    /// Asset-class prefix used by the benchmark feed ids
    pub const FEED_PREFIX: &'static str = "Crypto.";

    pub fn new(symbol: &str) -> Result<Self, String> {
        let symbol = symbol.trim();
        let symbol = symbol.strip_prefix(Self::FEED_PREFIX).unwrap_or(symbol);
        if symbol.is_empty() {
            return Err("Ticker cannot be empty".to_string());
        }
        Ok(Self(symbol.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Symbol as the history endpoint expects it
    pub fn feed_symbol(&self) -> String {
        format!("{}{}", Self::FEED_PREFIX, self.0)
    }
}

impl Default for TickerSymbol {
    fn default() -> Self {
        Self(DEFAULT_TICKER.to_string())
    }
}

/// Value Object - TradingView resolution
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    StrumDisplay,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum Resolution {
    #[strum(serialize = "1")]
    #[serde(rename = "1")]
    OneMinute,

    #[strum(serialize = "5")]
    #[serde(rename = "5")]
    FiveMinutes,

    #[strum(serialize = "15")]
    #[serde(rename = "15")]
    FifteenMinutes,

    #[strum(serialize = "30")]
    #[serde(rename = "30")]
    ThirtyMinutes,

    #[default]
    #[strum(serialize = "60")]
    #[serde(rename = "60")]
    OneHour,

    #[strum(serialize = "240")]
    #[serde(rename = "240")]
    FourHours,

    #[strum(serialize = "1D")]
    #[serde(rename = "1D")]
    OneDay,

    #[strum(serialize = "1W")]
    #[serde(rename = "1W")]
    OneWeek,
}

impl Resolution {
    pub fn as_query_value(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_strips_feed_prefix_and_uppercases() {
        let ticker = TickerSymbol::new("Crypto.eth/usd").unwrap();
        assert_eq!(ticker.value(), "ETH/USD");
        assert_eq!(ticker.feed_symbol(), "Crypto.ETH/USD");
        assert!(TickerSymbol::new("  ").is_err());
    }

    #[test]
    fn resolution_round_trips_through_query_value() {
        assert_eq!(Resolution::default().as_query_value(), "60");
        assert_eq!("1D".parse::<Resolution>().unwrap(), Resolution::OneDay);
    }
}
