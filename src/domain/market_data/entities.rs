pub use super::value_objects::{OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Raw benchmark payload: parallel channels indexed by sample
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawSeries {
    /// TradingView status: `ok`, `no_data` or `error`
    #[serde(default = "RawSeries::ok_status")]
    pub s: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
    pub t: Vec<i64>,
    pub o: Vec<f64>,
    pub h: Vec<f64>,
    pub l: Vec<f64>,
    pub c: Vec<f64>,
    #[serde(default)]
    pub v: Vec<f64>,
}

impl RawSeries {
    fn ok_status() -> String {
        "ok".to_string()
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Domain entity - one normalized sample of the series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
}

impl PricePoint {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }

    pub fn open(&self) -> f64 {
        self.ohlcv.open.value()
    }

    pub fn close(&self) -> f64 {
        self.ohlcv.close.value()
    }

    /// Lower edge of the open/close body
    pub fn body_low(&self) -> f64 {
        self.open().min(self.close())
    }

    pub fn body_high(&self) -> f64 {
        self.open().max(self.close())
    }
}

/// Simplified price feed entry used by the ticker picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFeed {
    pub symbol: String,
    pub description: String,
    pub base: String,
}

impl PriceFeed {
    pub fn new(symbol: &str, description: &str, base: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            description: description.to_string(),
            base: base.to_string(),
        }
    }

    /// Case-insensitive substring match on symbol, description or base
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.symbol.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.base.to_lowercase().contains(&query)
    }
}
