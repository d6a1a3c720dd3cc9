use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{OHLCV, Price, PriceFeed, PricePoint, RawSeries, Timestamp, Volume};
use crate::log_trace;
use once_cell::sync::Lazy;

/// Feeds offered before the user types anything
pub static SUGGESTED_FEEDS: Lazy<Vec<PriceFeed>> = Lazy::new(|| {
    vec![
        PriceFeed::new("SOL/USD", "Solana / US Dollar", "Solana"),
        PriceFeed::new("BTC/USD", "Bitcoin / US Dollar", "Bitcoin"),
        PriceFeed::new("SUI/USD", "SUI / US Dollar", "Sui"),
    ]
});

/// Turns a raw parallel-array payload into ordered price points
pub struct SeriesNormalizer;

impl SeriesNormalizer {
    pub fn normalize(series: &RawSeries) -> ChartResult<Vec<PricePoint>> {
        let n = series.len();
        if n == 0 {
            return Err(ChartError::EmptySeries);
        }

        for (channel, len) in
            [("o", series.o.len()), ("h", series.h.len()), ("l", series.l.len()), ("c", series.c.len())]
        {
            if len != n {
                return Err(ChartError::LengthMismatch { channel, expected: n, actual: len });
            }
        }
        // Volume is optional, but a partial channel is still a broken payload.
        if !series.v.is_empty() && series.v.len() != n {
            return Err(ChartError::LengthMismatch { channel: "v", expected: n, actual: series.v.len() });
        }

        let points = series
            .t
            .iter()
            .enumerate()
            .map(|(i, &seconds)| {
                let timestamp = u64::try_from(seconds)
                    .ok()
                    .and_then(Timestamp::from_unix_seconds)
                    .ok_or(ChartError::InvalidTimestamp { index: i, value: seconds })?;
                Ok(PricePoint::new(
                    timestamp,
                    OHLCV::new(
                        Price::new(series.o[i]),
                        Price::new(series.h[i]),
                        Price::new(series.l[i]),
                        Price::new(series.c[i]),
                        series.v.get(i).copied().map(Volume::new).unwrap_or_default(),
                    ),
                ))
            })
            .collect::<ChartResult<Vec<_>>>()?;

        log_trace!(LogComponent::Domain("SeriesNormalizer"), "normalized {} points", points.len());
        Ok(points)
    }
}

/// Bounds of the open/close channels across a series
pub struct RangeReducer;

impl RangeReducer {
    /// The line plots closes but is split on open/close, so both channels bound the axis.
    pub fn open_close_range(points: &[PricePoint]) -> ChartResult<(f64, f64)> {
        if points.is_empty() {
            return Err(ChartError::EmptySeries);
        }

        let (min, max) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
            (min.min(p.body_low()), max.max(p.body_high()))
        });
        Ok((min, max))
    }
}

/// Filtering for the ticker picker
pub struct PriceFeedSearch;

impl PriceFeedSearch {
    /// Empty query yields the suggestions, otherwise the first `limit` matches.
    pub fn filter(feeds: &[PriceFeed], query: &str, limit: usize) -> Vec<PriceFeed> {
        let query = query.trim();
        if query.is_empty() {
            return SUGGESTED_FEEDS.clone();
        }
        feeds.iter().filter(|feed| feed.matches(query)).take(limit).cloned().collect()
    }
}

pub fn normalize(series: &RawSeries) -> ChartResult<Vec<PricePoint>> {
    SeriesNormalizer::normalize(series)
}
