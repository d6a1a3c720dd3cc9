use super::services::{AxisDomainCalculator, TrendEvaluator, split_offset_percent};
use super::value_objects::{AxisDomain, TrendState};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::market_data::{PricePoint, RangeReducer, RawSeries, SeriesNormalizer};
use serde::Serialize;

/// Number of X labels the tick interval aims for
pub const X_TICK_TARGET: usize = 5;

/// Everything one rendering pass needs, derived from a single payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub points: Vec<PricePoint>,
    pub min_value: f64,
    pub max_value: f64,
    pub domain: AxisDomain,
    pub reference_value: f64,
    pub last_value: f64,
}

impl ChartModel {
    /// normalize -> open/close range -> axis domain
    pub fn from_series(series: &RawSeries) -> ChartResult<Self> {
        let points = SeriesNormalizer::normalize(series)?;
        let (min_value, max_value) = RangeReducer::open_close_range(&points)?;
        let domain = AxisDomainCalculator::compute(min_value, max_value)?;

        let (reference_value, last_value) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.close(), last.close()),
            _ => return Err(ChartError::EmptySeries),
        };

        Ok(Self { points, min_value, max_value, domain, reference_value, last_value })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Trend of the last close against the first
    pub fn resting_trend(&self) -> ChartResult<TrendState> {
        TrendEvaluator::evaluate(self.reference_value, self.last_value)
    }

    pub fn split_offset(&self) -> f64 {
        split_offset_percent(self.reference_value, self.min_value, self.max_value)
    }

    /// The hover dot uses a non-strict comparison, unlike the trend readout.
    pub fn is_up_value(&self, value: f64) -> bool {
        value >= self.reference_value
    }

    /// Show a date label every `interval` points
    pub fn x_tick_interval(&self) -> usize {
        (self.points.len() / X_TICK_TARGET).max(1)
    }

    /// Index of the point nearest to a horizontal position in `[0, 1]`
    pub fn index_at(&self, fraction: f64) -> Option<usize> {
        let last = self.points.len().checked_sub(1)?;
        if !fraction.is_finite() {
            return None;
        }
        Some(((fraction.clamp(0.0, 1.0) * last as f64).round() as usize).min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_interval_never_drops_to_zero() {
        let series = RawSeries {
            t: vec![1, 2],
            o: vec![1.0, 2.0],
            h: vec![1.0, 2.0],
            l: vec![1.0, 2.0],
            c: vec![1.0, 2.0],
            ..Default::default()
        };
        let model = ChartModel::from_series(&series).unwrap();
        assert_eq!(model.x_tick_interval(), 1);
        assert_eq!(model.index_at(0.49), Some(0));
        assert_eq!(model.index_at(2.0), Some(1));
    }
}
