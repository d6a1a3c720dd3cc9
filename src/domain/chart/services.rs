use super::value_objects::{AxisDomain, TrendDirection, TrendState};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::log_trace;

/// Share of the value used to pad a flat series
pub const FLAT_RANGE_PAD_RATIO: f64 = 0.01;

/// Rounds a raw (min, max) pair outward to the power-of-ten grid of its spread
pub struct AxisDomainCalculator;

impl AxisDomainCalculator {
    pub fn compute(min_value: f64, max_value: f64) -> ChartResult<AxisDomain> {
        if !min_value.is_finite() || !max_value.is_finite() {
            return Err(ChartError::InvalidRange { min: min_value, max: max_value });
        }

        let (min, max) =
            if min_value > max_value { (max_value, min_value) } else { (min_value, max_value) };

        let domain = if max - min == 0.0 {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * FLAT_RANGE_PAD_RATIO };
            let (lower, upper) = (min - pad, max + pad);
            if lower.is_finite() && upper.is_finite() {
                Self::round_outward(lower, upper)
            } else {
                AxisDomain { lower: min, upper: max }
            }
        } else {
            Self::round_outward(min, max)
        };

        log_trace!(
            LogComponent::Domain("AxisDomain"),
            "[{}, {}] -> [{}, {}]",
            min,
            max,
            domain.lower,
            domain.upper
        );
        Ok(domain)
    }

    /// Falls back to the unrounded pair whenever the grid is not representable.
    fn round_outward(min: f64, max: f64) -> AxisDomain {
        let raw = AxisDomain { lower: min, upper: max };
        let range = max - min;
        if !range.is_finite() || range <= 0.0 {
            return raw;
        }

        let exponent = range.log10().floor();
        let scale = 10f64.powi(exponent as i32);
        if !scale.is_finite() || scale <= 0.0 {
            return raw;
        }

        let mut lower = (min / scale).floor() * scale;
        let mut upper = (max / scale).ceil() * scale;
        // Division can land one ulp on the wrong side of a grid line.
        if lower > min {
            lower -= scale;
        }
        if upper < max {
            upper += scale;
        }

        if !lower.is_finite() || !upper.is_finite() || lower > min || upper < max {
            return raw;
        }
        AxisDomain { lower, upper }
    }
}

/// Percent change of a current value against a fixed reference
pub struct TrendEvaluator;

impl TrendEvaluator {
    pub fn evaluate(reference_value: f64, current_value: f64) -> ChartResult<TrendState> {
        if !reference_value.is_finite() {
            return Err(ChartError::NonFiniteValue { name: "reference value", value: reference_value });
        }
        if !current_value.is_finite() {
            return Err(ChartError::NonFiniteValue { name: "current value", value: current_value });
        }
        if reference_value == 0.0 {
            return Err(ChartError::DivisionByZero);
        }

        let percent_change = (current_value - reference_value) / reference_value * 100.0;
        if !percent_change.is_finite() {
            return Err(ChartError::NonFiniteValue { name: "percent change", value: percent_change });
        }

        Ok(TrendState {
            reference_value,
            current_value,
            percent_change,
            direction: TrendDirection::from_change(percent_change),
        })
    }
}

pub fn compute_axis_domain(min_value: f64, max_value: f64) -> ChartResult<AxisDomain> {
    AxisDomainCalculator::compute(min_value, max_value)
}

pub fn compute_trend(reference_value: f64, current_value: f64) -> ChartResult<TrendState> {
    TrendEvaluator::evaluate(reference_value, current_value)
}

/// Vertical stop (percent from the top) where the line switches from up to down color
pub fn split_offset_percent(reference_value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if !(span > 0.0) || !span.is_finite() {
        return 0.0;
    }
    (100.0 - (reference_value - min) / span * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_series_is_padded_around_the_value() {
        let domain = compute_axis_domain(100.0, 100.0).unwrap();
        assert_eq!(domain, AxisDomain { lower: 99.0, upper: 101.0 });

        let zero = compute_axis_domain(0.0, 0.0).unwrap();
        assert_eq!(zero, AxisDomain { lower: -1.0, upper: 1.0 });
    }

    #[test]
    fn overflowing_spread_falls_back_to_raw_bounds() {
        let domain = compute_axis_domain(-f64::MAX, f64::MAX).unwrap();
        assert_eq!(domain, AxisDomain { lower: -f64::MAX, upper: f64::MAX });
    }

    #[test]
    fn flat_series_at_the_edge_of_f64_stays_finite() {
        let domain = compute_axis_domain(f64::MAX, f64::MAX).unwrap();
        assert!(domain.lower.is_finite() && domain.upper.is_finite());
        assert!(domain.contains(f64::MAX));
    }

    #[test]
    fn non_finite_current_value_is_rejected() {
        assert!(matches!(
            compute_trend(100.0, f64::NAN),
            Err(ChartError::NonFiniteValue { name: "current value", .. })
        ));
    }

    #[test]
    fn split_offset_tracks_the_reference() {
        assert_eq!(split_offset_percent(9.0, 9.0, 15.0), 100.0);
        assert_eq!(split_offset_percent(15.0, 9.0, 15.0), 0.0);
        assert_eq!(split_offset_percent(12.0, 9.0, 15.0), 50.0);
        assert_eq!(split_offset_percent(5.0, 5.0, 5.0), 0.0);
    }
}
