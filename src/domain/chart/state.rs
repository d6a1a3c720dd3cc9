use super::services::TrendEvaluator;
use super::value_objects::TrendState;
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::market_data::PricePoint;

/// Phase of the pointer interaction with one rendered chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    /// No series loaded yet
    Idle,
    /// Reference fixed, readout shows the last close
    Loaded,
    /// Pointer over the chart, readout follows the hovered value
    Hovering,
}

/// Hover and trend state for one rendering pass.
///
/// Owned by the chart view and shared by reference with the readouts that
/// depend on it; only pointer handlers mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendTracker {
    phase: HoverPhase,
    reference_value: f64,
    last_value: f64,
    hovered_value: Option<f64>,
}

impl Default for TrendTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendTracker {
    pub fn new() -> Self {
        Self { phase: HoverPhase::Idle, reference_value: 0.0, last_value: 0.0, hovered_value: None }
    }

    /// Fixes the reference to the first close and the resting value to the last close.
    pub fn load(&mut self, points: &[PricePoint]) -> ChartResult<()> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (first.close(), last.close()),
            _ => return Err(ChartError::EmptySeries),
        };
        self.reference_value = first;
        self.last_value = last;
        self.hovered_value = None;
        self.phase = HoverPhase::Loaded;
        Ok(())
    }

    pub fn pointer_enter(&mut self) {
        if self.phase == HoverPhase::Loaded {
            self.phase = HoverPhase::Hovering;
        }
    }

    /// Ignored unless hovering.
    pub fn pointer_move(&mut self, value: f64) {
        if self.phase == HoverPhase::Hovering {
            self.hovered_value = Some(value);
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.phase == HoverPhase::Hovering {
            self.phase = HoverPhase::Loaded;
            self.hovered_value = None;
        }
    }

    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    pub fn is_hovering(&self) -> bool {
        self.phase == HoverPhase::Hovering
    }

    pub fn reference_value(&self) -> f64 {
        self.reference_value
    }

    /// Hovered value while hovering (falling back to the last close before the first move)
    pub fn current_value(&self) -> f64 {
        match self.phase {
            HoverPhase::Hovering => self.hovered_value.unwrap_or(self.last_value),
            _ => self.last_value,
        }
    }

    pub fn trend(&self) -> ChartResult<TrendState> {
        if self.phase == HoverPhase::Idle {
            return Err(ChartError::EmptySeries);
        }
        TrendEvaluator::evaluate(self.reference_value, self.current_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market_data::{OHLCV, Price, Timestamp, Volume};

    fn point(close: f64) -> PricePoint {
        PricePoint::new(
            Timestamp::from_millis(0),
            OHLCV::new(
                Price::from(close),
                Price::from(close),
                Price::from(close),
                Price::from(close),
                Volume::from(0.0),
            ),
        )
    }

    #[test]
    fn idle_tracker_has_no_trend() {
        let tracker = TrendTracker::new();
        assert_eq!(tracker.trend(), Err(ChartError::EmptySeries));
    }

    #[test]
    fn moves_outside_hover_are_ignored() {
        let mut tracker = TrendTracker::new();
        tracker.load(&[point(100.0), point(120.0)]).unwrap();
        tracker.pointer_move(50.0);
        assert_eq!(tracker.current_value(), 120.0);
    }
}
