use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Value Object - display range of the price axis, `lower <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub lower: f64,
    pub upper: f64,
}

impl AxisDomain {
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Position of `value` inside the domain, 0.0 at `lower`, 1.0 at `upper`
    pub fn fraction(&self, value: f64) -> f64 {
        if self.span() == 0.0 {
            return 0.5;
        }
        (value - self.lower) / self.span()
    }
}

/// Value Object - trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    #[display(fmt = "up")]
    #[strum(serialize = "up")]
    Up,
    #[display(fmt = "down")]
    #[strum(serialize = "down")]
    Down,
}

impl TrendDirection {
    pub fn is_up(&self) -> bool {
        matches!(self, TrendDirection::Up)
    }

    /// Strict: a flat change is `Down`.
    pub fn from_change(percent_change: f64) -> Self {
        if percent_change > 0.0 { TrendDirection::Up } else { TrendDirection::Down }
    }
}

/// Value Object - percent change from the reference to the current value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendState {
    pub reference_value: f64,
    pub current_value: f64,
    pub percent_change: f64,
    pub direction: TrendDirection,
}

/// Value Object - stroke colors keyed by trend
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPalette {
    pub line: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

impl Default for TrendPalette {
    fn default() -> Self {
        Self { line: "hsl(var(--chart-1))", up: "hsl(var(--chart-2))", down: "hsl(var(--chart-5))" }
    }
}

impl TrendPalette {
    pub fn for_direction(&self, direction: TrendDirection) -> &'static str {
        match direction {
            TrendDirection::Up => self.up,
            TrendDirection::Down => self.down,
        }
    }
}
