//! First-to-last trend of a yearly series.

use serde::{Deserialize, Serialize};

use crate::core::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
    Flat,
}

impl TrendDirection {
    pub fn classify(percent: f64) -> Self {
        if percent > 0.0 {
            Self::Rising
        } else if percent < 0.0 {
            Self::Falling
        } else {
            Self::Flat
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// `(last - first) / first * 100`
    pub percent: f64,
    pub direction: TrendDirection,
}

impl Trend {
    /// Percentage change from `first` to `last`. A zero or non-finite baseline
    /// has no meaningful percentage and is rejected.
    pub fn between(first: f64, last: f64) -> Result<Self> {
        if !first.is_finite() || !last.is_finite() {
            return Err(DashboardError::data("trend endpoints must be finite"));
        }
        if first == 0.0 {
            return Err(DashboardError::data(
                "trend undefined: first value of the series is zero",
            ));
        }
        let percent = (last - first) / first * 100.0;
        Ok(Self {
            percent,
            direction: TrendDirection::classify(percent),
        })
    }

    /// Trend over a whole series (first vs last element).
    pub fn of_series(values: &[f64]) -> Result<Self> {
        match (values.first(), values.last()) {
            (Some(first), Some(last)) => Self::between(*first, *last),
            _ => Err(DashboardError::data("trend undefined: empty series")),
        }
    }
}
