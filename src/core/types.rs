//! Value types shared by the sizing components.

use serde::{Deserialize, Serialize};

/// Inclusive batch-size bounds for one entity kind. Always `1 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLimits {
    pub min: i64,
    pub max: i64,
}

impl BatchLimits {
    /// Bounds applied to entity kinds the registry does not know.
    pub const FALLBACK: BatchLimits = BatchLimits { min: 1, max: 200 };

    /// Builds bounds, repairing inverted or non-positive input so the
    /// invariant holds.
    pub fn new(min: i64, max: i64) -> Self {
        let min = min.max(1);
        Self { min, max: max.max(min) }
    }

    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// One reading from a memory telemetry probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorySample {
    /// Usage as a percentage of the limit. May exceed 100.
    pub percent: f64,
    pub current_mb: f64,
    pub limit_mb: f64,
}

impl MemorySample {
    /// Builds a sample from raw usage; the percentage is derived.
    pub fn from_usage(current_mb: f64, limit_mb: f64) -> Self {
        let percent = if limit_mb > 0.0 {
            current_mb / limit_mb * 100.0
        } else {
            f64::NAN
        };
        Self { percent, current_mb, limit_mb }
    }

    /// Only a finite, non-negative percentage can drive an adjustment.
    pub fn is_usable(&self) -> bool {
        self.percent.is_finite() && self.percent >= 0.0
    }
}

/// Inclusive 1-based item range for a paginated remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u64,
    pub end: u64,
}
