use serde::Serialize;
use tracing::{debug, warn};
use crate::core::MemorySample;
use crate::processing::batch::BatchSizeValidator;
use crate::processing::memory::MemoryProbe;

/// Memory-pressure band, evaluated top-down on the usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureTier {
    /// Above 80%
    Critical,
    /// Above 60%
    High,
    /// Above 40%
    Moderate,
    /// Above 20%
    Low,
    /// 20% or less
    VeryLow,
}

impl PressureTier {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            Self::Critical
        } else if percent > 60.0 {
            Self::High
        } else if percent > 40.0 {
            Self::Moderate
        } else if percent > 20.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            Self::Critical => 0.2,
            Self::High => 0.5,
            Self::Moderate => 1.0,
            Self::Low => 1.5,
            Self::VeryLow => 2.0,
        }
    }
}

/// Multiplier applied to a base batch size at the given memory usage.
pub fn adjustment_factor(percent: f64) -> f64 {
    PressureTier::from_percent(percent).factor()
}

/// Scales batch sizes by memory pressure.
///
/// Telemetry failures only disable the adjustment: the validated base size is
/// returned and the failure is logged.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdjuster {
    validator: BatchSizeValidator,
}

impl MemoryAdjuster {
    pub fn new(validator: BatchSizeValidator) -> Self {
        Self { validator }
    }

    /// Probes memory and scales `base` for `entity`.
    ///
    /// With `respect_user_limit` the result never exceeds `base`; the adjuster
    /// may only shrink below what the user configured.
    pub fn optimize(
        &self,
        base: i64,
        entity: &str,
        probe: Option<&dyn MemoryProbe>,
        respect_user_limit: bool,
    ) -> i64 {
        let sample = match probe.map(|p| p.probe()) {
            Some(Ok(sample)) => Some(sample),
            Some(Err(e)) => {
                warn!("Memory probe failed, keeping batch size {} for {}: {}", base, entity, e);
                None
            }
            None => None,
        };
        self.optimize_with_sample(base, entity, sample.as_ref(), respect_user_limit)
    }

    /// Same as [`optimize`](Self::optimize) with a sample collected by the caller.
    pub fn optimize_with_sample(
        &self,
        base: i64,
        entity: &str,
        sample: Option<&MemorySample>,
        respect_user_limit: bool,
    ) -> i64 {
        let sample = match sample {
            Some(s) if s.is_usable() => s,
            Some(s) => {
                warn!("Ignoring malformed memory sample {:?} for {}", s, entity);
                return self.validator.clamp(entity, base);
            }
            None => return self.validator.clamp(entity, base),
        };

        let tier = PressureTier::from_percent(sample.percent);
        let mut candidate = ((base as f64 * tier.factor()).floor() as i64).max(1);
        if respect_user_limit && candidate > base {
            candidate = base;
        }
        let size = self.validator.clamp(entity, candidate);

        debug!(
            "Memory at {:.1}% ({:?}), batch size for {}: {} -> {}",
            sample.percent, tier, entity, base, size
        );
        size
    }
}
