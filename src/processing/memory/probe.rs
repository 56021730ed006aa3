//! Memory telemetry sources.

use sysinfo::{Pid, System};
use tracing::debug;
use crate::core::MemorySample;
use crate::utils::{ProbeError, ProbeResult};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Single-method capability supplying the current memory pressure.
pub trait MemoryProbe {
    fn probe(&self) -> ProbeResult<MemorySample>;
}

impl<F> MemoryProbe for F
where
    F: Fn() -> ProbeResult<MemorySample>,
{
    fn probe(&self) -> ProbeResult<MemorySample> {
        self()
    }
}

/// Probe that always returns the same reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub MemorySample);

impl FixedProbe {
    pub fn percent(percent: f64) -> Self {
        Self(MemorySample { percent, current_mb: 0.0, limit_mb: 0.0 })
    }
}

impl MemoryProbe for FixedProbe {
    fn probe(&self) -> ProbeResult<MemorySample> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    System,
    Process { limit_bytes: Option<u64> },
}

/// Reads memory counters from the operating system.
#[derive(Debug, Clone, Copy)]
pub struct SystemMemoryProbe {
    scope: Scope,
}

impl SystemMemoryProbe {
    /// Pressure of the whole machine: used over total memory.
    pub fn system() -> Self {
        Self { scope: Scope::System }
    }

    /// Pressure of this process: resident memory over `limit_bytes`,
    /// or over total system memory when there is no limit.
    pub fn process(limit_bytes: Option<u64>) -> Self {
        Self { scope: Scope::Process { limit_bytes } }
    }

    fn sample(current: u64, limit: u64) -> ProbeResult<MemorySample> {
        if limit == 0 {
            return Err(ProbeError::malformed("memory limit reported as zero"));
        }
        Ok(MemorySample::from_usage(
            current as f64 / BYTES_PER_MB,
            limit as f64 / BYTES_PER_MB,
        ))
    }
}

impl MemoryProbe for SystemMemoryProbe {
    fn probe(&self) -> ProbeResult<MemorySample> {
        let mut sys = System::new();
        sys.refresh_memory();

        let sample = match self.scope {
            Scope::System => Self::sample(sys.used_memory(), sys.total_memory())?,
            Scope::Process { limit_bytes } => {
                let pid: Pid = sysinfo::get_current_pid().map_err(ProbeError::unavailable)?;
                if !sys.refresh_process(pid) {
                    return Err(ProbeError::unavailable(format!("process {} not found", pid)));
                }
                let resident = sys
                    .process(pid)
                    .map(|p| p.memory())
                    .ok_or_else(|| ProbeError::unavailable(format!("process {} not found", pid)))?;
                Self::sample(resident, limit_bytes.unwrap_or_else(|| sys.total_memory()))?
            }
        };

        debug!(
            "Memory sample - Current: {:.0}MB, Limit: {:.0}MB, Usage: {:.1}%",
            sample.current_mb, sample.limit_mb, sample.percent
        );
        Ok(sample)
    }
}
