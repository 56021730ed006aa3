mod adjuster;
mod probe;

pub use adjuster::{adjustment_factor, MemoryAdjuster, PressureTier};
pub use probe::{FixedProbe, MemoryProbe, SystemMemoryProbe};
