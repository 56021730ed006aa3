// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod store;
pub mod processing;

// Public exports for external consumers
pub use crate::core::{BatchLimits, EntityKind, EntityRegistry, MemorySample, PageRange, DEFAULT_REGISTRY};
pub use crate::processing::batch::{
    chunk, effective_size, page_range, page_ranges, BatchSizeResolver, BatchSizeValidator,
    BatchSizer, SizeSource, SizerSettings,
};
pub use crate::processing::memory::{adjustment_factor, MemoryAdjuster, MemoryProbe, SystemMemoryProbe};
pub use crate::store::{ConfigStore, JsonFileStore, MemoryStore};
pub use crate::utils::{ConfigError, ProbeError, StoreError};
