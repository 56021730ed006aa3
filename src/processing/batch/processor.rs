use std::sync::Arc;
use tracing::{debug, info};
use crate::core::{EntityRegistry, PageRange, DEFAULT_REGISTRY};
use crate::processing::batch::config::SizerSettings;
use crate::processing::batch::range::{page_range, page_ranges, PageRanges};
use crate::processing::batch::resolver::{BatchSizeResolver, Resolution};
use crate::processing::batch::validator::BatchSizeValidator;
use crate::processing::memory::{MemoryAdjuster, MemoryProbe};
use crate::store::ConfigStore;

/// Entry point for the sync pipeline: one object answering every
/// batch-sizing question for a given store and settings.
pub struct BatchSizer<S> {
    resolver: BatchSizeResolver<S>,
    adjuster: MemoryAdjuster,
    respect_user_limit: bool,
}

impl<S: ConfigStore> BatchSizer<S> {
    /// Creates a sizer over the standard entity table.
    pub fn new(store: S, settings: &SizerSettings) -> Self {
        Self::with_registry(Arc::clone(&DEFAULT_REGISTRY), store, settings)
    }

    pub fn with_registry(registry: Arc<EntityRegistry>, store: S, settings: &SizerSettings) -> Self {
        let validator = BatchSizeValidator::new(registry);
        debug!(
            "Creating BatchSizer (prefix: {}, legacy size: {:?}, respect user limit: {})",
            settings.key_prefix, settings.legacy_batch_size, settings.respect_user_limit
        );
        Self {
            resolver: BatchSizeResolver::new(validator.clone(), store, settings.key_prefix.clone())
                .with_legacy_batch_size(settings.legacy_batch_size),
            adjuster: MemoryAdjuster::new(validator),
            respect_user_limit: settings.respect_user_limit,
        }
    }

    pub fn resolver(&self) -> &BatchSizeResolver<S> {
        &self.resolver
    }

    pub fn adjuster(&self) -> &MemoryAdjuster {
        &self.adjuster
    }

    /// Configured batch size, without memory adjustment.
    pub fn batch_size(&self, entity: &str, override_size: Option<i64>) -> i64 {
        self.resolver.resolve(entity, override_size)
    }

    pub fn explain(&self, entity: &str, override_size: Option<i64>) -> Resolution {
        self.resolver.resolve_detailed(entity, override_size)
    }

    /// Configured batch size scaled by current memory pressure.
    pub fn adaptive_batch_size(
        &self,
        entity: &str,
        override_size: Option<i64>,
        probe: Option<&dyn MemoryProbe>,
    ) -> i64 {
        let base = self.resolver.resolve(entity, override_size);
        self.adjuster.optimize(base, entity, probe, self.respect_user_limit)
    }

    pub fn set_batch_size(&self, entity: &str, value: i64) -> bool {
        self.resolver.set_batch_size(entity, value)
    }

    /// Page ranges for fetching `total` records of `entity` at its resolved size.
    pub fn plan(&self, entity: &str, total: u64, override_size: Option<i64>) -> PageRanges {
        let size = self.batch_size(entity, override_size);
        let ranges = page_ranges(total, size as u64);
        info!(
            "Planning {} {} records in {} batches of {}",
            total, entity, ranges.len(), size
        );
        ranges
    }

    /// First page of `entity` starting at `start_index`.
    pub fn next_range(&self, entity: &str, start_index: u64, override_size: Option<i64>) -> PageRange {
        page_range(start_index, self.batch_size(entity, override_size) as u64)
    }
}
