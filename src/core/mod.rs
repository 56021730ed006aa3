//! Core value types and the entity catalog.
//!
//! - [`EntityKind`]: canonical identity of a synchronized record type
//! - [`EntityRegistry`]: aliases, default sizes and bounds per kind
//! - [`BatchLimits`], [`MemorySample`], [`PageRange`]: values passed between components

mod entity;
mod registry;
mod types;

pub use entity::EntityKind;
pub use registry::{EntityProfile, EntityRegistry, DEFAULT_REGISTRY, FALLBACK_DEFAULT_SIZE};
pub use types::{BatchLimits, MemorySample, PageRange};
