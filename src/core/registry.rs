//! Static catalog of entity kinds with their aliases, defaults and bounds.

use std::sync::Arc;
use lazy_static::lazy_static;
use serde::Serialize;
use crate::core::{BatchLimits, EntityKind};

/// Default batch size for entity kinds the registry does not know.
pub const FALLBACK_DEFAULT_SIZE: i64 = 20;

lazy_static! {
    /// Process-wide registry built from the standard entity table; share it
    /// with `Arc::clone`.
    pub static ref DEFAULT_REGISTRY: Arc<EntityRegistry> = Arc::new(EntityRegistry::default());
}

/// Sizing profile for one entity kind.
#[derive(Debug, Clone, Serialize)]
pub struct EntityProfile {
    pub kind: EntityKind,
    pub aliases: Vec<String>,
    pub default_size: i64,
    pub limits: BatchLimits,
}

impl EntityProfile {
    fn new(kind: EntityKind, aliases: &[&str], default_size: i64, min: i64, max: i64) -> Self {
        Self {
            kind,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            default_size,
            limits: BatchLimits::new(min, max),
        }
    }

    fn answers_to(&self, name: &str) -> bool {
        self.kind.as_str() == name || self.aliases.iter().any(|a| a == name)
    }
}

/// Immutable catalog consulted by the validator and resolver.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRegistry {
    profiles: Vec<EntityProfile>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::with_profiles(vec![
            EntityProfile::new(EntityKind::Productos, &["products"], 20, 1, 200),
            EntityProfile::new(EntityKind::Clientes, &["customers"], 50, 1, 200),
            EntityProfile::new(EntityKind::Pedidos, &["orders"], 50, 1, 100),
            EntityProfile::new(EntityKind::Precios, &["prices"], 20, 1, 500),
        ])
    }
}

impl EntityRegistry {
    pub fn with_profiles(profiles: Vec<EntityProfile>) -> Self {
        Self { profiles }
    }

    /// Resolves a name or alias to its canonical kind.
    ///
    /// Names that match nothing are returned unchanged as [`EntityKind::Other`].
    /// Matching is exact, so normalizing an already-canonical name is a no-op.
    pub fn normalize(&self, name: &str) -> EntityKind {
        self.profiles
            .iter()
            .find(|p| p.answers_to(name))
            .map(|p| p.kind.clone())
            .unwrap_or_else(|| EntityKind::Other(name.to_string()))
    }

    pub fn profile(&self, kind: &EntityKind) -> Option<&EntityProfile> {
        self.profiles.iter().find(|p| &p.kind == kind)
    }

    pub fn limits(&self, kind: &EntityKind) -> BatchLimits {
        self.profile(kind).map(|p| p.limits).unwrap_or(BatchLimits::FALLBACK)
    }

    pub fn default_size(&self, kind: &EntityKind) -> i64 {
        self.profile(kind)
            .map(|p| p.default_size)
            .unwrap_or(FALLBACK_DEFAULT_SIZE)
    }

    /// First alias registered for a kind, used for backward-compatible keys.
    pub fn legacy_alias(&self, kind: &EntityKind) -> Option<&str> {
        self.profile(kind)
            .and_then(|p| p.aliases.first())
            .map(String::as_str)
    }

    pub fn profiles(&self) -> &[EntityProfile] {
        &self.profiles
    }
}
