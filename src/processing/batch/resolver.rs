use serde::Serialize;
use tracing::{debug, warn};
use crate::core::EntityKind;
use crate::processing::batch::validator::{coerce_size, BatchSizeValidator};
use crate::store::ConfigStore;

/// Where a resolved size came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    Override,
    Stored,
    Legacy,
    Default,
}

/// A resolved size together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub entity: EntityKind,
    pub size: i64,
    pub source: SizeSource,
}

/// Priority chain producing the batch size for an entity:
/// caller override, then the stored value, then the legacy primary-entity
/// shim, then the registry default. Every path goes through the validator.
pub struct BatchSizeResolver<S> {
    validator: BatchSizeValidator,
    store: S,
    key_prefix: String,
    legacy_batch_size: Option<i64>,
}

impl<S: ConfigStore> BatchSizeResolver<S> {
    pub fn new(validator: BatchSizeValidator, store: S, key_prefix: impl Into<String>) -> Self {
        Self {
            validator,
            store,
            key_prefix: key_prefix.into(),
            legacy_batch_size: None,
        }
    }

    /// Sets the old products-only override. Ignored for every other entity.
    pub fn with_legacy_batch_size(mut self, size: Option<i64>) -> Self {
        self.legacy_batch_size = size;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn validator(&self) -> &BatchSizeValidator {
        &self.validator
    }

    pub fn key_for(&self, name: &str) -> String {
        format!("{}{}", self.key_prefix, name)
    }

    /// Batch size to use for `entity`, always within its bounds.
    pub fn resolve(&self, entity: &str, override_size: Option<i64>) -> i64 {
        self.resolve_detailed(entity, override_size).size
    }

    pub fn resolve_detailed(&self, entity: &str, override_size: Option<i64>) -> Resolution {
        let kind = self.validator.registry().normalize(entity);
        let (candidate, source) = self.pick(&kind, override_size);
        let size = self.validator.clamp(kind.as_str(), candidate);
        debug!("Resolved batch size for {}: {} ({:?})", kind, size, source);
        Resolution { entity: kind, size, source }
    }

    fn pick(&self, kind: &EntityKind, override_size: Option<i64>) -> (i64, SizeSource) {
        if let Some(size) = override_size {
            return (size, SizeSource::Override);
        }
        if let Some(size) = self.stored_size(kind) {
            return (size, SizeSource::Stored);
        }
        if kind.is_primary() {
            if let Some(size) = self.legacy_batch_size {
                return (size, SizeSource::Legacy);
            }
        }
        (self.validator.registry().default_size(kind), SizeSource::Default)
    }

    /// Stored value for `kind` if it is readable and strictly positive.
    fn stored_size(&self, kind: &EntityKind) -> Option<i64> {
        let key = self.key_for(kind.as_str());
        match self.store.get(&key) {
            Ok(value) => value.map(|v| coerce_size(&v)).filter(|size| *size > 0),
            Err(e) => {
                warn!("Could not read {}: {}, ignoring stored value", key, e);
                None
            }
        }
    }

    /// Persists a validated size for `entity`.
    ///
    /// The primary entity is also mirrored under its legacy alias key for old
    /// readers. Returns whether the canonical write succeeded.
    pub fn set_batch_size(&self, entity: &str, value: i64) -> bool {
        let registry = self.validator.registry();
        let kind = registry.normalize(entity);
        let size = self.validator.clamp(kind.as_str(), value);
        let key = self.key_for(kind.as_str());

        if let Err(e) = self.store.set(&key, size) {
            warn!("Failed to store batch size for {}: {}", kind, e);
            return false;
        }
        debug!("Stored batch size {} under {}", size, key);

        if kind.is_primary() {
            if let Some(alias) = registry.legacy_alias(&kind) {
                let legacy_key = self.key_for(alias);
                if let Err(e) = self.store.set(&legacy_key, size) {
                    warn!("Failed to mirror batch size under {}: {}", legacy_key, e);
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{json, Value};
    use crate::store::MemoryStore;
    use crate::utils::{StoreError, StoreResult};

    fn resolver(entries: Vec<(&str, Value)>) -> BatchSizeResolver<MemoryStore> {
        BatchSizeResolver::new(
            BatchSizeValidator::default(),
            MemoryStore::with_entries(entries),
            "sync_batch_size_",
        )
    }

    struct BrokenStore;

    impl ConfigStore for BrokenStore {
        fn get(&self, _key: &str) -> StoreResult<Option<Value>> {
            Err(StoreError::Poisoned)
        }

        fn set(&self, key: &str, _value: i64) -> StoreResult<()> {
            Err(StoreError::Rejected(key.to_string()))
        }
    }

    /// Rejects writes to one key and delegates everything else.
    struct RejectKey {
        inner: MemoryStore,
        rejected: &'static str,
    }

    impl ConfigStore for RejectKey {
        fn get(&self, key: &str) -> StoreResult<Option<Value>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: i64) -> StoreResult<()> {
            if key == self.rejected {
                return Err(StoreError::Rejected(key.to_string()));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn override_is_normalized_and_clamped() {
        let r = resolver(vec![]);
        assert_eq!(
            r.resolve_detailed("products", Some(5000)),
            Resolution { entity: EntityKind::Productos, size: 200, source: SizeSource::Override }
        );
    }

    #[test]
    fn override_beats_stored_value() {
        let r = resolver(vec![("sync_batch_size_clientes", json!(80))]);
        assert_eq!(r.resolve("customers", Some(10)), 10);
        assert_eq!(r.resolve("customers", None), 80);
    }

    #[rstest]
    #[case(json!(0))]
    #[case(json!(-5))]
    #[case(json!("none"))]
    #[case(json!(null))]
    fn non_positive_stored_value_falls_through(#[case] stored: Value) {
        let r = resolver(vec![("sync_batch_size_pedidos", stored)]);
        assert_eq!(
            r.resolve_detailed("orders", None).source,
            SizeSource::Default
        );
        assert_eq!(r.resolve("orders", None), 50);
    }

    #[test]
    fn stored_string_value_is_coerced() {
        let r = resolver(vec![("sync_batch_size_precios", json!("350"))]);
        assert_eq!(r.resolve("prices", None), 350);
    }

    #[test]
    fn stored_value_is_clamped() {
        let r = resolver(vec![("sync_batch_size_pedidos", json!(900))]);
        assert_eq!(r.resolve("pedidos", None), 100);
    }

    #[test]
    fn legacy_override_only_applies_to_primary_entity() {
        let r = resolver(vec![]).with_legacy_batch_size(Some(120));
        assert_eq!(r.resolve_detailed("productos", None).source, SizeSource::Legacy);
        assert_eq!(r.resolve("products", None), 120);
        assert_eq!(r.resolve("clientes", None), 50);
    }

    #[test]
    fn stored_value_beats_legacy_override() {
        let r = resolver(vec![("sync_batch_size_productos", json!(70))])
            .with_legacy_batch_size(Some(120));
        assert_eq!(r.resolve("productos", None), 70);
    }

    #[test]
    fn legacy_override_is_clamped() {
        let r = resolver(vec![]).with_legacy_batch_size(Some(10_000));
        assert_eq!(r.resolve("productos", None), 200);
    }

    #[test]
    fn unknown_entity_uses_fallbacks() {
        let r = resolver(vec![]);
        assert_eq!(
            r.resolve_detailed("stock", None),
            Resolution {
                entity: EntityKind::Other("stock".into()),
                size: 20,
                source: SizeSource::Default,
            }
        );
        assert_eq!(r.resolve("stock", Some(999)), 200);
    }

    #[test]
    fn unreadable_store_falls_back_to_default() {
        let r = BatchSizeResolver::new(BatchSizeValidator::default(), BrokenStore, "p_");
        assert_eq!(r.resolve("clientes", None), 50);
        assert!(!r.set_batch_size("clientes", 10));
    }

    #[test]
    fn set_mirrors_primary_entity_under_legacy_key() {
        let store = Arc::new(MemoryStore::new());
        let r = BatchSizeResolver::new(BatchSizeValidator::default(), Arc::clone(&store), "sync_batch_size_");

        assert!(r.set_batch_size("products", 500));
        assert_eq!(store.get("sync_batch_size_productos").unwrap(), Some(json!(200)));
        assert_eq!(store.get("sync_batch_size_products").unwrap(), Some(json!(200)));
        assert_eq!(r.resolve("productos", None), 200);
    }

    #[test]
    fn failed_legacy_mirror_still_reports_success() {
        let store = RejectKey { inner: MemoryStore::new(), rejected: "sync_batch_size_products" };
        let r = BatchSizeResolver::new(BatchSizeValidator::default(), store, "sync_batch_size_");

        assert!(r.set_batch_size("products", 45));
        assert_eq!(r.store().get("sync_batch_size_productos").unwrap(), Some(json!(45)));
        assert_eq!(r.store().get("sync_batch_size_products").unwrap(), None);
        assert_eq!(r.resolve("productos", None), 45);
    }

    #[test]
    fn set_does_not_mirror_other_entities() {
        let store = Arc::new(MemoryStore::new());
        let r = BatchSizeResolver::new(BatchSizeValidator::default(), Arc::clone(&store), "sync_batch_size_");

        assert!(r.set_batch_size("orders", 0));
        assert_eq!(store.get("sync_batch_size_pedidos").unwrap(), Some(json!(1)));
        assert_eq!(store.get("sync_batch_size_orders").unwrap(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_write_reports_false() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes(true);
        let r = BatchSizeResolver::new(BatchSizeValidator::default(), Arc::clone(&store), "k_");
        assert!(!r.set_batch_size("productos", 30));
        assert!(store.is_empty());
    }
}
