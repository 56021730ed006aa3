use std::sync::Arc;
use serde_json::Value;
use tracing::debug;
use crate::core::{EntityRegistry, DEFAULT_REGISTRY};

/// Coerces loosely-typed size input to an integer.
///
/// Numbers truncate toward zero, numeric strings are parsed, booleans map to
/// 1/0. Anything else (null, arrays, objects, garbage text) becomes 0.
pub fn coerce_size(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Value::String(s) => parse_size(s),
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

/// Parses a textual size such as `"25"` or `" 12.9 "`. Non-numeric text is 0.
pub fn parse_size(text: &str) -> i64 {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().map(truncate))
        .unwrap_or(0)
}

// `as` saturates at the i64 range and maps NaN to 0.
fn truncate(v: f64) -> i64 {
    v.trunc() as i64
}

/// Clamps candidate sizes into the bounds registered for an entity.
///
/// Every size handed back to a caller passes through here.
#[derive(Debug, Clone)]
pub struct BatchSizeValidator {
    registry: Arc<EntityRegistry>,
}

impl Default for BatchSizeValidator {
    fn default() -> Self {
        Self::new(Arc::clone(&DEFAULT_REGISTRY))
    }
}

impl BatchSizeValidator {
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Clamps `candidate` into `[min, max]` for the normalized `entity`.
    pub fn clamp(&self, entity: &str, candidate: i64) -> i64 {
        let kind = self.registry.normalize(entity);
        let limits = self.registry.limits(&kind);
        let size = limits.clamp(candidate);
        if size != candidate {
            debug!(
                "Batch size {} for {} out of bounds [{}, {}], using {}",
                candidate, kind, limits.min, limits.max, size
            );
        }
        size
    }

    /// Like [`clamp`](Self::clamp) for untyped input; missing input counts as 0.
    pub fn clamp_value(&self, entity: &str, candidate: Option<&Value>) -> i64 {
        self.clamp(entity, candidate.map(coerce_size).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(42), 42)]
    #[case(json!(12.9), 12)]
    #[case(json!(-3.7), -3)]
    #[case(json!("25"), 25)]
    #[case(json!(" 7 "), 7)]
    #[case(json!("8.5"), 8)]
    #[case(json!("lots"), 0)]
    #[case(json!(true), 1)]
    #[case(json!(null), 0)]
    #[case(json!([1, 2]), 0)]
    #[case(json!({"size": 5}), 0)]
    fn coerces_loose_input(#[case] input: Value, #[case] expected: i64) {
        assert_eq!(coerce_size(&input), expected);
    }

    #[rstest]
    #[case("products", 5000, 200)]
    #[case("pedidos", 150, 100)]
    #[case("precios", 450, 450)]
    #[case("clientes", 0, 1)]
    #[case("clientes", -40, 1)]
    #[case("unknown", 999, 200)]
    fn clamps_into_entity_bounds(#[case] entity: &str, #[case] candidate: i64, #[case] expected: i64) {
        assert_eq!(BatchSizeValidator::default().clamp(entity, candidate), expected);
    }

    #[test]
    fn default_validator_shares_process_registry() {
        let validator = BatchSizeValidator::default();
        assert!(std::ptr::eq(validator.registry(), &**DEFAULT_REGISTRY));
    }

    #[test]
    fn malformed_or_missing_input_lands_on_min() {
        let validator = BatchSizeValidator::default();
        assert_eq!(validator.clamp_value("productos", Some(&json!("abc"))), 1);
        assert_eq!(validator.clamp_value("productos", None), 1);
    }

    #[test]
    fn clamp_is_monotonic_and_identity_inside_bounds() {
        let validator = BatchSizeValidator::default();
        let mut previous = i64::MIN;
        for candidate in -10..=600 {
            let size = validator.clamp("precios", candidate);
            assert!(size >= previous);
            if (1..=500).contains(&candidate) {
                assert_eq!(size, candidate);
            }
            previous = size;
        }
    }
}
