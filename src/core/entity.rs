//! Entity kinds recognised by the sync pipeline.

use std::fmt;
use serde::{Deserialize, Serialize};

/// A category of record being synchronized.
///
/// The four known kinds carry their canonical (Spanish) identifiers. Any other
/// name is kept verbatim in [`EntityKind::Other`] so it still round-trips
/// through the default-bounds fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntityKind {
    Productos,
    Clientes,
    Pedidos,
    Precios,
    Other(String),
}

impl EntityKind {
    /// The entity historically hard-coded by the legacy override mechanism.
    pub const PRIMARY: EntityKind = EntityKind::Productos;

    /// Canonical identifier used for store keys and logs.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Productos => "productos",
            Self::Clientes => "clientes",
            Self::Pedidos => "pedidos",
            Self::Precios => "precios",
            Self::Other(name) => name,
        }
    }

    /// Maps a canonical identifier to its kind, without alias resolution.
    pub fn from_canonical(name: &str) -> Self {
        match name {
            "productos" => Self::Productos,
            "clientes" => Self::Clientes,
            "pedidos" => Self::Pedidos,
            "precios" => Self::Precios,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EntityKind> for String {
    fn from(kind: EntityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl From<String> for EntityKind {
    fn from(name: String) -> Self {
        Self::from_canonical(&name)
    }
}
