//! The generator's marker attributes.
//!
//! Markers are compared by fully-qualified attribute class name, exactly as a
//! semantic model reports it. The table is constant; unknown names simply match
//! no marker.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully-qualified name of the handler marker.
pub const HANDLER: &str = "UnityFastTools.UnityHandlerAttribute";
/// Fully-qualified name of the component accessor marker.
pub const COMPONENT_ACCESSOR: &str = "UnityFastTools.GetComponentAttribute";
/// Fully-qualified name of the cached field marker.
pub const CACHED_FIELD: &str = "UnityFastTools.GetComponentPropertyAttribute";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// Member must expose a readable getter.
    Handler,
    /// Member must expose a writable setter.
    ComponentAccessor,
    /// Field is shadowed by a generated cached property and must not be referenced.
    CachedField,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 3] = [
        MarkerKind::Handler,
        MarkerKind::ComponentAccessor,
        MarkerKind::CachedField,
    ];

    /// Canonical fully-qualified attribute class name.
    pub const fn qualified_name(self) -> &'static str {
        match self {
            MarkerKind::Handler => HANDLER,
            MarkerKind::ComponentAccessor => COMPONENT_ACCESSOR,
            MarkerKind::CachedField => CACHED_FIELD,
        }
    }

    /// Name as written in source, without namespace or `Attribute` suffix.
    pub const fn display_name(self) -> &'static str {
        match self {
            MarkerKind::Handler => "UnityHandler",
            MarkerKind::ComponentAccessor => "GetComponent",
            MarkerKind::CachedField => "GetComponentProperty",
        }
    }

    pub fn from_qualified_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.qualified_name() == name)
    }

    /// Whether a declaring type with a member carrying this marker must be `partial`.
    pub const fn requires_partial_type(self) -> bool {
        true
    }

    /// Accessor-shape markers are meaningless on parameterized indexers.
    pub const fn forbidden_on_indexer(self) -> bool {
        matches!(self, MarkerKind::Handler | MarkerKind::ComponentAccessor)
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
