//! Rule descriptors: codes, messages, categories.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    CachedFieldUsage,
    PartialRequirement,
    IndexerMarker,
    HandlerAccessor,
    AccessorSetter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Usage,
    Design,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Usage => write!(f, "Usage"),
            Category::Design => write!(f, "Design"),
        }
    }
}

/// Every rule is an error; there is no lower level to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

impl RuleId {
    pub const ALL: [RuleId; 5] = [
        RuleId::CachedFieldUsage,
        RuleId::PartialRequirement,
        RuleId::IndexerMarker,
        RuleId::HandlerAccessor,
        RuleId::AccessorSetter,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RuleId::CachedFieldUsage => "UFT0001",
            RuleId::PartialRequirement => "UFT0002",
            RuleId::IndexerMarker => "UFT0003",
            RuleId::HandlerAccessor => "UFT0004",
            RuleId::AccessorSetter => "UFT0005",
        }
    }

    /// Case-insensitive lookup by code (`UFT0002`, `uft0002`).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn name(self) -> &'static str {
        match self {
            RuleId::CachedFieldUsage => "cached-field-usage",
            RuleId::PartialRequirement => "partial-requirement",
            RuleId::IndexerMarker => "indexer-marker",
            RuleId::HandlerAccessor => "handler-accessor",
            RuleId::AccessorSetter => "accessor-setter",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            RuleId::CachedFieldUsage => "GetComponentProperty field usage detected",
            RuleId::PartialRequirement => "Class should be partial",
            RuleId::IndexerMarker => "Indexer should not have specific attributes",
            RuleId::HandlerAccessor => {
                "Property with [UnityHandler] attribute should have a get accessor"
            }
            RuleId::AccessorSetter => "Property with [GetComponent] attribute should have a setter",
        }
    }

    pub fn message_format(self) -> &'static str {
        match self {
            RuleId::CachedFieldUsage => {
                "Field '{0}' with [GetComponentProperty] should not be used outside its declaration. Use cached property instead."
            }
            RuleId::PartialRequirement => "Class '{0}' should be partial",
            RuleId::IndexerMarker => "Indexer '{0}' should not have '{1}' attribute",
            RuleId::HandlerAccessor => {
                "Property '{0}' with [UnityHandler] attribute should have a get accessor"
            }
            RuleId::AccessorSetter => {
                "Property '{0}' with [GetComponent] attribute should have a setter"
            }
        }
    }

    pub fn category(self) -> Category {
        match self {
            RuleId::CachedFieldUsage => Category::Usage,
            _ => Category::Design,
        }
    }

    pub fn severity(self) -> Severity {
        Severity::Error
    }

    /// Longer explanation shown by `marklint explain`.
    pub fn summary(self) -> &'static str {
        match self {
            RuleId::CachedFieldUsage => {
                "The generator emits a cached property for every field marked \
                 [GetComponentProperty]. Reading or writing the field directly bypasses \
                 the cache; reference the generated Cached* property instead."
            }
            RuleId::PartialRequirement => {
                "Generated members are emitted into a second declaration of the same \
                 type, so any class or struct with a marked field or property must be \
                 declared partial."
            }
            RuleId::IndexerMarker => {
                "[UnityHandler] and [GetComponent] constrain accessor shape and only \
                 apply to simple properties; indexers cannot carry them."
            }
            RuleId::HandlerAccessor => {
                "A [UnityHandler] property is read by generated code and needs a get \
                 accessor or an expression body."
            }
            RuleId::AccessorSetter => {
                "A [GetComponent] property is assigned by generated code and needs a set \
                 accessor. An init accessor does not qualify."
            }
        }
    }

    /// Title (and equivalence key) of the mechanical fix, if the rule has one.
    pub fn fix_title(self) -> Option<&'static str> {
        match self {
            RuleId::CachedFieldUsage => Some("Replace field usage with property"),
            RuleId::PartialRequirement => Some("Make type partial"),
            _ => None,
        }
    }

    /// Substitute `{0}`, `{1}`, ... with positional arguments.
    pub fn format_message(self, args: &[String]) -> String {
        let mut message = self.message_format().to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
