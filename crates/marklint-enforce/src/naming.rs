//! Field-to-property naming convention of the code generator.
//!
//! Detection hints and the field-usage fix both go through
//! [`cached_property_name`], so the suggested identifier always matches what
//! the generator emits.

/// Prefix the generator puts on every cached property.
pub const CACHED_PREFIX: &str = "Cached";

/// Conventional field prefixes, longest first.
const FIELD_PREFIXES: [&str; 2] = ["m_", "_"];

/// Property stem for a field: conventional prefix stripped, first letter
/// upper-cased. A name that is nothing but a prefix is kept as written.
pub fn property_name_from_field(field: &str) -> String {
    let stem = FIELD_PREFIXES
        .iter()
        .find_map(|prefix| field.strip_prefix(prefix))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(field);

    let mut chars = stem.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the generated cached property for a field.
pub fn cached_property_name(field: &str) -> String {
    format!("{CACHED_PREFIX}{}", property_name_from_field(field))
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;
