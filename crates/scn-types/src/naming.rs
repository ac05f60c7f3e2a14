//! Singular/plural type-name helpers.
//!
//! Documents may declare a type under its plural (`persons`) while handlers
//! and references use the singular (`person`).

/// Strip one trailing `suffix` from `name`.
///
/// A name that consists only of the suffix, or does not end with it, is
/// returned unchanged.
pub fn singularize<'a>(name: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return name;
    }
    match name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// Append `suffix` to `name`.
pub fn pluralize(name: &str, suffix: &str) -> String {
    format!("{name}{suffix}")
}
