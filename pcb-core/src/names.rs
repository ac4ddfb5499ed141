//! Identifier and namespace validation for generated PHP.
//!
//! PHP matches names byte-wise against `[a-zA-Z_\x7f-\xff]`, which means any
//! non-ASCII UTF-8 sequence is accepted. The patterns below express the same
//! rule over `char`s.

use std::sync::LazyLock;

use regex::Regex;

/// Separator between namespace segments.
pub const NAMESPACE_SEPARATOR: char = '\\';

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_\x{7f}-\x{10FFFF}][a-zA-Z0-9_\x{7f}-\x{10FFFF}]*$")
        .expect("identifier pattern is valid")
});

static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_\x{7f}-\x{10FFFF}\\][a-zA-Z0-9_\x{7f}-\x{10FFFF}\\]*$")
        .expect("namespace pattern is valid")
});

/// Check whether `name` is a legal variable, function, class or interface name.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Check whether `name` is a legal namespace path (segments joined by `\`,
/// optionally starting with one).
pub fn is_valid_namespace(name: &str) -> bool {
    NAMESPACE.is_match(name)
}

/// Check whether `name` is a usable qualified name: an optional leading `\`
/// followed by one or more identifiers joined by single `\`s.
pub fn is_qualified_name(name: &str) -> bool {
    let name = name.strip_prefix(NAMESPACE_SEPARATOR).unwrap_or(name);
    name.split(NAMESPACE_SEPARATOR).all(is_valid_identifier)
}

/// Strip a leading `\` from a qualified name.
pub fn trim_leading_separator(name: &str) -> &str {
    name.trim_start_matches(NAMESPACE_SEPARATOR)
}

/// The last segment of a qualified name (`App\Model\User` -> `User`).
pub fn basename(name: &str) -> &str {
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => &name[idx + NAMESPACE_SEPARATOR.len_utf8()..],
        None => name,
    }
}

/// Everything before the last segment, without a leading `\`
/// (`\App\Model\User` -> `App\Model`, `User` -> ``).
pub fn namespace_of(name: &str) -> &str {
    let name = trim_leading_separator(name);
    match name.rfind(NAMESPACE_SEPARATOR) {
        Some(idx) => &name[..idx],
        None => "",
    }
}

/// Join a namespace and a name into a qualified name.
pub fn qualify(namespace: Option<&str>, name: &str) -> String {
    match namespace.map(trim_leading_separator) {
        Some(ns) if !ns.is_empty() => format!("{ns}{NAMESPACE_SEPARATOR}{name}"),
        _ => name.to_string(),
    }
}
