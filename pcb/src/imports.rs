//! `use` statement computation for classes and interfaces.

use std::collections::BTreeMap;

use phpclassbuilder_core::{
    Component, Error, Result, basename, namespace_of, qualify, trim_leading_separator,
};

/// Names a declaration in `namespace` called `name` must import.
///
/// Each referenced name is counted once, sorted lexicographically, and
/// dropped when it is the declaration itself or already lives in the
/// declaration's namespace.
///
/// ```
/// use phpclassbuilder::collect_imports;
///
/// let imports = collect_imports(
///     Some("App\\Model"),
///     "User",
///     ["App\\Model\\Base", "\\JsonSerializable", "Vendor\\Auth\\Identity"],
/// );
/// assert_eq!(imports, ["JsonSerializable", "Vendor\\Auth\\Identity"]);
/// ```
pub fn collect_imports<I, S>(namespace: Option<&str>, name: &str, referenced: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let own_namespace = namespace.map(trim_leading_separator).unwrap_or_default();
    let own_fqn = qualify(namespace, name);

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for fqn in referenced {
        let fqn = trim_leading_separator(fqn.as_ref());
        *counts.entry(fqn.to_string()).or_default() += 1;
    }

    counts
        .into_keys()
        .filter(|fqn| *fqn != own_fqn && namespace_of(fqn) != own_namespace)
        .collect()
}

/// Reject references that would be written with the same short name as
/// each other, or as the declaration itself, while naming different types.
/// PHP compares class names case-insensitively.
pub(crate) fn check_short_names<S: AsRef<str>>(
    component: Component,
    namespace: Option<&str>,
    name: &str,
    referenced: &[S],
) -> Result<()> {
    let own_fqn = qualify(namespace, name);
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    seen.insert(name.to_ascii_lowercase(), own_fqn.clone());

    for fqn in referenced {
        let fqn = trim_leading_separator(fqn.as_ref());
        if fqn == own_fqn {
            continue;
        }
        let short = basename(fqn).to_ascii_lowercase();
        match seen.get(&short) {
            Some(existing) if existing != fqn => {
                return Err(Error::invalid_reference(component, fqn));
            }
            Some(_) => {}
            None => {
                seen.insert(short, fqn.to_string());
            }
        }
    }
    Ok(())
}

/// One `use X;` line per import, in order.
pub fn render_use_statements(imports: &[String]) -> String {
    imports
        .iter()
        .map(|fqn| format!("use {fqn};\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_collision() {
        let err = check_short_names(
            Component::ClassNode,
            Some("App"),
            "Foo",
            &["A\\Base", "B\\Base"],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference { component: Component::ClassNode, ref value } if value == "B\\Base"
        ));
    }

    #[test]
    fn test_short_name_matches_own_name() {
        let err = check_short_names(Component::InterfaceNode, Some("App"), "Foo", &["Lib\\foo"])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));
    }

    #[test]
    fn test_repeated_reference_is_not_a_collision() {
        assert!(
            check_short_names(
                Component::ClassNode,
                None,
                "Foo",
                &["\\Lib\\Base", "Lib\\Base", "Countable"],
            )
            .is_ok()
        );
    }

    #[test]
    fn test_dedup_and_sort() {
        let imports = collect_imports(
            Some("App"),
            "Foo",
            ["Lib\\Zeta", "Lib\\Alpha", "Lib\\Zeta", "\\Lib\\Alpha"],
        );
        assert_eq!(imports, ["Lib\\Alpha", "Lib\\Zeta"]);
    }

    #[test]
    fn test_self_reference_excluded() {
        let imports = collect_imports(Some("App"), "Foo", ["App\\Foo"]);
        assert!(imports.is_empty());

        let imports = collect_imports(None, "Foo", ["\\Foo"]);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_same_namespace_excluded() {
        let imports = collect_imports(
            Some("App\\Model"),
            "User",
            ["App\\Model\\Base", "App\\Base"],
        );
        assert_eq!(imports, ["App\\Base"]);
    }

    #[test]
    fn test_global_names_without_namespace() {
        let imports = collect_imports(None, "Foo", ["Countable", "Lib\\Bar"]);
        assert_eq!(imports, ["Lib\\Bar"]);
    }

    #[test]
    fn test_render_use_statements() {
        let imports = vec!["Lib\\Alpha".to_string(), "Lib\\Zeta".to_string()];
        assert_eq!(
            render_use_statements(&imports),
            "use Lib\\Alpha;\nuse Lib\\Zeta;\n"
        );
        assert_eq!(render_use_statements(&[]), "");
    }
}
