//! Named references to classes and interfaces.

use std::rc::Rc;

use phpclassbuilder_core::{
    Component, Error, Result, basename, is_qualified_name, qualify, trim_leading_separator,
};

/// A declaration that can be referred to by its qualified name.
pub trait Declaration {
    fn name(&self) -> Option<&str>;

    fn namespace(&self) -> Option<&str>;

    /// `Namespace\Name`, optionally with a leading `\`. `None` while unnamed.
    fn fully_qualified_name(&self, leading_slash: bool) -> Option<String> {
        let name = self.name()?;
        let qualified = qualify(self.namespace(), name);
        Some(if leading_slash {
            format!("\\{qualified}")
        } else {
            qualified
        })
    }

    /// `use Namespace\Name;`. `None` while unnamed.
    fn use_statement(&self) -> Option<String> {
        self.fully_qualified_name(false)
            .map(|fqn| format!("use {fqn};"))
    }
}

/// A parent class or interface: either a shared node or a raw qualified
/// name such as `\App\Model\Base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<T> {
    Node(Rc<T>),
    Name(String),
}

impl<T: Declaration> Reference<T> {
    /// Qualified name without a leading `\`. `None` for an unnamed node.
    pub fn fully_qualified_name(&self) -> Option<String> {
        match self {
            Self::Node(node) => node.fully_qualified_name(false),
            Self::Name(name) => Some(trim_leading_separator(name).to_string()),
        }
    }

    /// Last segment of the qualified name, as written in a declaration.
    pub fn short_name(&self) -> Option<String> {
        self.fully_qualified_name()
            .map(|fqn| basename(&fqn).to_string())
    }

    /// Resolve to a qualified name, rejecting unnamed nodes and malformed
    /// raw names on behalf of `component`.
    pub(crate) fn resolve(&self, component: Component) -> Result<String> {
        match self {
            Self::Node(node) => node
                .fully_qualified_name(false)
                .ok_or_else(|| Error::invalid_reference(component, "(unnamed node)")),
            Self::Name(name) => {
                if !is_qualified_name(name) {
                    return Err(Error::invalid_reference(component, name.as_str()));
                }
                Ok(trim_leading_separator(name).to_string())
            }
        }
    }
}

impl<T> From<Rc<T>> for Reference<T> {
    fn from(node: Rc<T>) -> Self {
        Self::Node(node)
    }
}

impl<T> From<&str> for Reference<T> {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl<T> From<String> for Reference<T> {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Stub {
        name: Option<&'static str>,
        namespace: Option<&'static str>,
    }

    impl Declaration for Stub {
        fn name(&self) -> Option<&str> {
            self.name
        }

        fn namespace(&self) -> Option<&str> {
            self.namespace
        }
    }

    #[test]
    fn test_node_fqn() {
        let stub = Stub {
            name: Some("User"),
            namespace: Some("App\\Model"),
        };
        assert_eq!(
            stub.fully_qualified_name(true).as_deref(),
            Some("\\App\\Model\\User")
        );
        assert_eq!(stub.use_statement().as_deref(), Some("use App\\Model\\User;"));

        let reference = Reference::from(Rc::new(stub));
        assert_eq!(reference.short_name().as_deref(), Some("User"));
        assert_eq!(
            reference.resolve(Component::ClassNode).unwrap(),
            "App\\Model\\User"
        );
    }

    #[test]
    fn test_raw_name_trims_leading_separator() {
        let reference: Reference<Stub> = "\\SplSubject".into();
        assert_eq!(reference.resolve(Component::ClassNode).unwrap(), "SplSubject");
        assert_eq!(reference.short_name().as_deref(), Some("SplSubject"));
    }

    #[test]
    fn test_unnamed_node_rejected() {
        let reference = Reference::from(Rc::new(Stub {
            name: None,
            namespace: None,
        }));
        assert_eq!(reference.fully_qualified_name(), None);
        let err = reference.resolve(Component::InterfaceNode).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference { component: Component::InterfaceNode, .. }
        ));
    }

    #[test]
    fn test_malformed_raw_names_rejected() {
        for raw in [
            "",
            "\\",
            "My Base",
            "Base\\",
            "42Base",
            "A\\\\Base",
            "\\\\A\\Base",
        ] {
            let reference: Reference<Stub> = raw.into();
            assert!(
                reference.resolve(Component::ClassNode).is_err(),
                "{raw:?} should be rejected"
            );
        }
    }
}
