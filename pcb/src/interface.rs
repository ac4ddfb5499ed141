//! Interface declarations.

use indexmap::IndexMap;
use phpclassbuilder_core::{
    Component, Error, NameKind, RenderOptions, Result, is_valid_identifier,
    trim_leading_separator,
};

use crate::{
    CommentNode, Declaration, FileNode, FunctionNode, Reference, Template,
    class::{MEMBER_INDENT, close_body, reject_target},
    file::{open_tag, set_valid_namespace},
    imports::{check_short_names, collect_imports, render_use_statements},
};

/// A PHP interface. Every function it declares is public.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceNode {
    name: Option<String>,
    namespace: Option<String>,
    parents: IndexMap<String, Reference<InterfaceNode>>,
    functions: IndexMap<String, FunctionNode>,
    doc: CommentNode,
}

impl Declaration for InterfaceNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl InterfaceNode {
    pub fn new(name: &str) -> Result<Self> {
        let mut interface = Self::default();
        interface.set_name(name)?;
        Ok(interface)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_name(
                Component::InterfaceNode,
                NameKind::Interface,
                name,
            ));
        }
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn set_namespace(&mut self, namespace: &str) -> Result<&mut Self> {
        set_valid_namespace(&mut self.namespace, namespace, Component::InterfaceNode)?;
        Ok(self)
    }

    pub fn parents(&self) -> impl Iterator<Item = &Reference<InterfaceNode>> {
        self.parents.values()
    }

    /// Extend another interface. A referenced node must already be named.
    pub fn add_parent(&mut self, parent: impl Into<Reference<InterfaceNode>>) -> Result<&mut Self> {
        let parent = parent.into();
        let fqn = parent.resolve(Component::InterfaceNode)?;
        self.parents.insert(fqn, parent);
        Ok(self)
    }

    pub fn has_parent(&self, fqn: &str) -> bool {
        self.parents.contains_key(trim_leading_separator(fqn))
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionNode> {
        self.functions.values()
    }

    /// Declare a function. Only named, public functions are accepted; a
    /// rejected function leaves the interface unchanged.
    pub fn add_function(&mut self, function: FunctionNode) -> Result<&mut Self> {
        let name = function.name().ok_or_else(|| {
            Error::missing_name(
                Component::InterfaceNode,
                "interface functions must have a name prior to adding them",
            )
        })?;

        if !function.scope().is_public() {
            return Err(Error::InterfaceFunctionScope {
                function: name.to_string(),
                scope: function.scope(),
            });
        }

        self.functions.insert(name.to_string(), function);
        Ok(self)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionNode> {
        self.functions.get(name)
    }

    pub fn doc(&self) -> &CommentNode {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut CommentNode {
        &mut self.doc
    }

    pub fn set_doc(&mut self, doc: CommentNode) -> &mut Self {
        self.doc = doc;
        self
    }

    /// Qualified names this interface must import, sorted.
    pub fn imports(&self) -> Result<Vec<String>> {
        let name = self.require_name()?;
        let referenced = self
            .parents
            .values()
            .map(|parent| parent.resolve(Component::InterfaceNode))
            .collect::<Result<Vec<_>>>()?;
        check_short_names(Component::InterfaceNode, self.namespace(), name, &referenced)?;
        Ok(collect_imports(self.namespace(), name, referenced))
    }

    /// Wrap this interface in a file of its own.
    pub fn into_file(self) -> FileNode {
        FileNode::from(self)
    }

    fn require_name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| {
            Error::missing_name(
                Component::InterfaceNode,
                "interface name must be set before compiling",
            )
        })
    }
}

impl Template for InterfaceNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        reject_target(opts, Component::InterfaceNode)?;

        let imports = self.imports()?;
        tracing::trace!(interface = name, imports = imports.len(), "compiling interface");

        let mut out = String::new();
        if !opts.embedded_in_file() {
            out.push_str(&open_tag(self.namespace()));
        }
        if !imports.is_empty() {
            out.push_str(&render_use_statements(&imports));
            out.push('\n');
        }
        if opts.include_comment() {
            out.push_str(&self.doc.compile(&RenderOptions::new().with_indent(0))?);
        }

        out.push_str("interface ");
        out.push_str(name);
        let extended: Vec<String> = self
            .parents
            .values()
            .filter_map(Reference::short_name)
            .collect();
        if !extended.is_empty() {
            out.push_str(" extends ");
            out.push_str(&extended.join(", "));
        }
        out.push_str("\n{\n");

        let mut body = String::new();
        for function in self.functions.values() {
            body.push_str(&function.compile_signature(MEMBER_INDENT, opts)?);
        }
        out.push_str(&close_body(&body));
        Ok(out)
    }
}
