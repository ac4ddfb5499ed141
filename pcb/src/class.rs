//! Class declarations.

use indexmap::IndexMap;
use phpclassbuilder_core::{
    CompileTarget, Component, Error, NameKind, RenderOptions, Result, is_valid_identifier,
    trim_leading_separator,
};

use crate::{
    CommentNode, Declaration, FileNode, FunctionNode, InterfaceNode, Reference, Template,
    VariableNode,
    file::{open_tag, set_valid_namespace},
    imports::{check_short_names, collect_imports, render_use_statements},
};

/// Leading spaces for properties and methods inside a structure body.
pub(crate) const MEMBER_INDENT: usize = 4;

/// A PHP class.
///
/// Rendered standalone, a class carries its own `<?php` header. Inside a
/// [`FileNode`] the file supplies the header instead.
///
/// ```
/// use phpclassbuilder::{ClassNode, Template};
///
/// let class = ClassNode::new("Foo").unwrap();
/// assert_eq!(class.render().unwrap(), "<?php\n\nclass Foo\n{\n\n}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNode {
    name: Option<String>,
    namespace: Option<String>,
    is_abstract: bool,
    parent: Option<Reference<ClassNode>>,
    interfaces: IndexMap<String, Reference<InterfaceNode>>,
    properties: IndexMap<String, VariableNode>,
    functions: IndexMap<String, FunctionNode>,
    doc: CommentNode,
}

impl Declaration for ClassNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}

impl ClassNode {
    pub fn new(name: &str) -> Result<Self> {
        let mut class = Self::default();
        class.set_name(name)?;
        Ok(class)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name. An invalid name is rejected and the old one kept.
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_name(
                Component::ClassNode,
                NameKind::Class,
                name,
            ));
        }
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Set the namespace. A leading `\` is dropped.
    pub fn set_namespace(&mut self, namespace: &str) -> Result<&mut Self> {
        set_valid_namespace(&mut self.namespace, namespace, Component::ClassNode)?;
        Ok(self)
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn set_abstract(&mut self, is_abstract: bool) -> &mut Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn mark_abstract(&mut self) -> &mut Self {
        self.set_abstract(true)
    }

    pub fn parent(&self) -> Option<&Reference<ClassNode>> {
        self.parent.as_ref()
    }

    /// Set the parent class, by shared node or by qualified name.
    pub fn set_parent(&mut self, parent: impl Into<Reference<ClassNode>>) -> Result<&mut Self> {
        let parent = parent.into();
        parent.resolve(Component::ClassNode)?;
        self.parent = Some(parent);
        Ok(self)
    }

    pub fn clear_parent(&mut self) -> &mut Self {
        self.parent = None;
        self
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &Reference<InterfaceNode>> {
        self.interfaces.values()
    }

    /// Implement an interface. Interfaces are keyed by qualified name, so
    /// adding the same one twice keeps a single entry.
    pub fn add_interface(
        &mut self,
        interface: impl Into<Reference<InterfaceNode>>,
    ) -> Result<&mut Self> {
        let interface = interface.into();
        let fqn = interface.resolve(Component::ClassNode)?;
        self.interfaces.insert(fqn, interface);
        Ok(self)
    }

    /// Whether the interface with this qualified name is implemented.
    pub fn has_interface(&self, fqn: &str) -> bool {
        self.interfaces.contains_key(trim_leading_separator(fqn))
    }

    pub fn properties(&self) -> impl Iterator<Item = &VariableNode> {
        self.properties.values()
    }

    /// Add a property, replacing any existing one with the same name.
    pub fn add_property(&mut self, property: VariableNode) -> Result<&mut Self> {
        let name = property
            .name()
            .ok_or_else(|| {
                Error::missing_name(
                    Component::ClassNode,
                    "class properties must have a name prior to adding them",
                )
            })?
            .to_string();
        self.properties.insert(name, property);
        Ok(self)
    }

    /// Add a new public `mixed` property and return it for configuration.
    pub fn create_property(&mut self, name: &str) -> Result<&mut VariableNode> {
        let (idx, _) = self
            .properties
            .insert_full(name.to_string(), VariableNode::new(name)?);
        Ok(&mut self.properties[idx])
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn property(&self, name: &str) -> Option<&VariableNode> {
        self.properties.get(name)
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut VariableNode> {
        self.properties.get_mut(name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionNode> {
        self.functions.values()
    }

    /// Add a method, replacing any existing one with the same name.
    pub fn add_function(&mut self, function: FunctionNode) -> Result<&mut Self> {
        let name = function
            .name()
            .ok_or_else(|| {
                Error::missing_name(
                    Component::ClassNode,
                    "class functions must have a name prior to adding them",
                )
            })?
            .to_string();
        self.functions.insert(name, function);
        Ok(self)
    }

    /// Add a new public method and return it for configuration.
    pub fn create_function(&mut self, name: &str) -> Result<&mut FunctionNode> {
        let (idx, _) = self
            .functions
            .insert_full(name.to_string(), FunctionNode::new(name)?);
        Ok(&mut self.functions[idx])
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionNode> {
        self.functions.get(name)
    }

    pub fn function_mut(&mut self, name: &str) -> Option<&mut FunctionNode> {
        self.functions.get_mut(name)
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

    /// Qualified names this class must import, sorted.
    pub fn imports(&self) -> Result<Vec<String>> {
        let name = self.require_name()?;
        let mut referenced = Vec::with_capacity(self.interfaces.len() + 1);
        if let Some(parent) = &self.parent {
            referenced.push(parent.resolve(Component::ClassNode)?);
        }
        for interface in self.interfaces.values() {
            referenced.push(interface.resolve(Component::ClassNode)?);
        }
        check_short_names(Component::ClassNode, self.namespace(), name, &referenced)?;
        Ok(collect_imports(self.namespace(), name, referenced))
    }

    /// Wrap this class in a file of its own.
    pub fn into_file(self) -> FileNode {
        FileNode::from(self)
    }

    fn require_name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| {
            Error::missing_name(
                Component::ClassNode,
                "class name must be set before compiling",
            )
        })
    }

    fn declaration(&self, name: &str) -> String {
        let mut line = String::new();
        if self.is_abstract {
            line.push_str("abstract ");
        }
        line.push_str("class ");
        line.push_str(name);

        if let Some(short) = self.parent.as_ref().and_then(Reference::short_name) {
            line.push_str(" extends ");
            line.push_str(&short);
        }

        let implemented: Vec<String> = self
            .interfaces
            .values()
            .filter_map(Reference::short_name)
            .collect();
        if !implemented.is_empty() {
            line.push_str(" implements ");
            line.push_str(&implemented.join(", "));
        }

        line
    }

    fn compile_body(&self, opts: &RenderOptions) -> Result<String> {
        let property_opts = member_options(opts, CompileTarget::Property);
        let method_opts = member_options(opts, CompileTarget::Method);

        let mut body = String::new();
        for property in self.properties.values() {
            body.push_str(&property.compile(&property_opts)?);
        }
        if !self.properties.is_empty() && !self.functions.is_empty() {
            body.push('\n');
        }
        for function in self.functions.values() {
            body.push_str(&function.compile(&method_opts)?);
        }
        Ok(body)
    }
}

impl Template for ClassNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        reject_target(opts, Component::ClassNode)?;

        let imports = self.imports()?;
        tracing::trace!(class = name, imports = imports.len(), "compiling class");

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
        out.push_str(&self.declaration(name));
        out.push_str("\n{\n");
        out.push_str(&close_body(&self.compile_body(opts)?));
        Ok(out)
    }
}

/// Options for a member rendered inside a structure body.
pub(crate) fn member_options(opts: &RenderOptions, target: CompileTarget) -> RenderOptions {
    RenderOptions {
        target: Some(target),
        indent: Some(MEMBER_INDENT),
        include_comment: opts.include_comment,
        include_default_value: opts.include_default_value,
        include_body: opts.include_body,
        embedded_in_file: None,
        emit_when_empty: None,
    }
}

/// Structures render in a single mode.
pub(crate) fn reject_target(opts: &RenderOptions, component: Component) -> Result<()> {
    match opts.target {
        Some(target) => Err(Error::invalid_option(
            component,
            "target",
            "no target, structures have a single render mode",
            target.to_string(),
        )),
        None => Ok(()),
    }
}

/// Close a structure body: an empty body keeps one blank line, otherwise
/// trailing newlines are folded into the closing brace.
pub(crate) fn close_body(body: &str) -> String {
    if body.is_empty() {
        "\n}".to_string()
    } else {
        format!("{}\n}}", body.trim_end_matches('\n'))
    }
}
