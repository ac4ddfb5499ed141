//! Variables, class properties and function parameters.

use phpclassbuilder_core::{
    CompileTarget, Component, Error, NameKind, RenderOptions, Result, Scope, is_valid_identifier,
};

use crate::{CodeBuilder, CommentNode, Template};

/// Leading spaces a variable renders at when no indent is given.
pub const DEFAULT_VARIABLE_INDENT: usize = 8;

/// Declared type used when none is set.
pub const DEFAULT_PHP_TYPE: &str = "mixed";

/// A PHP variable.
///
/// The same node renders as a bare `$name;` statement, a class property or
/// an inline function parameter, selected with [`CompileTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNode {
    name: Option<String>,
    scope: Scope,
    is_static: bool,
    collection: bool,
    php_type: String,
    default_value: Option<String>,
    requires_getter: bool,
    requires_setter: bool,
    doc: CommentNode,
}

impl Default for VariableNode {
    fn default() -> Self {
        Self {
            name: None,
            scope: Scope::Public,
            is_static: false,
            collection: false,
            php_type: DEFAULT_PHP_TYPE.to_string(),
            default_value: None,
            requires_getter: true,
            requires_setter: true,
            doc: CommentNode::new(),
        }
    }
}

impl VariableNode {
    /// Create a variable, validating its name.
    pub fn new(name: &str) -> Result<Self> {
        let mut variable = Self::default();
        variable.set_name(name)?;
        Ok(variable)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name. An invalid name is rejected and the old one kept.
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_name(
                Component::VariableNode,
                NameKind::Variable,
                name,
            ));
        }
        self.name = Some(name.to_string());
        Ok(self)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Mark the variable as holding a list of `php_type`. Only affects the
    /// type annotation.
    pub fn with_collection(mut self, collection: bool) -> Self {
        self.collection = collection;
        self
    }

    pub fn php_type(&self) -> &str {
        &self.php_type
    }

    pub fn with_php_type(mut self, php_type: impl Into<String>) -> Self {
        self.php_type = php_type.into();
        self
    }

    /// Source text of the default value, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn with_default_value(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    pub fn requires_getter(&self) -> bool {
        self.requires_getter
    }

    pub fn with_requires_getter(mut self, requires: bool) -> Self {
        self.requires_getter = requires;
        self
    }

    pub fn requires_setter(&self) -> bool {
        self.requires_setter
    }

    pub fn with_requires_setter(mut self, requires: bool) -> Self {
        self.requires_setter = requires;
        self
    }

    pub fn doc(&self) -> &CommentNode {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut CommentNode {
        &mut self.doc
    }

    pub fn with_doc(mut self, doc: CommentNode) -> Self {
        self.doc = doc;
        self
    }

    /// `@var <type>[]`
    pub fn property_annotation(&self) -> String {
        format!("@var {}{}", self.php_type, self.collection_suffix())
    }

    /// `@param <type>[] $<name>`
    pub fn parameter_annotation(&self) -> Result<String> {
        let name = self.require_name()?;
        Ok(format!(
            "@param {}{} ${name}",
            self.php_type,
            self.collection_suffix()
        ))
    }

    pub(crate) fn require_name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| {
            Error::missing_name(
                Component::VariableNode,
                "variable name must be set before compiling",
            )
        })
    }

    fn collection_suffix(&self) -> &'static str {
        if self.collection { "[]" } else { "" }
    }

    /// The doc comment with a `@var` annotation added unless one is present.
    fn annotated_doc(&self) -> CommentNode {
        let mut doc = self.doc.clone();
        doc.ensure_annotation("@var", self.property_annotation());
        doc
    }

    fn default_clause(&self, opts: &RenderOptions) -> String {
        match (&self.default_value, opts.include_default_value()) {
            (Some(default), true) => format!(" = {default}"),
            _ => String::new(),
        }
    }

    fn compile_declaration(&self, keywords: &str, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        let indent = opts.indent_or(DEFAULT_VARIABLE_INDENT);
        let mut out = String::new();

        if opts.include_comment() {
            let doc_opts = RenderOptions::new().with_indent(indent);
            out.push_str(&self.annotated_doc().compile(&doc_opts)?);
        }

        let mut builder = CodeBuilder::with_base(indent);
        builder.push_line(&format!(
            "{keywords}${name}{};",
            self.default_clause(opts)
        ));
        out.push_str(&builder.build());
        Ok(out)
    }

    fn compile_parameter(&self, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        Ok(format!("${name}{}", self.default_clause(opts)))
    }

    fn property_keywords(&self) -> String {
        if self.is_static {
            format!("{} static ", self.scope)
        } else {
            format!("{} ", self.scope)
        }
    }
}

impl Template for VariableNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        match opts.target_or(CompileTarget::Variable) {
            CompileTarget::Variable => self.compile_declaration("", opts),
            CompileTarget::Property => self.compile_declaration(&self.property_keywords(), opts),
            CompileTarget::Parameter => self.compile_parameter(opts),
            other => Err(Error::invalid_option(
                Component::VariableNode,
                "target",
                "variable, property or parameter",
                other.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_variable_defaults() {
        let var = VariableNode::new("testvar").unwrap();
        assert_eq!(
            var.render().unwrap(),
            "        /**\n         * @var mixed\n         */\n        $testvar;\n"
        );
    }

    #[test]
    fn test_invalid_name_keeps_previous() {
        let mut var = VariableNode::new("good").unwrap();
        let err = var.set_name("haha nope").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidName { kind: NameKind::Variable, ref value, .. } if value == "haha nope"
        ));
        assert_eq!(var.name(), Some("good"));
    }

    #[test]
    fn test_missing_name() {
        let var = VariableNode::default();
        let err = var.render().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingName { component: Component::VariableNode, .. }
        ));
    }

    #[test]
    fn test_property_mode() {
        let var = VariableNode::new("count")
            .unwrap()
            .with_scope(Scope::Protected)
            .with_static(true)
            .with_php_type("int")
            .with_default_value("0");
        let opts = RenderOptions::new()
            .with_target(CompileTarget::Property)
            .with_indent(4);
        assert_eq!(
            var.compile(&opts).unwrap(),
            "    /**\n     * @var int\n     */\n    protected static $count = 0;\n"
        );
    }

    #[test]
    fn test_property_without_comment_or_default() {
        let var = VariableNode::new("items")
            .unwrap()
            .with_default_value("[]");
        let opts = RenderOptions::new()
            .with_target(CompileTarget::Property)
            .with_include_comment(false)
            .with_include_default_value(false);
        assert_eq!(var.compile(&opts).unwrap(), "        public $items;\n");
    }

    #[test]
    fn test_parameter_mode() {
        let var = VariableNode::new("limit")
            .unwrap()
            .with_default_value("10");
        let opts = RenderOptions::new().with_target(CompileTarget::Parameter);
        assert_eq!(var.compile(&opts).unwrap(), "$limit = 10");

        let opts = opts.with_include_default_value(false);
        assert_eq!(var.compile(&opts).unwrap(), "$limit");
    }

    #[test]
    fn test_collection_annotation() {
        let var = VariableNode::new("names")
            .unwrap()
            .with_php_type("string")
            .with_collection(true);
        assert_eq!(var.property_annotation(), "@var string[]");
        assert_eq!(var.parameter_annotation().unwrap(), "@param string[] $names");
    }

    #[test]
    fn test_caller_annotation_wins() {
        let mut var = VariableNode::new("testvar").unwrap();
        var.doc_mut().add_line("@var string");
        let out = var.render().unwrap();
        assert!(out.contains("@var string"));
        assert!(!out.contains("@var mixed"));
    }

    #[test]
    fn test_render_does_not_grow_doc() {
        let var = VariableNode::new("testvar").unwrap();
        let first = var.render().unwrap();
        let second = var.render().unwrap();
        assert_eq!(first, second);
        assert!(var.doc().is_empty());
        assert_eq!(first.matches("@var").count(), 1);
    }

    #[test]
    fn test_function_target_rejected() {
        let var = VariableNode::new("x").unwrap();
        let opts = RenderOptions::new().with_target(CompileTarget::Method);
        let err = var.compile(&opts).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOption { option: "target", ref value, .. } if value == "method"
        ));
    }

    #[test]
    fn test_accessor_metadata_defaults() {
        let var = VariableNode::new("x").unwrap();
        assert!(var.requires_getter());
        assert!(var.requires_setter());
        let var = var.with_requires_getter(false);
        assert!(!var.requires_getter());
    }
}
