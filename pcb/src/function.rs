//! Free functions and class methods.

use indexmap::IndexMap;
use phpclassbuilder_core::{
    CompileTarget, Component, Error, NameKind, RenderOptions, Result, Scope, describe_value,
    is_valid_identifier,
};

use crate::{CodeBuilder, CommentNode, Template, VariableNode};

/// A PHP function or method.
///
/// Parameters keep declaration order; adding a parameter whose name is
/// already present replaces it in place.
///
/// ```
/// use phpclassbuilder::{FunctionNode, Template};
///
/// let mut hello = FunctionNode::new("hello").unwrap().with_return_type("int");
/// hello.add_body_part("$x = 1;").set_return_statement("$x");
/// assert_eq!(
///     hello.render().unwrap(),
///     "/**\n * @return int\n */\nfunction hello()\n{\n    $x = 1;\n    return $x;\n\n}\n\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionNode {
    name: Option<String>,
    scope: Scope,
    is_static: bool,
    is_abstract: bool,
    parameters: IndexMap<String, VariableNode>,
    body: Vec<String>,
    return_type: Option<String>,
    return_statement: Option<String>,
    doc: CommentNode,
}

impl FunctionNode {
    /// Create a public function, validating its name.
    pub fn new(name: &str) -> Result<Self> {
        let mut function = Self::default();
        function.set_name(name)?;
        Ok(function)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name. An invalid name is rejected and the old one kept.
    pub fn set_name(&mut self, name: &str) -> Result<&mut Self> {
        if !is_valid_identifier(name) {
            return Err(Error::invalid_name(
                Component::FunctionNode,
                NameKind::Function,
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

    pub fn set_scope(&mut self, scope: Scope) -> &mut Self {
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

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Abstract methods render as a stub without a body.
    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn return_statement(&self) -> Option<&str> {
        self.return_statement.as_deref()
    }

    /// Expression emitted as `return <expr>;` after the body.
    pub fn set_return_statement(&mut self, expr: impl Into<String>) -> &mut Self {
        self.return_statement = Some(expr.into());
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

    pub fn parameters(&self) -> impl Iterator<Item = &VariableNode> {
        self.parameters.values()
    }

    /// Add a parameter, replacing any existing one with the same name.
    pub fn add_parameter(&mut self, parameter: VariableNode) -> Result<&mut Self> {
        let name = parameter
            .name()
            .ok_or_else(|| {
                Error::missing_name(
                    Component::FunctionNode,
                    "function parameters must have a name prior to adding them",
                )
            })?
            .to_string();
        self.parameters.insert(name, parameter);
        Ok(self)
    }

    /// Add a new `mixed` parameter and return it for further configuration.
    pub fn create_parameter(&mut self, name: &str) -> Result<&mut VariableNode> {
        let parameter = VariableNode::new(name)?;
        let (idx, _) = self.parameters.insert_full(name.to_string(), parameter);
        Ok(&mut self.parameters[idx])
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&VariableNode> {
        self.parameters.get(name)
    }

    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut VariableNode> {
        self.parameters.get_mut(name)
    }

    pub fn body_parts(&self) -> &[String] {
        &self.body
    }

    /// Append one body statement. Statements are emitted verbatim.
    pub fn add_body_part(&mut self, part: impl Into<String>) -> &mut Self {
        self.body.push(part.into());
        self
    }

    /// Replace the body.
    pub fn set_body_parts<I, S>(&mut self, parts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = parts.into_iter().map(Into::into).collect();
        self
    }

    /// Append a loosely typed body statement. Only strings are accepted.
    pub fn add_body_value(&mut self, value: &toml::Value) -> Result<&mut Self> {
        match value.as_str() {
            Some(part) => Ok(self.add_body_part(part)),
            None => Err(Error::InvalidBodyPart {
                component: Component::FunctionNode,
                value: describe_value(value),
            }),
        }
    }

    pub(crate) fn require_name(&self) -> Result<&str> {
        self.name.as_deref().ok_or_else(|| {
            Error::missing_name(
                Component::FunctionNode,
                "function name must be set before compiling",
            )
        })
    }

    /// Render as a signature-only declaration, ignoring the abstract flag.
    pub(crate) fn compile_signature(&self, indent: usize, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        let mut out = self.compile_doc(indent, opts)?;

        let mut builder = CodeBuilder::with_base(indent);
        builder
            .push_line(&format!(
                "{}function {name}({});",
                self.method_keywords(),
                self.compile_parameters(opts)?
            ))
            .push_blank();
        out.push_str(&builder.build());
        Ok(out)
    }

    /// The doc comment with `@param` and `@return` annotations added for
    /// anything the caller left undocumented.
    fn annotated_doc(&self) -> Result<CommentNode> {
        let mut doc = self.doc.clone();

        for parameter in self.parameters.values() {
            let name = parameter.require_name()?;
            if !documents_parameter(&doc, name) {
                doc.add_line(parameter.parameter_annotation()?);
            }
        }

        if let Some(return_type) = &self.return_type {
            doc.ensure_annotation("@return", format!("@return {return_type}"));
        }

        Ok(doc)
    }

    fn compile_doc(&self, indent: usize, opts: &RenderOptions) -> Result<String> {
        if !opts.include_comment() {
            return Ok(String::new());
        }
        self.annotated_doc()?
            .compile(&RenderOptions::new().with_indent(indent))
    }

    fn compile_parameters(&self, opts: &RenderOptions) -> Result<String> {
        let param_opts = RenderOptions::new()
            .with_target(CompileTarget::Parameter)
            .with_include_default_value(opts.include_default_value());

        let params = self
            .parameters
            .values()
            .map(|p| p.compile(&param_opts))
            .collect::<Result<Vec<_>>>()?;
        Ok(params.join(", "))
    }

    fn method_keywords(&self) -> String {
        if self.is_static {
            format!("{} static ", self.scope)
        } else {
            format!("{} ", self.scope)
        }
    }
}

impl Template for FunctionNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        let name = self.require_name()?;
        let target = opts.target_or(CompileTarget::Function);
        let keywords = match target {
            CompileTarget::Function => String::new(),
            CompileTarget::Method => self.method_keywords(),
            other => {
                return Err(Error::invalid_option(
                    Component::FunctionNode,
                    "target",
                    "function or method",
                    other.to_string(),
                ));
            }
        };

        let indent = opts.indent_or(0);
        let mut out = self.compile_doc(indent, opts)?;
        let signature = format!(
            "{keywords}function {name}({})",
            self.compile_parameters(opts)?
        );

        let mut builder = CodeBuilder::with_base(indent);
        if target == CompileTarget::Method && self.is_abstract {
            builder
                .push_line(&format!("abstract {signature};"))
                .push_blank();
        } else if !opts.include_body() {
            builder.push_line(&format!("{signature};")).push_blank();
        } else {
            builder.push_line(&signature).push_line("{").push_indent();
            for part in &self.body {
                builder.push_line(part);
            }
            if let Some(expr) = &self.return_statement {
                builder.push_line(&format!("return {expr};"));
            }
            builder.push_dedent().push_blank().push_line("}").push_blank();
        }

        out.push_str(&builder.build());
        Ok(out)
    }
}

/// Whether an `@param` line already names `$name`.
fn documents_parameter(doc: &CommentNode, name: &str) -> bool {
    let token = format!("${name}");
    doc.lines().iter().any(|line| {
        let line = line.trim_start();
        line.starts_with("@param") && line.split_whitespace().any(|word| word == token)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello() -> FunctionNode {
        let mut function = FunctionNode::new("hello").unwrap().with_return_type("int");
        function.add_body_part("$x = 1;").set_return_statement("$x");
        function
    }

    #[test]
    fn test_free_function() {
        assert_eq!(
            hello().render().unwrap(),
            "/**\n * @return int\n */\nfunction hello()\n{\n    $x = 1;\n    return $x;\n\n}\n\n"
        );
    }

    #[test]
    fn test_invalid_name() {
        let err = FunctionNode::new("1-2-iloveyou").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidName { kind: NameKind::Function, .. }
        ));
    }

    #[test]
    fn test_missing_name() {
        let err = FunctionNode::default().render().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingName { component: Component::FunctionNode, .. }
        ));
    }

    #[test]
    fn test_method_with_parameters() {
        let mut method = FunctionNode::new("find")
            .unwrap()
            .with_scope(Scope::Protected)
            .with_static(true);
        method.create_parameter("id").unwrap();
        method
            .add_parameter(
                VariableNode::new("limit")
                    .unwrap()
                    .with_php_type("int")
                    .with_default_value("10"),
            )
            .unwrap();
        method.add_body_part("return null;");

        let opts = RenderOptions::new()
            .with_target(CompileTarget::Method)
            .with_indent(4);
        assert_eq!(
            method.compile(&opts).unwrap(),
            "    /**\n     * @param mixed $id\n     * @param int $limit\n     */\n    protected static function find($id, $limit = 10)\n    {\n        return null;\n\n    }\n\n"
        );
    }

    #[test]
    fn test_abstract_method_ignores_body() {
        let mut method = FunctionNode::new("run").unwrap().with_abstract(true);
        method.add_body_part("echo 'never';");
        let opts = RenderOptions::new()
            .with_target(CompileTarget::Method)
            .with_include_comment(false)
            .with_include_body(true);
        assert_eq!(method.compile(&opts).unwrap(), "abstract public function run();\n\n");
    }

    #[test]
    fn test_abstract_free_function_keeps_body() {
        let function = FunctionNode::new("run").unwrap().with_abstract(true);
        assert_eq!(function.render().unwrap(), "function run()\n{\n\n}\n\n");
    }

    #[test]
    fn test_signature_only() {
        let opts = RenderOptions::new().with_include_body(false);
        assert_eq!(
            hello().compile(&opts).unwrap(),
            "/**\n * @return int\n */\nfunction hello();\n\n"
        );
    }

    #[test]
    fn test_default_values_can_be_omitted() {
        let mut function = FunctionNode::new("page").unwrap();
        function
            .add_parameter(VariableNode::new("size").unwrap().with_default_value("25"))
            .unwrap();
        let opts = RenderOptions::new()
            .with_include_comment(false)
            .with_include_default_value(false);
        assert!(function.compile(&opts).unwrap().starts_with("function page($size)\n"));
    }

    #[test]
    fn test_existing_annotations_are_kept() {
        let mut function = hello();
        function.create_parameter("id").unwrap();
        function
            .doc_mut()
            .add_line("Say hello.")
            .add_line("@param string $id")
            .add_line("@return void");
        let out = function.render().unwrap();
        assert!(out.starts_with("/**\n * Say hello.\n * @param string $id\n * @return void\n */\n"));
        assert!(!out.contains("@param mixed"));
        assert!(!out.contains("@return int"));
    }

    #[test]
    fn test_param_annotation_matches_whole_name() {
        let mut function = FunctionNode::new("slice").unwrap();
        function.create_parameter("idx").unwrap();
        function.create_parameter("id").unwrap();
        function.doc_mut().add_line("@param int $idx");
        let out = function.render().unwrap();
        assert!(out.contains(" * @param int $idx\n * @param mixed $id\n"));
    }

    #[test]
    fn test_render_does_not_mutate_doc() {
        let mut function = hello();
        function.create_parameter("a").unwrap();
        let first = function.render().unwrap();
        assert_eq!(first, function.render().unwrap());
        assert!(function.doc().is_empty());
    }

    #[test]
    fn test_parameter_replacement_keeps_order() {
        let mut function = FunctionNode::new("f").unwrap();
        function.create_parameter("a").unwrap();
        function.create_parameter("b").unwrap();
        function
            .add_parameter(VariableNode::new("a").unwrap().with_default_value("1"))
            .unwrap();
        let names: Vec<_> = function.parameters().filter_map(VariableNode::name).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(function.parameter("a").unwrap().default_value(), Some("1"));
        assert!(function.has_parameter("b"));
    }

    #[test]
    fn test_unnamed_parameter_rejected() {
        let mut function = FunctionNode::new("f").unwrap();
        let err = function.add_parameter(VariableNode::default()).unwrap_err();
        assert!(matches!(err, Error::MissingName { .. }));
        assert_eq!(function.parameters().count(), 0);
    }

    #[test]
    fn test_body_values() {
        let mut function = FunctionNode::new("f").unwrap();
        function
            .add_body_value(&toml::Value::String("$a = 1;".into()))
            .unwrap();
        let err = function
            .add_body_value(&toml::Value::Integer(1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidBodyPart { ref value, .. } if value == "1"));
        assert_eq!(function.body_parts(), ["$a = 1;"]);

        function.set_body_parts(["$b = 2;", "$c = 3;"]);
        assert_eq!(function.body_parts().len(), 2);
    }

    #[test]
    fn test_property_target_rejected() {
        let opts = RenderOptions::new().with_target(CompileTarget::Property);
        let err = hello().compile(&opts).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { option: "target", .. }));
    }
}
