//! Declarative file descriptions in TOML.
//!
//! A manifest describes one output file holding either a class or an
//! interface:
//!
//! ```toml
//! [file]
//! before = ["Generated file, do not edit."]
//!
//! [class]
//! name = "User"
//! namespace = "App\\Model"
//! extends = "\\App\\Model\\Base"
//! implements = ["\\JsonSerializable"]
//!
//! [[class.properties]]
//! name = "id"
//! type = "int"
//! scope = "private"
//!
//! [[class.methods]]
//! name = "getId"
//! returns = "int"
//! return = "$this->id"
//!
//! [options]
//! include_default_value = false
//! ```
//!
//! Building goes through the node API, so every naming and structure rule
//! applies to manifests as well.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use phpclassbuilder_core::{
    Component, Error, RenderOptions, Result, Scope, describe_value, write_php_file,
};
use serde::Deserialize;

use crate::{ClassNode, CommentNode, FileNode, FunctionNode, InterfaceNode, Template, VariableNode};

/// Root of a manifest file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// File-level settings.
    #[serde(default)]
    pub file: FileSpec,

    pub class: Option<ClassSpec>,

    pub interface: Option<InterfaceSpec>,

    /// Render options, keyed by option name.
    #[serde(default)]
    pub options: toml::Table,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    /// Output file name override.
    pub name: Option<String>,
    pub namespace: Option<String>,
    /// Comments placed after the opening tag, one per entry.
    #[serde(default)]
    pub before: Vec<toml::Value>,
    /// Comments placed at the end of the file, one per entry.
    #[serde(default)]
    pub after: Vec<toml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSpec {
    pub name: String,
    pub namespace: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    pub extends: Option<toml::Value>,
    #[serde(default)]
    pub implements: Vec<toml::Value>,
    pub doc: Option<toml::Value>,
    #[serde(default)]
    pub properties: Vec<PropertySpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceSpec {
    pub name: String,
    pub namespace: Option<String>,
    #[serde(default)]
    pub extends: Vec<toml::Value>,
    pub doc: Option<toml::Value>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub php_type: Option<String>,
    #[serde(default)]
    pub collection: bool,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Default value, as PHP source text.
    pub default: Option<String>,
    pub doc: Option<toml::Value>,
    #[serde(default = "default_true")]
    pub getter: bool,
    #[serde(default = "default_true")]
    pub setter: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Declared return type.
    pub returns: Option<String>,
    /// Returned expression.
    #[serde(rename = "return")]
    pub return_statement: Option<String>,
    pub body: Option<toml::Value>,
    pub doc: Option<toml::Value>,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub php_type: Option<String>,
    #[serde(default)]
    pub collection: bool,
    pub default: Option<String>,
}

fn default_true() -> bool {
    true
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(s).map_err(|source| Error::Parse { source })?;
        let structure = manifest.structure_name()?;
        tracing::debug!(structure, "loaded manifest");
        Ok(manifest)
    }
}

impl Manifest {
    /// Read and parse a manifest file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Render options from the `[options]` table.
    pub fn options(&self) -> Result<RenderOptions> {
        RenderOptions::from_table(&self.options)
    }

    /// Build the described file.
    pub fn build(&self) -> Result<FileNode> {
        let mut file = match (&self.class, &self.interface) {
            (Some(class), None) => class.build()?.into_file(),
            (None, Some(interface)) => interface.build()?.into_file(),
            _ => return Err(single_structure_error()),
        };

        if let Some(name) = &self.file.name {
            file.set_file_name(name);
        }
        if let Some(namespace) = &self.file.namespace {
            file.set_namespace(namespace)?;
        }
        for value in &self.file.before {
            file.add_before_comment(comment_from(value)?);
        }
        for value in &self.file.after {
            file.add_after_comment(comment_from(value)?);
        }

        Ok(file)
    }

    /// Build and render the file with the manifest's options.
    pub fn render(&self) -> Result<String> {
        let opts = self.options()?;
        self.build()?.compile(&opts)
    }

    /// Build, render and write the file into an existing directory.
    pub fn write_to_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::InvalidOutputPath {
                path: dir.to_path_buf(),
            });
        }
        let opts = self.options()?;
        let file = self.build()?;
        let content = file.compile(&opts)?;
        write_php_file(dir, &file.output_file_name()?, &content)
    }

    fn structure_name(&self) -> Result<&str> {
        match (&self.class, &self.interface) {
            (Some(class), None) => Ok(&class.name),
            (None, Some(interface)) => Ok(&interface.name),
            _ => Err(single_structure_error()),
        }
    }
}

impl ClassSpec {
    pub fn build(&self) -> Result<ClassNode> {
        let mut class = ClassNode::new(&self.name)?;
        if let Some(namespace) = &self.namespace {
            class.set_namespace(namespace)?;
        }
        class.set_abstract(self.is_abstract);
        if let Some(parent) = &self.extends {
            class.set_parent(reference_name(parent)?)?;
        }
        for interface in &self.implements {
            class.add_interface(reference_name(interface)?)?;
        }
        if let Some(doc) = &self.doc {
            class.set_doc(comment_from(doc)?);
        }
        for property in &self.properties {
            class.add_property(property.build()?)?;
        }
        for method in &self.methods {
            class.add_function(method.build()?)?;
        }
        Ok(class)
    }
}

impl InterfaceSpec {
    pub fn build(&self) -> Result<InterfaceNode> {
        let mut interface = InterfaceNode::new(&self.name)?;
        if let Some(namespace) = &self.namespace {
            interface.set_namespace(namespace)?;
        }
        for parent in &self.extends {
            interface.add_parent(reference_name(parent)?)?;
        }
        if let Some(doc) = &self.doc {
            interface.set_doc(comment_from(doc)?);
        }
        for method in &self.methods {
            interface.add_function(method.build()?)?;
        }
        Ok(interface)
    }
}

impl PropertySpec {
    pub fn build(&self) -> Result<VariableNode> {
        let mut property = VariableNode::new(&self.name)?
            .with_scope(self.scope)
            .with_static(self.is_static)
            .with_collection(self.collection)
            .with_requires_getter(self.getter)
            .with_requires_setter(self.setter);
        if let Some(php_type) = &self.php_type {
            property = property.with_php_type(php_type);
        }
        if let Some(default) = &self.default {
            property = property.with_default_value(default);
        }
        if let Some(doc) = &self.doc {
            property = property.with_doc(comment_from(doc)?);
        }
        Ok(property)
    }
}

impl MethodSpec {
    pub fn build(&self) -> Result<FunctionNode> {
        let mut function = FunctionNode::new(&self.name)?
            .with_scope(self.scope)
            .with_static(self.is_static)
            .with_abstract(self.is_abstract);
        if let Some(returns) = &self.returns {
            function = function.with_return_type(returns);
        }
        if let Some(doc) = &self.doc {
            function = function.with_doc(comment_from(doc)?);
        }
        if let Some(expr) = &self.return_statement {
            function.set_return_statement(expr);
        }
        if let Some(body) = &self.body {
            for part in values(body) {
                function.add_body_value(part)?;
            }
        }
        for param in &self.params {
            function.add_parameter(param.build()?)?;
        }
        Ok(function)
    }
}

impl ParamSpec {
    pub fn build(&self) -> Result<VariableNode> {
        let mut param = VariableNode::new(&self.name)?.with_collection(self.collection);
        if let Some(php_type) = &self.php_type {
            param = param.with_php_type(php_type);
        }
        if let Some(default) = &self.default {
            param = param.with_default_value(default);
        }
        Ok(param)
    }
}

/// A single value or each element of an array.
fn values(value: &toml::Value) -> impl Iterator<Item = &toml::Value> {
    match value {
        toml::Value::Array(items) => items.iter().collect::<Vec<_>>().into_iter(),
        other => vec![other].into_iter(),
    }
}

fn comment_from(value: &toml::Value) -> Result<CommentNode> {
    let mut comment = CommentNode::new();
    for line in values(value) {
        comment.add_value(line)?;
    }
    Ok(comment)
}

fn reference_name(value: &toml::Value) -> Result<&str> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid_reference(Component::Manifest, describe_value(value)))
}

fn single_structure_error() -> Error {
    Error::InvalidFilePart {
        reason: "a manifest must declare exactly one of [class] or [interface]",
    }
}
