//! Whole PHP files.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use phpclassbuilder_core::{
    Component, Error, NameKind, RenderOptions, Result, is_qualified_name, php_file_name,
    trim_leading_separator, write_php_file,
};

use crate::{ClassNode, CommentNode, Declaration, InterfaceNode, Template, class::reject_target};

/// The class or interface a file is built around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Structure {
    Class(ClassNode),
    Interface(InterfaceNode),
}

impl Structure {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Class(class) => class.name(),
            Self::Interface(interface) => interface.name(),
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        match self {
            Self::Class(class) => class.namespace(),
            Self::Interface(interface) => interface.namespace(),
        }
    }

    pub fn set_namespace(&mut self, namespace: &str) -> Result<()> {
        match self {
            Self::Class(class) => class.set_namespace(namespace).map(|_| ()),
            Self::Interface(interface) => interface.set_namespace(namespace).map(|_| ()),
        }
    }
}

impl Declaration for Structure {
    fn name(&self) -> Option<&str> {
        Structure::name(self)
    }

    fn namespace(&self) -> Option<&str> {
        Structure::namespace(self)
    }
}

impl Template for Structure {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        match self {
            Self::Class(class) => class.compile(opts),
            Self::Interface(interface) => interface.compile(opts),
        }
    }
}

impl From<ClassNode> for Structure {
    fn from(class: ClassNode) -> Self {
        Self::Class(class)
    }
}

impl From<InterfaceNode> for Structure {
    fn from(interface: InterfaceNode) -> Self {
        Self::Interface(interface)
    }
}

/// A PHP file: opening tag, optional namespace, comments, and either one
/// structure or a list of free-standing items.
///
/// ```
/// use phpclassbuilder::{ClassNode, Template};
///
/// let mut class = ClassNode::new("Foo").unwrap();
/// class.set_namespace("App").unwrap();
/// let file = class.into_file();
/// assert_eq!(file.render().unwrap(), "<?php namespace App;\n\nclass Foo\n{\n\n}\n");
/// ```
#[derive(Default)]
pub struct FileNode {
    file_name: Option<String>,
    namespace: Option<String>,
    before: Vec<CommentNode>,
    after: Vec<CommentNode>,
    structure: Option<Structure>,
    items: Vec<Box<dyn Template>>,
}

impl fmt::Debug for FileNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileNode")
            .field("file_name", &self.file_name)
            .field("namespace", &self.namespace)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("structure", &self.structure)
            .field("items", &self.items.len())
            .finish()
    }
}

impl FileNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Override the output file name. `.php` is appended when missing.
    pub fn set_file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// The namespace declared in the header. A file holding a class or
    /// interface always uses the structure's namespace.
    pub fn namespace(&self) -> Option<&str> {
        match &self.structure {
            Some(structure) => structure.namespace(),
            None => self.namespace.as_deref(),
        }
    }

    /// Set the namespace. With a structure present, the structure is moved
    /// into the namespace so its imports match the header.
    pub fn set_namespace(&mut self, namespace: &str) -> Result<&mut Self> {
        set_valid_namespace(&mut self.namespace, namespace, Component::FileNode)?;
        if let Some(structure) = &mut self.structure {
            structure.set_namespace(namespace)?;
        }
        Ok(self)
    }

    pub fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    pub fn structure_mut(&mut self) -> Option<&mut Structure> {
        self.structure.as_mut()
    }

    /// Set the class or interface this file holds.
    pub fn set_structure(&mut self, structure: impl Into<Structure>) -> Result<&mut Self> {
        if !self.items.is_empty() {
            return Err(Error::InvalidFilePart {
                reason: "a file holding free-standing items cannot also hold a class or interface",
            });
        }
        let mut structure = structure.into();
        if let Some(namespace) = &self.namespace {
            match structure.namespace() {
                None => structure.set_namespace(namespace)?,
                Some(own) if own != namespace => {
                    return Err(Error::InvalidFilePart {
                        reason: "the class or interface namespace differs from the file namespace",
                    });
                }
                Some(_) => {}
            }
        }
        self.structure = Some(structure);
        Ok(self)
    }

    /// Append a free-standing item, such as a function or a variable.
    pub fn add_item(&mut self, item: impl Template + 'static) -> Result<&mut Self> {
        if self.structure.is_some() {
            return Err(Error::InvalidFilePart {
                reason: "a file holding a class or interface cannot also hold free-standing items",
            });
        }
        self.items.push(Box::new(item));
        Ok(self)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn before_comments(&self) -> &[CommentNode] {
        &self.before
    }

    /// Add a comment rendered after the opening tag.
    pub fn add_before_comment(&mut self, comment: CommentNode) -> &mut Self {
        self.before.push(comment);
        self
    }

    pub fn set_before_comments(&mut self, comments: Vec<CommentNode>) -> &mut Self {
        self.before = comments;
        self
    }

    pub fn clear_before_comments(&mut self) -> &mut Self {
        self.before.clear();
        self
    }

    pub fn after_comments(&self) -> &[CommentNode] {
        &self.after
    }

    /// Add a comment rendered at the end of the file.
    pub fn add_after_comment(&mut self, comment: CommentNode) -> &mut Self {
        self.after.push(comment);
        self
    }

    pub fn set_after_comments(&mut self, comments: Vec<CommentNode>) -> &mut Self {
        self.after = comments;
        self
    }

    pub fn clear_after_comments(&mut self) -> &mut Self {
        self.after.clear();
        self
    }

    /// Name of the file [`FileNode::write_to_file`] creates.
    pub fn output_file_name(&self) -> Result<String> {
        let stem = self
            .file_name
            .as_deref()
            .or_else(|| self.structure.as_ref().and_then(Structure::name))
            .ok_or_else(|| {
                Error::missing_name(
                    Component::FileNode,
                    "a file name or a named class or interface is required to write a file",
                )
            })?;
        Ok(php_file_name(stem))
    }

    /// Render the file and write it into `dir`, which must be an existing
    /// directory. Returns the path written.
    pub fn write_to_file(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::InvalidOutputPath {
                path: dir.to_path_buf(),
            });
        }
        let file_name = self.output_file_name()?;
        let content = self.render()?;
        write_php_file(dir, &file_name, &content)
    }
}

impl Template for FileNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        reject_target(opts, Component::FileNode)?;
        tracing::trace!(
            namespace = self.namespace(),
            items = self.items.len(),
            "compiling file"
        );

        let inner = RenderOptions {
            embedded_in_file: Some(true),
            ..*opts
        };
        let comment_opts = RenderOptions {
            indent: Some(0),
            emit_when_empty: opts.emit_when_empty,
            ..RenderOptions::default()
        };

        let mut out = open_tag(self.namespace());

        for comment in &self.before {
            let rendered = comment.compile(&comment_opts)?;
            if !rendered.is_empty() {
                out.push_str(&rendered);
                out.push('\n');
            }
        }

        if let Some(structure) = &self.structure {
            out.push_str(&structure.compile(&inner)?);
            out.push('\n');
        }

        for item in &self.items {
            let rendered = item.compile(&inner)?;
            out.push_str(&rendered);
            if !rendered.is_empty() && !rendered.ends_with('\n') {
                out.push('\n');
            }
        }

        for comment in &self.after {
            let rendered = comment.compile(&comment_opts)?;
            if !rendered.is_empty() {
                out.push('\n');
                out.push_str(&rendered);
            }
        }

        Ok(out)
    }
}

impl From<ClassNode> for FileNode {
    fn from(class: ClassNode) -> Self {
        Self {
            structure: Some(Structure::Class(class)),
            ..Self::default()
        }
    }
}

impl From<InterfaceNode> for FileNode {
    fn from(interface: InterfaceNode) -> Self {
        Self {
            structure: Some(Structure::Interface(interface)),
            ..Self::default()
        }
    }
}

/// `<?php` plus the namespace declaration, followed by a blank line.
pub(crate) fn open_tag(namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("<?php namespace {ns};\n\n"),
        _ => "<?php\n\n".to_string(),
    }
}

/// Validate and store a namespace without its leading `\`.
pub(crate) fn set_valid_namespace(
    slot: &mut Option<String>,
    namespace: &str,
    component: Component,
) -> Result<()> {
    if !is_qualified_name(namespace) {
        return Err(Error::invalid_name(component, NameKind::Namespace, namespace));
    }
    *slot = Some(trim_leading_separator(namespace).to_string());
    Ok(())
}
