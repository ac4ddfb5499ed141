use std::{fmt, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use crate::Scope;

/// Result type for template construction and rendering.
pub type Result<T> = std::result::Result<T, Error>;

/// The component that raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    CommentNode,
    VariableNode,
    FunctionNode,
    ClassNode,
    InterfaceNode,
    FileNode,
    RenderOptions,
    Manifest,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommentNode => "CommentNode",
            Self::VariableNode => "VariableNode",
            Self::FunctionNode => "FunctionNode",
            Self::ClassNode => "ClassNode",
            Self::InterfaceNode => "InterfaceNode",
            Self::FileNode => "FileNode",
            Self::RenderOptions => "RenderOptions",
            Self::Manifest => "Manifest",
        };
        f.write_str(name)
    }
}

/// Which kind of name failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Class,
    Interface,
    Function,
    Variable,
    Namespace,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Namespace => "namespace",
        };
        f.write_str(kind)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("{component} - specified {kind} name \"{value}\" is not valid")]
    #[diagnostic(
        code(pcb::invalid_name),
        help(
            "names must start with a letter or underscore and contain only letters, digits and underscores, see https://www.php.net/manual/en/language.oop5.basic.php"
        )
    )]
    InvalidName {
        component: Component,
        kind: NameKind,
        value: String,
    },

    #[error("{component} - {context}")]
    #[diagnostic(code(pcb::missing_name), help("set a name before using this node"))]
    MissingName {
        component: Component,
        context: &'static str,
    },

    #[error("{component} - invalid value \"{value}\" for option '{option}', expected {expected}")]
    #[diagnostic(code(pcb::invalid_option))]
    InvalidOption {
        component: Component,
        option: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("unknown render option '{key}'")]
    #[diagnostic(
        code(pcb::unknown_option),
        help(
            "valid options are: target, indent, include_comment, include_default_value, include_body, embedded_in_file, emit_when_empty"
        )
    )]
    UnknownOption { key: String },

    #[error("{component} - comment lines must be scalar values, {value} seen")]
    #[diagnostic(code(pcb::invalid_comment_line))]
    InvalidCommentLine { component: Component, value: String },

    #[error("{component} - function body lines must be strings, {value} seen")]
    #[diagnostic(code(pcb::invalid_body_part))]
    InvalidBodyPart { component: Component, value: String },

    #[error(
        "{component} - parent and interface references must be a qualified name or a named node, \"{value}\" seen"
    )]
    #[diagnostic(code(pcb::invalid_reference))]
    InvalidReference { component: Component, value: String },

    #[error(
        "InterfaceNode - interface functions must be public, added function {function} has scope of {scope}"
    )]
    #[diagnostic(code(pcb::interface_function_scope))]
    InterfaceFunctionScope { function: String, scope: Scope },

    #[error("FileNode - {reason}")]
    #[diagnostic(code(pcb::invalid_file_part))]
    InvalidFilePart { reason: &'static str },

    #[error("specified output path '{}' is not an existing directory", .path.display())]
    #[diagnostic(code(pcb::invalid_output_path))]
    InvalidOutputPath { path: PathBuf },

    #[error("failed to write '{}'", .path.display())]
    #[diagnostic(code(pcb::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest")]
    #[diagnostic(code(pcb::parse_error))]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    pub fn invalid_name(component: Component, kind: NameKind, value: impl Into<String>) -> Self {
        Self::InvalidName {
            component,
            kind,
            value: value.into(),
        }
    }

    pub fn missing_name(component: Component, context: &'static str) -> Self {
        Self::MissingName { component, context }
    }

    pub fn invalid_option(
        component: Component,
        option: &'static str,
        expected: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            component,
            option,
            expected,
            value: value.into(),
        }
    }

    pub fn invalid_reference(component: Component, value: impl Into<String>) -> Self {
        Self::InvalidReference {
            component,
            value: value.into(),
        }
    }
}
