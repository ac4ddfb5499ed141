//! Render options shared by every template.
//!
//! Each template honors a subset of these options and falls back to its own
//! defaults for anything left unset. Options can be built in code with the
//! `with_*` setters or loaded from a TOML table:
//!
//! ```
//! use phpclassbuilder_core::{CompileTarget, RenderOptions};
//!
//! let opts = RenderOptions::from_toml_str("target = \"method\"\nindent = 4").unwrap();
//! assert_eq!(opts.target, Some(CompileTarget::Method));
//! assert_eq!(opts.indent, Some(4));
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{Component, Error, Result, value::describe_value};

/// Which shape a template renders as, for templates with more than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompileTarget {
    /// A bare `$name;` statement.
    Variable,
    /// A class property declaration.
    Property,
    /// An inline function parameter.
    Parameter,
    /// A free function.
    Function,
    /// A class method.
    Method,
}

impl CompileTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Variable => "variable",
            Self::Property => "property",
            Self::Parameter => "parameter",
            Self::Function => "function",
            Self::Method => "method",
        }
    }
}

impl fmt::Display for CompileTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompileTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "variable" => Ok(Self::Variable),
            "property" => Ok(Self::Property),
            "parameter" => Ok(Self::Parameter),
            "function" => Ok(Self::Function),
            "method" => Ok(Self::Method),
            other => Err(format!("unknown compile target '{other}'")),
        }
    }
}

/// Options controlling how a template renders.
///
/// `None` means "use the rendering template's default".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render mode for templates that support more than one.
    pub target: Option<CompileTarget>,
    /// Leading spaces for the template's top-level lines.
    pub indent: Option<usize>,
    /// Emit the owned doc-comment.
    pub include_comment: Option<bool>,
    /// Emit `= <default>` clauses.
    pub include_default_value: Option<bool>,
    /// Emit function bodies (otherwise a signature followed by `;`).
    pub include_body: Option<bool>,
    /// The structure is rendered inside a file, which supplies the opening tag.
    pub embedded_in_file: Option<bool>,
    /// Render an empty doc/block comment as a bare delimiter pair.
    pub emit_when_empty: Option<bool>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: CompileTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn with_include_comment(mut self, include: bool) -> Self {
        self.include_comment = Some(include);
        self
    }

    pub fn with_include_default_value(mut self, include: bool) -> Self {
        self.include_default_value = Some(include);
        self
    }

    pub fn with_include_body(mut self, include: bool) -> Self {
        self.include_body = Some(include);
        self
    }

    pub fn with_embedded_in_file(mut self, embedded: bool) -> Self {
        self.embedded_in_file = Some(embedded);
        self
    }

    pub fn with_emit_when_empty(mut self, emit: bool) -> Self {
        self.emit_when_empty = Some(emit);
        self
    }

    pub fn target_or(&self, default: CompileTarget) -> CompileTarget {
        self.target.unwrap_or(default)
    }

    pub fn indent_or(&self, default: usize) -> usize {
        self.indent.unwrap_or(default)
    }

    pub fn include_comment(&self) -> bool {
        self.include_comment.unwrap_or(true)
    }

    pub fn include_default_value(&self) -> bool {
        self.include_default_value.unwrap_or(true)
    }

    pub fn include_body(&self) -> bool {
        self.include_body.unwrap_or(true)
    }

    pub fn embedded_in_file(&self) -> bool {
        self.embedded_in_file.unwrap_or(false)
    }

    /// Parse options from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(s).map_err(|source| Error::Parse { source })?;
        Self::from_table(&table)
    }

    /// Read options from a TOML table keyed by option name.
    ///
    /// Unknown keys and values of the wrong type are rejected rather than
    /// ignored.
    pub fn from_table(table: &toml::Table) -> Result<Self> {
        let mut opts = Self::default();

        for (key, value) in table {
            match key.as_str() {
                "target" => {
                    let target = value
                        .as_str()
                        .and_then(|s| s.parse::<CompileTarget>().ok())
                        .ok_or_else(|| {
                            invalid(
                                "target",
                                "one of variable, property, parameter, function, method",
                                value,
                            )
                        })?;
                    opts.target = Some(target);
                }
                "indent" => {
                    let indent = value
                        .as_integer()
                        .and_then(|i| usize::try_from(i).ok())
                        .ok_or_else(|| invalid("indent", "integer >= 0", value))?;
                    opts.indent = Some(indent);
                }
                "include_comment" => {
                    opts.include_comment = Some(flag("include_comment", value)?);
                }
                "include_default_value" => {
                    opts.include_default_value = Some(flag("include_default_value", value)?);
                }
                "include_body" => {
                    opts.include_body = Some(flag("include_body", value)?);
                }
                "embedded_in_file" => {
                    opts.embedded_in_file = Some(flag("embedded_in_file", value)?);
                }
                "emit_when_empty" => {
                    opts.emit_when_empty = Some(flag("emit_when_empty", value)?);
                }
                other => {
                    return Err(Error::UnknownOption {
                        key: other.to_string(),
                    });
                }
            }
        }

        Ok(opts)
    }
}

fn flag(option: &'static str, value: &toml::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid(option, "boolean value", value))
}

fn invalid(option: &'static str, expected: &'static str, value: &toml::Value) -> Error {
    Error::invalid_option(
        Component::RenderOptions,
        option,
        expected,
        describe_value(value),
    )
}
