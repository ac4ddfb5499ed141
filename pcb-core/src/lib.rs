//! Core types for the PHP class builder.
//!
//! This crate holds the pieces every template shares and that carry no
//! knowledge of templates themselves: name validation, member scope, the
//! error taxonomy, render options and the file-writing boundary.

mod error;
pub mod names;
mod options;
mod output;
mod scope;
mod value;

// Errors
pub use error::{Component, Error, NameKind, Result};
// Names
pub use names::{
    NAMESPACE_SEPARATOR, basename, is_qualified_name, is_valid_identifier, is_valid_namespace,
    namespace_of, qualify, trim_leading_separator,
};
// Configuration
pub use options::{CompileTarget, RenderOptions};
// File output
pub use output::{PHP_EXTENSION, php_file_name, write_php_file};
pub use scope::Scope;
// Loosely typed input
pub use value::{describe_value, scalar_to_line};
