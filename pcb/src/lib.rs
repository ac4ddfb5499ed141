//! Build PHP source from composable templates.
//!
//! Callers assemble a tree of nodes (comments, variables, functions,
//! classes, interfaces and files) and render the root with
//! [`Template::compile`]. Rendering is deterministic and never touches the
//! filesystem; [`FileNode::write_to_file`] is the only I/O boundary.
//!
//! ```
//! use phpclassbuilder::{ClassNode, FunctionNode, Template};
//!
//! let mut class = ClassNode::new("Greeter").unwrap();
//! class.set_namespace("App").unwrap();
//! class.add_interface("\\Stringable").unwrap();
//!
//! let mut greet = FunctionNode::new("__toString").unwrap().with_return_type("string");
//! greet.set_return_statement("'hello'");
//! class.add_function(greet).unwrap();
//!
//! let php = class.render().unwrap();
//! assert!(php.starts_with("<?php namespace App;\n\nuse Stringable;\n\nclass Greeter implements Stringable\n{\n"));
//! ```
//!
//! # Module Organization
//!
//! - [`comment`] - comment blocks in doc, block, line and hash styles
//! - [`variable`] - variables, properties and parameters
//! - [`function`] - functions and methods
//! - [`class`] / [`interface`] - structures and their imports
//! - [`file`] - whole files and writing them to disk
//! - [`manifest`] - building files from TOML

mod builder;
pub mod class;
pub mod comment;
pub mod file;
pub mod function;
mod imports;
pub mod interface;
pub mod manifest;
mod reference;
mod template;
pub mod variable;

pub use builder::{CodeBuilder, INDENT_WIDTH};
pub use class::ClassNode;
pub use comment::{CommentNode, CommentStyle, LineCursor};
pub use file::{FileNode, Structure};
pub use function::FunctionNode;
pub use imports::{collect_imports, render_use_statements};
pub use interface::InterfaceNode;
pub use manifest::Manifest;
pub use phpclassbuilder_core::{
    CompileTarget, Component, Error, NameKind, RenderOptions, Result, Scope, is_qualified_name,
    is_valid_identifier, is_valid_namespace,
};
pub use reference::{Declaration, Reference};
pub use template::Template;
pub use variable::VariableNode;
