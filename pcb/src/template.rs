//! The rendering contract shared by every node.

use std::rc::Rc;

use phpclassbuilder_core::{RenderOptions, Result};

/// A node that renders itself into PHP source.
///
/// Rendering is pure: compiling the same node twice with the same options
/// yields the same text, and never mutates the node.
pub trait Template {
    /// Render with explicit options. Unset options fall back to the node's
    /// own defaults.
    fn compile(&self, opts: &RenderOptions) -> Result<String>;

    /// Render with default options.
    fn render(&self) -> Result<String> {
        self.compile(&RenderOptions::default())
    }
}

impl<T: Template + ?Sized> Template for &T {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        (**self).compile(opts)
    }
}

impl<T: Template + ?Sized> Template for Box<T> {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        (**self).compile(opts)
    }
}

impl<T: Template + ?Sized> Template for Rc<T> {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        (**self).compile(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Template for Fixed {
        fn compile(&self, opts: &RenderOptions) -> Result<String> {
            Ok(format!("{}x", " ".repeat(opts.indent_or(0))))
        }
    }

    #[test]
    fn test_render_uses_defaults() {
        assert_eq!(Fixed.render().unwrap(), "x");
    }

    #[test]
    fn test_boxed_and_shared() {
        let opts = RenderOptions::new().with_indent(2);
        let boxed: Box<dyn Template> = Box::new(Fixed);
        assert_eq!(boxed.compile(&opts).unwrap(), "  x");
        assert_eq!(Rc::new(Fixed).compile(&opts).unwrap(), "  x");
        assert_eq!((&Fixed).render().unwrap(), "x");
    }
}
