//! Indent-aware line buffer used by every template.

/// Width of one nesting level in generated PHP.
pub const INDENT_WIDTH: usize = 4;

/// Fluent buffer for building PHP source with consistent indentation.
///
/// Lines are written at `base + level * INDENT_WIDTH` spaces, where `base`
/// is the leading-space count a template was asked to render at.
///
/// ```
/// use phpclassbuilder::CodeBuilder;
///
/// let mut builder = CodeBuilder::with_base(4);
/// builder
///     .push_line("{")
///     .push_indent()
///     .push_line("return 1;")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "    {\n        return 1;\n    }\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    base: usize,
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a builder whose level-zero lines carry `base` leading spaces.
    pub fn with_base(base: usize) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Add a line with the current indentation. Empty lines get no padding.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Leading spaces a line pushed now would receive.
    pub fn current_indent(&self) -> usize {
        self.base + self.indent_level * INDENT_WIDTH
    }

    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        let width = self.current_indent();
        self.buffer.extend(std::iter::repeat_n(' ', width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::new();
        builder.push_line("$x = 1;");
        assert_eq!(builder.build(), "$x = 1;\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::new();
        builder
            .push_line("function foo()")
            .push_line("{")
            .push_indent()
            .push_line("return 1;")
            .push_dedent()
            .push_line("}");
        assert_eq!(builder.build(), "function foo()\n{\n    return 1;\n}\n");
    }

    #[test]
    fn test_base_offset() {
        let mut builder = CodeBuilder::with_base(8);
        builder.push_line("$x;").push_indent().push_line("$y;");
        assert_eq!(builder.build(), "        $x;\n            $y;\n");
    }

    #[test]
    fn test_empty_line_has_no_padding() {
        let mut builder = CodeBuilder::with_base(4);
        builder.push_line("").push_blank();
        assert_eq!(builder.build(), "\n\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::with_base(2);
        builder.push_dedent().push_dedent();
        assert_eq!(builder.current_indent(), 2);
    }
}
