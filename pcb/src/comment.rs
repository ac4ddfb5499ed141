//! Comment blocks in the four PHP comment styles.

use phpclassbuilder_core::{Component, Error, RenderOptions, Result, describe_value, scalar_to_line};

use crate::{CodeBuilder, Template};

/// Leading spaces a comment renders at when no indent is given.
pub const DEFAULT_COMMENT_INDENT: usize = 4;

/// Delimiter style of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommentStyle {
    /// `/** ... */`
    #[default]
    Doc,
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
    /// `# ...`
    Hash,
}

impl CommentStyle {
    /// Whether the style wraps its lines in an opening and closing delimiter.
    pub fn is_delimited(&self) -> bool {
        matches!(self, Self::Doc | Self::Block)
    }

    fn open(&self) -> &'static str {
        match self {
            Self::Doc => "/**",
            Self::Block => "/*",
            Self::Line => "//",
            Self::Hash => "#",
        }
    }

    /// Marker written before each line.
    fn marker(&self) -> &'static str {
        match self {
            Self::Doc | Self::Block => " *",
            Self::Line => "//",
            Self::Hash => "#",
        }
    }
}

/// An ordered list of comment lines.
///
/// Lines never contain a line break: text added with embedded `\n`, `\r\n`
/// or `\r` is split into separate lines.
///
/// ```
/// use phpclassbuilder::{CommentNode, Template};
///
/// let comment = CommentNode::from_text("line one\nline two");
/// assert_eq!(
///     comment.render().unwrap(),
///     "    /**\n     * line one\n     * line two\n     */\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentNode {
    lines: Vec<String>,
    style: CommentStyle,
    bang: bool,
    single_line: bool,
    emit_when_empty: bool,
}

impl CommentNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a doc comment holding `text`, split on line breaks.
    pub fn from_text(text: &str) -> Self {
        let mut comment = Self::new();
        comment.add_line(text);
        comment
    }

    pub fn with_style(mut self, style: CommentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> CommentStyle {
        self.style
    }

    pub fn set_style(&mut self, style: CommentStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn uses_bang(&self) -> bool {
        self.bang
    }

    /// Open with `/**!` (or `/*!`) instead of the plain delimiter.
    pub fn set_bang(&mut self, bang: bool) -> &mut Self {
        self.bang = bang;
        self
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Collapse a one-line doc or block comment onto a single physical line.
    pub fn set_single_line(&mut self, single_line: bool) -> &mut Self {
        self.single_line = single_line;
        self
    }

    pub fn emits_when_empty(&self) -> bool {
        self.emit_when_empty
    }

    pub fn set_emit_when_empty(&mut self, emit: bool) -> &mut Self {
        self.emit_when_empty = emit;
        self
    }

    /// Append text, splitting it into one line per line break.
    pub fn add_line(&mut self, line: impl AsRef<str>) -> &mut Self {
        self.lines.extend(split_lines(line.as_ref()));
        self
    }

    pub fn add_empty_line(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn add_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.add_line(line);
        }
        self
    }

    /// Replace every line.
    pub fn set_lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.lines.clear();
        self.add_lines(lines)
    }

    /// Append a loosely typed line. Scalars are stringified, booleans become
    /// `TRUE` or `FALSE`; arrays and tables are rejected.
    pub fn add_value(&mut self, value: &toml::Value) -> Result<&mut Self> {
        match scalar_to_line(value) {
            Some(line) => Ok(self.add_line(line)),
            None => Err(Error::InvalidCommentLine {
                component: Component::CommentNode,
                value: describe_value(value),
            }),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn has_line(&self, line: &str) -> bool {
        self.lines.iter().any(|l| l == line)
    }

    pub fn line_index(&self, line: &str) -> Option<usize> {
        self.lines.iter().position(|l| l == line)
    }

    /// Remove the line at `idx`, shifting later lines down.
    pub fn remove_line_by_index(&mut self, idx: usize) -> Option<String> {
        (idx < self.lines.len()).then(|| self.lines.remove(idx))
    }

    /// Remove the first line equal to `line`. Returns whether one was found.
    pub fn remove_line_by_value(&mut self, line: &str) -> bool {
        match self.line_index(line) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn cursor(&self) -> LineCursor<'_> {
        LineCursor {
            lines: &self.lines,
            pos: 0,
        }
    }

    /// Whether any line, ignoring leading whitespace, starts with `marker`.
    pub fn has_annotation(&self, marker: &str) -> bool {
        self.lines
            .iter()
            .any(|line| line.trim_start().starts_with(marker))
    }

    /// Append `line` unless a line already starts with `marker`.
    ///
    /// Returns whether the line was added. Calling this repeatedly never
    /// duplicates the annotation.
    pub fn ensure_annotation(&mut self, marker: &str, line: impl AsRef<str>) -> bool {
        if self.has_annotation(marker) {
            return false;
        }
        self.add_line(line);
        true
    }
}

impl Template for CommentNode {
    fn compile(&self, opts: &RenderOptions) -> Result<String> {
        if let Some(target) = opts.target {
            return Err(Error::invalid_option(
                Component::CommentNode,
                "target",
                "no target, comments have a single render mode",
                target.to_string(),
            ));
        }

        let indent = opts.indent_or(DEFAULT_COMMENT_INDENT);
        let emit_when_empty = opts.emit_when_empty.unwrap_or(self.emit_when_empty);
        let style = self.style;

        if self.lines.is_empty() && (!emit_when_empty || !style.is_delimited()) {
            return Ok(String::new());
        }

        let mut builder = CodeBuilder::with_base(indent);

        if !style.is_delimited() {
            for line in &self.lines {
                builder.push_line(&marked(style.marker(), line));
            }
            return Ok(builder.build());
        }

        let open = format!("{}{}", style.open(), if self.bang { "!" } else { "" });

        if self.single_line && self.lines.len() == 1 {
            builder.push_line(&format!("{open} {} */", self.lines[0]));
            return Ok(builder.build());
        }

        builder.push_line(&open);
        for line in &self.lines {
            builder.push_line(&marked(style.marker(), line));
        }
        builder.push_line(" */");
        Ok(builder.build())
    }
}

/// Forward cursor over a comment's lines that can be rewound.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(String::as_str)
    }

    pub fn key(&self) -> Option<usize> {
        self.valid().then_some(self.pos)
    }

    pub fn advance(&mut self) {
        if self.pos < self.lines.len() {
            self.pos += 1;
        }
    }

    pub fn valid(&self) -> bool {
        self.pos < self.lines.len()
    }

    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.current()?;
        self.advance();
        Some(line)
    }
}

fn marked(marker: &str, line: &str) -> String {
    if line.is_empty() {
        marker.to_string()
    } else {
        format!("{marker} {line}")
    }
}

/// Split on `\r\n`, `\n` or `\r`.
fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(['\n', '\r'])
        .map(str::to_string)
        .collect()
}
