use std::{
    fmt::Write as _,
    io::{self, Write},
};

use crate::SchemaNode;

/// Column that trailing comments are aligned to
pub const COMMENT_PADDING: usize = 40;

/// Placement of description comments in the rendered example
#[derive(strum::Display, strum::EnumString, Clone, Copy, Default, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Comment trails the line, aligned to the padding column
    #[default]
    Oneline,
    /// Comment lines precede the line they describe
    Multiline,
}

/// Format a single line with an optional trailing comment
///
/// Content shorter than `padding` characters is padded so that comments line up;
/// longer content gets no padding at all.
pub fn format_line(content: &str, comment: &str, padding: usize) -> String {
    if comment.is_empty() {
        return format!("{content}\n");
    }
    let pad = padding.saturating_sub(content.chars().count());
    format!("{content}{} # {comment}\n", " ".repeat(pad))
}

/// Format a line preceded by its comment block
///
/// A non-empty comment block is separated from the previous line by an empty line.
pub fn format_block(content: &str, comment_lines: &[&str], indent: &str) -> String {
    let mut block = String::new();
    if !comment_lines.is_empty() {
        block.push('\n');
    }
    for line in comment_lines {
        if line.is_empty() {
            let _ = writeln!(block, "{indent}#");
        } else {
            let _ = writeln!(block, "{indent}# {line}");
        }
    }
    block.push_str(content);
    block.push('\n');
    block
}

/// Serializes rendered lines into a sink in document order
pub struct LineWriter<'a, W: Write> {
    out: &'a mut W,
    format: OutputFormat,
    padding: usize,
}

impl<'a, W: Write> LineWriter<'a, W> {
    pub fn new(out: &'a mut W, format: OutputFormat, padding: usize) -> Self {
        Self { out, format, padding }
    }

    /// Write `content`, commented with the description of `described` if any
    ///
    /// `level` is the nesting level comment blocks are indented to in multiline output.
    pub fn line(&mut self, content: &str, described: Option<&SchemaNode>, level: usize) -> io::Result<()> {
        let rendered = match (self.format, described) {
            (OutputFormat::Oneline, Some(node)) => format_line(content, &node.comment(), self.padding),
            (OutputFormat::Multiline, Some(node)) => {
                format_block(content, &node.comment_lines(), &indentation(level))
            }
            (_, None) => format_line(content, "", self.padding),
        };
        self.out.write_all(rendered.as_bytes())
    }
}

/// Two spaces per nesting level
pub fn indentation(level: usize) -> String {
    "  ".repeat(level)
}
