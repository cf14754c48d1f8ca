/*!
 * Render tree the translation list attaches its rows to.
 */

use crate::translation::rows::{TitleRow, TranslatableRow, TranslationRow};

/// A row being attached to the render tree
#[derive(Debug, Clone, Copy)]
pub enum RenderNode<'a> {
    /// The video title row
    Title(&'a TitleRow),
    /// A subtitle row with its position in the list
    Subtitle {
        /// Position in the sorted row sequence
        index: usize,
        /// The row itself
        row: &'a TranslationRow,
    },
}

/// Parent node receiving rows as they are created
pub trait RenderTarget {
    /// Attach a child node
    fn attach(&mut self, node: RenderNode<'_>);
}

/// Render target that drops every node
#[derive(Debug, Default)]
pub struct NullRenderer;

impl RenderTarget for NullRenderer {
    fn attach(&mut self, _node: RenderNode<'_>) {}
}

/// Render target producing one text line per attached row
#[derive(Debug, Default)]
pub struct TextRenderer {
    lines: Vec<String>,
}

impl TextRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines rendered so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All lines joined with newlines
    pub fn output(&self) -> String {
        self.lines.join("\n")
    }

    fn format_line(label: &str, source: &str, translation: &str) -> String {
        let translation = if translation.trim().is_empty() { "-" } else { translation };
        format!("{:>6}  {}  =>  {}", label, source.replace('\n', " / "), translation)
    }
}

impl RenderTarget for TextRenderer {
    fn attach(&mut self, node: RenderNode<'_>) {
        let line = match node {
            RenderNode::Title(row) => {
                Self::format_line("title", row.source_text(), &row.translation())
            }
            RenderNode::Subtitle { index, row } => {
                Self::format_line(&(index + 1).to_string(), row.source_text(), &row.translation())
            }
        };
        self.lines.push(line);
    }
}
