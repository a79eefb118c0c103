//! Quick text view of a tree: layout, painting and output in one call.

use crate::model::Tree;
use crate::render::error::RenderResult;
use crate::render::grid::{CharGrid, GridStyle};
use crate::render::layout::{LayoutEngine, TreeLayout};
use crate::render::renderer::{GridRenderer, LeafRows};
use std::io::{self, Write};
use tracing::{debug, instrument};

/// Default grid width in columns
pub const DEFAULT_WIDTH: usize = 80;

/// Default grid height in rows
pub const DEFAULT_HEIGHT: usize = 40;

// =#========================================================================#=
// TEXT VIEW
// =#========================================================================#=
/// Configuration of a text view rendering; renders trees to text sinks.
///
/// Only configuration is stored, so one `TextView` can render any number of
/// trees, also from several threads at once.
///
/// # Output
/// One empty header line, then one line per grid row. A row that holds a
/// leaf is followed by the separator and the leaf name.
///
/// # Example
/// ```
/// use phylotext::newick::parse_str;
/// use phylotext::render::TextView;
///
/// let mut tree = parse_str("(A:1,B:2)R:0;").unwrap();
/// let text = TextView::new()
///     .with_width(10)
///     .with_height(4)
///     .render_to_string(&mut tree)
///     .unwrap();
/// assert_eq!(
///     text,
///     "\n|----0     A\n2   2     \n---------- B\n          \n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TextView {
    width: usize,
    height: usize,
    topology_only: bool,
    style: GridStyle,
    engine: LayoutEngine,
}

impl Default for TextView {
    fn default() -> Self {
        Self::new()
    }
}

impl TextView {
    /// Creates a text view of [DEFAULT_WIDTH] × [DEFAULT_HEIGHT] using branch lengths.
    pub fn new() -> Self {
        TextView {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            topology_only: false,
            style: GridStyle::default(),
            engine: LayoutEngine,
        }
    }

    /// Sets the grid width in columns.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the grid height in rows.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Draws all branches with unit length.
    ///
    /// Rendering then overwrites every branch length of the tree with `1`.
    pub fn with_topology_only(mut self) -> Self {
        self.topology_only = true;
        self
    }

    /// Sets the characters used for painting.
    pub fn with_style(mut self, style: GridStyle) -> Self {
        self.style = style;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_topology_only(&self) -> bool {
        self.topology_only
    }

    /// Lays out and paints `tree`, keeping the result in memory.
    ///
    /// # Errors
    /// Any [RenderError](crate::render::RenderError) of the layout.
    #[instrument(level = "debug", skip(self, tree), fields(width = self.width, height = self.height))]
    pub fn render(&self, tree: &mut Tree) -> RenderResult<TextRender> {
        let layout = self
            .engine
            .layout(tree, self.width, self.height, self.topology_only)?;

        let mut grid = CharGrid::new(self.width, self.height, self.style.blank);
        let mut leaf_rows = LeafRows::new();
        GridRenderer::new(self.style.clone()).render(tree, &layout, &mut grid, &mut leaf_rows);
        debug!(num_leaf_rows = leaf_rows.len(), "Painted tree");

        Ok(TextRender {
            grid,
            leaf_rows,
            layout,
            separator: self.style.separator.clone(),
        })
    }

    /// Renders `tree` and writes the text view to `sink`.
    ///
    /// # Errors
    /// Any [RenderError](crate::render::RenderError) of the layout, or
    /// `RenderError::Io` if writing fails.
    pub fn write_to<W: Write>(&self, tree: &mut Tree, sink: &mut W) -> RenderResult<()> {
        let render = self.render(tree)?;
        render.write_to(sink)?;
        Ok(())
    }

    /// Renders `tree` into a `String`.
    pub fn render_to_string(&self, tree: &mut Tree) -> RenderResult<String> {
        Ok(self.render(tree)?.to_string())
    }
}

// =#========================================================================#=
// TEXT RENDER
// =#========================================================================#=
/// Result of one [`TextView::render`] call.
#[derive(Debug, Clone)]
pub struct TextRender {
    grid: CharGrid,
    leaf_rows: LeafRows,
    layout: TreeLayout,
    separator: String,
}

impl TextRender {
    pub fn grid(&self) -> &CharGrid {
        &self.grid
    }

    pub fn leaf_rows(&self) -> &LeafRows {
        &self.leaf_rows
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    /// Streams header line and rows, with leaf names appended, to `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        writeln!(sink)?;
        for (index, row) in self.grid.rows().enumerate() {
            match self.leaf_rows.get(&index) {
                Some(name) => writeln!(sink, "{row}{}{name}", self.separator)?,
                None => writeln!(sink, "{row}")?,
            }
        }
        sink.flush()
    }
}

impl std::fmt::Display for TextRender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer).map_err(|_| std::fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;
    use crate::render::error::RenderError;

    #[test]
    fn test_header_line_and_sidebar() {
        let mut tree = parse_str("(A:1,B:2)R:0;").unwrap();
        let mut out = Vec::new();
        TextView::new()
            .with_width(10)
            .with_height(4)
            .write_to(&mut tree, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "|----0     A");
        assert_eq!(lines[3], "---------- B");
    }

    #[test]
    fn test_custom_style() {
        let mut tree = parse_str("(A:1,B:1);").unwrap();
        let style = GridStyle {
            horizontal: '=',
            vertical: '!',
            blank: '.',
            separator: " <- ".to_string(),
        };
        let text = TextView::new()
            .with_width(4)
            .with_height(2)
            .with_style(style)
            .render_to_string(&mut tree)
            .unwrap();
        // Root (id 2) sits at row 0.5, truncated to row 0, over B's length label
        assert_eq!(text, "\n21== <- A\n==== <- B\n");
    }

    #[test]
    fn test_topology_only_overwrites_tree() {
        let mut tree = parse_str("((A:0.1,B:7):2,C:3);").unwrap();
        let view = TextView::new().with_width(12).with_height(3).with_topology_only();
        let render = view.render(&mut tree).unwrap();

        assert_eq!(render.layout().scale(), 6.0);
        assert!(tree.pre_order_iter().all(|v| v.length_or_zero() == 1.0));
    }

    #[test]
    fn test_degenerate_tree_writes_nothing() {
        let mut tree = parse_str("(A:0,B:0);").unwrap();
        let mut out = Vec::new();
        let result = TextView::new().write_to(&mut tree, &mut out);
        assert!(matches!(result, Err(RenderError::ZeroDepth)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_text_view_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TextView>();
        assert_send_sync::<LayoutEngine>();
        assert_send_sync::<GridRenderer>();
    }
}
