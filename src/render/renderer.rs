//! Paints a laid-out tree into a [CharGrid].

use crate::model::{Tree, VertexIndex};
use crate::render::grid::{CharGrid, GridStyle};
use crate::render::layout::TreeLayout;
use std::collections::BTreeMap;
use tracing::trace;

/// Grid row → name of the leaf drawn on that row.
pub type LeafRows = BTreeMap<usize, String>;

/// Converts a layout coordinate to a grid cell, truncating toward zero.
fn cell(coordinate: f64) -> isize {
    coordinate as isize
}

// =#========================================================================#=
// GRID RENDERER
// =#========================================================================#=
/// Paints branches, vertex ids and branch lengths of a [TreeLayout].
///
/// Per vertex, in post-order:
/// 1. internal vertex: a vertical connector at column `x_self` spanning rows
///    `[first_child.y, last_child.y)`, using the stored child order
/// 2. a horizontal segment on row `y_self` over columns `[x_parent, x_self)`
/// 3. the vertex id from column `x_self`, only if that column is inside the grid
/// 4. non-root vertex: the branch length, truncated to an integer, on the row
///    above starting at column `(x_self + x_parent) / 2 - 1`
///
/// Leaf names are not painted; they are collected in [LeafRows] instead.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    style: GridStyle,
}

impl GridRenderer {
    pub fn new(style: GridStyle) -> Self {
        GridRenderer { style }
    }

    /// Paints `tree` as positioned by `layout` into `grid` and records the
    /// row of every leaf in `leaf_rows`.
    pub fn render(
        &self,
        tree: &Tree,
        layout: &TreeLayout,
        grid: &mut CharGrid,
        leaf_rows: &mut LeafRows,
    ) {
        let mut canvas = Canvas {
            tree,
            layout,
            style: &self.style,
            grid,
            leaf_rows,
        };
        canvas.paint(tree.root_index());
    }
}

/// Borrowed state of one [`GridRenderer::render`] call.
struct Canvas<'a> {
    tree: &'a Tree,
    layout: &'a TreeLayout,
    style: &'a GridStyle,
    grid: &'a mut CharGrid,
    leaf_rows: &'a mut LeafRows,
}

impl Canvas<'_> {
    fn paint(&mut self, index: VertexIndex) {
        let (tree, layout) = (self.tree, self.layout);
        let vertex = &tree[index];
        let record = layout[index];
        let x_parent = cell(record.x_parent);
        let x_self = cell(record.x_self);
        let row = cell(record.y_self);

        let children = vertex.children();
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            for &child in children {
                self.paint(child);
            }
            let from = cell(layout[first].y_parent);
            let to = cell(layout[last].y_parent);
            self.grid.vline(x_self, from, to, self.style.vertical);
        }

        self.grid.hline(row, x_parent, x_self, self.style.horizontal);

        if self.grid.contains_column(x_self) {
            self.grid.put_str(row, x_self, &vertex.id().to_string());
        } else {
            trace!(index, x_self, "Vertex id outside grid, not drawn");
        }

        if !vertex.is_root() && row > 0 {
            let length = vertex.length_or_zero().trunc() as i64;
            let column = x_self.saturating_add(x_parent) / 2 - 1;
            self.grid.put_str(row - 1, column, &length.to_string());
        }

        if vertex.is_leaf() {
            let name = vertex.name().unwrap_or_default();
            self.leaf_rows.insert(record.y_self as usize, name.to_string());
        }
    }
}
