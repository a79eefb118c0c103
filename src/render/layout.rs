//! Phylogram layout: scaled grid coordinates for every vertex.
//!
//! Horizontal coordinates are proportional to the cumulative branch length
//! from the root; vertical coordinates come from the leaf order, with each
//! leaf on its own row band and internal vertices placed from their children.
//! Coordinates are kept in a side table ([TreeLayout]) indexed by
//! [VertexIndex]; the tree itself is only written to in topology-only mode.

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::render::error::{RenderError, RenderResult};
use crate::render::grid::cell_count;
use crate::render::metrics::{RootToLeaf, max_root_to_leaf};
use std::ops::Index;
use tracing::{debug, instrument, trace};

/// Grid coordinates of one vertex and of the point where its branch leaves
/// the parent.
///
/// `y_self == y_parent` always holds: a vertex sits on its own horizontal line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutRecord {
    pub x_parent: f64,
    pub x_self: f64,
    pub y_parent: f64,
    pub y_self: f64,
}

/// Layout of one tree for one render call.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    records: Vec<LayoutRecord>,
    scale: f64,
    row_height: usize,
    deepest: RootToLeaf,
}

impl TreeLayout {
    /// Returns the record of the vertex at `index`.
    pub fn record(&self, index: VertexIndex) -> &LayoutRecord {
        &self.records[index]
    }

    /// Returns all records, indexed like the tree's arena.
    pub fn records(&self) -> &[LayoutRecord] {
        &self.records
    }

    /// Grid columns per unit of branch length.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Grid rows reserved for each leaf.
    pub fn row_height(&self) -> usize {
        self.row_height
    }

    /// Longest root-to-leaf path, the reference for [`Self::scale`].
    pub fn deepest(&self) -> RootToLeaf {
        self.deepest
    }
}

impl Index<VertexIndex> for TreeLayout {
    type Output = LayoutRecord;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.records[index]
    }
}

// =#========================================================================#=
// LAYOUT ENGINE
// =#========================================================================#=
/// Computes [TreeLayout]s.
///
/// The engine holds no state between calls: leaf counter and records live
/// in a per-call layout state, so one engine can serve concurrent renders.
///
/// # Example
/// ```
/// use phylotext::newick::parse_str;
/// use phylotext::render::LayoutEngine;
///
/// let mut tree = parse_str("(A:1,B:2)R:0;").unwrap();
/// let layout = LayoutEngine.layout(&mut tree, 10, 4, false).unwrap();
/// assert_eq!(layout.scale(), 5.0);
/// assert_eq!(layout.row_height(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine;

impl LayoutEngine {
    /// Lays out `tree` for a grid of `width` columns and `height` rows.
    ///
    /// With `topology_only`, every branch length of `tree` (root included)
    /// is overwritten with `1` before anything is computed; the original
    /// lengths are lost.
    ///
    /// # Errors
    /// See [`Self::layout_scaled`]. Grid dimensions are checked before the
    /// tree is modified.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn layout(
        &self,
        tree: &mut Tree,
        width: usize,
        height: usize,
        topology_only: bool,
    ) -> RenderResult<TreeLayout> {
        check_dimensions(tree, width, height)?;

        if topology_only {
            debug!("Collapsing all branch lengths to unit length");
            tree.set_all_branch_lengths(BranchLength::UNIT);
        }

        self.layout_scaled(tree, width, height)
    }

    /// Lays out `tree` using its branch lengths, without modifying it.
    ///
    /// - `scale = width / max_root_to_leaf`
    /// - `row_height = height / num_leaves` (truncating), so the drawn tree
    ///   may use fewer than `height` rows
    /// - `x_parent = ancestors * scale`, `x_self = x_parent + length * scale`
    ///   where `ancestors` sums the lengths of all strict ancestors, root included;
    ///   a root edge therefore shifts the whole tree to the right
    /// - leaf `y = leaf_counter * row_height` in left-to-right order
    /// - internal `y = Σ 0.5 * child.y`, the midpoint for two children but
    ///   not the mean for three or more
    ///
    /// # Errors
    /// - [RenderError::RootNotSet] / [RenderError::NoLeaves] from the metrics
    /// - [RenderError::ZeroDepth] if all root-to-leaf paths have length zero
    /// - [RenderError::ZeroDepth] also if the depth is so small that the scale overflows
    /// - [RenderError::GridTooSmall] for a zero width or fewer rows than leaves
    /// - [RenderError::GridTooLarge] if `width * height` overflows
    pub fn layout_scaled(
        &self,
        tree: &Tree,
        width: usize,
        height: usize,
    ) -> RenderResult<TreeLayout> {
        let num_leaves = check_dimensions(tree, width, height)?;

        let deepest = max_root_to_leaf(tree)?;
        if deepest.length <= 0.0 {
            return Err(RenderError::ZeroDepth);
        }

        let scale = width as f64 / deepest.length;
        if !scale.is_finite() {
            return Err(RenderError::ZeroDepth);
        }
        let row_height = height / num_leaves;
        let unused_rows = height - row_height * num_leaves;
        if unused_rows > 0 {
            debug!(height, num_leaves, unused_rows, "Leaving bottom rows of grid unused");
        }
        debug!(
            scale,
            row_height,
            deepest_leaf = deepest.leaf,
            max_length = deepest.length,
            "Computed layout parameters"
        );

        let mut state = LayoutState {
            scale,
            row_height,
            next_leaf: 0,
            records: vec![LayoutRecord::default(); tree.num_vertices()],
        };
        state.assign(tree, tree.root_index(), 0.0);

        Ok(TreeLayout {
            records: state.records,
            scale,
            row_height,
            deepest,
        })
    }
}

/// Returns the number of leaves if the grid can hold the tree.
fn check_dimensions(tree: &Tree, width: usize, height: usize) -> RenderResult<usize> {
    if !tree.is_root_set() {
        return Err(RenderError::RootNotSet);
    }
    let num_leaves = tree.num_leaves();
    if num_leaves == 0 {
        return Err(RenderError::NoLeaves);
    }
    if width == 0 || height < num_leaves {
        return Err(RenderError::GridTooSmall {
            width,
            height,
            num_leaves,
        });
    }
    if cell_count(width, height).is_none() {
        return Err(RenderError::GridTooLarge { width, height });
    }
    Ok(num_leaves)
}

/// Accumulators of a single layout call.
struct LayoutState {
    scale: f64,
    row_height: usize,
    next_leaf: usize,
    records: Vec<LayoutRecord>,
}

impl LayoutState {
    /// Assigns coordinates to the subtree at `index`.
    ///
    /// `x_parent` is the parent's `x_self`, i.e. the cumulative branch length
    /// of all strict ancestors times the scale.
    fn assign(&mut self, tree: &Tree, index: VertexIndex, x_parent: f64) {
        let vertex = &tree[index];
        let x_self = x_parent + vertex.length_or_zero() * self.scale;

        let y = if vertex.is_leaf() {
            let y = (self.next_leaf * self.row_height) as f64;
            self.next_leaf += 1;
            y
        } else {
            let mut y = 0.0;
            for &child in vertex.children() {
                self.assign(tree, child, x_self);
                y += 0.5 * self.records[child].y_self;
            }
            y
        };

        trace!(index, x_parent, x_self, y, "Placed vertex");
        self.records[index] = LayoutRecord {
            x_parent,
            x_self,
            y_parent: y,
            y_self: y,
        };
    }
}
