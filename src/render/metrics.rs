//! Tree metrics used as scale reference for the layout.

use crate::model::{Tree, VertexIndex};
use crate::render::error::{RenderError, RenderResult};

/// Longest root-to-leaf path of a tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootToLeaf {
    /// Sum of branch lengths from (but not including) the root to `leaf`
    pub length: f64,
    /// First leaf, in left-to-right order, attaining `length`
    pub leaf: VertexIndex,
}

/// Computes the maximum cumulative branch length from the root to any leaf.
///
/// The root's own branch length is never added. Leaves are compared with
/// strict greater-than in depth-first, left-to-right order, so on ties the
/// leftmost leaf is kept. Missing branch lengths count as `0`.
///
/// # Errors
/// [RenderError::RootNotSet] for an unfinished tree and
/// [RenderError::NoLeaves] if no leaf is reachable from the root.
///
/// # Example
/// ```
/// use phylotext::newick::parse_str;
/// use phylotext::render::max_root_to_leaf;
///
/// let tree = parse_str("(A:1,B:2)R:0;").unwrap();
/// let deepest = max_root_to_leaf(&tree).unwrap();
/// assert_eq!(deepest.length, 2.0);
/// assert_eq!(tree[deepest.leaf].name(), Some("B"));
/// ```
pub fn max_root_to_leaf(tree: &Tree) -> RenderResult<RootToLeaf> {
    if !tree.is_root_set() {
        return Err(RenderError::RootNotSet);
    }

    let mut best = None;
    for &child in tree.root().children() {
        visit(tree, child, 0.0, &mut best);
    }

    best.ok_or(RenderError::NoLeaves)
}

fn visit(tree: &Tree, index: VertexIndex, ancestors: f64, best: &mut Option<RootToLeaf>) {
    let vertex = &tree[index];
    let length = ancestors + vertex.length_or_zero();

    if vertex.is_leaf() {
        if best.is_none_or(|b| length > b.length) {
            *best = Some(RootToLeaf { length, leaf: index });
        }
        return;
    }

    for &child in vertex.children() {
        visit(tree, child, length, best);
    }
}
