//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

/// Integer identifier of a vertex, as displayed in the text view.
pub type VertexId = usize;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has one or more children, no parent
/// - **Internal**: Has parent and one or more children, might have a name
/// - **Leaf**: Has no children, has a display name (possibly empty)
///
/// # Invariants
/// - `index` is index in arena
/// - `branch_length` is non-negative (enforced by [BranchLength]); might not be set
/// - Internal vertices and Leaf have `parent` as [VertexIndex] of parent in arena;
///   `NO_PARENT_SET = usize::MAX` only during construction
/// - `children` keeps the order in which the children were given, which is
///   also the top-to-bottom order when the tree gets drawn
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent, has children)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Displayed identifier
        id: VertexId,
        /// Optional name, e.g. "R" in `(A,B)R;`
        name: Option<String>,
        /// Ordered indices of the child vertices
        children: Vec<VertexIndex>,
        /// Length of a root edge; never used for scaling
        branch_length: Option<BranchLength>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Displayed identifier
        id: VertexId,
        /// Optional name (e.g. a clade label or support value)
        name: Option<String>,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Ordered indices of the child vertices
        children: Vec<VertexIndex>,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
    /// Leaf vertex (has parent and name, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Displayed identifier
        id: VertexId,
        /// Display name of the taxon
        name: String,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Distance to parent node (optional, non-negative if present)
        branch_length: Option<BranchLength>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Ordered child indices
    /// * `branch_length` - Optional root edge length
    pub fn new_root(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Root {
            index,
            id: index,
            name: None,
            children,
            branch_length,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Ordered child indices
    /// * `branch_length` - Distance to parent node (non-negative)
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex::Internal {
            index,
            id: index,
            name: None,
            parent: NO_PARENT_SET,
            children,
            branch_length,
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent node (non-negative)
    /// * `name` - Display name of this leaf
    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, name: String) -> Self {
        Vertex::Leaf {
            index,
            id: index,
            name,
            parent: NO_PARENT_SET,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. }
            | Vertex::Internal { index, .. }
            | Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the integer identifier of this vertex (defaults to its index).
    pub fn id(&self) -> VertexId {
        match self {
            Vertex::Root { id, .. } | Vertex::Internal { id, .. } | Vertex::Leaf { id, .. } => *id,
        }
    }

    /// Overrides the identifier drawn for this vertex.
    pub fn set_id(&mut self, new_id: VertexId) {
        match self {
            Vertex::Root { id, .. } | Vertex::Internal { id, .. } | Vertex::Leaf { id, .. } => {
                *id = new_id
            }
        }
    }

    /// Returns the name of this vertex, if any.
    ///
    /// Leaves always have a name (possibly empty), root and internal vertices
    /// only if one was given.
    pub fn name(&self) -> Option<&str> {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } => name.as_deref(),
            Vertex::Leaf { name, .. } => Some(name),
        }
    }

    /// Sets the name of this vertex.
    pub fn set_name(&mut self, new_name: String) {
        match self {
            Vertex::Root { name, .. } | Vertex::Internal { name, .. } => *name = Some(new_name),
            Vertex::Leaf { name, .. } => *name = new_name,
        }
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length().is_some()
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length,
        }
    }

    /// Returns the branch length as plain value, treating a missing length as `0`.
    pub fn length_or_zero(&self) -> f64 {
        self.branch_length().map_or(0.0, |bl| *bl)
    }

    /// Sets (or replaces) the branch length of this vertex.
    pub fn set_branch_length(&mut self, length: BranchLength) {
        match self {
            Vertex::Root { branch_length, .. }
            | Vertex::Internal { branch_length, .. }
            | Vertex::Leaf { branch_length, .. } => *branch_length = Some(length),
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns the ordered children; empty for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Sets new parent for non-root vertex.
    ///
    /// # Panics
    /// Panics if called on root.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        match self {
            Vertex::Root { .. } => panic!("Cannot set parent on root vertex"),
            Vertex::Internal { parent: p, .. } | Vertex::Leaf { parent: p, .. } => *p = parent,
        }
    }

    /// Returns the index of parent if this a non-root vertex, else `None`.
    ///
    /// Note that parent might not be set yet during construction.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                (*parent != NO_PARENT_SET).then_some(*parent)
            }
            Vertex::Root { .. } => None,
        }
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent_index().is_some()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Unit length, used to collapse a tree to its topology.
    pub const UNIT: BranchLength = BranchLength(1.0);

    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {length}");
        assert!(length.is_finite(), "Branch length must be finite, got {length}");
        BranchLength(length)
    }

    /// Creates a new branch length, returning `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let mut leaf = Vertex::new_leaf(3, Some(BranchLength::new(0.5)), "A".to_string());
        assert!(leaf.is_leaf());
        assert_eq!(leaf.id(), 3);
        assert_eq!(leaf.name(), Some("A"));
        assert!(leaf.children().is_empty());
        assert!(!leaf.has_parent());

        leaf.set_parent(7);
        leaf.set_id(42);
        assert_eq!(leaf.parent_index(), Some(7));
        assert_eq!(leaf.id(), 42);
    }

    #[test]
    fn test_missing_length_counts_as_zero() {
        let internal = Vertex::new_internal(2, vec![0, 1], None);
        assert!(!internal.has_branch_length());
        assert_eq!(internal.length_or_zero(), 0.0);
        assert_eq!(internal.name(), None);
    }

    #[test]
    #[should_panic]
    fn test_set_parent_on_root_panics() {
        let mut root = Vertex::new_root(0, vec![1, 2], None);
        root.set_parent(5);
    }

    #[test]
    fn test_try_new_rejects_negative() {
        assert!(BranchLength::try_new(-0.1).is_none());
        assert!(BranchLength::try_new(f64::NAN).is_none());
        assert_eq!(*BranchLength::try_new(2.5).unwrap(), 2.5);
    }
}
