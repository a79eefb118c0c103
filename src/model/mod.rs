//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Vertices may have any number of children.
//!
//! # Building trees
//! Trees are built bottom-up via [`Tree::add_leaf`],
//! [`Tree::add_internal_vertex`] and [`Tree::add_root`], or parsed from
//! Newick strings with [crate::newick].

pub mod tree;
pub mod vertex;

pub use tree::Tree;
pub use tree::VertexIndex;
pub use vertex::BranchLength;
pub use vertex::Vertex;
pub use vertex::VertexId;
