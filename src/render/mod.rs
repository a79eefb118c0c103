//! Layout-and-rendering engine of the quick text view.
//!
//! Rendering one tree runs through four steps:
//! 1. [max_root_to_leaf] finds the longest root-to-leaf path, the scale reference
//! 2. [LayoutEngine] assigns scaled grid coordinates to every vertex
//! 3. [GridRenderer] paints branches, ids and branch lengths into a [CharGrid]
//!    and collects the row of every leaf in [LeafRows]
//! 4. [TextView] drives the above and writes grid rows plus leaf names to a sink
//!
//! All steps are recursive over the tree; acyclicity is a precondition
//! (trees built with [Tree](crate::model::Tree) or parsed from Newick are
//! acyclic, [`Tree::is_valid`](crate::model::Tree::is_valid) checks it).

pub mod error;
pub mod grid;
pub mod layout;
pub mod metrics;
pub mod renderer;
pub mod text_view;

pub use error::{RenderError, RenderResult};
pub use grid::{CharGrid, GridStyle};
pub use layout::{LayoutEngine, LayoutRecord, TreeLayout};
pub use metrics::{RootToLeaf, max_root_to_leaf};
pub use renderer::{GridRenderer, LeafRows};
pub use text_view::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TextRender, TextView};
