//! Phylotext renders rooted phylogenetic trees as a fixed-size grid of
//! characters, for a quick look at a tree from a terminal or a log stream.
//!
//! Core functionality provided:
//! - Layout: horizontal positions proportional to the cumulative branch
//!   length from the root, leaves on evenly spaced rows, internal vertices
//!   placed from their children.
//! - Painting: branches, sibling connectors, vertex ids and truncated
//!   branch lengths in a character grid; leaf names are listed next to
//!   their rows instead of inside the grid.
//! - Topology-only mode: all branches drawn with unit length.
//! - Tree model: [Tree] uses the arena pattern; vertices may have any number
//!   of children. See [crate::model].
//! - Newick input: parse trees to render from strings or files.
//!   See [crate::newick].
//!
//! Limitations:
//! - Vertices with more than two children are placed by summing half of
//!   each child's row, which is the midpoint only for two children.
//! - Rendering recurses over the tree, so very deep trees need a large stack.
//!
//! # Usage
//! ```
//! use phylotext::{TextView, parse_newick_str};
//!
//! let mut tree = parse_newick_str("((A:1,B:2):1,C:3);").unwrap();
//! let text = TextView::new()
//!     .with_width(30)
//!     .with_height(6)
//!     .render_to_string(&mut tree)
//!     .unwrap();
//! assert_eq!(text.lines().count(), 7);
//! ```

pub mod model;
pub mod newick;
pub mod parser;
pub mod render;

pub use crate::model::Tree;
pub use crate::parser::ParsingError;
pub use crate::render::{RenderError, TextView};

// ============================================================================
// Quick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}

/// Parse a file containing a semicolon-separated list of Newick strings.
///
/// See [`newick::parse_file`] for full documentation.
pub fn parse_newick_file<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    newick::parse_file(path)
}
