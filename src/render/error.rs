//! Error type of the layout-and-rendering engine.

use thiserror::Error;

/// Errors raised while laying out or rendering a tree.
///
/// Degenerate input is reported before any coordinate is computed; nothing
/// is retried or recovered.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Tree has no root set")]
    RootNotSet,

    #[error("Tree has no leaves")]
    NoLeaves,

    #[error("Maximum root-to-leaf length is zero, cannot scale tree to grid width")]
    ZeroDepth,

    /// Zero width, or fewer rows than leaves.
    ///
    /// A height that merely is not a multiple of the leaf count is truncated
    /// silently, but fewer rows than leaves is rejected on purpose: leaves
    /// would share rows and the leaf-row map would lose names.
    #[error("Grid of {width}x{height} cannot hold a tree with {num_leaves} leaves")]
    GridTooSmall {
        width: usize,
        height: usize,
        num_leaves: usize,
    },

    #[error("Grid of {width}x{height} cells is too large")]
    GridTooLarge { width: usize, height: usize },

    #[error("Failed to write text view: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
