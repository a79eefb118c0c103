//! Low-level parsing infrastructure for tree file formats.
//!
//! Provides a byte-level parser over an in-memory buffer together
//! with the error type used by the [Newick parser](crate::newick).

pub mod byte_parser;
pub mod parsing_error;

pub use parsing_error::ParsingError;
