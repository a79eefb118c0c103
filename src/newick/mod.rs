//! Newick format parser for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`Tree`]s.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_file`] - parses a file with one or more trees
//! * [`parse_str`] - parses a single string
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= internal_vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex {',' vertex} ')' [name] [branch_length]`
//! * `leaf ::= name [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted name or a branch_length
//! * Names may be single-quoted, with `''` as escaped quote
//! * Comments are square brackets and can occur anywhere where whitespace is allowed;
//!   extended Newick annotations (`[&...]`) are skipped as comments

mod defs;
mod parser;

pub use self::parser::NewickParser;

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::fs;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a Newick file eagerly and returns all trees.
///
/// # Arguments
/// * `path` - Path to a file with a semicolon-separated list of Newick strings
///
/// # Errors
/// [`ParsingError`] if file reading fails or Newick format is invalid.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let contents = fs::read(path)?;
    parse_bytes(contents)
}

/// Parses all trees from raw bytes, e.g. read from stdin.
pub fn parse_bytes(contents: Vec<u8>) -> Result<Vec<Tree>, ParsingError> {
    let byte_parser = ByteParser::new(contents);
    NewickParser::new().parse_all(byte_parser)
}

/// Parses a single Newick string to obtain a [`Tree`].
///
/// # Example
/// ```
/// use phylotext::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}
