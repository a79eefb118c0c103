use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;
use tracing::{debug, trace};

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick format phylogenetic [Tree]s.
///
/// Supports parsing single or multiple Newick trees from a [ByteParser].
/// Vertices may have any positive number of children; internal vertices
/// and the root may carry a name after their closing parenthesis.
///
/// # Configuration
/// * `with_num_leaves(num_leaves)` - Can be configured with number of leaves
///   in trees to parse, otherwise it is inferred from the first parsed tree
///   and then reused as capacity hint.
///
/// # Example
/// ```
/// use phylotext::newick::NewickParser;
/// use phylotext::parser::byte_parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(A:1.0,B:1.0,C:2.0)R;");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.root().name(), Some("R"));
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    know_num_leaves: bool,
    num_leaves: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NewickParser {
    /// Creates a new `NewickParser` with unknown number of leaves.
    pub fn new() -> Self {
        Self {
            know_num_leaves: false,
            num_leaves: DEFAULT_NUM_LEAVES_GUESS,
        }
    }

    /// Sets the expected number of leaves in the trees, used to pre-allocate.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves = num_leaves;
        self.know_num_leaves = true;
        self
    }

    /// Parses a single Newick tree from the given [ByteParser],
    /// consuming the terminating `;`.
    ///
    /// # Errors
    /// Returns [ParsingError] if the Newick string is invalid.
    pub fn parse_str(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Tree, ParsingError> {
        let mut tree = Tree::new(self.num_leaves);

        self.parse_root(parser, &mut tree)?;

        if !self.know_num_leaves {
            self.num_leaves = tree.num_leaves();
            self.know_num_leaves = true;
        }

        trace!(
            num_vertices = tree.num_vertices(),
            num_leaves = tree.num_leaves(),
            "Parsed newick tree"
        );
        Ok(tree)
    }

    /// Parses all trees until EOF.
    ///
    /// # Errors
    /// Returns [ParsingError] on the first invalid tree.
    pub fn parse_all(
        &mut self,
        mut parser: ByteParser,
    ) -> Result<Vec<Tree>, ParsingError> {
        let mut trees = Vec::new();
        while let Some(tree) = self.next_tree(&mut parser)? {
            trees.push(tree);
        }

        debug!(num_trees = trees.len(), "Parsed all newick trees");
        Ok(trees)
    }

    /// Parses the next tree, or returns `None` if only whitespace and
    /// comments remain.
    pub fn next_tree(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Option<Tree>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Ok(None);
        }
        self.parse_str(parser).map(Some)
    }

    /// Parses root of tree and adds it to tree:
    /// - `(children)[name][:branch_length];`
    fn parse_root(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.peek_is(b'(') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected '(' at start of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let children = self.parse_children(parser, tree)?;
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected ';' at end of tree but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let root = tree.add_root(children, branch_length);
        if !name.is_empty() {
            tree[root].set_name(name);
        }

        Ok(())
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index.
    fn parse_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex `(children)[name][:branch_length]`,
    /// adds it to tree, and returns its index.
    fn parse_internal_vertex(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let children = self.parse_children(parser, tree)?;
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        let index = tree.add_internal_vertex(children, branch_length);
        if !name.is_empty() {
            tree[index].set_name(name);
        }

        Ok(index)
    }

    /// Parses comma-separated children `(v1, v2, ..., vk)` and returns their indices.
    ///
    /// Expects parser at opening `(`.
    fn parse_children(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        if !parser.consume_if(b'(') {
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!(
                    "Expected '(' before children but found {:?}",
                    parser.peek().map(|b| b as char)
                ),
            ));
        }

        let mut children = vec![self.parse_vertex(parser, tree)?];
        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b',') {
                children.push(self.parse_vertex(parser, tree)?);
            } else if parser.consume_if(b')') {
                break;
            } else if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            } else {
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!(
                        "Expected ',' or ')' after child but found {:?}",
                        parser.peek().map(|b| b as char)
                    ),
                ));
            }
        }

        Ok(children)
    }

    /// Parses leaf vertex `name[:branch_length]` and adds it to tree.
    fn parse_leaf(
        &mut self,
        parser: &mut ByteParser,
        tree: &mut Tree,
    ) -> Result<VertexIndex, ParsingError> {
        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(branch_length, name))
    }

    /// Parses optional branch length `[:number]`, supporting scientific
    /// notation (e.g., `1.5e-10`).
    ///
    /// # Returns
    /// - [BranchLength] if found branch length and was able to parse it
    /// - `None` if found no branch length
    /// - [ParsingError] if value is not a non-negative finite number
    fn parse_branch_length(
        &mut self,
        parser: &mut ByteParser,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(b as char);
                parser.next();
            } else {
                break;
            }
        }

        branch_length_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::try_new)
            .map(Some)
            .ok_or_else(|| ParsingError::invalid_branch_length(parser, branch_length_str))
    }
}
