//! Fixed-size character buffer the tree is painted into.

use std::fmt;

/// Characters used when painting a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridStyle {
    /// Horizontal branch segment
    pub horizontal: char,
    /// Vertical connector between siblings
    pub vertical: char,
    /// Empty cell
    pub blank: char,
    /// Written between a grid row and the leaf name printed next to it
    pub separator: String,
}

impl Default for GridStyle {
    fn default() -> Self {
        GridStyle {
            horizontal: '-',
            vertical: '|',
            blank: ' ',
            separator: " ".to_string(),
        }
    }
}

/// A `height × width` matrix of characters, stored row-major.
///
/// Writes take signed coordinates and are clamped: anything outside the
/// grid is dropped, so callers never index out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl CharGrid {
    /// Creates a grid filled with `blank`.
    ///
    /// # Panics
    /// Panics if `width * height` overflows; see [cell_count].
    pub fn new(width: usize, height: usize, blank: char) -> Self {
        let Some(len) = cell_count(width, height) else {
            panic!("Grid of {width}x{height} cells is too large");
        };
        CharGrid {
            width,
            height,
            cells: vec![blank; len],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `column` lies within `[0, width)`.
    pub fn contains_column(&self, column: isize) -> bool {
        usize::try_from(column).is_ok_and(|c| c < self.width)
    }

    /// Maps signed coordinates to a cell offset, `None` if outside the grid.
    fn offset(&self, row: isize, column: isize) -> Option<usize> {
        let row = usize::try_from(row).ok().filter(|&r| r < self.height)?;
        let column = usize::try_from(column).ok().filter(|&c| c < self.width)?;
        Some(row * self.width + column)
    }

    /// Returns the character at (`row`, `column`), `None` if outside the grid.
    pub fn get(&self, row: isize, column: isize) -> Option<char> {
        self.offset(row, column).map(|o| self.cells[o])
    }

    /// Writes `ch` at (`row`, `column`).
    ///
    /// # Returns
    /// `false` if the cell lies outside the grid and nothing was written.
    pub fn put(&mut self, row: isize, column: isize, ch: char) -> bool {
        match self.offset(row, column) {
            Some(offset) => {
                self.cells[offset] = ch;
                true
            }
            None => false,
        }
    }

    /// Writes `text` as successive characters starting at (`row`, `column`),
    /// dropping characters that fall outside the grid.
    pub fn put_str(&mut self, row: isize, column: isize, text: &str) {
        if column >= self.columns_end() {
            return;
        }
        for (ch, col) in text.chars().zip(column..) {
            self.put(row, col, ch);
        }
    }

    /// Fills columns `[from, to)` of `row` with `ch`.
    ///
    /// The range is clipped to the grid first, so the cost is bounded by
    /// `width` however far the segment reaches.
    pub fn hline(&mut self, row: isize, from: isize, to: isize, ch: char) {
        for column in from.max(0)..to.min(self.columns_end()) {
            self.put(row, column, ch);
        }
    }

    /// Fills rows `[from, to)` of `column` with `ch`, clipped to the grid.
    pub fn vline(&mut self, column: isize, from: isize, to: isize, ch: char) {
        for row in from.max(0)..to.min(self.rows_end()) {
            self.put(row, column, ch);
        }
    }

    fn columns_end(&self) -> isize {
        isize::try_from(self.width).unwrap_or(isize::MAX)
    }

    fn rows_end(&self) -> isize {
        isize::try_from(self.height).unwrap_or(isize::MAX)
    }

    /// Returns the characters of row `row`.
    ///
    /// # Panics
    /// Panics if `row >= height`.
    pub fn row(&self, row: usize) -> &[char] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Returns an iterator over all rows as strings, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.height).map(|r| self.row(r).iter().collect())
    }
}

/// Number of cells of a `width × height` grid, `None` on overflow.
pub fn cell_count(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
