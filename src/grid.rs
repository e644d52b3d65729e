//! Glyph grid produced by a conversion.

/// Rows of glyphs representing one rendered image.
///
/// Every row has the same number of columns and the grid is at least 1x1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    cols: usize,
    rows: Vec<Vec<char>>,
}

impl GlyphGrid {
    /// Create a grid filled with `fill`.
    ///
    /// Dimensions are floored at one.
    pub fn filled(cols: usize, rows: usize, fill: char) -> Self {
        let cols = cols.max(1);
        Self {
            cols,
            rows: vec![vec![fill; cols]; rows.max(1)],
        }
    }

    /// Build a grid from row vectors.
    ///
    /// Returns None if there are no rows, a row is empty, or rows differ in
    /// length.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { cols, rows })
    }

    /// Number of glyph columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Dimensions as (columns, rows).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows.len())
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Get the glyph at the given position.
    ///
    /// Returns None if position is out of bounds.
    #[inline]
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        self.rows.get(row)?.get(col).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, glyph: char) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = glyph;
        }
    }

    /// Flatten the grid into display text.
    ///
    /// Rows are separated by `\n`; there is no trailing newline.
    ///
    /// ```rust
    /// use glyphcast_core::GlyphGrid;
    ///
    /// let grid = GlyphGrid::from_rows(vec![vec!['a', 'b'], vec!['c', 'd']]).unwrap();
    /// assert_eq!(grid.to_text(), "ab\ncd");
    /// ```
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.cols + 1) * self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.extend(row.iter());
        }
        text
    }
}

impl std::fmt::Display for GlyphGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}
