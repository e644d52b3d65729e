//! Grid sizing and cell boundary calculations.

/// A half-open pixel rectangle `[x0, x1) x [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CellRect {
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Clamp the rectangle to an image of the given size.
    ///
    /// A rectangle that lies outside the image collapses to an empty one.
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let x0 = self.x0.min(width);
        let y0 = self.y0.min(height);
        Self {
            x0,
            y0,
            x1: self.x1.min(width).max(x0),
            y1: self.y1.min(height).max(y0),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }
}

/// Number of glyph columns and rows needed to cover an image.
///
/// Each dimension is the ceiling of image size over cell size, with a
/// floor of one.
///
/// ## Example
///
/// ```rust
/// use glyphcast_core::grid_dimensions;
///
/// // 100x50 image, 10x20 cells
/// assert_eq!(grid_dimensions(100, 50, 10, 20), (10, 3));
/// ```
pub fn grid_dimensions(img_width: u32, img_height: u32, char_width: u32, char_height: u32) -> (u32, u32) {
    let cols = img_width.div_ceil(char_width.max(1));
    let rows = img_height.div_ceil(char_height.max(1));
    (cols.max(1), rows.max(1))
}

/// Pixel boundaries of every cell along the grid.
///
/// Cells are `image_extent / cells` pixels wide. Cell ends are clamped to
/// the image extent; remainder pixels past the last full cell are not
/// assigned to any cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellLayout {
    pub img_width: u32,
    pub img_height: u32,
    pub cols: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl CellLayout {
    pub fn new(img_width: u32, img_height: u32, cols: u32, rows: u32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            img_width,
            img_height,
            cols,
            rows,
            cell_width: (img_width / cols).max(1),
            cell_height: (img_height / rows).max(1),
        }
    }

    /// Pixel rectangle of the cell at (`row`, `col`).
    pub fn cell(&self, row: u32, col: u32) -> CellRect {
        let (x0, x1) = span(col, self.cell_width, self.img_width);
        let (y0, y1) = span(row, self.cell_height, self.img_height);
        CellRect { x0, y0, x1, y1 }
    }
}

fn span(index: u32, size: u32, extent: u32) -> (u32, u32) {
    let start = index.saturating_mul(size).min(extent);
    let end = start.saturating_add(size).min(extent);
    (start, end)
}
