/// The number of grid tracks an item covers along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub columns: usize,
    pub rows: usize,
}

impl Span {
    #[inline]
    pub const fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.columns * self.rows
    }
}

/// A 0-based cell coordinate in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    #[inline]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A rectangle of grid cells anchored at its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub origin: Cell,
    pub span: Span,
}

impl GridRect {
    #[inline]
    pub fn new(origin: Cell, span: Span) -> Self {
        Self { origin, span }
    }

    /// One past the last row covered by this rectangle.
    #[inline]
    pub fn row_end(&self) -> usize {
        self.origin.row + self.span.rows
    }

    /// One past the last column covered by this rectangle.
    #[inline]
    pub fn column_end(&self) -> usize {
        self.origin.column + self.span.columns
    }

    pub fn intersects(&self, other: &GridRect) -> bool {
        self.origin.column < other.column_end()
            && other.origin.column < self.column_end()
            && self.origin.row < other.row_end()
            && other.origin.row < self.row_end()
    }

    /// Every cell covered by this rectangle, in scanline order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let origin = self.origin;
        let span = self.span;

        (origin.row..origin.row + span.rows).flat_map(move |row| {
            (origin.column..origin.column + span.columns).map(move |column| Cell::new(row, column))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let left = GridRect::new(Cell::new(0, 0), Span::new(2, 2));
        let right = GridRect::new(Cell::new(0, 2), Span::new(2, 2));
        let below = GridRect::new(Cell::new(2, 0), Span::new(2, 1));

        assert!(!left.intersects(&right));
        assert!(!left.intersects(&below));
    }

    #[test]
    fn overlapping_rects_intersect() {
        let big = GridRect::new(Cell::new(0, 0), Span::new(4, 2));
        let inner = GridRect::new(Cell::new(1, 3), Span::new(1, 1));
        let straddling = GridRect::new(Cell::new(1, 3), Span::new(3, 1));

        assert!(big.intersects(&inner));
        assert!(inner.intersects(&big));
        assert!(big.intersects(&straddling));
    }

    #[test]
    fn cells_are_in_scanline_order() {
        let rect = GridRect::new(Cell::new(1, 2), Span::new(2, 2));
        let cells: Vec<_> = rect.cells().collect();

        assert_eq!(
            cells,
            vec![
                Cell::new(1, 2),
                Cell::new(1, 3),
                Cell::new(2, 2),
                Cell::new(2, 3),
            ]
        );
    }
}
