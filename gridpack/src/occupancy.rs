use crate::geometry::{Cell, GridRect};

/// Tracks which cells of a fixed-width grid are covered by placed items.
///
/// Rows are stored contiguously in scanline order. The column count never
/// changes, but rows can be appended as packing runs out of room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMatrix {
    columns: usize,
    cells: Vec<bool>,
}

impl OccupancyMatrix {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            cells: vec![false; columns * rows],
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.cells.len() / self.columns
        }
    }

    pub fn push_empty_row(&mut self) {
        self.cells.extend(std::iter::repeat(false).take(self.columns));
    }

    /// Out-of-bounds cells are reported as unoccupied.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.index(cell)
            .map(|index| self.cells[index])
            .unwrap_or(false)
    }

    /// The first unoccupied cell in scanline order, if any.
    pub fn next_open_cell(&self) -> Option<Cell> {
        self.cells
            .iter()
            .position(|occupied| !occupied)
            .map(|index| Cell::new(index / self.columns, index % self.columns))
    }

    /// Whether `rect` lies entirely inside the current bounds and covers no
    /// occupied cell.
    pub fn can_place(&self, rect: &GridRect) -> bool {
        if rect.row_end() > self.rows() || rect.column_end() > self.columns {
            return false;
        }

        rect.cells().all(|cell| !self.is_occupied(cell))
    }

    /// Marks every cell of `rect` as occupied, growing rows if the rectangle
    /// extends past the bottom. Returns `false` if any cell was already taken.
    /// A rectangle reaching past the last column is rejected without marking
    /// anything.
    pub fn fill(&mut self, rect: &GridRect) -> bool {
        if rect.column_end() > self.columns {
            return false;
        }

        while rect.row_end() > self.rows() {
            self.push_empty_row();
        }

        let mut clean = true;
        for cell in rect.cells() {
            let index = cell.row * self.columns + cell.column;
            clean &= !self.cells[index];
            self.cells[index] = true;
        }

        clean
    }

    /// Index of the first row that has no occupied cells.
    pub fn first_empty_row(&self) -> Option<usize> {
        (0..self.rows()).find(|&row| self.row_cells(row).iter().all(|occupied| !occupied))
    }

    pub fn row_cells(&self, row: usize) -> &[bool] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if cell.column < self.columns && cell.row < self.rows() {
            Some(cell.row * self.columns + cell.column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::Span;

    #[test]
    fn open_cell_scans_rows_first() {
        let mut matrix = OccupancyMatrix::new(3, 2);
        assert_eq!(matrix.next_open_cell(), Some(Cell::new(0, 0)));

        matrix.fill(&GridRect::new(Cell::new(0, 0), Span::new(2, 1)));
        assert_eq!(matrix.next_open_cell(), Some(Cell::new(0, 2)));

        matrix.fill(&GridRect::new(Cell::new(0, 2), Span::new(1, 2)));
        assert_eq!(matrix.next_open_cell(), Some(Cell::new(1, 0)));
    }

    #[test]
    fn full_matrix_has_no_open_cell() {
        let mut matrix = OccupancyMatrix::new(2, 1);
        matrix.fill(&GridRect::new(Cell::new(0, 0), Span::new(2, 1)));

        assert_eq!(matrix.next_open_cell(), None);

        matrix.push_empty_row();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.next_open_cell(), Some(Cell::new(1, 0)));
    }

    #[test]
    fn can_place_respects_bounds_and_occupancy() {
        let mut matrix = OccupancyMatrix::new(4, 2);
        matrix.fill(&GridRect::new(Cell::new(0, 1), Span::new(1, 1)));

        assert!(!matrix.can_place(&GridRect::new(Cell::new(0, 0), Span::new(2, 1))));
        assert!(matrix.can_place(&GridRect::new(Cell::new(0, 2), Span::new(2, 2))));
        assert!(!matrix.can_place(&GridRect::new(Cell::new(0, 3), Span::new(2, 1))));
        assert!(!matrix.can_place(&GridRect::new(Cell::new(1, 0), Span::new(1, 2))));
    }

    #[test]
    fn fill_grows_rows_and_reports_overlap() {
        let mut matrix = OccupancyMatrix::new(2, 1);

        assert!(matrix.fill(&GridRect::new(Cell::new(0, 0), Span::new(1, 3))));
        assert_eq!(matrix.rows(), 3);

        assert!(!matrix.fill(&GridRect::new(Cell::new(2, 0), Span::new(2, 1))));
    }

    #[test]
    fn fill_rejects_rects_past_the_last_column() {
        let mut matrix = OccupancyMatrix::new(3, 1);

        assert!(!matrix.fill(&GridRect::new(Cell::new(0, 2), Span::new(2, 1))));
        assert_eq!(matrix.next_open_cell(), Some(Cell::new(0, 0)));
        assert_eq!(matrix.first_empty_row(), Some(0));
    }

    #[test]
    fn first_empty_row() {
        let mut matrix = OccupancyMatrix::new(3, 4);
        assert_eq!(matrix.first_empty_row(), Some(0));

        matrix.fill(&GridRect::new(Cell::new(0, 0), Span::new(1, 2)));
        assert_eq!(matrix.first_empty_row(), Some(2));

        matrix.fill(&GridRect::new(Cell::new(2, 2), Span::new(1, 2)));
        assert_eq!(matrix.first_empty_row(), None);
    }
}
