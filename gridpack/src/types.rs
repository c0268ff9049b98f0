use crate::{
    error::PackError,
    geometry::{Cell, GridRect, Span},
    occupancy::OccupancyMatrix,
};

/// The fixed shape of the grid that items are packed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    columns: usize,
}

impl GridSpec {
    pub fn new(columns: usize) -> Result<Self, PackError> {
        if columns < 1 {
            return Err(PackError::InvalidConfiguration { columns });
        }

        Ok(Self { columns })
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// Which branch of the packer produced a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The item count matched a hand-designed layout. Items flow into the
    /// grid in order, so only spans need to be applied to a rendering surface.
    Curated,

    /// The matrix packer placed every item explicitly.
    Fallback,
}

/// Where a single item landed in the grid.
///
/// `Placement` corresponds 1:1 to the items passed into the packer.
/// `item_index` is the position of the item in the caller's list; it's
/// expected that consumers use it to associate results back to their own
/// objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub(crate) item_index: usize,
    pub(crate) rect: GridRect,
}

impl Placement {
    #[inline]
    pub fn new(item_index: usize, rect: GridRect) -> Self {
        Self { item_index, rect }
    }

    #[inline]
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    #[inline]
    pub fn rect(&self) -> GridRect {
        self.rect
    }

    #[inline]
    pub fn column_start(&self) -> usize {
        self.rect.origin.column
    }

    #[inline]
    pub fn row_start(&self) -> usize {
        self.rect.origin.row
    }

    #[inline]
    pub fn column_span(&self) -> usize {
        self.rect.span.columns
    }

    #[inline]
    pub fn row_span(&self) -> usize {
        self.rect.span.rows
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.rect.span
    }

    #[inline]
    pub fn origin(&self) -> Cell {
        self.rect.origin
    }
}

/// The results from running the packer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackOutput {
    pub(crate) strategy: Strategy,
    pub(crate) columns: usize,
    pub(crate) row_count: usize,
    pub(crate) placements: Vec<Placement>,
}

impl PackOutput {
    pub(crate) fn empty(columns: usize) -> Self {
        Self {
            strategy: Strategy::Fallback,
            columns,
            row_count: 0,
            placements: Vec::new(),
        }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The number of row tracks the grid container should declare.
    ///
    /// For curated layouts this is the row count the layout was designed for.
    /// For the fallback packer it's the index of the first fully empty row of
    /// the occupancy matrix, or the whole matrix height when there is no such
    /// row.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Rebuilds the occupancy of this layout from its placements.
    pub fn coverage(&self) -> Result<OccupancyMatrix, PackError> {
        let mut matrix = OccupancyMatrix::new(self.columns, self.row_count);

        for placement in &self.placements {
            if placement.rect.column_end() > self.columns || !matrix.fill(&placement.rect) {
                return Err(PackError::Overlap {
                    item_index: placement.item_index,
                });
            }
        }

        Ok(matrix)
    }

    /// Draws the layout as text, one line per grid row. Each item is drawn
    /// with a letter derived from its index and empty cells are drawn as `.`.
    pub fn diagram(&self) -> String {
        let rows = self
            .placements
            .iter()
            .map(|placement| placement.rect.row_end())
            .max()
            .unwrap_or(0)
            .max(self.row_count);

        let mut canvas = vec![vec!['.'; self.columns]; rows];
        for placement in &self.placements {
            let label = item_label(placement.item_index);

            for cell in placement.rect.cells() {
                if let Some(slot) = canvas
                    .get_mut(cell.row)
                    .and_then(|row| row.get_mut(cell.column))
                {
                    *slot = label;
                }
            }
        }

        canvas
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn item_label(index: usize) -> char {
    const LABELS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    LABELS.get(index).map(|&byte| byte as char).unwrap_or('#')
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_columns_is_rejected() {
        assert_eq!(
            GridSpec::new(0),
            Err(PackError::InvalidConfiguration { columns: 0 })
        );
        assert_eq!(GridSpec::new(1).map(|spec| spec.columns()), Ok(1));
    }

    #[test]
    fn coverage_reports_overlap() {
        let output = PackOutput {
            strategy: Strategy::Fallback,
            columns: 4,
            row_count: 2,
            placements: vec![
                Placement::new(0, GridRect::new(Cell::new(0, 0), Span::new(2, 2))),
                Placement::new(1, GridRect::new(Cell::new(1, 1), Span::new(2, 1))),
            ],
        };

        assert_eq!(
            output.coverage(),
            Err(PackError::Overlap { item_index: 1 })
        );
    }

    #[test]
    fn labels_run_out_gracefully() {
        assert_eq!(item_label(0), 'a');
        assert_eq!(item_label(26), 'A');
        assert_eq!(item_label(61), '9');
        assert_eq!(item_label(62), '#');
    }
}
