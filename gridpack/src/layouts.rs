//! Static layout tables used by [`BentoPacker`](crate::BentoPacker).

use crate::{
    geometry::{GridRect, Span},
    occupancy::OccupancyMatrix,
};

/// A hand-designed tiling for one exact item count.
///
/// The spans are applied to items in order and placed with row-flow
/// semantics: each item lands on the first open cell in scanline order. A
/// curated layout is expected to cover `columns x rows` cells exactly; see
/// [`CuratedLayout::tiles_exactly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuratedLayout {
    pub columns: usize,
    pub rows: usize,
    pub spans: &'static [Span],
}

impl CuratedLayout {
    #[inline]
    pub fn item_count(&self) -> usize {
        self.spans.len()
    }

    /// Flows the spans into a `columns x rows` grid and checks that every cell
    /// is covered exactly once.
    pub fn tiles_exactly(&self) -> bool {
        let area: usize = self.spans.iter().map(Span::area).sum();
        if area != self.columns * self.rows {
            return false;
        }

        let mut matrix = OccupancyMatrix::new(self.columns, self.rows);

        for span in self.spans {
            let anchor = match matrix.next_open_cell() {
                Some(cell) => cell,
                None => return false,
            };

            let rect = GridRect::new(anchor, *span);
            if !matrix.can_place(&rect) {
                return false;
            }
            matrix.fill(&rect);
        }

        matrix.next_open_cell().is_none()
    }
}

/// Three small tiles, a wide feature block beside a square, then three more
/// small tiles.
const EIGHT_ITEMS: CuratedLayout = CuratedLayout {
    columns: 6,
    rows: 4,
    spans: &[
        Span::new(2, 1),
        Span::new(2, 1),
        Span::new(2, 1),
        Span::new(4, 2),
        Span::new(2, 2),
        Span::new(2, 1),
        Span::new(2, 1),
        Span::new(2, 1),
    ],
};

/// Every registered curated layout. Item counts not listed here go through the
/// fallback packer.
pub static CURATED_LAYOUTS: &[CuratedLayout] = &[EIGHT_ITEMS];

/// Finds the curated layout designed for `item_count` items on a grid with
/// `columns` columns.
///
/// A layout only matches grids exactly as wide as it was designed for. Eight
/// items on a 4- or 12-column grid find nothing here and are packed by the
/// fallback instead, which keeps every placement inside the grid's columns.
pub fn find_curated_layout(
    layouts: &'static [CuratedLayout],
    item_count: usize,
    columns: usize,
) -> Option<&'static CuratedLayout> {
    layouts
        .iter()
        .find(|layout| layout.item_count() == item_count && layout.columns == columns)
}

/// A cyclic list of shapes the fallback packer tries, starting from a
/// rotating offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePattern {
    spans: &'static [Span],
}

impl TilePattern {
    #[inline]
    pub fn spans(&self) -> &'static [Span] {
        self.spans
    }

    /// The candidate spans in the order they should be tried for an item
    /// packed with the given rotation.
    pub fn candidates(&self, rotation: usize) -> impl Iterator<Item = Span> + '_ {
        let len = self.spans.len();

        (0..len).map(move |offset| self.spans[(rotation + offset) % len])
    }
}

pub static DEFAULT_TILE_PATTERN: TilePattern = TilePattern {
    spans: &[
        Span::new(2, 2),
        Span::new(2, 1),
        Span::new(2, 1),
        Span::new(3, 2),
        Span::new(3, 1),
    ],
};
