use crate::{
    error::PackError,
    geometry::{Cell, GridRect, Span},
    layouts::{
        find_curated_layout, CuratedLayout, TilePattern, CURATED_LAYOUTS, DEFAULT_TILE_PATTERN,
    },
    occupancy::OccupancyMatrix,
    types::{GridSpec, PackOutput, Placement, Strategy},
};

/// Packs items into a fixed-column grid without leaving gaps.
///
/// Item counts with a registered [`CuratedLayout`] get that layout. Every
/// other count goes through a matrix packer that always places the next item
/// on the first open cell in scanline order, rotating through a
/// [`TilePattern`] so that neighbouring items get different shapes.
#[derive(Debug, Clone)]
pub struct BentoPacker {
    spec: GridSpec,
    curated: &'static [CuratedLayout],
    tiles: TilePattern,
}

impl BentoPacker {
    pub fn new(columns: usize) -> Result<Self, PackError> {
        Ok(Self::with_spec(GridSpec::new(columns)?))
    }

    pub fn with_spec(spec: GridSpec) -> Self {
        Self {
            spec,
            curated: CURATED_LAYOUTS,
            tiles: DEFAULT_TILE_PATTERN,
        }
    }

    /// Replaces the table of curated layouts consulted before falling back to
    /// the matrix packer. Pass an empty slice to always use the fallback.
    ///
    /// Every layout must cover its grid exactly; see
    /// [`CuratedLayout::tiles_exactly`].
    pub fn curated_layouts(
        mut self,
        layouts: &'static [CuratedLayout],
    ) -> Result<Self, PackError> {
        if let Some(layout) = layouts.iter().find(|layout| !layout.tiles_exactly()) {
            return Err(PackError::MalformedLayout {
                item_count: layout.item_count(),
                columns: layout.columns,
                rows: layout.rows,
            });
        }

        self.curated = layouts;
        Ok(self)
    }

    #[inline]
    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Computes a placement for every item. Only the number of items matters;
    /// placements refer back to items by their position in `items`.
    pub fn pack<I: IntoIterator>(&self, items: I) -> PackOutput {
        self.pack_count(items.into_iter().count())
    }

    pub fn pack_count(&self, item_count: usize) -> PackOutput {
        let columns = self.spec.columns();

        if item_count == 0 {
            log::trace!("Nothing to pack");
            return PackOutput::empty(columns);
        }

        match find_curated_layout(self.curated, item_count, columns) {
            Some(layout) => {
                log::debug!("Using curated layout for {} items", item_count);
                Self::pack_curated(layout)
            }
            None => {
                log::debug!(
                    "No curated layout for {} items on {} columns, packing matrix",
                    item_count,
                    columns
                );
                self.pack_fallback(item_count)
            }
        }
    }

    fn pack_curated(layout: &CuratedLayout) -> PackOutput {
        let mut matrix = OccupancyMatrix::new(layout.columns, layout.rows);
        let mut placements = Vec::with_capacity(layout.item_count());

        for (item_index, span) in layout.spans.iter().copied().enumerate() {
            let anchor = next_open_cell_growing(&mut matrix);
            let rect = GridRect::new(anchor, span);
            matrix.fill(&rect);

            placements.push(Placement::new(item_index, rect));
        }

        PackOutput {
            strategy: Strategy::Curated,
            columns: layout.columns,
            row_count: layout.rows,
            placements,
        }
    }

    fn pack_fallback(&self, item_count: usize) -> PackOutput {
        let columns = self.spec.columns();
        let estimated_rows = (item_count + 1) / 2 * 2;

        let mut matrix = OccupancyMatrix::new(columns, estimated_rows);
        let mut placements = Vec::with_capacity(item_count);

        for item_index in 0..item_count {
            let anchor = next_open_cell_growing(&mut matrix);

            // The rotation advances once per item whether or not its preferred
            // shape fit.
            let span = self
                .tiles
                .candidates(item_index)
                .find(|&span| matrix.can_place(&GridRect::new(anchor, span)))
                .unwrap_or_else(|| {
                    log::trace!("No tile fits at {:?}, placing 1x1", anchor);
                    Span::new(1, 1)
                });

            let rect = GridRect::new(anchor, span);
            matrix.fill(&rect);

            log::trace!(
                "Placed item {} at {:?} spanning {}x{}",
                item_index,
                anchor,
                span.columns,
                span.rows
            );

            placements.push(Placement::new(item_index, rect));
        }

        let row_count = match matrix.first_empty_row() {
            Some(0) | None => matrix.rows(),
            Some(row) => row,
        };

        log::trace!(
            "Finished packing {} items into {} of {} rows",
            item_count,
            row_count,
            matrix.rows()
        );

        PackOutput {
            strategy: Strategy::Fallback,
            columns,
            row_count,
            placements,
        }
    }
}

fn next_open_cell_growing(matrix: &mut OccupancyMatrix) -> Cell {
    loop {
        if let Some(cell) = matrix.next_open_cell() {
            return cell;
        }

        log::trace!("Grid is full at {} rows, adding a row", matrix.rows());
        matrix.push_empty_row();
    }
}

/// Packs `items` into a grid with `columns` columns using the registered
/// curated layouts and the default tile pattern.
pub fn pack<I: IntoIterator>(items: I, columns: usize) -> Result<PackOutput, PackError> {
    Ok(BentoPacker::new(columns)?.pack(items))
}

#[cfg(test)]
mod test {
    use super::*;

    fn fallback_packer(columns: usize) -> BentoPacker {
        BentoPacker::new(columns).unwrap().curated_layouts(&[]).unwrap()
    }

    fn spans(output: &PackOutput) -> Vec<(usize, usize)> {
        output
            .placements()
            .iter()
            .map(|placement| {
                let span = placement.span();
                (span.columns, span.rows)
            })
            .collect()
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let output = pack(Vec::<()>::new(), 6).unwrap();

        assert!(output.is_empty());
        assert_eq!(output.row_count(), 0);
    }

    #[test]
    fn zero_columns_fails_fast() {
        assert_eq!(
            pack(0..3, 0).unwrap_err(),
            PackError::InvalidConfiguration { columns: 0 }
        );
    }

    #[test]
    fn first_fallback_item_is_a_square_in_the_corner() {
        let output = pack(0..5, 6).unwrap();

        assert_eq!(output.strategy(), Strategy::Fallback);
        let first = output.placements()[0];
        assert_eq!(first.item_index(), 0);
        assert_eq!(first.column_start(), 0);
        assert_eq!(first.row_start(), 0);
        assert_eq!(first.column_span(), 2);
        assert_eq!(first.row_span(), 2);
    }

    #[test]
    fn five_items() {
        let output = pack(0..5, 6).unwrap();

        assert_eq!(spans(&output), vec![(2, 2), (2, 1), (2, 1), (3, 2), (1, 1)]);
        assert_eq!(output.row_count(), 3);
        insta::assert_snapshot!(output.diagram(), @r###"
        aabbcc
        aaddde
        ..ddd.
        "###);
    }

    #[test]
    fn seven_items() {
        let output = pack(0..7, 6).unwrap();

        assert_eq!(output.row_count(), 4);
        insta::assert_snapshot!(output.diagram(), @r###"
        aabbcc
        aaddde
        ffdddg
        ff....
        "###);
    }

    #[test]
    fn eight_items_use_curated_layout() {
        let output = pack(0..8, 6).unwrap();

        assert_eq!(output.strategy(), Strategy::Curated);
        assert_eq!(
            spans(&output),
            vec![(2, 1), (2, 1), (2, 1), (4, 2), (2, 2), (2, 1), (2, 1), (2, 1)]
        );
        assert_eq!(output.row_count(), 4);

        let origins: Vec<_> = output.placements().iter().map(Placement::origin).collect();
        assert_eq!(
            origins,
            vec![
                Cell::new(0, 0),
                Cell::new(0, 2),
                Cell::new(0, 4),
                Cell::new(1, 0),
                Cell::new(1, 4),
                Cell::new(3, 0),
                Cell::new(3, 2),
                Cell::new(3, 4),
            ]
        );

        insta::assert_snapshot!(output.diagram(), @r###"
        aabbcc
        ddddee
        ddddee
        ffgghh
        "###);
    }

    #[test]
    fn eight_items_on_other_widths_fall_back() {
        let output = pack(0..8, 4).unwrap();

        assert_eq!(output.strategy(), Strategy::Fallback);
        assert_eq!(output.placements().len(), 8);
    }

    #[test]
    fn custom_curated_layouts_are_used() {
        const FOUR_ITEMS: &[Span] = &[
            Span::new(1, 2),
            Span::new(1, 1),
            Span::new(1, 1),
            Span::new(2, 1),
        ];
        static LAYOUTS: &[CuratedLayout] = &[CuratedLayout {
            columns: 3,
            rows: 2,
            spans: FOUR_ITEMS,
        }];

        let packer = BentoPacker::new(3).unwrap().curated_layouts(LAYOUTS).unwrap();
        assert_eq!(packer.spec().columns(), 3);

        let output = packer.pack_count(4);
        assert_eq!(output.strategy(), Strategy::Curated);
        insta::assert_snapshot!(output.diagram(), @r###"
        abc
        add
        "###);
    }

    #[test]
    fn malformed_curated_layouts_are_rejected() {
        const TOO_WIDE: &[Span] = &[Span::new(4, 2), Span::new(2, 2)];
        const OVERLAPPING: &[Span] = &[Span::new(1, 1), Span::new(2, 1), Span::new(1, 1)];
        static TOO_WIDE_LAYOUTS: &[CuratedLayout] = &[CuratedLayout {
            columns: 3,
            rows: 4,
            spans: TOO_WIDE,
        }];
        static OVERLAPPING_LAYOUTS: &[CuratedLayout] = &[CuratedLayout {
            columns: 2,
            rows: 2,
            spans: OVERLAPPING,
        }];

        assert_eq!(
            BentoPacker::new(3)
                .unwrap()
                .curated_layouts(TOO_WIDE_LAYOUTS)
                .unwrap_err(),
            PackError::MalformedLayout {
                item_count: 2,
                columns: 3,
                rows: 4,
            }
        );
        assert_eq!(
            BentoPacker::new(2)
                .unwrap()
                .curated_layouts(OVERLAPPING_LAYOUTS)
                .unwrap_err(),
            PackError::MalformedLayout {
                item_count: 3,
                columns: 2,
                rows: 2,
            }
        );
    }

    #[test]
    fn single_item_keeps_whole_matrix() {
        // Both estimated rows are touched by the first square, so no row is
        // empty and the full matrix height is kept.
        let output = pack(0..1, 6).unwrap();

        assert_eq!(output.row_count(), 2);
    }

    #[test]
    fn single_column_degenerates_to_unit_tiles() {
        let output = pack(0..3, 1).unwrap();

        assert_eq!(spans(&output), vec![(1, 1), (1, 1), (1, 1)]);
        assert_eq!(output.row_count(), 3);
        insta::assert_snapshot!(output.diagram(), @r###"
        a
        b
        c
        "###);
    }

    #[test]
    fn grows_rows_when_matrix_is_full() {
        // Two columns only fit the 2-wide shapes, so every item takes a whole
        // row and the estimate of ceil(n / 2) * 2 rows runs out.
        let output = fallback_packer(2).pack_count(5);

        assert_eq!(output.placements().len(), 5);
        assert!(output.row_count() >= 5);
        output.coverage().unwrap();
    }

    #[test]
    fn no_overlaps_and_one_placement_per_item() {
        for columns in 1..=8 {
            for count in 0..40 {
                let output = pack(0..count, columns).unwrap();

                assert_eq!(output.placements().len(), count);
                for (index, placement) in output.placements().iter().enumerate() {
                    assert_eq!(placement.item_index(), index);
                    assert!(placement.column_start() + placement.column_span() <= columns);
                    assert!(placement.column_span() >= 1 && placement.row_span() >= 1);
                }

                if let Err(err) = output.coverage() {
                    panic!("{} items on {} columns: {}", count, columns, err);
                }
            }
        }
    }

    #[test]
    fn every_item_lands_on_the_first_open_cell() {
        for columns in 1..=8 {
            for count in 1..40 {
                let output = fallback_packer(columns).pack_count(count);
                let mut matrix = OccupancyMatrix::new(columns, 0);

                for placement in output.placements() {
                    while matrix.next_open_cell().is_none() {
                        matrix.push_empty_row();
                    }

                    assert_eq!(
                        matrix.next_open_cell(),
                        Some(placement.origin()),
                        "item {} of {} on {} columns",
                        placement.item_index(),
                        count,
                        columns
                    );
                    matrix.fill(&placement.rect());
                }
            }
        }
    }

    #[test]
    fn packing_is_deterministic() {
        for count in 0..30 {
            assert_eq!(pack(0..count, 6).unwrap(), pack(0..count, 6).unwrap());
        }
    }
}
