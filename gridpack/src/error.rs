use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("Invalid grid configuration: a grid needs at least one column, but {columns} were requested")]
    InvalidConfiguration { columns: usize },

    #[error("Curated layout for {item_count} items does not tile a {columns}x{rows} grid")]
    MalformedLayout {
        item_count: usize,
        columns: usize,
        rows: usize,
    },

    #[error("Item {item_index} overlaps an item placed before it")]
    Overlap { item_index: usize },
}
