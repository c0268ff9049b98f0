//! Gridpack is a small library for laying out gallery items on a bento grid:
//! a CSS-style grid with a fixed number of columns where every item covers a
//! rectangle of cells and no cell is left empty behind the last item.
//!
//! Items carry no size of their own. The packer decides every item's column
//! and row span, either from a hand-designed [`CuratedLayout`] registered for
//! that exact item count or from a matrix packer that fills the grid in
//! scanline order.
//!
//! ## Example
//! ```
//! use gridpack::{BentoPacker, Strategy};
//!
//! let photos = ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"];
//!
//! let packer = BentoPacker::new(6).unwrap();
//! let output = packer.pack(&photos);
//!
//! assert_eq!(output.strategy(), Strategy::Fallback);
//! assert_eq!(output.placements().len(), photos.len());
//!
//! for placement in output.placements() {
//!     let photo = photos[placement.item_index()];
//!     println!(
//!         "{}: column {} span {}, row {} span {}",
//!         photo,
//!         placement.column_start() + 1,
//!         placement.column_span(),
//!         placement.row_start() + 1,
//!         placement.row_span(),
//!     );
//! }
//! ```

mod error;
mod geometry;
mod layouts;
mod occupancy;
mod packer;
mod types;

pub use error::*;
pub use geometry::*;
pub use layouts::*;
pub use occupancy::*;
pub use packer::*;
pub use types::*;
