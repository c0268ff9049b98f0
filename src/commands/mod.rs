mod build;
mod layout;

pub use build::*;
pub use layout::*;
