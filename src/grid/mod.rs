#[cfg(feature = "grid")]
mod regular_grid;
#[cfg(feature = "grid")]
pub use regular_grid::*;
