//! Grid storage and boundary geometry

pub mod boundary_mask;
pub mod field;
pub mod tank_grid;

// Re-export main types
pub use boundary_mask::{BoundaryMask, Obstacle};
pub use field::ScalarField;
pub use tank_grid::{Grid, GridGeometry, EDGE_INDEX_TOLERANCE};
