//! Vector type alias for 2D positions and directions.

use nalgebra::Vector2;

/// 2D vector type for positions and propagation directions.
///
/// Alias for `nalgebra::Vector2<f32>`, used for slit, obstacle, packet and
/// interference-point positions in domain units.
pub type Vec2 = Vector2<f32>;
