//! Summary statistics of a field snapshot

use crate::grid::ScalarField;
use serde::{Deserialize, Serialize};

/// Scalar summary of the current field, for logging and display scaling
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldStats {
    pub min: f32,
    pub max: f32,
    /// Largest absolute value
    pub max_abs: f32,
    /// Mean absolute value over all cells
    pub mean_abs: f32,
    /// Sum of squared values
    pub energy: f64,
    /// Cells with a non-zero value
    pub nonzero_cells: usize,
}

impl FieldStats {
    pub fn from_field(field: &ScalarField) -> Self {
        let values = field.as_slice();
        if values.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            ..Self::default()
        };
        let mut abs_sum = 0.0_f64;
        for &v in values {
            stats.min = stats.min.min(v);
            stats.max = stats.max.max(v);
            stats.max_abs = stats.max_abs.max(v.abs());
            abs_sum += f64::from(v.abs());
            stats.energy += f64::from(v) * f64::from(v);
            if v != 0.0 {
                stats.nonzero_cells += 1;
            }
        }
        stats.mean_abs = (abs_sum / values.len() as f64) as f32;
        stats
    }
}
