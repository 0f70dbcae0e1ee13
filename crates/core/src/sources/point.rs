//! Stationary point oscillators

use crate::core_types::Vec2;
use crate::grid::{GridGeometry, ScalarField};
use crate::sources::phase_cycles;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Point oscillator injected at the nearest grid cell every step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterferencePoint {
    pub position: Vec2,
    pub amplitude: f32,
    pub frequency: f32,
}

impl InterferencePoint {
    pub fn new(position: Vec2, amplitude: f32, frequency: f32) -> Self {
        Self {
            position,
            amplitude,
            frequency,
        }
    }

    /// Oscillator output at time `time`
    #[inline]
    pub fn value_at(&self, time: f64) -> f32 {
        self.amplitude * (TAU * phase_cycles(self.frequency, time)).sin()
    }

    /// Points outside the domain have no cell and inject nothing
    pub(crate) fn inject(&self, geometry: &GridGeometry, field: &mut ScalarField, time: f64) {
        if let Some((x, y)) = geometry.nearest_cell(self.position) {
            field.add(x, y, self.value_at(time));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inject_single_cell() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let point = InterferencePoint::new(Vec2::new(3.2, 6.9), 2.0, 0.5);
        let mut field = ScalarField::new(11, 11);
        point.inject(&geom, &mut field, 0.5);

        let expected = 2.0 * (TAU * 0.25).sin();
        assert_eq!(field.get(3, 7), expected);
        let touched = field.as_slice().iter().filter(|&&v| v != 0.0).count();
        assert_eq!(touched, 1);
    }

    #[test]
    fn test_outside_domain_is_ignored() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let point = InterferencePoint::new(Vec2::new(12.0, 5.0), 1.0, 1.0);
        let mut field = ScalarField::new(11, 11);
        point.inject(&geom, &mut field, 0.25);
        assert_eq!(field.max_abs(), 0.0);
    }
}
