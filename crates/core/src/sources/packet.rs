//! Localized travelling wave packets
//!
//! A packet is a sinusoid along its direction vector under a Gaussian
//! envelope, re-injected every step at a fixed position. Packets never
//! expire; they are cleared only by a reset.

use crate::core_types::Vec2;
use crate::grid::{GridGeometry, ScalarField};
use crate::sources::phase_cycles;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePacket {
    /// Center in domain units
    pub position: Vec2,
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
    /// Gaussian envelope width; also the half-size of the injection box
    pub width: f32,
    /// Propagation direction (not required to be normalized)
    pub direction: Vec2,
}

/// Cell range `[trunc(lo / spacing), trunc(hi / spacing))` clamped to the grid
fn axis_range(lo: f32, hi: f32, spacing: f32, n: usize) -> Range<usize> {
    let n = n as i64;
    let start = ((lo / spacing) as i64).max(0);
    let end = ((hi / spacing) as i64).min(n);
    if end <= start {
        0..0
    } else {
        start as usize..end as usize
    }
}

impl WavePacket {
    pub fn new(
        position: Vec2,
        amplitude: f32,
        frequency: f32,
        wavelength: f32,
        width: f32,
        direction: Vec2,
    ) -> Self {
        Self {
            position,
            amplitude,
            frequency,
            wavelength,
            width,
            direction,
        }
    }

    /// Bounding box `(xs, ys)` of `± width` around the center, clipped to the
    /// grid. Empty when the packet lies outside the domain.
    pub fn bounds(&self, geometry: &GridGeometry) -> (Range<usize>, Range<usize>) {
        let n = geometry.resolution();
        let xs = axis_range(
            self.position.x - self.width,
            self.position.x + self.width,
            geometry.dx(),
            n,
        );
        let ys = axis_range(
            self.position.y - self.width,
            self.position.y + self.width,
            geometry.dy(),
            n,
        );
        (xs, ys)
    }

    /// Packet value at domain point `(x, y)` and time `time`
    pub fn value_at(&self, x: f32, y: f32, time: f64) -> f32 {
        // Signed distance along the direction vector
        let along = (x - self.position.x) * self.direction.x
            + (y - self.position.y) * self.direction.y;
        let envelope = (-(along * along) / (2.0 * self.width * self.width)).exp();
        let phase = phase_cycles(self.frequency, time) - along / self.wavelength;
        self.amplitude * (TAU * phase).sin() * envelope
    }

    pub(crate) fn inject(&self, geometry: &GridGeometry, field: &mut ScalarField, time: f64) {
        let (xs, ys) = self.bounds(geometry);
        for y in ys {
            let cell_y = geometry.y_at(y);
            for x in xs.clone() {
                field.add(x, y, self.value_at(geometry.x_at(x), cell_y, time));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn geometry() -> GridGeometry {
        GridGeometry::new(10.0, 10.0, 11)
    }

    #[test]
    fn test_bounds_inside() {
        let packet = WavePacket::new(Vec2::new(5.0, 5.0), 1.0, 1.0, 2.0, 2.0, Vec2::new(1.0, 0.0));
        let (xs, ys) = packet.bounds(&geometry());
        assert_eq!(xs, 3..7);
        assert_eq!(ys, 3..7);
    }

    #[test]
    fn test_bounds_clip_to_grid() {
        let packet = WavePacket::new(Vec2::new(0.5, 9.5), 1.0, 1.0, 2.0, 2.0, Vec2::new(0.0, 1.0));
        let (xs, ys) = packet.bounds(&geometry());
        assert_eq!(xs, 0..2);
        assert_eq!(ys, 7..11);
    }

    #[test]
    fn test_outside_domain_contributes_nothing() {
        let packet = WavePacket::new(
            Vec2::new(-30.0, 50.0),
            1.0,
            1.0,
            2.0,
            2.0,
            Vec2::new(1.0, 1.0),
        );
        let geom = geometry();
        let (xs, ys) = packet.bounds(&geom);
        assert!(xs.is_empty() || ys.is_empty());

        let mut field = ScalarField::new(11, 11);
        packet.inject(&geom, &mut field, 0.4);
        assert_eq!(field.max_abs(), 0.0);
    }

    #[test]
    fn test_envelope_and_phase() {
        let packet = WavePacket::new(Vec2::new(5.0, 5.0), 2.0, 1.0, 4.0, 1.0, Vec2::new(1.0, 0.0));
        // At the center the envelope is 1 and the phase is 2πft
        assert_abs_diff_eq!(packet.value_at(5.0, 5.0, 0.25), 2.0, epsilon = 1e-6);
        // Perpendicular offset does not change the directional coordinate
        assert_abs_diff_eq!(
            packet.value_at(5.0, 8.0, 0.25),
            packet.value_at(5.0, 5.0, 0.25),
            epsilon = 1e-6
        );
        // One width along the direction: envelope exp(-1/2), phase shifted by 1/4 cycle
        let expected = 2.0 * (TAU * (0.25 - 0.25)).sin() * (-0.5_f32).exp();
        assert_abs_diff_eq!(packet.value_at(6.0, 5.0, 0.25), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_inject_adds_over_box() {
        let packet = WavePacket::new(Vec2::new(5.0, 5.0), 1.0, 1.0, 2.0, 2.0, Vec2::new(1.0, 0.0));
        let geom = geometry();
        let mut field = ScalarField::new(11, 11);
        field.set(4, 4, 1.0);
        packet.inject(&geom, &mut field, 0.1);

        assert_abs_diff_eq!(field.get(4, 4), 1.0 + packet.value_at(4.0, 4.0, 0.1), epsilon = 1e-6);
        // Outside the box stays untouched
        assert_eq!(field.get(8, 5), 0.0);
        assert_eq!(field.get(5, 2), 0.0);
    }
}
