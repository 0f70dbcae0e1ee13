//! Global standing-wave overlay

use crate::grid::{GridGeometry, ScalarField};
use crate::sources::phase_cycles;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Amplitude of the overlay
pub const STANDING_WAVE_AMPLITUDE: f32 = 0.5;

/// Harmonic `mode` of `sin(mode·π·x/W)·sin(2π·t)`, added over the whole field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandingWave {
    pub mode: u32,
}

impl StandingWave {
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    /// Overlay value at domain x coordinate `x`
    pub fn value_at(&self, x: f32, width: f32, time: f64) -> f32 {
        let spatial = (self.mode as f32 * PI * x / width).sin();
        STANDING_WAVE_AMPLITUDE * spatial * (TAU * phase_cycles(1.0, time)).sin()
    }

    pub(crate) fn inject(&self, geometry: &GridGeometry, field: &mut ScalarField, time: f64) {
        let n = geometry.resolution();
        // Depends on x only, so evaluate one row and add it everywhere
        let profile: Vec<f32> = (0..n)
            .map(|x| self.value_at(geometry.x_at(x), geometry.width(), time))
            .collect();
        for row in field.as_mut_slice().chunks_mut(n) {
            for (cell, add) in row.iter_mut().zip(&profile) {
                *cell += add;
            }
        }
    }
}
