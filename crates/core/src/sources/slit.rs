//! Edge-mounted emitters ("slits")
//!
//! A slit sits on one of the four tank walls and drives a thin band of cells
//! next to it with a travelling sinusoid. Position is fixed at construction;
//! amplitude, frequency, wavelength and width may be retargeted live.

use crate::core_types::{Result, Vec2, WaveTankError};
use crate::grid::{GridGeometry, ScalarField};
use crate::sources::{phase_cycles, InjectionBand};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Depth of the injection band, in cells inward from the wall
pub const SLIT_BAND_DEPTH: usize = 3;

/// Handle to a slit owned by a wave field (index in construction order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlitId(pub usize);

impl SlitId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Wall a slit is mounted on, inferred from its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlitEdge {
    Left,
    Right,
    Bottom,
    Top,
    /// Not on any wall
    Interior,
}

impl SlitEdge {
    /// Classify a position against the domain bounds `[0, width] x [0, height]`
    pub fn classify(position: Vec2, width: f32, height: f32) -> Self {
        if position.x == 0.0 {
            Self::Left
        } else if position.x == width {
            Self::Right
        } else if position.y == 0.0 {
            Self::Bottom
        } else if position.y == height {
            Self::Top
        } else {
            Self::Interior
        }
    }

    /// Inward unit normal; interior emitters default to +y
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Left => Vec2::new(1.0, 0.0),
            Self::Right => Vec2::new(-1.0, 0.0),
            Self::Bottom | Self::Interior => Vec2::new(0.0, 1.0),
            Self::Top => Vec2::new(0.0, -1.0),
        }
    }
}

/// Live-tunable slit parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlitParams {
    /// Opening width along the wall, in domain units
    pub width: f32,
    pub amplitude: f32,
    /// Temporal frequency (cycles per unit simulation time)
    pub frequency: f32,
    /// Spatial wavelength in domain units
    pub wavelength: f32,
}

impl Default for SlitParams {
    /// Width 0.5, amplitude 10, frequency 1, wavelength 2
    fn default() -> Self {
        Self {
            width: 0.5,
            amplitude: 10.0,
            frequency: 1.0,
            wavelength: 2.0,
        }
    }
}

impl SlitParams {
    /// Check the parameters can drive a finite sinusoid
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if `wavelength` is not finite
    /// and positive, if `width` is negative or not finite, or if `amplitude`
    /// or `frequency` is not finite.
    pub fn validate(&self) -> Result<()> {
        WaveTankError::check_positive("wavelength", self.wavelength)?;
        if !(self.width.is_finite() && self.width >= 0.0) {
            return Err(WaveTankError::InvalidParameter {
                name: "width",
                reason: format!("must be finite and non-negative, got {}", self.width),
            });
        }
        for (name, value) in [("amplitude", self.amplitude), ("frequency", self.frequency)] {
            if !value.is_finite() {
                return Err(WaveTankError::InvalidParameter {
                    name,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Fixed edge-bound wave emitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slit {
    position: Vec2,
    /// Opening width along the wall, in domain units
    pub width: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl Slit {
    pub fn new(
        position: Vec2,
        width: f32,
        amplitude: f32,
        frequency: f32,
        wavelength: f32,
    ) -> Self {
        Self {
            position,
            width,
            amplitude,
            frequency,
            wavelength,
        }
    }

    /// Slit at `position` with the given parameters
    pub fn with_params(position: Vec2, params: SlitParams) -> Self {
        Self::new(
            position,
            params.width,
            params.amplitude,
            params.frequency,
            params.wavelength,
        )
    }

    /// Mount position; immutable for the lifetime of the slit
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn params(&self) -> SlitParams {
        SlitParams {
            width: self.width,
            amplitude: self.amplitude,
            frequency: self.frequency,
            wavelength: self.wavelength,
        }
    }

    pub(crate) fn apply(&mut self, params: SlitParams) {
        self.width = params.width;
        self.amplitude = params.amplitude;
        self.frequency = params.frequency;
        self.wavelength = params.wavelength;
    }

    /// Wall this slit is mounted on
    pub fn edge(&self, geometry: &GridGeometry) -> SlitEdge {
        SlitEdge::classify(self.position, geometry.width(), geometry.height())
    }

    /// Inward propagation direction
    pub fn direction(&self, geometry: &GridGeometry) -> Vec2 {
        self.edge(geometry).direction()
    }

    /// Cells driven by this slit, or `None` when the slit does not resolve to
    /// a wall index (off-grid or interior positions are skipped).
    ///
    /// The mount position is truncated to a grid index, so a slit halfway
    /// between two rows is centred on the lower one.
    pub fn band(&self, geometry: &GridGeometry) -> Option<InjectionBand> {
        let n = geometry.resolution();
        let xi = geometry.edge_index(self.position.x, geometry.dx())?;
        let yi = geometry.edge_index(self.position.y, geometry.dy())?;
        let depth = SLIT_BAND_DEPTH.min(n);

        // Cells covered along the wall, centred on the slit
        let along = |idx: usize, spacing: f32| {
            let cells = ((self.width / spacing) as usize).max(1);
            let half = cells / 2;
            idx.saturating_sub(half)..(idx + half + 1).min(n)
        };

        let band = if xi == 0 {
            InjectionBand::new(0..depth, along(yi, geometry.dy()))
        } else if xi == n - 1 {
            InjectionBand::new(n - depth..n, along(yi, geometry.dy()))
        } else if yi == 0 {
            InjectionBand::new(along(xi, geometry.dx()), 0..depth)
        } else if yi == n - 1 {
            InjectionBand::new(along(xi, geometry.dx()), n - depth..n)
        } else {
            return None;
        };
        Some(band)
    }

    /// Emitted value at domain x coordinate `x` and time `time`
    ///
    /// The carrier is phased along x on every wall: across the band for
    /// left/right slits, along the opening for bottom/top slits.
    #[inline]
    pub fn value_at(&self, x: f32, time: f64) -> f32 {
        self.amplitude * (TAU * (phase_cycles(self.frequency, time) - x / self.wavelength)).sin()
    }

    /// Add this slit's contribution into `field`
    pub(crate) fn inject(&self, geometry: &GridGeometry, field: &mut ScalarField, time: f64) {
        let Some(band) = self.band(geometry) else {
            return;
        };
        for y in band.ys {
            for x in band.xs.clone() {
                field.add(x, y, self.value_at(geometry.x_at(x), time));
            }
        }
    }
}
