//! Wave emitters and their per-step contribution
//!
//! Sources are added directly into the field after integration; they are not
//! part of the PDE update. Every source type is evaluated at the simulation
//! time passed to [`SourceSet::inject`].

pub mod packet;
pub mod point;
pub mod slit;
pub mod standing_wave;

pub use packet::WavePacket;
pub use point::InterferencePoint;
pub use slit::{Slit, SlitEdge, SlitId, SlitParams, SLIT_BAND_DEPTH};
pub use standing_wave::{StandingWave, STANDING_WAVE_AMPLITUDE};

use crate::grid::{GridGeometry, ScalarField};
use std::ops::Range;

/// Fractional part of `frequency · time`, in cycles
///
/// Evaluated in `f64` so the phase keeps sub-step resolution at large `time`.
#[inline]
pub(crate) fn phase_cycles(frequency: f32, time: f64) -> f32 {
    (f64::from(frequency) * time).rem_euclid(1.0) as f32
}

/// Rectangle of cells driven by one slit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionBand {
    pub xs: Range<usize>,
    pub ys: Range<usize>,
}

impl InjectionBand {
    pub fn new(xs: Range<usize>, ys: Range<usize>) -> Self {
        Self { xs, ys }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.xs.contains(&x) && self.ys.contains(&y)
    }
}

/// All configured emitters of one wave field
///
/// Slits are fixed at construction and live-tunable; packets and points are
/// append-only until reset.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    slits: Vec<Slit>,
    packets: Vec<WavePacket>,
    points: Vec<InterferencePoint>,
    standing_wave: Option<StandingWave>,
}

impl SourceSet {
    pub fn new(slits: Vec<Slit>) -> Self {
        Self {
            slits,
            ..Self::default()
        }
    }

    pub fn slits(&self) -> &[Slit] {
        &self.slits
    }

    pub fn slit(&self, id: SlitId) -> Option<&Slit> {
        self.slits.get(id.index())
    }

    pub fn slit_mut(&mut self, id: SlitId) -> Option<&mut Slit> {
        self.slits.get_mut(id.index())
    }

    pub fn packets(&self) -> &[WavePacket] {
        &self.packets
    }

    pub fn points(&self) -> &[InterferencePoint] {
        &self.points
    }

    pub fn standing_wave(&self) -> Option<StandingWave> {
        self.standing_wave
    }

    pub fn push_packet(&mut self, packet: WavePacket) {
        self.packets.push(packet);
    }

    pub fn push_point(&mut self, point: InterferencePoint) {
        self.points.push(point);
    }

    pub fn set_standing_wave(&mut self, wave: Option<StandingWave>) {
        self.standing_wave = wave;
    }

    /// Drop transient sources; slits are kept with their current parameters
    pub fn clear_transient(&mut self) {
        self.packets.clear();
        self.points.clear();
        self.standing_wave = None;
    }

    /// Add every source's contribution at `time` into `field`
    ///
    /// Order: slits, packets, points, standing wave. All contributions are
    /// additive, so the order only matters for rounding.
    pub fn inject(&self, geometry: &GridGeometry, field: &mut ScalarField, time: f64) {
        for slit in &self.slits {
            slit.inject(geometry, field, time);
        }
        for packet in &self.packets {
            packet.inject(geometry, field, time);
        }
        for point in &self.points {
            point.inject(geometry, field, time);
        }
        if let Some(wave) = self.standing_wave {
            wave.inject(geometry, field, time);
        }
    }
}
