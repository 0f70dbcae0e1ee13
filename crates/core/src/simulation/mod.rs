//! Wave tank simulation
//!
//! [`WaveField`] advances the field one CFL-stable step at a time;
//! [`Simulation`] maps caller-requested time increments onto whole steps and
//! keeps the simulation clock.

pub mod config;
pub mod stats;
pub mod wave_field;

pub use config::{SlitLayout, TankConfig, MIN_RESOLUTION};
pub use stats::FieldStats;
pub use wave_field::WaveField;

use tracing::{debug, info};

/// Wave field plus simulation clock
#[derive(Debug, Clone)]
pub struct Simulation {
    field: WaveField,
    /// Accumulated simulation time; `f64` so `dt`-sized advances still
    /// register late in long runs
    time: f64,
    /// Rate at which simulation time advances per integration step
    time_scale: f32,
}

impl Simulation {
    pub fn new(field: WaveField) -> Self {
        Self {
            field,
            time: 0.0,
            time_scale: 1.0,
        }
    }

    /// Advance by `requested_dt` worth of integration steps
    ///
    /// Runs `max(1, floor(requested_dt / dt))` steps. Each step advances the
    /// clock by `dt · time_scale` and then updates the field at the new time,
    /// so the time scale changes how fast sources oscillate, never the step
    /// size. A non-finite request runs a single step.
    ///
    /// # Returns
    ///
    /// Number of integration steps taken
    pub fn step(&mut self, requested_dt: f32) -> usize {
        let dt = self.field.dt();
        let steps = substep_count(requested_dt, dt);

        let advance = f64::from(dt) * f64::from(self.time_scale);
        for _ in 0..steps {
            self.time += advance;
            self.field.update(self.time);
        }

        debug!(
            "Simulation step: requested={:.4}, dt={:.6}, substeps={}, t={:.4}",
            requested_dt, dt, steps, self.time
        );
        steps
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.time_scale = time_scale;
        info!("Time scale set to {time_scale:.3}");
    }

    /// Zero the clock and reset the wave field
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.field.reset();
    }

    /// Simulation time of the last update
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn field(&self) -> &WaveField {
        &self.field
    }

    /// Mutable access for the field's mutators between steps
    pub fn field_mut(&mut self) -> &mut WaveField {
        &mut self.field
    }
}

/// `max(1, floor(requested / dt))`
fn substep_count(requested: f32, dt: f32) -> usize {
    let ratio = (requested / dt).floor();
    if ratio.is_finite() && ratio >= 1.0 {
        ratio as usize
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec2;
    use crate::sources::InterferencePoint;
    use approx::assert_relative_eq;

    fn simulation() -> Simulation {
        Simulation::new(WaveField::new(10.0, 10.0, 21, Vec::new(), 1.0, 0.999).unwrap())
    }

    #[test]
    fn test_substep_count() {
        assert_eq!(substep_count(0.0, 0.01), 1);
        assert_eq!(substep_count(0.005, 0.01), 1);
        assert_eq!(substep_count(0.035, 0.01), 3);
        assert_eq!(substep_count(-1.0, 0.01), 1);
        assert_eq!(substep_count(f32::NAN, 0.01), 1);
        assert_eq!(substep_count(f32::INFINITY, 0.01), 1);
    }

    #[test]
    fn test_step_advances_clock() {
        let mut sim = simulation();
        let dt = sim.field().dt();
        let steps = sim.step(dt * 4.5);
        assert_eq!(steps, 4);
        assert_relative_eq!(sim.time(), 4.0 * f64::from(dt), max_relative = 1e-9);
    }

    #[test]
    fn test_time_scale_changes_clock_not_dt() {
        let mut sim = simulation();
        let dt = sim.field().dt();
        sim.set_time_scale(2.0);
        sim.step(dt * 3.5);
        assert_relative_eq!(sim.time(), 6.0 * f64::from(dt), max_relative = 1e-9);
        assert_eq!(sim.field().dt(), dt);
    }

    #[test]
    fn test_clock_keeps_advancing_late_in_long_runs() {
        let field = WaveField::new(20.0, 20.0, 200, Vec::new(), 1.0, 0.999).unwrap();
        let mut sim = Simulation::new(field);
        let dt = f64::from(sim.field().dt());

        // Jump the clock close to t = 20000 with a large scale, then run at 1x
        let scale = 20_000.0 / dt / 10.0;
        sim.set_time_scale(scale as f32);
        for _ in 0..10 {
            sim.step(0.0);
        }
        let t0 = sim.time();
        assert!(t0 > 19_000.0, "t0 = {t0}");

        sim.set_time_scale(1.0);
        for _ in 0..1000 {
            assert_eq!(sim.step(0.0), 1);
        }
        let advance = sim.time() - t0;
        assert_relative_eq!(advance, 1000.0 * dt, max_relative = 1e-6);
    }

    #[test]
    fn test_reset_zeroes_clock_and_field() {
        let mut sim = simulation();
        sim.field_mut()
            .add_interference_point(InterferencePoint::new(Vec2::new(5.0, 5.0), 1.0, 1.0));
        sim.step(0.05);
        assert!(sim.time() > 0.0);
        assert!(sim.field().stats().nonzero_cells > 0);

        sim.reset();
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.field().stats().nonzero_cells, 0);
        assert!(sim.field().points().is_empty());
        assert_eq!(sim.time_scale(), 1.0);
    }
}
