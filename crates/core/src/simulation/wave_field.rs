//! Wave field: grid, boundary mask, sources and damping composed into one
//! steppable state machine

use crate::core_types::{BoundaryType, Result, Vec2, WaveTankError};
use crate::grid::{BoundaryMask, Grid, GridGeometry, Obstacle, ScalarField};
use crate::simulation::config::TankConfig;
use crate::simulation::stats::FieldStats;
use crate::solver::{
    apply_edge_taper, step_leapfrog_cpu, DecayProfile, LeapfrogParams, StepInputs, WaveParams,
};
use crate::sources::{
    InterferencePoint, Slit, SlitId, SlitParams, SourceSet, StandingWave, WavePacket,
};
use tracing::{info, warn};

/// Damped 2D wave field on a tank with walls, obstacles and emitters
///
/// Owns every piece of engine state. Callers mutate it between steps through
/// the methods below; [`update`](Self::update) advances it by exactly one
/// integration step of length [`dt`](Self::dt).
#[derive(Debug, Clone)]
pub struct WaveField {
    grid: Grid,
    mask: BoundaryMask,
    decay: DecayProfile,
    sources: SourceSet,
    obstacles: Vec<Obstacle>,
    params: WaveParams,
    decay_factor: f32,
    boundary: BoundaryType,
}

impl WaveField {
    /// Create a wave field at rest
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Physical domain size
    /// * `resolution` - Sample points per axis (at least 3)
    /// * `slits` - Edge emitters; their order fixes each [`SlitId`]
    /// * `depth` - Water depth, sets wave speed and time step
    /// * `decay_factor` - Global damping parameter
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if the dimensions, resolution
    /// or depth are invalid (see [`TankConfig::validate`]).
    pub fn new(
        width: f32,
        height: f32,
        resolution: usize,
        slits: Vec<Slit>,
        depth: f32,
        decay_factor: f32,
    ) -> Result<Self> {
        let config = TankConfig {
            width,
            height,
            resolution,
            depth,
            decay_factor,
            ..TankConfig::default()
        };
        Self::from_config(&config, slits)
    }

    /// Create a wave field from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if `config` fails validation.
    pub fn from_config(config: &TankConfig, slits: Vec<Slit>) -> Result<Self> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height, config.resolution);
        let geometry = *grid.geometry();
        let params = WaveParams::new(config.depth, geometry.dx(), geometry.dy())?;
        let sources = SourceSet::new(slits);

        let field = Self {
            mask: BoundaryMask::build(&geometry, &[]),
            decay: DecayProfile::new(&geometry, &slit_positions(sources.slits())),
            grid,
            sources,
            obstacles: Vec::new(),
            params,
            decay_factor: config.decay_factor,
            boundary: config.boundary_type,
        };

        info!(
            "Wave field initialized: {}x{} grid over {:.2}x{:.2}, dx={:.4}, dy={:.4}, c={:.3}, dt={:.6}, {} slits, boundary={}",
            config.resolution,
            config.resolution,
            config.width,
            config.height,
            geometry.dx(),
            geometry.dy(),
            field.params.wave_speed(),
            field.params.dt(),
            field.sources.slits().len(),
            field.boundary
        );
        field.warn_unresolved_slits();

        Ok(field)
    }

    /// Advance the field by one integration step and inject sources at `time`
    ///
    /// Integration, decay and boundary clipping act on the pre-step field;
    /// sources are added afterwards, and under absorbing walls the edge taper
    /// runs last.
    pub fn update(&mut self, time: f64) {
        let geometry = *self.grid.geometry();
        let n = geometry.resolution();
        let step = LeapfrogParams::new(
            self.params.c2_dt2(),
            geometry.dx(),
            geometry.dy(),
            self.decay_factor,
            self.boundary,
        );

        {
            let (u, u_prev, next) = self.grid.step_buffers();
            let inputs = StepInputs {
                u: u.as_slice(),
                u_prev: u_prev.as_slice(),
                mask: self.mask.as_slice(),
                distance: self.decay.distance_map().as_slice(),
            };
            step_leapfrog_cpu(inputs, next.as_mut_slice(), n, step);
        }
        self.grid.commit_step();

        let u = self.grid.current_mut();
        self.sources.inject(&geometry, u, time);
        if self.boundary == BoundaryType::Absorbing {
            apply_edge_taper(u);
        }
    }

    /// Add a circular obstacle and rebuild the boundary mask
    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
        self.mask = BoundaryMask::build(self.grid.geometry(), &self.obstacles);
        info!(
            "Added obstacle at ({:.2}, {:.2}) radius {:.2}; {} obstacles, {} blocked cells",
            obstacle.position.x,
            obstacle.position.y,
            obstacle.radius,
            self.obstacles.len(),
            self.mask.blocked_count()
        );
    }

    /// Select the wall behaviour used from the next update on
    pub fn set_boundary_type(&mut self, boundary: BoundaryType) {
        self.boundary = boundary;
        info!("Boundary type set to {boundary}");
    }

    /// Select the wall behaviour by name (`reflective`, `absorbing`, `open`)
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidBoundaryType` for any other name; the
    /// current boundary type is kept.
    pub fn set_boundary_type_name(&mut self, name: &str) -> Result<()> {
        let boundary = name.parse::<BoundaryType>()?;
        self.set_boundary_type(boundary);
        Ok(())
    }

    /// Change the water depth, rescaling wave speed and time step together
    ///
    /// The field itself is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if `depth` is not finite and
    /// positive; the current depth is kept.
    pub fn set_depth(&mut self, depth: f32) -> Result<()> {
        self.params.set_depth(depth)?;
        info!(
            "Depth set to {:.3}: c={:.3}, dt={:.6}",
            depth,
            self.params.wave_speed(),
            self.params.dt()
        );
        Ok(())
    }

    /// Set the global damping parameter, read live by the next update
    pub fn set_decay_factor(&mut self, decay_factor: f32) {
        self.decay_factor = decay_factor;
        info!("Decay factor set to {decay_factor:.4}");
    }

    /// Append a travelling wave packet; it is injected every step until reset
    pub fn add_wave_packet(&mut self, packet: WavePacket) {
        info!(
            "Added wave packet at ({:.2}, {:.2}): A={:.2}, f={:.2}, lambda={:.2}, width={:.2}",
            packet.position.x,
            packet.position.y,
            packet.amplitude,
            packet.frequency,
            packet.wavelength,
            packet.width
        );
        self.sources.push_packet(packet);
    }

    /// Append a point oscillator; it is injected every step until reset
    pub fn add_interference_point(&mut self, point: InterferencePoint) {
        info!(
            "Added interference point at ({:.2}, {:.2}): A={:.2}, f={:.2}",
            point.position.x, point.position.y, point.amplitude, point.frequency
        );
        self.sources.push_point(point);
    }

    /// Replace the standing-wave overlay; `None` disables it
    pub fn set_standing_wave_mode(&mut self, mode: Option<u32>) {
        self.sources.set_standing_wave(mode.map(StandingWave::new));
        match mode {
            Some(mode) => info!("Standing wave mode set to {mode}"),
            None => info!("Standing wave disabled"),
        }
    }

    /// Return to rest
    ///
    /// Zeroes the field, rebuilds the mask and distance map and drops packets,
    /// points and the standing wave. Obstacles and slits are kept, slits with
    /// their current parameters.
    pub fn reset(&mut self) {
        self.grid.reset();
        let geometry = *self.grid.geometry();
        self.mask = BoundaryMask::build(&geometry, &self.obstacles);
        self.decay = DecayProfile::new(&geometry, &slit_positions(self.sources.slits()));
        self.sources.clear_transient();
        info!(
            "Wave field reset: {} obstacles and {} slits kept",
            self.obstacles.len(),
            self.sources.slits().len()
        );
        self.warn_unresolved_slits();
    }

    pub fn slits(&self) -> &[Slit] {
        self.sources.slits()
    }

    pub fn slit(&self, id: SlitId) -> Option<&Slit> {
        self.sources.slit(id)
    }

    /// Live access to a slit; changes are seen by the next update
    pub fn slit_mut(&mut self, id: SlitId) -> Option<&mut Slit> {
        self.sources.slit_mut(id)
    }

    /// Retarget a slit's width, amplitude, frequency and wavelength
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::UnknownSlit` if `id` does not name a slit, or
    /// `WaveTankError::InvalidParameter` if `params` fail validation. The slit
    /// is unchanged on error.
    pub fn update_slit(&mut self, id: SlitId, params: SlitParams) -> Result<()> {
        params.validate()?;
        let slit = self
            .sources
            .slit_mut(id)
            .ok_or(WaveTankError::UnknownSlit(id.index()))?;
        slit.apply(params);
        info!(
            "Slit {} updated: width={:.2}, A={:.2}, f={:.2}, lambda={:.2}",
            id.index(),
            params.width,
            params.amplitude,
            params.frequency,
            params.wavelength
        );
        Ok(())
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn packets(&self) -> &[WavePacket] {
        self.sources.packets()
    }

    pub fn points(&self) -> &[InterferencePoint] {
        self.sources.points()
    }

    pub fn standing_wave_mode(&self) -> Option<u32> {
        self.sources.standing_wave().map(|wave| wave.mode)
    }

    /// Current field snapshot, `N x N` row-major
    pub fn field(&self) -> &ScalarField {
        self.grid.current()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn geometry(&self) -> &GridGeometry {
        self.grid.geometry()
    }

    pub fn mask(&self) -> &BoundaryMask {
        &self.mask
    }

    pub fn decay_profile(&self) -> &DecayProfile {
        &self.decay
    }

    /// Integration time step
    pub fn dt(&self) -> f32 {
        self.params.dt()
    }

    pub fn wave_speed(&self) -> f32 {
        self.params.wave_speed()
    }

    pub fn depth(&self) -> f32 {
        self.params.depth()
    }

    pub fn decay_factor(&self) -> f32 {
        self.decay_factor
    }

    pub fn boundary_type(&self) -> BoundaryType {
        self.boundary
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_field(self.grid.current())
    }

    fn warn_unresolved_slits(&self) {
        let geometry = self.grid.geometry();
        for (i, slit) in self.sources.slits().iter().enumerate() {
            if slit.band(geometry).is_none() {
                let position = slit.position();
                warn!(
                    "Slit {} at ({:.3}, {:.3}) does not resolve to a wall cell and will be skipped",
                    i, position.x, position.y
                );
            }
        }
    }
}

fn slit_positions(slits: &[Slit]) -> Vec<Vec2> {
    slits.iter().map(Slit::position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_field(slits: Vec<Slit>) -> WaveField {
        WaveField::new(10.0, 10.0, 21, slits, 1.0, 0.999).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(WaveField::new(10.0, 10.0, 2, Vec::new(), 1.0, 0.999).is_err());
        assert!(WaveField::new(10.0, 10.0, 21, Vec::new(), 0.0, 0.999).is_err());
        assert!(WaveField::new(-1.0, 10.0, 21, Vec::new(), 1.0, 0.999).is_err());
    }

    #[test]
    fn test_update_without_sources_stays_at_rest() {
        let mut field = small_field(Vec::new());
        for i in 0..10 {
            field.update(f64::from(i) * f64::from(field.dt()));
        }
        assert_eq!(field.stats().nonzero_cells, 0);
    }

    #[test]
    fn test_point_source_spreads() {
        let mut field = small_field(Vec::new());
        field.add_interference_point(InterferencePoint::new(Vec2::new(5.0, 5.0), 1.0, 1.0));
        field.update(0.25);
        // sin(2π · 0.25) = 1 at the centre cell, nothing elsewhere yet
        assert_relative_eq!(field.field().get(10, 10), 1.0);
        assert_eq!(field.field().get(11, 10), 0.0);

        field.update(0.25);
        assert!(field.field().get(11, 10) > 0.0);
        assert!(field.field().get(10, 11) > 0.0);
    }

    #[test]
    fn test_invalid_boundary_name_keeps_state() {
        let mut field = small_field(Vec::new());
        field.set_boundary_type(BoundaryType::Open);
        let err = field.set_boundary_type_name("sticky").unwrap_err();
        assert_eq!(err, WaveTankError::InvalidBoundaryType("sticky".to_string()));
        assert_eq!(field.boundary_type(), BoundaryType::Open);

        field.set_boundary_type_name("Absorbing").unwrap();
        assert_eq!(field.boundary_type(), BoundaryType::Absorbing);
    }

    #[test]
    fn test_set_depth_rescales_together() {
        let mut field = small_field(Vec::new());
        let (c1, dt1) = (field.wave_speed(), field.dt());
        field.set_depth(4.0).unwrap();
        assert_relative_eq!(field.wave_speed(), 2.0 * c1, max_relative = 1e-6);
        assert_relative_eq!(field.dt(), dt1 / 2.0, max_relative = 1e-6);

        assert!(field.set_depth(-1.0).is_err());
        assert!(field.set_depth(f32::NAN).is_err());
        assert_relative_eq!(field.depth(), 4.0);
    }

    #[test]
    fn test_update_slit() {
        let mut field = small_field(vec![Slit::with_params(
            Vec2::new(0.0, 5.0),
            SlitParams::default(),
        )]);
        let params = SlitParams {
            amplitude: 3.0,
            ..SlitParams::default()
        };
        field.update_slit(SlitId(0), params).unwrap();
        assert_eq!(field.slit(SlitId(0)).unwrap().amplitude, 3.0);

        assert_eq!(
            field.update_slit(SlitId(4), params),
            Err(WaveTankError::UnknownSlit(4))
        );

        let bad = SlitParams {
            wavelength: 0.0,
            ..params
        };
        assert!(field.update_slit(SlitId(0), bad).is_err());
        assert_eq!(field.slit(SlitId(0)).unwrap().params(), params);

        field.slit_mut(SlitId(0)).unwrap().frequency = 2.5;
        assert_eq!(field.slits()[0].frequency, 2.5);
    }

    #[test]
    fn test_reset_keeps_obstacles_and_slits() {
        let mut field = small_field(vec![Slit::with_params(
            Vec2::new(0.0, 5.0),
            SlitParams::default(),
        )]);
        field.add_obstacle(Obstacle::new(Vec2::new(5.0, 5.0), 1.0));
        field.add_wave_packet(WavePacket::new(
            Vec2::new(5.0, 5.0),
            1.0,
            1.0,
            2.0,
            1.0,
            Vec2::new(1.0, 0.0),
        ));
        field.set_standing_wave_mode(Some(2));
        let blocked = field.mask().blocked_count();
        field.update(0.1);

        field.reset();
        assert_eq!(field.stats().nonzero_cells, 0);
        assert_eq!(field.grid().previous().max_abs(), 0.0);
        assert_eq!(field.obstacles().len(), 1);
        assert_eq!(field.slits().len(), 1);
        assert!(field.packets().is_empty());
        assert_eq!(field.standing_wave_mode(), None);
        assert_eq!(field.mask().blocked_count(), blocked);
    }
}
