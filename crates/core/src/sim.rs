//! Per-frame simulation orchestration and runtime controls.
//!
//! One [`Simulation::step`] call runs the frame pipeline in strict order:
//! vortices drift, the flow grid is rebuilt from curl noise plus vortex
//! forces, the field clock advances, and every particle samples, integrates,
//! wraps, and emits its draw commands. The grid is always fully rebuilt
//! before any particle reads it, so no stale state is ever observed within
//! a frame.

use serde_json::{json, Value};

use crate::config::{SimConfig, MAX_PARTICLE_COUNT, MIN_PARTICLE_COUNT};
use crate::curl::CurlField;
use crate::error::EngineError;
use crate::frame::Frame;
use crate::grid::FlowGrid;
use crate::palette::Palette;
use crate::particle::Particle;
use crate::prng::Xorshift64;
use crate::vortex::{self, Vortex};

/// The complete flow-field simulation.
pub struct Simulation {
    config: SimConfig,
    curl: CurlField,
    grid: FlowGrid,
    vortices: Vec<Vortex>,
    particles: Vec<Particle>,
    rng: Xorshift64,
    /// Noise-space time offset; advances by `evolution_speed` per frame.
    zoff: f64,
}

impl Simulation {
    /// Builds a simulation from a sanitized config and a seed.
    ///
    /// Returns `EngineError::InvalidDimensions` if the canvas cannot hold a
    /// single grid cell.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, EngineError> {
        let config = config.sanitized();
        let grid = FlowGrid::new(config.width, config.height, config.cell_size)?;
        let mut rng = Xorshift64::new(seed);
        let curl = CurlField::new(seed as u32);
        let vortices = vortex::spawn(&mut rng, config.vortex_count, config.width, config.height);
        let particles = (0..config.particle_count)
            .map(|_| Particle::random(&mut rng, config.width, config.height))
            .collect();
        Ok(Self {
            config,
            curl,
            grid,
            vortices,
            particles,
            rng,
            zoff: 0.0,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The flow grid as of the last step.
    pub fn grid(&self) -> &FlowGrid {
        &self.grid
    }

    /// Live vortices.
    pub fn vortices(&self) -> &[Vortex] {
        &self.vortices
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Active palette.
    pub fn palette(&self) -> Palette {
        self.config.palette
    }

    /// Advances the simulation one frame and returns its draw commands.
    pub fn step(&mut self) -> Result<Frame, EngineError> {
        let cfg = &self.config;

        for vortex in &mut self.vortices {
            vortex.update(cfg.width, cfg.height);
        }

        self.grid
            .rebuild(&self.curl, &self.vortices, cfg.noise_increment, self.zoff);
        self.zoff += cfg.evolution_speed;

        // Sub-stepping averages out near 1-2 segments per particle.
        let mut frame = Frame::with_capacity(cfg.trail_alpha, self.particles.len() * 2);
        for particle in &mut self.particles {
            particle.follow(&self.grid);
            particle.update(cfg.max_speed, &mut self.rng);
            particle.wrap_edges(cfg.width, cfg.height);
            particle.emit(
                cfg.palette,
                cfg.max_speed,
                cfg.curvature_scale,
                cfg.stroke_width,
                &mut frame.segments,
            );
        }
        Ok(frame)
    }

    /// Respawns all particles and vortices. The field clock keeps running.
    ///
    /// Hosts should clear their canvas alongside this call.
    pub fn reset(&mut self) {
        let cfg = &self.config;
        self.vortices = vortex::spawn(&mut self.rng, cfg.vortex_count, cfg.width, cfg.height);
        self.particles = (0..cfg.particle_count)
            .map(|_| Particle::random(&mut self.rng, cfg.width, cfg.height))
            .collect();
    }

    /// Advances to the next palette, wrapping, and returns it.
    ///
    /// Touches nothing but the color mapping; particle and field state are
    /// unaffected.
    pub fn cycle_palette(&mut self) -> Palette {
        self.config.palette = self.config.palette.next();
        self.config.palette
    }

    /// Adjusts the particle count by `delta`, clamped to [500, 10000].
    ///
    /// Growth spawns fresh particles; shrinking drops from the end. Existing
    /// particles keep their state either way. Returns the new count.
    pub fn adjust_particle_count(&mut self, delta: isize) -> usize {
        let target = self
            .config
            .particle_count
            .saturating_add_signed(delta)
            .clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);
        let cfg = &self.config;
        while self.particles.len() < target {
            self.particles
                .push(Particle::random(&mut self.rng, cfg.width, cfg.height));
        }
        self.particles.truncate(target);
        self.config.particle_count = target;
        target
    }

    /// Atomically reconfigures for a new canvas size.
    ///
    /// The replacement grid is allocated before any state changes, so a
    /// failed resize (canvas smaller than one cell) leaves the simulation
    /// untouched. On success the grid is replaced wholesale and vortices are
    /// reseeded; particles survive and wrap on their next update.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        let grid = FlowGrid::new(width, height, self.config.cell_size)?;
        self.config.width = width;
        self.config.height = height;
        self.grid = grid;
        self.vortices = vortex::spawn(
            &mut self.rng,
            self.config.vortex_count,
            width,
            height,
        );
        Ok(())
    }

    /// Current parameter values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "width": self.config.width,
            "height": self.config.height,
            "cell_size": self.config.cell_size,
            "noise_increment": self.config.noise_increment,
            "evolution_speed": self.config.evolution_speed,
            "particle_count": self.config.particle_count,
            "max_speed": self.config.max_speed,
            "trail_alpha": self.config.trail_alpha,
            "stroke_width": self.config.stroke_width,
            "vortex_count": self.config.vortex_count,
            "curvature_scale": self.config.curvature_scale,
            "palette": self.config.palette.name(),
        })
    }

    /// Schema describing the tunable parameters, their ranges and defaults.
    pub fn param_schema() -> Value {
        json!({
            "cell_size": {
                "type": "number",
                "default": crate::config::DEFAULT_CELL_SIZE,
                "min": 1.0,
                "description": "Flow grid cell size in pixels"
            },
            "noise_increment": {
                "type": "number",
                "default": crate::config::DEFAULT_NOISE_INCREMENT,
                "min": 0.0,
                "description": "Noise-space step per grid column/row"
            },
            "evolution_speed": {
                "type": "number",
                "default": crate::config::DEFAULT_EVOLUTION_SPEED,
                "min": 0.0,
                "description": "Per-frame advance of the field's time axis"
            },
            "particle_count": {
                "type": "integer",
                "default": crate::config::DEFAULT_PARTICLE_COUNT,
                "min": MIN_PARTICLE_COUNT,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of live particles"
            },
            "max_speed": {
                "type": "number",
                "default": crate::config::DEFAULT_MAX_SPEED,
                "min": 0.1,
                "description": "Velocity magnitude cap in pixels per frame"
            },
            "trail_alpha": {
                "type": "number",
                "default": crate::config::DEFAULT_TRAIL_ALPHA,
                "min": 0.0,
                "max": 1.0,
                "description": "Alpha of the per-frame trail fade"
            },
            "stroke_width": {
                "type": "number",
                "default": crate::config::DEFAULT_STROKE_WIDTH,
                "min": 0.1,
                "description": "Segment stroke width in pixels"
            },
            "vortex_count": {
                "type": "integer",
                "default": crate::config::DEFAULT_VORTEX_COUNT,
                "min": 0,
                "description": "Number of drifting vortices"
            },
            "curvature_scale": {
                "type": "number",
                "default": crate::config::DEFAULT_CURVATURE_SCALE,
                "min": 1.0,
                "description": "Scale factor inside the curvature log compression"
            },
            "palette": {
                "type": "string",
                "default": Palette::default().name(),
                "values": Palette::list_names(),
                "description": "Active color palette"
            }
        })
    }
}
