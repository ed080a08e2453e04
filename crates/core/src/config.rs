//! Simulation configuration with clamped-to-valid-range sanitization.
//!
//! Invalid values never become runtime faults: [`SimConfig::sanitized`]
//! repairs anything repairable (out-of-range counts, non-positive speeds)
//! by clamping or falling back to the default, and only canvas/cell
//! geometry that cannot hold a single grid cell is rejected later, when the
//! grid is allocated.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::palette::Palette;
use crate::params::{param_f64, param_string, param_usize};

/// Default grid cell size in pixels (`scl`).
pub const DEFAULT_CELL_SIZE: f64 = 20.0;
/// Default noise-space increment per grid column/row (`inc`).
pub const DEFAULT_NOISE_INCREMENT: f64 = 0.08;
/// Default field evolution rate (z advance per frame).
pub const DEFAULT_EVOLUTION_SPEED: f64 = 0.003;
/// Default number of particles.
pub const DEFAULT_PARTICLE_COUNT: usize = 3000;
/// Particle count bounds for clamping.
pub const MIN_PARTICLE_COUNT: usize = 500;
pub const MAX_PARTICLE_COUNT: usize = 10_000;
/// Default maximum particle speed in pixels per frame.
pub const DEFAULT_MAX_SPEED: f64 = 2.0;
/// Default trail fade alpha (5/255, a slow decay toward black).
pub const DEFAULT_TRAIL_ALPHA: f64 = 5.0 / 255.0;
/// Default stroke width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.5;
/// Default number of vortices.
pub const DEFAULT_VORTEX_COUNT: usize = 4;
/// Default curvature-to-color scale factor.
pub const DEFAULT_CURVATURE_SCALE: f64 = 500.0;

/// All tunable simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Flow grid cell size in pixels.
    pub cell_size: f64,
    /// Noise-space step per grid column/row.
    pub noise_increment: f64,
    /// Per-frame advance of the noise z coordinate.
    pub evolution_speed: f64,
    /// Live particle count, clamped to [500, 10000].
    pub particle_count: usize,
    /// Velocity magnitude cap in pixels per frame.
    pub max_speed: f64,
    /// Alpha of the per-frame trail fade, in [0, 1].
    pub trail_alpha: f64,
    /// Segment stroke width in pixels.
    pub stroke_width: f64,
    /// Number of drifting vortices.
    pub vortex_count: usize,
    /// Scale factor inside the curvature log compression.
    pub curvature_scale: f64,
    /// Active color palette.
    pub palette: Palette,
}

impl SimConfig {
    /// Creates a config with the standard defaults for the given canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            noise_increment: DEFAULT_NOISE_INCREMENT,
            evolution_speed: DEFAULT_EVOLUTION_SPEED,
            particle_count: DEFAULT_PARTICLE_COUNT,
            max_speed: DEFAULT_MAX_SPEED,
            trail_alpha: DEFAULT_TRAIL_ALPHA,
            stroke_width: DEFAULT_STROKE_WIDTH,
            vortex_count: DEFAULT_VORTEX_COUNT,
            curvature_scale: DEFAULT_CURVATURE_SCALE,
            palette: Palette::default(),
        }
    }

    /// Creates a config from JSON overrides, then sanitizes it.
    ///
    /// Missing or mistyped keys fall back to defaults; an unknown palette
    /// name falls back to the default palette.
    pub fn from_json(width: f64, height: f64, params: &Value) -> Self {
        let defaults = Self::new(width, height);
        let palette = Palette::from_name(&param_string(
            params,
            "palette",
            defaults.palette.name(),
        ))
        .unwrap_or_default();
        Self {
            width,
            height,
            cell_size: param_f64(params, "cell_size", defaults.cell_size),
            noise_increment: param_f64(params, "noise_increment", defaults.noise_increment),
            evolution_speed: param_f64(params, "evolution_speed", defaults.evolution_speed),
            particle_count: param_usize(params, "particle_count", defaults.particle_count),
            max_speed: param_f64(params, "max_speed", defaults.max_speed),
            trail_alpha: param_f64(params, "trail_alpha", defaults.trail_alpha),
            stroke_width: param_f64(params, "stroke_width", defaults.stroke_width),
            vortex_count: param_usize(params, "vortex_count", defaults.vortex_count),
            curvature_scale: param_f64(params, "curvature_scale", defaults.curvature_scale),
            palette,
        }
        .sanitized()
    }

    /// Clamps every value into its valid range.
    ///
    /// Non-finite or non-positive cell size, max speed, stroke width, and
    /// curvature scale revert to their defaults; particle count clamps to
    /// [500, 10000]; trail alpha clamps to [0, 1]; negative noise increment
    /// and evolution speed clamp to zero.
    pub fn sanitized(mut self) -> Self {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            self.cell_size = DEFAULT_CELL_SIZE;
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            self.max_speed = DEFAULT_MAX_SPEED;
        }
        if !(self.stroke_width.is_finite() && self.stroke_width > 0.0) {
            self.stroke_width = DEFAULT_STROKE_WIDTH;
        }
        if !(self.curvature_scale.is_finite() && self.curvature_scale > 0.0) {
            self.curvature_scale = DEFAULT_CURVATURE_SCALE;
        }
        if !self.noise_increment.is_finite() || self.noise_increment < 0.0 {
            self.noise_increment = DEFAULT_NOISE_INCREMENT;
        }
        if !self.evolution_speed.is_finite() || self.evolution_speed < 0.0 {
            self.evolution_speed = DEFAULT_EVOLUTION_SPEED;
        }
        if !self.trail_alpha.is_finite() {
            self.trail_alpha = DEFAULT_TRAIL_ALPHA;
        }
        self.trail_alpha = self.trail_alpha.clamp(0.0, 1.0);
        self.particle_count = self
            .particle_count
            .clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);
        self
    }
}
