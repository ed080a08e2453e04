//! A single flow-field particle: advection, curvature estimation,
//! sub-stepped motion, and trail emission.
//!
//! Each frame a particle runs one fixed cycle: sample the grid cell under
//! it, integrate velocity with the speed cap, update the curvature EMA,
//! advance position in sub-steps that append to the trail buffer, trim the
//! buffer, and nudge itself if it has stalled. Edge crossings wrap to the
//! opposite side and clear the trail atomically so no rendered segment ever
//! spans the canvas.

use std::collections::VecDeque;

use glam::DVec2;

use crate::frame::Segment;
use crate::grid::FlowGrid;
use crate::palette::Palette;
use crate::prng::Xorshift64;

/// Trail history capacity; the oldest sample is dropped past this.
pub const TRAIL_CAPACITY: usize = 12;
/// Exponential moving average factor for curvature smoothing.
const CURVATURE_EMA: f64 = 0.08;
/// Speed floor below which the curvature estimate is left unchanged.
const CURVATURE_MIN_SPEED: f64 = 0.01;
/// Target sub-step length in pixels; steps = ceil(speed / this).
const SUBSTEP_LENGTH: f64 = 2.0;
/// Speed below which the anti-stagnation nudge kicks in.
const STAGNATION_SPEED: f64 = 0.1;
/// Magnitude of the random anti-stagnation impulse.
const NUDGE_IMPULSE: f64 = 0.5;

/// One advected particle with trail history.
#[derive(Debug, Clone)]
pub struct Particle {
    position: DVec2,
    velocity: DVec2,
    acceleration: DVec2,
    smoothed_curvature: f64,
    /// Fixed per-particle hue offset in [0, 360).
    hue_offset: f64,
    /// Speed cached by the last `update` call.
    speed: f64,
    /// Sub-steps taken in the last `update`; only these trail samples are new.
    steps_this_frame: usize,
    trail: VecDeque<DVec2>,
}

impl Particle {
    /// Spawns a particle at a uniformly random canvas position, at rest.
    pub fn random(rng: &mut Xorshift64, width: f64, height: f64) -> Self {
        Self {
            position: DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height)),
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            smoothed_curvature: 0.0,
            hue_offset: rng.next_range(0.0, 360.0),
            speed: 0.0,
            steps_this_frame: 0,
            trail: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
        }
    }

    /// Current position.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// EMA-smoothed curvature estimate, always >= 0.
    pub fn smoothed_curvature(&self) -> f64 {
        self.smoothed_curvature
    }

    /// Number of positions currently in the trail buffer.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Accumulates the flow force from the grid cell under the particle.
    ///
    /// A particle outside the grid (possible between the edge wrap and the
    /// next sample) contributes no force rather than faulting.
    pub fn follow(&mut self, grid: &FlowGrid) {
        if let Some(force) = grid.sample(self.position) {
            self.acceleration += force;
        }
    }

    /// Runs one frame of integration: velocity update with speed cap,
    /// curvature EMA, sub-stepped position advance, trail trim, and
    /// anti-stagnation nudge.
    pub fn update(&mut self, max_speed: f64, rng: &mut Xorshift64) {
        // Heading before this frame's forces, for the turn-angle estimate.
        let prev_heading = self.velocity.to_angle();

        self.velocity = (self.velocity + self.acceleration).clamp_length_max(max_speed);
        self.acceleration = DVec2::ZERO;

        let speed = self.velocity.length();
        self.speed = speed;

        if speed > CURVATURE_MIN_SPEED {
            let mut d_theta = self.velocity.to_angle() - prev_heading;
            // Headings wrap at ±π; fold the difference back into [-π, π].
            if d_theta > std::f64::consts::PI {
                d_theta -= std::f64::consts::TAU;
            }
            if d_theta < -std::f64::consts::PI {
                d_theta += std::f64::consts::TAU;
            }
            let kappa = d_theta.abs() / speed;
            self.smoothed_curvature += (kappa - self.smoothed_curvature) * CURVATURE_EMA;
        }

        // Sub-step so rendered segments stay short at high speed.
        let num_steps = ((speed / SUBSTEP_LENGTH).ceil() as usize).max(1);
        let step = self.velocity / num_steps as f64;
        self.steps_this_frame = num_steps;
        for _ in 0..num_steps {
            self.position += step;
            self.trail.push_back(self.position);
        }
        while self.trail.len() > TRAIL_CAPACITY {
            self.trail.pop_front();
        }

        // A particle resting in a local zero of the field gets a kick so it
        // never stalls permanently.
        if speed < STAGNATION_SPEED {
            self.velocity += rng.next_unit_vec() * NUDGE_IMPULSE;
        }
    }

    /// Wraps the particle to the opposite edge when it leaves the canvas.
    ///
    /// The trail is cleared in the same call, so no segment interpolates
    /// across the boundary.
    pub fn wrap_edges(&mut self, width: f64, height: f64) {
        let mut wrapped = false;
        if self.position.x > width {
            self.position.x = 0.0;
            wrapped = true;
        }
        if self.position.x < 0.0 {
            self.position.x = width;
            wrapped = true;
        }
        if self.position.y > height {
            self.position.y = 0.0;
            wrapped = true;
        }
        if self.position.y < 0.0 {
            self.position.y = height;
            wrapped = true;
        }
        if wrapped {
            self.trail.clear();
        }
    }

    /// Appends this frame's new trail segments to `out`.
    ///
    /// Color comes from the log-compressed smoothed curvature, the cached
    /// speed, and the particle's hue offset. Only the segments added by the
    /// last `update` are emitted, not the whole history.
    pub fn emit(
        &self,
        palette: Palette,
        max_speed: f64,
        curvature_scale: f64,
        stroke_width: f64,
        out: &mut Vec<Segment>,
    ) {
        let len = self.trail.len();
        if len < 2 {
            return;
        }
        let log_k = (1.0 + self.smoothed_curvature * curvature_scale).ln();
        let color = palette.map_color(log_k, self.speed, max_speed, self.hue_offset);

        let start = (len - self.steps_this_frame).max(1);
        for i in start..len {
            out.push(Segment {
                start: self.trail[i - 1],
                end: self.trail[i],
                color,
                stroke_width,
            });
        }
    }
}
