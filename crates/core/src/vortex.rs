//! Point vortices: moving rotational force sources with finite radius.
//!
//! Each vortex drifts slowly across the canvas, reflecting elastically off
//! the edges, and contributes a tangential force that falls off
//! quadratically to zero at its radius. Vortices are spawned wholesale from
//! the PRNG and only their position/velocity mutate afterwards.

use glam::DVec2;

use crate::prng::Xorshift64;

/// Drift speed applied to the random spawn direction.
const DRIFT_SPEED: f64 = 0.3;
/// Spawn range for vortex strength.
const STRENGTH_RANGE: (f64, f64) = (0.3, 0.8);
/// Spawn range for the radius of influence, in pixels.
const RADIUS_RANGE: (f64, f64) = (100.0, 250.0);

/// A drifting point vortex.
#[derive(Debug, Clone)]
pub struct Vortex {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Intensity in (0, 1].
    pub strength: f64,
    /// Radius of influence in pixels; force is zero at and beyond it.
    pub radius: f64,
    /// +1 for counter-clockwise, -1 for clockwise.
    pub rotation_sign: f64,
}

impl Vortex {
    /// Spawns a vortex at a uniformly random position with randomized drift,
    /// strength, radius, and rotation direction.
    pub fn random(rng: &mut Xorshift64, width: f64, height: f64) -> Self {
        Self {
            position: DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height)),
            velocity: rng.next_unit_vec() * DRIFT_SPEED,
            strength: rng.next_range(STRENGTH_RANGE.0, STRENGTH_RANGE.1),
            radius: rng.next_range(RADIUS_RANGE.0, RADIUS_RANGE.1),
            rotation_sign: rng.next_sign(),
        }
    }

    /// Advances the drift one frame, reflecting off canvas edges.
    ///
    /// The reflection is elastic: the offending velocity component is
    /// negated and the position clamped back into bounds, so a vortex can
    /// never stay pinned outside the canvas.
    pub fn update(&mut self, width: f64, height: f64) {
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y = -self.velocity.y;
        }
        self.position.x = self.position.x.clamp(0.0, width);
        self.position.y = self.position.y.clamp(0.0, height);
    }

    /// Tangential force at `point`, in world/pixel space.
    ///
    /// Zero at the vortex center and at or beyond the radius. Inside, the
    /// 90°-rotated offset direction is scaled by `strength * falloff²` with
    /// `falloff = 1 - dist/radius`, giving a smooth zero at the boundary.
    pub fn force_at(&self, point: DVec2) -> DVec2 {
        let d = point - self.position;
        let dist = d.length();
        if dist <= 0.0 || dist >= self.radius {
            return DVec2::ZERO;
        }
        let tangent = DVec2::new(-d.y, d.x) / dist * self.rotation_sign;
        let falloff = 1.0 - dist / self.radius;
        tangent * (self.strength * falloff * falloff)
    }
}

/// Spawns `count` vortices for a canvas of the given size.
pub fn spawn(rng: &mut Xorshift64, count: usize, width: f64, height: f64) -> Vec<Vortex> {
    (0..count).map(|_| Vortex::random(rng, width, height)).collect()
}
