//! Curl of the scalar noise potential: a divergence-free 2-D direction field.
//!
//! The 2-D curl of a scalar potential P is `(∂P/∂y, -∂P/∂x)` — the gradient
//! rotated 90° — so the resulting vector field has zero divergence: swirl
//! with no sinks or sources. Derivatives are central finite differences with
//! a small step in noise-space units. The result is normalized to unit
//! length before use; magnitude is supplied downstream by force scaling.

use glam::DVec2;

use crate::noise::NoiseField;

/// Finite-difference step in noise-space units.
pub const CURL_EPS: f64 = 0.01;

/// Synthesizes unit curl vectors from a [`NoiseField`] potential.
#[derive(Clone)]
pub struct CurlField {
    potential: NoiseField,
    eps: f64,
}

impl CurlField {
    /// Creates a curl field over a seeded noise potential with the default
    /// step [`CURL_EPS`].
    pub fn new(seed: u32) -> Self {
        Self {
            potential: NoiseField::new(seed),
            eps: CURL_EPS,
        }
    }

    /// The underlying scalar potential.
    pub fn potential(&self) -> &NoiseField {
        &self.potential
    }

    /// Unit curl vector at `(x, y, z)` in noise space.
    ///
    /// Returns the zero vector where the potential is locally flat (zero
    /// gradient), rather than dividing by zero.
    pub fn curl_at(&self, x: f64, y: f64, z: f64) -> DVec2 {
        let e = self.eps;
        let dp_dy =
            (self.potential.potential(x, y + e, z) - self.potential.potential(x, y - e, z))
                / (2.0 * e);
        let dp_dx =
            (self.potential.potential(x + e, y, z) - self.potential.potential(x - e, y, z))
                / (2.0 * e);
        DVec2::new(dp_dy, -dp_dx).normalize_or_zero()
    }
}
