//! Coarse spatial grid caching one combined flow vector per cell per frame.
//!
//! The grid is rebuilt wholesale every frame: each cell gets the unit curl
//! vector sampled in noise space plus the sum of all vortex forces at the
//! cell's world position. The curl contributes direction at unit magnitude
//! while vortex forces add unnormalized, so vortices dominate near their
//! centers and fade to pure curl flow at their boundaries.
//!
//! Cells are stored row-major, indexed `x + y * cols`. Resizing requires a
//! fresh allocation via [`FlowGrid::new`]; the grid is never resized in place.

use glam::DVec2;

use crate::curl::CurlField;
use crate::error::EngineError;
use crate::vortex::Vortex;

/// Per-frame cache of combined (curl + vortex) flow vectors.
#[derive(Debug, Clone)]
pub struct FlowGrid {
    cols: usize,
    rows: usize,
    cell_size: f64,
    cells: Vec<DVec2>,
}

impl FlowGrid {
    /// Allocates a zeroed grid covering a `width` x `height` canvas at the
    /// given cell size.
    ///
    /// Dimensions are `floor(width / cell_size)` x `floor(height / cell_size)`.
    /// Returns `EngineError::InvalidDimensions` if either count is zero or
    /// `cell_size` is not a positive finite number.
    pub fn new(width: f64, height: f64, cell_size: f64) -> Result<Self, EngineError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                cell_size,
            });
        }
        let cols = (width / cell_size).floor() as usize;
        let rows = (height / cell_size).floor() as usize;
        if cols == 0 || rows == 0 {
            return Err(EngineError::InvalidDimensions {
                width,
                height,
                cell_size,
            });
        }
        Ok(Self {
            cols,
            rows,
            cell_size,
            cells: vec![DVec2::ZERO; cols * rows],
        })
    }

    /// Grid width in cells.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Grid height in cells.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one cell in pixels.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Read-only access to the row-major cell vectors.
    pub fn cells(&self) -> &[DVec2] {
        &self.cells
    }

    /// Recomputes every cell from the curl field and vortex set.
    ///
    /// Noise coordinates advance by `inc` per column/row independent of the
    /// cell size; `zoff` is the slowly advancing time offset. Vortex forces
    /// are evaluated at the cell's world position (in pixels) and added to
    /// the unit curl vector unnormalized.
    pub fn rebuild(&mut self, curl: &CurlField, vortices: &[Vortex], inc: f64, zoff: f64) {
        let mut yoff = 0.0;
        for y in 0..self.rows {
            let mut xoff = 0.0;
            for x in 0..self.cols {
                let mut v = curl.curl_at(xoff, yoff, zoff);

                let world = DVec2::new(x as f64 * self.cell_size, y as f64 * self.cell_size);
                for vortex in vortices {
                    v += vortex.force_at(world);
                }

                self.cells[x + y * self.cols] = v;
                xoff += inc;
            }
            yoff += inc;
        }
    }

    /// The combined flow vector for the cell containing `position`, or
    /// `None` when the position lies outside the grid.
    ///
    /// Out-of-bounds positions contribute no force; indices are checked per
    /// axis so a particle beyond the right edge never reads from the next
    /// row.
    pub fn sample(&self, position: DVec2) -> Option<DVec2> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let col = (position.x / self.cell_size).floor() as usize;
        let row = (position.y / self.cell_size).floor() as usize;
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[col + row * self.cols])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Xorshift64;
    use crate::vortex;

    #[test]
    fn new_computes_floor_dimensions() {
        let grid = FlowGrid::new(645.0, 482.0, 20.0).unwrap();
        assert_eq!(grid.cols(), 32);
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.cells().len(), 32 * 24);
    }

    #[test]
    fn new_rejects_canvas_smaller_than_one_cell() {
        let result = FlowGrid::new(10.0, 400.0, 20.0);
        assert!(matches!(
            result,
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_rejects_zero_cell_size() {
        let result = FlowGrid::new(640.0, 480.0, 0.0);
        assert!(matches!(
            result,
            Err(EngineError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_rejects_negative_cell_size() {
        assert!(FlowGrid::new(640.0, 480.0, -5.0).is_err());
    }

    #[test]
    fn rebuild_fills_every_cell_with_finite_vectors() {
        let mut grid = FlowGrid::new(400.0, 300.0, 20.0).unwrap();
        let curl = CurlField::new(42);
        let mut rng = Xorshift64::new(42);
        let vortices = vortex::spawn(&mut rng, 4, 400.0, 300.0);

        grid.rebuild(&curl, &vortices, 0.08, 0.0);

        for (i, cell) in grid.cells().iter().enumerate() {
            assert!(
                cell.x.is_finite() && cell.y.is_finite(),
                "cell {i} not finite: {cell:?}"
            );
        }
    }

    #[test]
    fn rebuild_without_vortices_stores_unit_vectors() {
        let mut grid = FlowGrid::new(200.0, 200.0, 20.0).unwrap();
        let curl = CurlField::new(42);
        grid.rebuild(&curl, &[], 0.08, 0.37);

        for (i, cell) in grid.cells().iter().enumerate() {
            let len = cell.length();
            assert!(
                len < 1e-12 || (len - 1.0).abs() < 1e-9,
                "cell {i} length {len} is neither zero nor unit"
            );
        }
    }

    #[test]
    fn rebuild_matches_direct_curl_samples() {
        let mut grid = FlowGrid::new(100.0, 100.0, 20.0).unwrap();
        let curl = CurlField::new(9);
        let inc = 0.1;
        let zoff = 1.5;
        grid.rebuild(&curl, &[], inc, zoff);

        // Cell (2, 3) was sampled at noise coords (2*inc, 3*inc, zoff).
        let expected = curl.curl_at(2.0 * inc, 3.0 * inc, zoff);
        let got = grid.cells()[2 + 3 * grid.cols()];
        assert!((got - expected).length() < 1e-12);
    }

    #[test]
    fn vortex_contribution_is_added_to_curl() {
        let mut with = FlowGrid::new(200.0, 200.0, 20.0).unwrap();
        let mut without = FlowGrid::new(200.0, 200.0, 20.0).unwrap();
        let curl = CurlField::new(42);
        let vortex = Vortex {
            position: DVec2::new(100.0, 100.0),
            velocity: DVec2::ZERO,
            strength: 0.8,
            radius: 150.0,
            rotation_sign: 1.0,
        };

        with.rebuild(&curl, std::slice::from_ref(&vortex), 0.08, 0.0);
        without.rebuild(&curl, &[], 0.08, 0.0);

        // Cell (3, 3) sits at world (60, 60), inside the vortex radius.
        let idx = 3 + 3 * with.cols();
        let diff = with.cells()[idx] - without.cells()[idx];
        let expected = vortex.force_at(DVec2::new(60.0, 60.0));
        assert!((diff - expected).length() < 1e-12);
    }

    #[test]
    fn sample_returns_cell_for_interior_position() {
        let mut grid = FlowGrid::new(100.0, 100.0, 20.0).unwrap();
        let curl = CurlField::new(3);
        grid.rebuild(&curl, &[], 0.08, 0.0);

        // (45, 67) falls in cell (2, 3).
        let sampled = grid.sample(DVec2::new(45.0, 67.0)).unwrap();
        let direct = grid.cells()[2 + 3 * grid.cols()];
        assert_eq!(sampled, direct);
    }

    #[test]
    fn sample_out_of_bounds_returns_none() {
        let grid = FlowGrid::new(100.0, 100.0, 20.0).unwrap();
        assert!(grid.sample(DVec2::new(-0.1, 50.0)).is_none());
        assert!(grid.sample(DVec2::new(50.0, -0.1)).is_none());
        assert!(grid.sample(DVec2::new(100.0, 50.0)).is_none());
        assert!(grid.sample(DVec2::new(50.0, 100.0)).is_none());
    }

    #[test]
    fn sample_beyond_right_edge_does_not_wrap_to_next_row() {
        let mut grid = FlowGrid::new(100.0, 100.0, 20.0).unwrap();
        let curl = CurlField::new(5);
        grid.rebuild(&curl, &[], 0.08, 0.0);

        // x = 105 would alias into row 1 under flat indexing; per-axis
        // bounds checking must reject it instead.
        assert!(grid.sample(DVec2::new(105.0, 0.0)).is_none());
    }

    #[test]
    fn sample_at_origin_returns_first_cell() {
        let mut grid = FlowGrid::new(100.0, 100.0, 20.0).unwrap();
        let curl = CurlField::new(5);
        grid.rebuild(&curl, &[], 0.08, 0.0);
        assert_eq!(grid.sample(DVec2::ZERO), Some(grid.cells()[0]));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sample_never_panics_for_any_position(
                x in -1e6_f64..1e6,
                y in -1e6_f64..1e6,
            ) {
                let grid = FlowGrid::new(640.0, 480.0, 20.0).unwrap();
                let _ = grid.sample(DVec2::new(x, y));
            }

            #[test]
            fn in_bounds_positions_always_sample(
                x in 0.0_f64..639.0,
                y in 0.0_f64..479.0,
            ) {
                let grid = FlowGrid::new(640.0, 480.0, 20.0).unwrap();
                prop_assert!(grid.sample(DVec2::new(x, y)).is_some());
            }
        }
    }
}
