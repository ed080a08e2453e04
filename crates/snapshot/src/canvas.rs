//! CPU rasterizer for frame draw commands.
//!
//! The canvas holds one floating-point RGB triple per pixel and replays
//! frames the way a live host renders them: a full-canvas blend toward
//! black at the frame's fade alpha, then each segment stamped as a stroked
//! line with per-segment alpha blending. Colors stay in [0, 1] floats until
//! [`PixelCanvas::to_rgba`] quantizes them.

use driftfield_core::color::hsba_to_srgb;
use driftfield_core::error::EngineError;
use driftfield_core::frame::{Frame, Segment};

/// Spacing of stamp centers along a segment, in pixels.
const STAMP_STEP: f64 = 0.5;

/// An RGB pixel buffer that accumulates frames.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    /// Row-major RGB triples, each component in [0, 1].
    data: Vec<f64>,
}

impl PixelCanvas {
    /// Allocates a black canvas.
    ///
    /// Returns `EngineError::InvalidConfig` when either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            data: vec![0.0; width * height * 3],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Replays one frame: fade first, then every segment in draw order.
    pub fn apply_frame(&mut self, frame: &Frame) {
        self.fade(frame.fade_alpha);
        for segment in &frame.segments {
            self.draw_segment(segment);
        }
    }

    /// Blends every pixel toward black by `alpha` in [0, 1].
    pub fn fade(&mut self, alpha: f64) {
        let keep = 1.0 - alpha.clamp(0.0, 1.0);
        for c in &mut self.data {
            *c *= keep;
        }
    }

    /// Stamps a stroked line onto the canvas with alpha blending.
    ///
    /// The segment is sampled at half-pixel intervals and a disc of radius
    /// `stroke_width / 2` is blended at each sample. Off-canvas samples are
    /// clipped per pixel, so segments may extend past any edge.
    pub fn draw_segment(&mut self, segment: &Segment) {
        let srgb = hsba_to_srgb(segment.color);
        let alpha = segment.color.a.clamp(0.0, 1.0);
        if alpha == 0.0 {
            return;
        }
        let rgb = [srgb.r, srgb.g, srgb.b];
        let radius = (segment.stroke_width * 0.5).max(0.5);

        let delta = segment.end - segment.start;
        let len = delta.length();
        let steps = (len / STAMP_STEP).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let p = segment.start + delta * t;
            self.stamp(p.x, p.y, radius, rgb, alpha);
        }
    }

    /// Quantizes the canvas to an RGBA8 buffer of length `width * height * 4`.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .flat_map(|px| {
                let r = (px[0].clamp(0.0, 1.0) * 255.0).round() as u8;
                let g = (px[1].clamp(0.0, 1.0) * 255.0).round() as u8;
                let b = (px[2].clamp(0.0, 1.0) * 255.0).round() as u8;
                [r, g, b, 255u8]
            })
            .collect()
    }

    /// The RGB triple at `(x, y)`, for inspection.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[f64; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (x + y * self.width) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Blends a filled disc centered at `(cx, cy)` into the buffer.
    fn stamp(&mut self, cx: f64, cy: f64, radius: f64, rgb: [f64; 3], alpha: f64) {
        if !(cx.is_finite() && cy.is_finite()) {
            return;
        }
        let x0 = ((cx - radius).floor().max(0.0)) as usize;
        let y0 = ((cy - radius).floor().max(0.0)) as usize;
        let x1 = (cx + radius).ceil().min(self.width as f64 - 1.0);
        let y1 = (cy + radius).ceil().min(self.height as f64 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }
        let (x1, y1) = (x1 as usize, y1 as usize);
        let r2 = radius * radius;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let i = (x + y * self.width) * 3;
                for c in 0..3 {
                    self.data[i + c] = self.data[i + c] * (1.0 - alpha) + rgb[c] * alpha;
                }
            }
        }
    }
}
