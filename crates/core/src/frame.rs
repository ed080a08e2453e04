//! Per-frame draw commands produced by the simulation.
//!
//! A frame is a full-canvas low-alpha fade (which makes old trail pixels
//! decay toward black) followed by the line segments the particles added
//! this frame. Renderers consume the commands in order.

use glam::DVec2;

use crate::color::Hsba;

/// One line segment with color and stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
    pub color: Hsba,
    pub stroke_width: f64,
}

/// All draw commands for one frame, in draw order.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Alpha of the full-canvas black fade applied before the segments.
    pub fade_alpha: f64,
    pub segments: Vec<Segment>,
}

impl Frame {
    /// An empty frame with the given fade and capacity for `segments` hint.
    pub fn with_capacity(fade_alpha: f64, segments: usize) -> Self {
        Self {
            fade_alpha,
            segments: Vec::with_capacity(segments),
        }
    }
}
