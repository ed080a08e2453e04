//! Offline rendering for driftfield simulations.
//!
//! [`canvas::PixelCanvas`] replays frame draw commands into an RGB pixel
//! buffer exactly as a live renderer would (fade, then strokes); the `png`
//! module exports the result to disk. The canvas is always available so
//! embedders with their own output path can skip the `image` dependency by
//! disabling the `png` feature.

#![deny(unsafe_code)]

pub mod canvas;
#[cfg(feature = "png")]
pub mod png;

pub use canvas::PixelCanvas;
#[cfg(feature = "png")]
pub use png::write_png;
