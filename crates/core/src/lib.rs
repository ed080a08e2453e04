//! Deterministic 2-D flow-field particle simulation.
//!
//! A coarse grid of flow vectors is rebuilt every frame from a multi-octave
//! curl-noise field plus a handful of drifting vortices. Particles follow
//! the grid, accumulate a smoothed curvature estimate of their own path, and
//! emit colored trail segments; a per-frame low-alpha fade makes the trails
//! decay. Everything is seeded: the same seed and config reproduce the same
//! frames bit for bit.
//!
//! [`sim::Simulation`] is the entry point; renderers consume the
//! [`frame::Frame`] draw commands it returns from each step.

#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod curl;
pub mod error;
pub mod frame;
pub mod grid;
pub mod noise;
pub mod palette;
pub mod params;
pub mod particle;
pub mod prng;
pub mod sim;
pub mod vortex;

pub use color::{hsba_to_srgb, Hsba, Srgb};
pub use config::SimConfig;
pub use error::EngineError;
pub use frame::{Frame, Segment};
pub use palette::Palette;
pub use sim::Simulation;
