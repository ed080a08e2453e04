//! Color types and conversion functions for driftfield.
//!
//! The simulation emits colors in HSB (hue 0–360, saturation and brightness
//! 0–100, alpha 0–1), matching the ranges the palette maps were designed in.
//! Rasterizers convert to sRGB with [`hsba_to_srgb`]. All conversions are
//! pure functions using `f64` throughout.

/// HSB color with alpha: hue in [0, 360), saturation and brightness in
/// [0, 100], alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsba {
    pub h: f64,
    pub s: f64,
    pub b: f64,
    pub a: f64,
}

/// sRGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Converts an HSB color to sRGB, ignoring alpha.
///
/// Hue is wrapped into [0, 360); saturation and brightness are clamped to
/// their [0, 100] ranges before conversion, so any finite input produces a
/// valid color.
pub fn hsba_to_srgb(color: Hsba) -> Srgb {
    let h = color.h.rem_euclid(360.0);
    let s = color.s.clamp(0.0, 100.0) / 100.0;
    let v = color.b.clamp(0.0, 100.0) / 100.0;

    let c = v * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = v - c;
    Srgb {
        r: r1 + m,
        g: g1 + m,
        b: b1 + m,
    }
}
