//! PNG export of a rendered canvas.
//!
//! Feature-gated behind `png` (default on) so embedders that render through
//! their own pipeline can depend on the canvas without pulling in the
//! `image` crate.

use std::path::Path;

use driftfield_core::error::EngineError;

use crate::canvas::PixelCanvas;

/// Writes the canvas contents as a PNG image.
///
/// Returns `EngineError::InvalidConfig` if the canvas dimensions overflow
/// `u32`, or `EngineError::Io` on write failure.
pub fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<(), EngineError> {
    let rgba = canvas.to_rgba();
    let w = u32::try_from(canvas.width())
        .map_err(|_| EngineError::InvalidConfig("canvas width overflows u32".into()))?;
    let h = u32::try_from(canvas.height())
        .map_err(|_| EngineError::InvalidConfig("canvas height overflows u32".into()))?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| EngineError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfield_core::color::Hsba;
    use driftfield_core::frame::Segment;
    use glam::DVec2;

    #[test]
    fn write_png_round_trip() {
        let mut canvas = PixelCanvas::new(16, 16).unwrap();
        canvas.draw_segment(&Segment {
            start: DVec2::new(2.0, 8.0),
            end: DVec2::new(14.0, 8.0),
            color: Hsba {
                h: 210.0,
                s: 80.0,
                b: 90.0,
                a: 1.0,
            },
            stroke_width: 1.5,
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trails.png");

        write_png(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
        // The stroked line survives the round trip.
        let px = img.get_pixel(8, 8);
        assert!(px[2] > 100, "blue channel too dark: {:?}", px);
    }
}
