//! Named color palettes mapping trajectory curvature and speed to HSBA.
//!
//! Every palette shares the same contract: log-compressed curvature in
//! [0, 4] drives hue and brightness, speed in [0, max_speed] drives
//! saturation, and a fixed per-particle hue offset breaks up banding. The
//! grayscale variant ignores hue and saturation entirely. Switching
//! palettes only changes future color computation; no simulation state is
//! touched.

use serde::{Deserialize, Serialize};

use crate::color::Hsba;
use crate::error::EngineError;

/// Upper end of the log-curvature input range; roughly a tight spiral.
const LOG_K_MAX: f64 = 4.0;

/// Cycle order and registry of all palettes.
const ALL: [Palette; 5] = [
    Palette::BluePink,
    Palette::Violet,
    Palette::CyanTeal,
    Palette::RedOrange,
    Palette::Grayscale,
];

const NAMES: [&str; 5] = ["blue-pink", "violet", "cyan-teal", "red-orange", "grayscale"];

/// A named color mapping, selectable at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    /// Deep blues sweeping through magenta into pink.
    #[default]
    BluePink,
    /// Narrow violet band, high saturation.
    Violet,
    /// Cyans and teals.
    CyanTeal,
    /// Reds through oranges into yellow.
    RedOrange,
    /// Brightness-only monochrome.
    Grayscale,
}

impl Palette {
    /// Maps log-compressed curvature, speed, and a per-particle hue offset
    /// to an HSBA color.
    ///
    /// `log_k` is clamped to [0, 4] and `speed` to [0, `max_speed`] so every
    /// variant stays inside its designed hue/brightness band.
    pub fn map_color(self, log_k: f64, speed: f64, max_speed: f64, hue_offset: f64) -> Hsba {
        let k = log_k.clamp(0.0, LOG_K_MAX);
        let s = if max_speed > 0.0 {
            speed.clamp(0.0, max_speed)
        } else {
            0.0
        };
        match self {
            Palette::BluePink => Hsba {
                h: (map_range(k, 0.0, LOG_K_MAX, 200.0, 420.0) + hue_offset * 0.3) % 360.0,
                s: map_range(s, 0.0, max_speed, 50.0, 100.0),
                b: map_range(k, 0.0, LOG_K_MAX, 55.0, 100.0),
                a: 0.40,
            },
            Palette::Violet => Hsba {
                h: (map_range(k, 0.0, LOG_K_MAX, 260.0, 340.0) + hue_offset * 0.1) % 360.0,
                s: map_range(s, 0.0, max_speed, 80.0, 100.0),
                b: map_range(k, 0.0, LOG_K_MAX, 60.0, 100.0),
                a: 0.50,
            },
            Palette::CyanTeal => Hsba {
                h: (map_range(k, 0.0, LOG_K_MAX, 170.0, 230.0) + hue_offset * 0.1) % 360.0,
                s: map_range(s, 0.0, max_speed, 60.0, 95.0),
                b: map_range(k, 0.0, LOG_K_MAX, 60.0, 100.0),
                a: 0.45,
            },
            Palette::RedOrange => Hsba {
                h: (map_range(k, 0.0, LOG_K_MAX, 0.0, 60.0) + hue_offset * 0.1) % 360.0,
                s: map_range(s, 0.0, max_speed, 70.0, 100.0),
                b: map_range(k, 0.0, LOG_K_MAX, 60.0, 100.0),
                a: 0.45,
            },
            Palette::Grayscale => Hsba {
                h: 0.0,
                s: 0.0,
                b: map_range(k, 0.0, LOG_K_MAX, 30.0, 100.0),
                a: 0.35,
            },
        }
    }

    /// The next palette in cycle order, wrapping after the last.
    pub fn next(self) -> Self {
        let idx = ALL.iter().position(|p| *p == self).unwrap_or(0);
        ALL[(idx + 1) % ALL.len()]
    }

    /// This palette's registry name.
    pub fn name(self) -> &'static str {
        match self {
            Palette::BluePink => "blue-pink",
            Palette::Violet => "violet",
            Palette::CyanTeal => "cyan-teal",
            Palette::RedOrange => "red-orange",
            Palette::Grayscale => "grayscale",
        }
    }

    /// Looks up a palette by registry name.
    pub fn from_name(name: &str) -> Result<Self, EngineError> {
        ALL.iter()
            .find(|p| p.name() == name)
            .copied()
            .ok_or_else(|| EngineError::UnknownPalette(name.to_string()))
    }

    /// All recognized palette names, in cycle order.
    pub fn list_names() -> &'static [&'static str] {
        &NAMES
    }

    /// Number of palettes in the cycle.
    pub fn count() -> usize {
        ALL.len()
    }
}

/// Linear remap of `v` from [in0, in1] to [out0, out1], unclamped.
fn map_range(v: f64, in0: f64, in1: f64, out0: f64, out1: f64) -> f64 {
    if (in1 - in0).abs() < f64::EPSILON {
        return out0;
    }
    out0 + (v - in0) / (in1 - in0) * (out1 - out0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_blue_pink() {
        assert_eq!(Palette::default(), Palette::BluePink);
    }

    #[test]
    fn cycling_through_all_palettes_returns_to_start() {
        let start = Palette::BluePink;
        let mut p = start;
        for _ in 0..Palette::count() {
            p = p.next();
        }
        assert_eq!(p, start);
    }

    #[test]
    fn cycle_visits_every_palette_exactly_once() {
        let mut seen = Vec::new();
        let mut p = Palette::BluePink;
        for _ in 0..Palette::count() {
            assert!(!seen.contains(&p), "palette {p:?} visited twice");
            seen.push(p);
            p = p.next();
        }
        assert_eq!(seen.len(), Palette::count());
    }

    #[test]
    fn name_round_trips_through_from_name() {
        for name in Palette::list_names() {
            let p = Palette::from_name(name).unwrap();
            assert_eq!(p.name(), *name);
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        let result = Palette::from_name("sepia");
        assert!(matches!(result, Err(EngineError::UnknownPalette(_))));
    }

    #[test]
    fn blue_pink_hue_spans_blue_to_pink() {
        let straight = Palette::BluePink.map_color(0.0, 1.0, 2.0, 0.0);
        let spiral = Palette::BluePink.map_color(4.0, 1.0, 2.0, 0.0);
        assert!((straight.h - 200.0).abs() < 1e-9, "h = {}", straight.h);
        // 420 wraps to 60.
        assert!((spiral.h - 60.0).abs() < 1e-9, "h = {}", spiral.h);
    }

    #[test]
    fn brightness_increases_with_curvature() {
        for p in ALL {
            let low = p.map_color(0.0, 1.0, 2.0, 0.0);
            let high = p.map_color(4.0, 1.0, 2.0, 0.0);
            assert!(
                high.b > low.b,
                "{p:?}: brightness {} at k=4 not above {} at k=0",
                high.b,
                low.b
            );
        }
    }

    #[test]
    fn saturation_increases_with_speed_except_grayscale() {
        for p in ALL {
            let slow = p.map_color(2.0, 0.0, 2.0, 0.0);
            let fast = p.map_color(2.0, 2.0, 2.0, 0.0);
            if p == Palette::Grayscale {
                assert_eq!(slow.s, 0.0);
                assert_eq!(fast.s, 0.0);
            } else {
                assert!(fast.s > slow.s, "{p:?}: saturation did not increase");
            }
        }
    }

    #[test]
    fn grayscale_ignores_hue_offset() {
        let a = Palette::Grayscale.map_color(2.0, 1.0, 2.0, 0.0);
        let b = Palette::Grayscale.map_color(2.0, 1.0, 2.0, 270.0);
        assert_eq!(a, b);
    }

    #[test]
    fn curvature_beyond_range_is_clamped() {
        let at_max = Palette::Violet.map_color(4.0, 1.0, 2.0, 0.0);
        let beyond = Palette::Violet.map_color(9.0, 1.0, 2.0, 0.0);
        assert_eq!(at_max, beyond);
    }

    #[test]
    fn zero_max_speed_does_not_divide_by_zero() {
        let c = Palette::BluePink.map_color(1.0, 0.5, 0.0, 0.0);
        assert!(c.s.is_finite());
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        let json = serde_json::to_string(&Palette::CyanTeal).unwrap();
        assert_eq!(json, "\"cyan-teal\"");
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Palette::CyanTeal);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn map_color_output_in_declared_ranges(
                log_k in -1.0_f64..10.0,
                speed in -1.0_f64..5.0,
                hue_offset in 0.0_f64..360.0,
            ) {
                for p in ALL {
                    let c = p.map_color(log_k, speed, 2.0, hue_offset);
                    prop_assert!((0.0..360.0).contains(&c.h), "{:?} h = {}", p, c.h);
                    prop_assert!((0.0..=100.0).contains(&c.s), "{:?} s = {}", p, c.s);
                    prop_assert!((0.0..=100.0).contains(&c.b), "{:?} b = {}", p, c.b);
                    prop_assert!((0.0..=1.0).contains(&c.a), "{:?} a = {}", p, c.a);
                }
            }
        }
    }
}
