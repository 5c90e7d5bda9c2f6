//! Perceptual luminance
//!
//! Recoloring keeps each pixel's luminance relative to its region and
//! re-applies it on top of a new hue, so the remap below has to hit a
//! requested luminance while leaving hue and saturation alone.

use crate::{Color, Hls};

/// Rec. 709 luma weights
const WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Bisection steps when solving for lightness; 2^-24 is below f32 noise
const SOLVE_STEPS: u32 = 24;

/// Relative luminance in [0, 1] over normalized channels, alpha ignored
pub fn relative_luminance(color: Color) -> f32 {
    unit_luminance(color.to_unit_rgb())
}

fn unit_luminance([r, g, b]: [f32; 3]) -> f32 {
    WEIGHTS[0] * r + WEIGHTS[1] * g + WEIGHTS[2] * b
}

/// Re-light `color` so its relative luminance is `target` (clamped to [0, 1]).
///
/// Hue and saturation are kept in HLS space and the lightness channel is
/// replaced. Luminance is monotonic in HLS lightness for a fixed hue and
/// saturation, so the replacement lightness is found by bisection. The
/// result is opaque.
pub fn set_luminance(color: Color, target: f32) -> Color {
    let target = if target.is_nan() { 0.0 } else { target.clamp(0.0, 1.0) };
    let hls = Hls::from_color(color);

    if hls.s == 0.0 {
        // grey: lightness and luminance coincide
        return hls.with_lightness(target).to_color();
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..SOLVE_STEPS {
        let mid = (lo + hi) / 2.0;
        if unit_luminance(hls.with_lightness(mid).to_unit_rgb()) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    hls.with_lightness((lo + hi) / 2.0).to_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(relative_luminance(Color::BLACK), 0.0);
        assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_weights() {
        assert!((relative_luminance(Color::rgb(255, 0, 0)) - 0.2126).abs() < 1e-6);
        assert!((relative_luminance(Color::rgb(0, 255, 0)) - 0.7152).abs() < 1e-6);
        assert!((relative_luminance(Color::rgb(0, 0, 255)) - 0.0722).abs() < 1e-6);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let c = Color::rgba(10, 20, 30, 0);
        assert_eq!(relative_luminance(c), relative_luminance(c.with_alpha(255)));
    }

    #[test]
    fn test_set_luminance_keeps_red() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(set_luminance(red, relative_luminance(red)), red);
    }

    #[test]
    fn test_set_luminance_hits_target() {
        let samples = [
            Color::rgb(255, 0, 0),
            Color::rgb(0x41, 0x69, 0xE1),
            Color::rgb(0x8B, 0x45, 0x13),
            Color::rgb(0x22, 0x8B, 0x22),
            Color::rgb(128, 128, 128),
            Color::rgb(1, 2, 3),
        ];
        for color in samples {
            for step in 0..=20 {
                let target = step as f32 / 20.0;
                let out = set_luminance(color, target);
                let got = relative_luminance(out);
                assert!(
                    (got - target).abs() <= 1.0 / 255.0,
                    "{color} at {target}: got {got}"
                );
                assert_eq!(out.a, 255);
            }
        }
    }

    #[test]
    fn test_set_luminance_clamps() {
        let c = Color::rgb(0x6A, 0x4C, 0xB3);
        assert_eq!(set_luminance(c, 3.5), Color::WHITE);
        assert_eq!(set_luminance(c, -1.0), Color::BLACK);
        assert_eq!(set_luminance(c, f32::NAN), Color::BLACK);
    }

    #[test]
    fn test_set_luminance_preserves_hue() {
        let blue = Color::rgb(0x41, 0x69, 0xE1);
        let darker = set_luminance(blue, 0.1);
        let before = Hls::from_color(blue);
        let after = Hls::from_color(darker);
        assert!((before.h - after.h).abs() < 0.01);
        assert!(darker.b > darker.r && darker.b > darker.g);
    }
}
