//! Hue / lightness / saturation
//!
//! Double-hexcone HLS model, all components in [0, 1].

use crate::Color;

/// A color in HLS space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    /// Hue, as a fraction of a full turn
    pub h: f32,
    /// Lightness
    pub l: f32,
    /// Saturation
    pub s: f32,
}

impl Hls {
    pub fn new(h: f32, l: f32, s: f32) -> Self {
        Self { h, l, s }
    }

    /// Convert from RGB, alpha ignored
    pub fn from_color(color: Color) -> Self {
        let [r, g, b] = color.to_unit_rgb();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, l, 0.0);
        }

        let range = max - min;
        let s = if l <= 0.5 {
            range / (max + min)
        } else {
            range / (2.0 - max - min)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self::new((h / 6.0).rem_euclid(1.0), l, s)
    }

    /// Channels in [0, 1]
    pub fn to_unit_rgb(self) -> [f32; 3] {
        if self.s == 0.0 {
            return [self.l, self.l, self.l];
        }

        let m2 = if self.l <= 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let m1 = 2.0 * self.l - m2;

        [
            hue_channel(m1, m2, self.h + 1.0 / 3.0),
            hue_channel(m1, m2, self.h),
            hue_channel(m1, m2, self.h - 1.0 / 3.0),
        ]
    }

    /// Opaque RGB color
    pub fn to_color(self) -> Color {
        Color::from_unit_rgb(self.to_unit_rgb())
    }

    /// Same hue and saturation at another lightness
    pub fn with_lightness(self, l: f32) -> Self {
        Self { l, ..self }
    }
}

fn hue_channel(m1: f32, m2: f32, hue: f32) -> f32 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_primary_hues() {
        let red = Hls::from_color(Color::rgb(255, 0, 0));
        assert!(approx(red.h, 0.0) && approx(red.l, 0.5) && approx(red.s, 1.0));

        let green = Hls::from_color(Color::rgb(0, 255, 0));
        assert!(approx(green.h, 1.0 / 3.0));

        let blue = Hls::from_color(Color::rgb(0, 0, 255));
        assert!(approx(blue.h, 2.0 / 3.0));
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let grey = Hls::from_color(Color::rgb(128, 128, 128));
        assert_eq!(grey.s, 0.0);
        assert!(approx(grey.l, 128.0 / 255.0));
    }

    #[test]
    fn test_round_trip() {
        for c in [
            Color::rgb(0x8B, 0x45, 0x13),
            Color::rgb(0x41, 0x69, 0xE1),
            Color::rgb(0xDA, 0xA5, 0x20),
            Color::rgb(0x2C, 0x1B, 0x18),
            Color::rgb(250, 250, 250),
        ] {
            assert_eq!(Hls::from_color(c).to_color(), c);
        }
    }

    #[test]
    fn test_lightness_extremes() {
        let hls = Hls::from_color(Color::rgb(0x22, 0x8B, 0x22));
        assert_eq!(hls.with_lightness(0.0).to_color(), Color::BLACK);
        assert_eq!(hls.with_lightness(1.0).to_color(), Color::WHITE);
    }
}
