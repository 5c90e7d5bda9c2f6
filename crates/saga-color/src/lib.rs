//! Saga Color - sprite color math
//!
//! Hex parsing, perceptual luminance and the luminance remap used to
//! recolor sprite regions without losing their painted shading.

mod hex;
mod hls;
mod luminance;

pub use hex::{hex_to_rgb, rgb_to_hex};
pub use hls::Hls;
pub use luminance::{relative_luminance, set_luminance};

/// Color (RGBA, 8 bits per channel, straight alpha)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Channels normalized to [0, 1], alpha ignored
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Build an opaque color from [0, 1] channels (rounded, clamped)
    pub fn from_unit_rgb([r, g, b]: [f32; 3]) -> Self {
        Self::rgb(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// Euclidean distance in RGB space, alpha ignored
    pub fn distance(self, other: Color) -> f32 {
        let dr = self.r as f32 - other.r as f32;
        let dg = self.g as f32 - other.g as f32;
        let db = self.b as f32 - other.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Perceptual luminance of this color, see [`relative_luminance`]
    pub fn luminance(self) -> f32 {
        relative_luminance(self)
    }

    /// `#rrggbb` form of this color
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }
}

impl std::str::FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_round_trip() {
        let c = Color::rgb(12, 200, 255);
        assert_eq!(Color::from_unit_rgb(c.to_unit_rgb()), c);
    }

    #[test]
    fn test_from_unit_clamps() {
        assert_eq!(Color::from_unit_rgb([-0.5, 1.5, 0.5]), Color::rgb(0, 255, 128));
    }

    #[test]
    fn test_distance() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(3, 4, 0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(b.with_alpha(0)), 0.0);
    }

    #[test]
    fn test_from_str() {
        let c: Color = "#4169E1".parse().unwrap();
        assert_eq!(c, Color::rgb(0x41, 0x69, 0xE1));
        assert_eq!(c.to_string(), "#4169e1");
    }
}
