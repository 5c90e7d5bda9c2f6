//! Hex color strings
//!
//! Accepts `#RRGGBB` and the `#RGB` shorthand; the leading `#` is optional.

use crate::{Color, ColorError};

/// Parse a hex color (#RGB, #RRGGBB) into an opaque color
pub fn hex_to_rgb(hex: &str) -> Result<Color, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    // from_str_radix tolerates a leading '+', so validate up front
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColorFormat(hex.to_string()));
    }

    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidColorFormat(hex.to_string()))
    };

    match digits.len() {
        3 => {
            let r = channel(&digits[0..1])? * 17;
            let g = channel(&digits[1..2])? * 17;
            let b = channel(&digits[2..3])? * 17;
            Ok(Color::rgb(r, g, b))
        }
        6 => {
            let r = channel(&digits[0..2])?;
            let g = channel(&digits[2..4])?;
            let b = channel(&digits[4..6])?;
            Ok(Color::rgb(r, g, b))
        }
        _ => Err(ColorError::InvalidColorFormat(hex.to_string())),
    }
}

/// Format a color as lowercase `#rrggbb`, alpha dropped
pub fn rgb_to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
