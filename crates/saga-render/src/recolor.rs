//! Shade-preserving recolor
//!
//! Each masked pixel keeps its luminance relative to the region's reference
//! color and takes the target's hue and saturation:
//! `new_luminance = pixel_luminance / mean_luminance * target_luminance`.

use crate::compose::blend_over;
use crate::mask::RegionMask;
use crate::{Color, RgbaImage, color_pixel, pixel_color};
use saga_color::{relative_luminance, set_luminance};

/// Floor for the reference luminance so near-black regions don't divide by ~0
const LUMINANCE_FLOOR: f32 = 1e-4;

/// Recolor the masked pixels of `image` toward `target`.
///
/// The recolored layer carries each source pixel's alpha and is composited
/// over the original, so unmasked pixels come back bit-identical.
pub fn recolor(
    image: &RgbaImage,
    mask: &RegionMask,
    region_mean: Color,
    target: Color,
) -> RgbaImage {
    let mean_luminance = relative_luminance(region_mean).max(LUMINANCE_FLOOR);
    let target_luminance = relative_luminance(target);

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if !mask.contains(x, y) {
            continue;
        }
        let src = pixel_color(pixel);
        let factor = relative_luminance(src) / mean_luminance;
        let shaded = set_luminance(target, factor * target_luminance).with_alpha(src.a);
        *pixel = color_pixel(blend_over(src, shaded));
    }
    out
}
