//! Alpha compositing and pixel-art upscaling

use crate::{Color, RenderError, RgbaImage, color_pixel, pixel_color};

/// Porter-Duff source-over for straight (non-premultiplied) alpha.
///
/// A fully transparent source leaves the destination bit-identical.
pub fn blend_over(dst: Color, src: Color) -> Color {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }

    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0 * (1.0 - sa);
    let out_a = sa + da;
    let channel =
        |s: u8, d: u8| ((s as f32 * sa + d as f32 * da) / out_a).round().clamp(0.0, 255.0) as u8;

    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// Composite `top` over `base` in place, anchored at the origin.
///
/// Pixels of `top` falling outside `base` are clipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage) {
    let width = base.width().min(top.width());
    let height = base.height().min(top.height());

    for y in 0..height {
        for x in 0..width {
            let src = pixel_color(top.get_pixel(x, y));
            if src.a == 0 {
                continue;
            }
            let dst = base.get_pixel_mut(x, y);
            *dst = color_pixel(blend_over(pixel_color(dst), src));
        }
    }
}

/// Composite `top` over a copy of `base`
pub fn composite(base: &RgbaImage, top: &RgbaImage) -> RgbaImage {
    let mut out = base.clone();
    overlay(&mut out, top);
    out
}

/// Integer-factor nearest-neighbor upscale.
///
/// Every source pixel becomes a uniform `factor`x`factor` block; no filtering.
pub fn upscale_nearest(image: &RgbaImage, factor: u32) -> Result<RgbaImage, RenderError> {
    let invalid = || RenderError::InvalidScale(factor, image.width(), image.height());
    if factor == 0 {
        return Err(invalid());
    }
    if factor == 1 {
        return Ok(image.clone());
    }

    let width = image.width().checked_mul(factor).ok_or_else(invalid)?;
    let height = image.height().checked_mul(factor).ok_or_else(invalid)?;

    Ok(RgbaImage::from_fn(width, height, |x, y| {
        *image.get_pixel(x / factor, y / factor)
    }))
}
