//! Region masks
//!
//! A region is recovered by color similarity against a reference color
//! sampled from a small seed box, then smoothed to drop speckle.

use crate::{Color, RgbaImage, pixel_color};
use image::{GrayImage, Luma};

const ON: u8 = 255;
const OFF: u8 = 0;

/// Smoothing kernel: 5x5 ring of ones around an empty 3x3 core, weight 16
const RING_RADIUS: i64 = 2;
const RING_WEIGHT: u32 = 16;

/// Axis-aligned pixel rectangle, right/bottom edges exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    pub const fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle covering a whole `width`x`height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if point is within this rectangle
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Same rectangle on an image upscaled by `factor`
    pub fn scaled(&self, factor: u32) -> Self {
        Self::new(
            self.x0.saturating_mul(factor),
            self.y0.saturating_mul(factor),
            self.x1.saturating_mul(factor),
            self.y1.saturating_mul(factor),
        )
    }
}

/// Membership mask for one region, same dimensions as its source image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    bits: GrayImage,
}

impl RegionMask {
    /// All-out mask
    pub fn empty(width: u32, height: u32) -> Self {
        Self { bits: GrayImage::new(width, height) }
    }

    /// Mask from a membership predicate
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        Self {
            bits: GrayImage::from_fn(width, height, |x, y| Luma([if f(x, y) { ON } else { OFF }])),
        }
    }

    pub fn width(&self) -> u32 {
        self.bits.width()
    }

    pub fn height(&self) -> u32 {
        self.bits.height()
    }

    /// Membership test; out-of-bounds points are never members
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.bits.get_pixel(x, y).0[0] != OFF
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width() && y < self.height() {
            self.bits.put_pixel(x, y, Luma([if on { ON } else { OFF }]));
        }
    }

    /// Number of member pixels
    pub fn count(&self) -> usize {
        self.bits.pixels().filter(|p| p.0[0] != OFF).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.pixels().all(|p| p.0[0] == OFF)
    }

    /// Tight bounding box of member pixels, `None` for an empty mask
    pub fn bounding_box(&self) -> Option<PixelRect> {
        let mut bounds: Option<PixelRect> = None;
        for (x, y, p) in self.bits.enumerate_pixels() {
            if p.0[0] == OFF {
                continue;
            }
            let b = bounds.get_or_insert(PixelRect::new(x, y, x + 1, y + 1));
            b.x0 = b.x0.min(x);
            b.y0 = b.y0.min(y);
            b.x1 = b.x1.max(x + 1);
            b.y1 = b.y1.max(y + 1);
        }
        bounds
    }

    /// Drop members for which `keep` is false
    pub fn retain(&mut self, mut keep: impl FnMut(u32, u32) -> bool) {
        for (x, y, p) in self.bits.enumerate_pixels_mut() {
            if p.0[0] != OFF && !keep(x, y) {
                p.0[0] = OFF;
            }
        }
    }

    /// 0/255 intensity view
    pub fn as_gray(&self) -> &GrayImage {
        &self.bits
    }
}

/// Mean color of `rect`.
///
/// Every pixel of the rectangle counts, transparent ones included; parts of
/// the rectangle outside the image count as transparent black. Channels are
/// truncated and the result is opaque.
pub fn crop_mean(image: &RgbaImage, rect: PixelRect) -> Color {
    let area = rect.width() as u64 * rect.height() as u64;
    if area == 0 {
        return Color::BLACK;
    }

    let mut sum = [0u64; 3];
    for y in rect.y0..rect.y1.min(image.height()) {
        for x in rect.x0..rect.x1.min(image.width()) {
            let c = pixel_color(image.get_pixel(x, y));
            sum[0] += c.r as u64;
            sum[1] += c.g as u64;
            sum[2] += c.b as u64;
        }
    }

    Color::rgb(
        (sum[0] / area) as u8,
        (sum[1] / area) as u8,
        (sum[2] / area) as u8,
    )
}

/// Raw similarity mask: visible pixels closer than `tolerance` to `reference`
pub fn similarity_mask(
    image: &RgbaImage,
    reference: Color,
    tolerance: f32,
    alpha_threshold: u8,
) -> RegionMask {
    RegionMask::from_fn(image.width(), image.height(), |x, y| {
        let c = pixel_color(image.get_pixel(x, y));
        c.a >= alpha_threshold && c.distance(reference) < tolerance
    })
}

/// Ring-blur the mask and re-binarize at `threshold` (0-255 intensity).
///
/// Edges are extended by replication. The ring leaves out the center pixel,
/// so isolated members vanish and one-pixel gaps close.
pub fn smooth_mask(mask: &RegionMask, threshold: u8) -> RegionMask {
    let (width, height) = (mask.width(), mask.height());
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let clamp = |v: i64, max: u32| v.clamp(0, max as i64 - 1) as u32;

    RegionMask::from_fn(width, height, |x, y| {
        let mut hits = 0u32;
        for dy in -RING_RADIUS..=RING_RADIUS {
            for dx in -RING_RADIUS..=RING_RADIUS {
                if dx.abs() < RING_RADIUS && dy.abs() < RING_RADIUS {
                    continue;
                }
                let sx = clamp(x as i64 + dx, width);
                let sy = clamp(y as i64 + dy, height);
                if mask.contains(sx, sy) {
                    hits += 1;
                }
            }
        }
        let intensity = (hits * ON as u32) as f32 / RING_WEIGHT as f32;
        intensity.round() > threshold as f32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_rect_basics() {
        let r = PixelRect::new(10, 20, 42, 52);
        assert_eq!((r.width(), r.height()), (32, 32));
        assert!(r.contains(10, 20));
        assert!(!r.contains(42, 20));
        assert_eq!(r.scaled(2), PixelRect::new(20, 40, 84, 104));
        assert!(PixelRect::new(5, 5, 5, 9).is_empty());
    }

    #[test]
    fn test_bounding_box() {
        let mut mask = RegionMask::empty(10, 10);
        assert_eq!(mask.bounding_box(), None);
        mask.set(2, 3, true);
        mask.set(6, 8, true);
        assert_eq!(mask.bounding_box(), Some(PixelRect::new(2, 3, 7, 9)));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn test_crop_mean_truncates() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([10, 0, 255, 255]));
        image.put_pixel(1, 0, Rgba([11, 1, 0, 255]));
        assert_eq!(crop_mean(&image, PixelRect::full(2, 1)), Color::rgb(10, 0, 127));
    }

    #[test]
    fn test_crop_mean_counts_outside_as_transparent() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 255]));
        assert_eq!(crop_mean(&image, PixelRect::new(0, 0, 4, 2)), Color::rgb(50, 50, 50));
    }

    #[test]
    fn test_crop_mean_of_transparent_crop() {
        let image = RgbaImage::new(4, 4);
        assert_eq!(crop_mean(&image, PixelRect::full(4, 4)), Color::BLACK);
    }

    #[test]
    fn test_similarity_skips_transparent() {
        let mut image = RgbaImage::from_pixel(3, 1, Rgba([200, 10, 10, 255]));
        image.put_pixel(1, 0, Rgba([200, 10, 10, 15]));
        image.put_pixel(2, 0, Rgba([10, 200, 10, 255]));

        let mask = similarity_mask(&image, Color::rgb(200, 10, 10), 52.0, 16);
        assert!(mask.contains(0, 0));
        assert!(!mask.contains(1, 0));
        assert!(!mask.contains(2, 0));
    }

    #[test]
    fn test_similarity_is_strict() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([3, 4, 0, 255]));
        assert!(!similarity_mask(&image, Color::BLACK, 5.0, 16).contains(0, 0));
        assert!(similarity_mask(&image, Color::BLACK, 5.1, 16).contains(0, 0));
    }

    #[test]
    fn test_smooth_drops_speckle() {
        let mut mask = RegionMask::empty(9, 9);
        mask.set(4, 4, true);
        assert!(smooth_mask(&mask, 100).is_empty());
    }

    #[test]
    fn test_smooth_keeps_solid_block() {
        let mask = RegionMask::from_fn(12, 12, |x, y| (3..9).contains(&x) && (3..9).contains(&y));
        let smoothed = smooth_mask(&mask, 100);
        for y in 4..8 {
            for x in 4..8 {
                assert!(smoothed.contains(x, y), "({x}, {y}) lost");
            }
        }
        // straight edges survive, square corners get rounded off
        assert!(smoothed.contains(3, 5));
        assert!(!smoothed.contains(3, 3));
        assert!(!smoothed.contains(0, 0));
    }

    #[test]
    fn test_smooth_fills_pinhole() {
        let mut mask = RegionMask::from_fn(9, 9, |_, _| true);
        mask.set(4, 4, false);
        assert!(smooth_mask(&mask, 100).contains(4, 4));
    }

    #[test]
    fn test_smooth_full_mask_with_edges() {
        let mask = RegionMask::from_fn(3, 3, |_, _| true);
        assert_eq!(smooth_mask(&mask, 100).count(), 9);
    }
}
