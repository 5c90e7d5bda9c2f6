//! Procedural facial accessories
//!
//! Glasses and mustache are drawn with rectangle primitives rather than
//! bitmaps. Placement is a fixed geometric heuristic: the head is taken to
//! be the top-left 65% x 55% of the skin mask's bounding box (the box also
//! spans arms and legs), and features sit at fixed fractions of that head
//! box. It only has to look right on the stock base sprites.

use crate::compose::blend_over;
use crate::mask::{PixelRect, RegionMask};
use crate::{Color, RgbaImage, color_pixel, pixel_color};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

const HEAD_WIDTH: f32 = 0.65;
const HEAD_HEIGHT: f32 = 0.55;
const EYE_LINE: f32 = 0.45;
const MUSTACHE_LINE: f32 = 0.62;
/// Inset of the left lens from the head box, and gap between lenses
const LENS_MARGIN: i32 = 6;

/// Accessories to draw and their colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accessories {
    pub glasses: Option<Color>,
    pub mustache: Option<Color>,
}

impl Accessories {
    pub fn is_empty(&self) -> bool {
        self.glasses.is_none() && self.mustache.is_none()
    }
}

/// Head box derived from the skin mask; the full image when the mask is empty
pub fn head_box(skin: &RegionMask) -> PixelRect {
    let skin_box = skin
        .bounding_box()
        .unwrap_or_else(|| PixelRect::full(skin.width(), skin.height()));
    PixelRect::new(
        skin_box.x0,
        skin_box.y0,
        skin_box.x0 + (skin_box.width() as f32 * HEAD_WIDTH) as u32,
        skin_box.y0 + (skin_box.height() as f32 * HEAD_HEIGHT) as u32,
    )
}

/// Draw the requested accessories directly onto `image`
pub fn overlay_accessories(image: &mut RgbaImage, skin: &RegionMask, accessories: &Accessories) {
    if accessories.is_empty() {
        return;
    }
    let Some(mut pixmap) = Pixmap::new(image.width(), image.height()) else {
        return;
    };

    let head = head_box(skin);
    tracing::debug!(?head, ?accessories, "Placing facial accessories");

    if let Some(color) = accessories.glasses {
        draw_glasses(&mut pixmap, head, color);
    }
    if let Some(color) = accessories.mustache {
        draw_mustache(&mut pixmap, head, color);
    }

    for (pixel, drawn) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = drawn.demultiply();
        if c.alpha() == 0 {
            continue;
        }
        let src = Color::rgba(c.red(), c.green(), c.blue(), c.alpha());
        *pixel = color_pixel(blend_over(pixel_color(pixel), src));
    }
}

/// Two outlined lenses on the eye line joined by a bridge
fn draw_glasses(pixmap: &mut Pixmap, head: PixelRect, color: Color) {
    let (x0, y0) = (head.x0 as i32, head.y0 as i32);
    let (w, h) = (head.width() as i32, head.height() as i32);

    let eye_y = y0 + (h as f32 * EYE_LINE) as i32;
    let lens_h = (h / 10).max(2);
    let lens_w = (w / 4).max(6);

    let left = x0 + LENS_MARGIN;
    let right = left + lens_w + LENS_MARGIN;
    let paint = solid(color);

    stroke_box(pixmap, &paint, left, eye_y, left + lens_w, eye_y + lens_h);
    stroke_box(pixmap, &paint, right, eye_y, right + lens_w, eye_y + lens_h);
    let bridge_y = eye_y + lens_h / 2;
    fill_box(pixmap, &paint, left + lens_w, bridge_y, right, bridge_y);
}

/// Filled bar centered under the nose
fn draw_mustache(pixmap: &mut Pixmap, head: PixelRect, color: Color) {
    let (x0, y0) = (head.x0 as i32, head.y0 as i32);
    let (w, h) = (head.width() as i32, head.height() as i32);

    let top = y0 + (h as f32 * MUSTACHE_LINE) as i32;
    let bar_w = (w / 2).max(18);
    let bar_h = (h / 18).max(2);
    let center = x0 + w / 2;

    fill_box(pixmap, &solid(color), center - bar_w / 2, top, center + bar_w / 2, top + bar_h);
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = false;
    paint
}

/// Fill the inclusive pixel box (x0, y0)..=(x1, y1)
fn fill_box(pixmap: &mut Pixmap, paint: &Paint, x0: i32, y0: i32, x1: i32, y1: i32) {
    let rect = Rect::from_ltrb(
        x0.min(x1) as f32,
        y0.min(y1) as f32,
        (x0.max(x1) + 1) as f32,
        (y0.max(y1) + 1) as f32,
    );
    if let Some(rect) = rect {
        pixmap.fill_rect(rect, paint, Transform::identity(), None);
    }
}

/// One-pixel outline of the inclusive box (x0, y0)..=(x1, y1)
fn stroke_box(pixmap: &mut Pixmap, paint: &Paint, x0: i32, y0: i32, x1: i32, y1: i32) {
    fill_box(pixmap, paint, x0, y0, x1, y0);
    fill_box(pixmap, paint, x0, y1, x1, y1);
    fill_box(pixmap, paint, x0, y0, x0, y1);
    fill_box(pixmap, paint, x1, y0, x1, y1);
}
