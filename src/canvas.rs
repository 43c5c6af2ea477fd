//! Pixel primitives over `image::RgbaImage` surfaces: clearing, polygon masks,
//! compositing and the dashed selection outline.

use image::{imageops, Rgba, RgbaImage};
use itertools::Itertools;

use crate::geometry::{BoundingBox, PixelOffset, PixelPoint};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

const DASH_LENGTH: usize = 4;

pub fn clear_surface(surface: &mut RgbaImage) {
    for pixel in surface.pixels_mut() {
        *pixel = TRANSPARENT;
    }
}

/// Even-odd containment test of a sample position against a closed polygon.
pub fn polygon_contains(points: &[PixelPoint], x: f32, y: f32) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    for (a, b) in points.iter().circular_tuple_windows() {
        let (ax, ay) = (a.x as f32, a.y as f32);
        let (bx, by) = (b.x as f32, b.y as f32);
        if (ay > y) != (by > y) {
            let cross_x = ax + (y - ay) * (bx - ax) / (by - ay);
            if x < cross_x {
                inside = !inside;
            }
        }
    }
    inside
}

fn pixel_in_polygon(points: &[PixelPoint], x: i32, y: i32) -> bool {
    polygon_contains(points, x as f32 + 0.5, y as f32 + 0.5)
}

fn in_surface(surface: &RgbaImage, x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < surface.width() && (y as u32) < surface.height()
}

/// Copies the pixels enclosed by `points` into a new image the size of `bounds`.
/// Everything outside the polygon (or outside the canvas) stays transparent.
///
/// Returns `None` for a zero-area selection.
pub fn capture_polygon(
    canvas: &RgbaImage,
    points: &[PixelPoint],
    bounds: &BoundingBox,
) -> Option<RgbaImage> {
    if bounds.is_degenerate() || points.len() < 3 {
        return None;
    }
    let content = RgbaImage::from_fn(bounds.width() as u32, bounds.height() as u32, |x, y| {
        let cx = bounds.min_x + x as i32;
        let cy = bounds.min_y + y as i32;
        if in_surface(canvas, cx, cy) && pixel_in_polygon(points, cx, cy) {
            *canvas.get_pixel(cx as u32, cy as u32)
        } else {
            TRANSPARENT
        }
    });
    Some(content)
}

/// Paints every canvas pixel enclosed by `points` with `color`.
pub fn fill_polygon(
    canvas: &mut RgbaImage,
    points: &[PixelPoint],
    bounds: &BoundingBox,
    color: Rgba<u8>,
) {
    for cy in bounds.min_y..bounds.max_y {
        for cx in bounds.min_x..bounds.max_x {
            if in_surface(canvas, cx, cy) && pixel_in_polygon(points, cx, cy) {
                canvas.put_pixel(cx as u32, cy as u32, color);
            }
        }
    }
}

/// Alpha-composites `content` onto `target` with its top left corner at `origin`.
pub fn stamp(target: &mut RgbaImage, content: &RgbaImage, origin: PixelPoint) {
    imageops::overlay(target, content, origin.x as i64, origin.y as i64);
}

/// Draws the closed polygon translated by `offset` as a dashed line alternating
/// between the two `colors`.
pub fn draw_outline(
    surface: &mut RgbaImage,
    points: &[PixelPoint],
    offset: PixelOffset,
    colors: [Rgba<u8>; 2],
) {
    let mut step = 0usize;
    for (a, b) in points.iter().circular_tuple_windows() {
        for p in line_pixels(*a + offset, *b + offset) {
            if in_surface(surface, p.x, p.y) {
                surface.put_pixel(p.x as u32, p.y as u32, colors[(step / DASH_LENGTH) % 2]);
            }
            step += 1;
        }
    }
}

// Bresenham, both end points included.
fn line_pixels(from: PixelPoint, to: PixelPoint) -> Vec<PixelPoint> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = from;
    let mut out = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        out.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }
    out
}
