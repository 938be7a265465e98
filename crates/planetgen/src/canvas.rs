//! Pixel sink the grid and mappers draw onto.
//!
//! Coordinates are signed and anything outside the buffer is silently
//! clipped, since triangles and craters routinely overhang the edges.

use image::{Pixel, Rgba, RgbaImage};

pub trait Canvas {
    fn dimensions(&self) -> (u32, u32);

    fn set_pixel(&mut self, x: i64, y: i64, colour: Rgba<u8>);

    /// Alpha-composite `colour` over the existing pixel.
    fn blend(&mut self, x: i64, y: i64, colour: Rgba<u8>);

    /// Filled disc.
    fn circle(&mut self, cx: i64, cy: i64, radius: i64, colour: Rgba<u8>) {
        if radius < 0 {
            return;
        }
        for dy in -radius..=radius {
            let span = (radius * radius - dy * dy).isqrt();
            for dx in -span..=span {
                self.set_pixel(cx + dx, cy + dy, colour);
            }
        }
    }

    /// Ring `thickness` pixels wide whose outer edge is `radius`.
    fn circle_outline(&mut self, cx: i64, cy: i64, radius: i64, thickness: i64, colour: Rgba<u8>) {
        if radius < 0 || thickness <= 0 {
            return;
        }
        let inner = radius - thickness;
        if inner < 0 {
            self.circle(cx, cy, radius, colour);
            return;
        }
        for dy in -radius..=radius {
            let outer_span = (radius * radius - dy * dy).isqrt();
            if dy * dy > inner * inner {
                for dx in -outer_span..=outer_span {
                    self.set_pixel(cx + dx, cy + dy, colour);
                }
            } else {
                let inner_span = (inner * inner - dy * dy).isqrt();
                for dx in inner_span + 1..=outer_span {
                    self.set_pixel(cx + dx, cy + dy, colour);
                    self.set_pixel(cx - dx, cy + dy, colour);
                }
            }
        }
    }

    /// Triangle with its base running from `(x, y)` to `(x + 2w, y)` and its
    /// apex at `(x + w, y + h)`. A negative `h` points the apex up.
    fn fill_triangle(&mut self, x: i64, y: i64, w: i64, h: i64, colour: Rgba<u8>) {
        let height = h.abs();
        if height == 0 {
            return;
        }
        let step = h.signum();
        for yy in 0..=height {
            let half = w * (height - yy) / height;
            for xx in -half..=half {
                self.set_pixel(x + w + xx, y + step * yy, colour);
            }
        }
    }
}

/// Composite `layer` over the canvas, pixel for pixel from the top left.
pub fn overlay(canvas: &mut dyn Canvas, layer: &RgbaImage) {
    for (x, y, p) in layer.enumerate_pixels() {
        if p.0[3] > 0 {
            canvas.blend(x as i64, y as i64, *p);
        }
    }
}

impl Canvas for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn set_pixel(&mut self, x: i64, y: i64, colour: Rgba<u8>) {
        if x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64 {
            self.put_pixel(x as u32, y as u32, colour);
        }
    }

    /// An opaque destination stays fully opaque; only its colour moves
    /// towards `colour`.
    fn blend(&mut self, x: i64, y: i64, colour: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let dst = self.get_pixel_mut(x as u32, y as u32);
        if dst.0[3] < u8::MAX {
            dst.blend(&colour);
            return;
        }
        let a = u32::from(colour.0[3]);
        for c in 0..3 {
            let mixed = u32::from(colour.0[c]) * a + u32::from(dst.0[c]) * (255 - a);
            dst.0[c] = ((mixed + 127) / 255) as u8;
        }
    }
}
