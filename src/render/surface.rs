// surface.rs - Drawing targets
//
// The renderer only needs three primitives. Framebuffer implements them
// over an RGBA8 buffer with source-over blending, which is what the JS side
// blits into an ImageData.

use serde::{Deserialize, Serialize};

/// 8-bit color with fractional alpha, as in CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 1.0);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Gray level from a float channel value, clamped to [0, 255].
    pub fn gray(level: f32, a: f32) -> Self {
        let v = level.round().clamp(0.0, 255.0) as u8;
        Self::new(v, v, v, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

pub trait Surface {
    /// Replace every pixel with `color`.
    fn clear(&mut self, color: Rgba);

    /// Filled disc centred at (cx, cy) in pixel coordinates.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    /// Ring whose outer edge is at `radius`, `width` pixels thick.
    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Rgba);

    /// Disc whose alpha falls linearly from `color.a` at the centre to zero
    /// at `radius * stop`.
    fn fill_radial(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, stop: f32);
}

/// Owned RGBA8 pixel buffer, row-major.
pub struct Framebuffer {
    px: Vec<u8>,
    w: u32,
    h: u32,
}

impl Framebuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            px: vec![0; w as usize * h as usize * 4],
            w,
            h,
        }
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.px.clear();
        self.px.resize(w as usize * h as usize * 4, 0);
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.px
    }

    pub fn ptr(&self) -> *const u8 {
        self.px.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.px.len()
    }

    pub fn is_empty(&self) -> bool {
        self.px.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.w || y >= self.h {
            return None;
        }
        let i = (y as usize * self.w as usize + x as usize) * 4;
        Some([self.px[i], self.px[i + 1], self.px[i + 2], self.px[i + 3]])
    }

    /// Pixel range covering [c - r, c + r] on one axis, clipped.
    fn span(c: f32, r: f32, limit: u32) -> std::ops::Range<u32> {
        let lo = (c - r).floor().max(0.0);
        let hi = (c + r).ceil().min(limit as f32);
        if hi <= lo {
            return 0..0;
        }
        lo as u32..hi as u32
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Rgba, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let i = (y as usize * self.w as usize + x as usize) * 4;
        let dst_a = self.px[i + 3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }
        let mix = |src: u8, dst: u8| -> u8 {
            let v = (src as f32 * alpha + dst as f32 * dst_a * (1.0 - alpha)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.px[i] = mix(color.r, self.px[i]);
        self.px[i + 1] = mix(color.g, self.px[i + 1]);
        self.px[i + 2] = mix(color.b, self.px[i + 2]);
        self.px[i + 3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self, color: Rgba) {
        let a = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        for p in self.px.chunks_exact_mut(4) {
            p.copy_from_slice(&[color.r, color.g, color.b, a]);
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        let r2 = radius * radius;
        for y in Self::span(cy, radius, self.h) {
            let dy = y as f32 + 0.5 - cy;
            for x in Self::span(cx, radius, self.w) {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend(x, y, color, color.a);
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Rgba) {
        let outer2 = radius * radius;
        let inner = (radius - width).max(0.0);
        let inner2 = inner * inner;
        for y in Self::span(cy, radius, self.h) {
            let dy = y as f32 + 0.5 - cy;
            for x in Self::span(cx, radius, self.w) {
                let dx = x as f32 + 0.5 - cx;
                let d2 = dx * dx + dy * dy;
                if d2 <= outer2 && d2 >= inner2 {
                    self.blend(x, y, color, color.a);
                }
            }
        }
    }

    fn fill_radial(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, stop: f32) {
        let reach = radius * stop;
        if reach <= 0.0 {
            return;
        }
        for y in Self::span(cy, reach, self.h) {
            let dy = y as f32 + 0.5 - cy;
            for x in Self::span(cx, reach, self.w) {
                let dx = x as f32 + 0.5 - cx;
                let d = (dx * dx + dy * dy).sqrt();
                if d < reach {
                    self.blend(x, y, color, color.a * (1.0 - d / reach));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_fills_every_pixel() {
        let mut fb = Framebuffer::new(4, 3);
        assert_eq!(fb.len(), 48);
        fb.clear(Rgba::BLACK);
        assert!(fb.as_bytes().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn circle_blends_over_background() {
        let mut fb = Framebuffer::new(32, 32);
        fb.clear(Rgba::BLACK);
        fb.fill_circle(16.0, 16.0, 4.0, Rgba::gray(120.0, 0.7));

        assert_eq!(fb.pixel(16, 16), Some([84, 84, 84, 255]));
        assert_eq!(fb.pixel(12, 16), Some([84, 84, 84, 255]));
        // Pixel centre (21.5, 16.5) is outside radius 4
        assert_eq!(fb.pixel(21, 16), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn overlapping_circles_accumulate() {
        let mut fb = Framebuffer::new(16, 16);
        fb.clear(Rgba::BLACK);
        fb.fill_circle(8.0, 8.0, 3.0, Rgba::gray(100.0, 0.5));
        fb.fill_circle(8.0, 8.0, 3.0, Rgba::gray(100.0, 0.5));
        // 100 * 0.5 = 50, then 100 * 0.5 + 50 * 0.5 = 75
        assert_eq!(fb.pixel(8, 8), Some([75, 75, 75, 255]));
    }

    #[test]
    fn shapes_clip_at_edges() {
        let mut fb = Framebuffer::new(10, 10);
        fb.clear(Rgba::BLACK);
        fb.fill_circle(-2.0, -2.0, 4.0, Rgba::WHITE);
        fb.fill_circle(500.0, 5.0, 4.0, Rgba::WHITE);
        fb.fill_circle(-50.0, -50.0, 4.0, Rgba::WHITE);
        fb.fill_radial(9.0, 9.0, 100.0, Rgba::WHITE, 0.8);
        assert_eq!(fb.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(10, 0), None);
    }

    #[test]
    fn stroke_leaves_the_middle_open() {
        let mut fb = Framebuffer::new(64, 64);
        fb.clear(Rgba::BLACK);
        fb.stroke_circle(32.0, 32.0, 25.0, 4.0, Rgba::WHITE.with_alpha(0.8));

        // 255 * 0.8 on the band, between radius 21 and 25
        assert_eq!(fb.pixel(32 + 23, 32), Some([204, 204, 204, 255]));
        assert_eq!(fb.pixel(32, 32 - 23), Some([204, 204, 204, 255]));
        assert_eq!(fb.pixel(32, 32), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(32 + 15, 32), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(32 + 26, 32), Some([0, 0, 0, 255]));
    }

    #[test]
    fn radial_fades_to_transparent() {
        let mut fb = Framebuffer::new(400, 400);
        fb.clear(Rgba::BLACK);
        fb.fill_radial(200.0, 200.0, 200.0, Rgba::WHITE.with_alpha(0.15), 0.8);

        // 255 * 0.15 * (1 - 0.707 / 160)
        assert_eq!(fb.pixel(199, 199), Some([38, 38, 38, 255]));
        let [v, ..] = fb.pixel(280, 200).unwrap();
        assert!(v > 0 && v < 38);
        assert_eq!(fb.pixel(200, 361), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Rgba::WHITE);
        fb.resize(3, 1);
        assert_eq!((fb.width(), fb.height(), fb.len()), (3, 1, 12));
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        fb.resize(0, 5);
        assert!(fb.is_empty());
    }
}
