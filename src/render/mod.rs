// render/ - Field to pixels
//
// Each frame: clear, then one translucent gray disc per active interior
// cell. Quiet cells cost nothing beyond the magnitude test. Overlays (click
// marker, click rings, pointer light) are drawn last.

mod surface;

pub use surface::{Framebuffer, Rgba, Surface};

use crate::config::{ClickMarker, ClickRing, PointerLight, WaveConfig};
use crate::field::Field;

/// A live click ring, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub x: f32,
    pub y: f32,
    /// Frames since the click.
    pub age: u32,
}

pub struct Renderer {
    cell_size: f32,
    threshold: f32,
    displacement_scale: f32,
    brightness_gain: f32,
    brightness_cap: f32,
    draw_radius: f32,
    draw_alpha: f32,
    background: Rgba,
    click_marker: ClickMarker,
    pointer_light: PointerLight,
    click_ring: ClickRing,
}

impl Renderer {
    pub fn new(config: &WaveConfig) -> Self {
        Self {
            cell_size: config.cell_size as f32,
            threshold: config.visibility_threshold,
            displacement_scale: config.displacement_scale,
            brightness_gain: config.brightness_gain,
            brightness_cap: config.brightness_cap,
            draw_radius: config.draw_radius,
            draw_alpha: config.draw_alpha,
            background: config.background,
            click_marker: config.click_marker.clone(),
            pointer_light: config.pointer_light.clone(),
            click_ring: config.click_ring.clone(),
        }
    }

    /// Clear and draw the latest slice. Returns the number of cells drawn.
    pub fn render<S: Surface + ?Sized>(&self, field: &Field, surface: &mut S) -> usize {
        surface.clear(self.background);

        let latest = field.latest();
        let (cols, rows) = latest.dim();
        if cols < 3 || rows < 3 {
            return 0;
        }

        let mut drawn = 0;
        for i in 1..cols - 1 {
            for j in 1..rows - 1 {
                let value = latest[[i, j]];
                let intensity = value.abs();
                if intensity <= self.threshold {
                    continue;
                }

                let displacement = value * self.displacement_scale;
                let gray = (intensity * self.brightness_gain).min(self.brightness_cap);
                surface.fill_circle(
                    i as f32 * self.cell_size + displacement,
                    j as f32 * self.cell_size + displacement,
                    self.draw_radius,
                    Rgba::gray(gray, self.draw_alpha),
                );
                drawn += 1;
            }
        }
        drawn
    }

    /// Draw enabled overlays. Positions are in screen pixels.
    pub fn render_overlays<S: Surface + ?Sized>(
        &self,
        last_click: Option<(f32, f32)>,
        rings: &[Ring],
        pointer: Option<(f32, f32)>,
        surface: &mut S,
    ) {
        if self.click_marker.enabled {
            if let Some((x, y)) = last_click {
                surface.fill_circle(x, y, self.click_marker.radius, self.click_marker.color);
            }
        }
        if self.click_ring.enabled {
            let ring = &self.click_ring;
            for r in rings {
                // 0 at the click, 1 when the ring expires
                let t = (r.age as f32 / ring.lifetime.max(1) as f32).min(1.0);
                let scale = 1.0 + (ring.growth - 1.0) * t;
                let alpha = ring.color.a * (1.0 - t);
                if alpha <= 0.0 {
                    continue;
                }
                surface.stroke_circle(
                    r.x,
                    r.y,
                    ring.size / 2.0 * scale,
                    ring.stroke,
                    ring.color.with_alpha(alpha),
                );
            }
        }
        if self.pointer_light.enabled {
            if let Some((x, y)) = pointer {
                let light = &self.pointer_light;
                surface.fill_radial(
                    x,
                    y,
                    light.radius,
                    Rgba::WHITE.with_alpha(light.alpha),
                    light.falloff,
                );
            }
        }
    }
}
