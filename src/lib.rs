use std::collections::VecDeque;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod field;
pub mod render;
pub mod sim;

#[cfg(target_arch = "wasm32")]
mod console;

pub use config::WaveConfig;
pub use error::{ConfigError, FieldError};
pub use field::{Field, Slice, Stimulus};
pub use render::{Framebuffer, Renderer, Rgba, Ring, Surface};
pub use sim::{Simulation, WavePropagator};

// ============================================================================
// WAVE WORLD - Browser-facing frame loop
// ============================================================================

/// Input collected between frames, applied in arrival order by `tick`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Event {
    Resize { w: u32, h: u32 },
    Click { x: u32, y: u32 },
    Pointer { x: f32, y: f32 },
    PointerLeave,
}

#[wasm_bindgen]
pub struct WaveWorld {
    sim: Simulation,
    out: Framebuffer,
    pending: VecDeque<Event>,
}

#[wasm_bindgen]
impl WaveWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Result<WaveWorld, JsValue> {
        Self::with_config(WaveConfig::default(), w, h).map_err(to_js)
    }

    /// Build from a TOML configuration string. Missing keys use defaults.
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(w: u32, h: u32, src: &str) -> Result<WaveWorld, JsValue> {
        WaveConfig::from_toml_str(src)
            .and_then(|config| Self::with_config(config, w, h))
            .map_err(to_js)
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.pending.push_back(Event::Resize { w, h });
    }

    pub fn click(&mut self, x: u32, y: u32) {
        self.pending.push_back(Event::Click { x, y });
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pending.push_back(Event::Pointer { x, y });
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.pending.push_back(Event::PointerLeave);
    }

    /// One display refresh: apply queued input, step, render.
    pub fn tick(&mut self) {
        self.apply_pending();
        self.sim.step();
        self.sim.render(&mut self.out);
    }

    /// Copy of the RGBA frame, ready for `new ImageData(...)`.
    pub fn frame(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.out.as_bytes())
    }

    // Accessors for WASM
    pub fn output_ptr(&self) -> *const u8 { self.out.ptr() }
    pub fn output_len(&self) -> usize { self.out.len() }
    pub fn width(&self) -> u32 { self.out.width() }
    pub fn height(&self) -> u32 { self.out.height() }
    pub fn frame_count(&self) -> u64 { self.sim.frame() }
}

impl WaveWorld {
    pub fn with_config(config: WaveConfig, w: u32, h: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            sim: Simulation::new(config, w, h)?,
            out: Framebuffer::new(w, h),
            pending: VecDeque::new(),
        })
    }

    fn apply_pending(&mut self) {
        while let Some(event) = self.pending.pop_front() {
            match event {
                Event::Resize { w, h } => {
                    self.sim.on_resize(w, h);
                    self.out.resize(w, h);
                }
                Event::Click { x, y } => {
                    self.sim.on_click(x, y);
                }
                Event::Pointer { x, y } => self.sim.on_pointer_move(x, y),
                Event::PointerLeave => self.sim.on_pointer_leave(),
            }
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.out
    }
}

/// Route `log` records to the browser console.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    console::install(level);
}

fn to_js(err: ConfigError) -> JsValue {
    log::warn!("rejected configuration: {err}");
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(w: u32, h: u32) -> WaveWorld {
        WaveWorld::with_config(WaveConfig::default(), w, h).unwrap()
    }

    #[test]
    fn events_wait_for_the_next_tick() {
        let mut world = world(200, 200);
        world.click(100, 100);
        world.resize(300, 100);
        assert_eq!(world.simulation().field().energy(), 0.0);
        assert_eq!(world.width(), 200);

        world.tick();
        // Resize after the click wiped it
        assert_eq!(world.simulation().field().energy(), 0.0);
        assert_eq!((world.width(), world.height()), (300, 100));
        assert_eq!(world.output_len(), 300 * 100 * 4);
        assert_eq!(world.simulation().field().cols(), 60);
    }

    #[test]
    fn click_then_tick_shows_ripples() {
        let mut world = world(200, 200);
        world.click(100, 100);
        world.tick();
        assert_eq!(world.frame_count(), 1);
        assert!(world.simulation().field().peak() > 0.0);

        let lit = world
            .framebuffer()
            .as_bytes()
            .chunks_exact(4)
            .filter(|p| p[0] > 0)
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn queue_preserves_order() {
        let mut world = world(200, 200);
        world.resize(100, 100);
        world.click(50, 50);
        world.tick();
        assert!(world.simulation().field().energy() > 0.0);
    }

    #[test]
    fn partial_toml_configures_the_world() {
        let src = "damping = 0.9\n\n[click_ring]\nenabled = true\n";
        let mut world = WaveWorld::from_toml(200, 100, src).unwrap();
        let config = world.simulation().config();
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.cell_size, 5);
        assert!(config.click_ring.enabled);

        // Hand-computed step at the configured damping: (4 * 700 / 2) * 0.9
        world.click(100, 50);
        world.tick();
        let centre = world.simulation().field().get(Slice::Previous, 20, 10).unwrap();
        assert!((centre - 1260.0).abs() < 0.01, "{centre}");
        assert_eq!(world.simulation().rings().len(), 1);
    }

    #[test]
    fn zero_viewport_survives_ticks() {
        let mut world = world(0, 0);
        world.click(0, 0);
        world.tick();
        world.resize(7, 0);
        world.pointer_move(3.0, 3.0);
        world.tick();
        world.pointer_leave();
        world.tick();
        assert_eq!(world.output_len(), 0);
    }
}
