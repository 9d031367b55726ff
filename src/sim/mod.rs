// sim/ - Ripple simulation
//
// Simulation is the single owner of the field and everything derived from
// the configuration. Callers drive it one event or frame at a time:
// on_resize / on_click between frames, then step + render per frame.

mod propagate;

pub use propagate::WavePropagator;

use crate::config::WaveConfig;
use crate::error::ConfigError;
use crate::field::{Field, Stimulus, inject};
use crate::render::{Renderer, Ring, Surface};

/// Oldest rings are dropped beyond this.
const MAX_RINGS: usize = 64;

pub struct Simulation {
    config: WaveConfig,
    // Viewport in screen pixels
    w: u32,
    h: u32,
    field: Field,
    propagator: WavePropagator,
    renderer: Renderer,
    frame: u64,
    last_click: Option<(u32, u32)>,
    pointer: Option<(f32, f32)>,
    rings: Vec<Ring>,
}

impl Simulation {
    pub fn new(config: WaveConfig, w: u32, h: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let (cols, rows) = grid_shape(w, h, config.cell_size);
        let field = Field::clamped(cols, rows);
        let (cols, rows) = (field.cols(), field.rows());
        log::info!("ripple engine: {w}x{h} viewport, {cols}x{rows} grid");

        Ok(Self {
            propagator: WavePropagator::new(config.damping),
            renderer: Renderer::new(&config),
            config,
            w,
            h,
            field,
            frame: 0,
            last_click: None,
            pointer: None,
            rings: Vec::new(),
        })
    }

    /// Reallocate the grid for a new viewport. All ripples are lost.
    pub fn on_resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.frame = 0;
        self.last_click = None;
        self.rings.clear();

        let (cols, rows) = grid_shape(w, h, self.config.cell_size);
        if let Err(err) = self.field.resize(cols, rows) {
            log::warn!("{err}; viewport {w}x{h} clamped to a 1x1 minimum");
            self.field.resize_clamped(cols, rows);
        }
        log::info!(
            "viewport resized to {w}x{h}, grid {}x{}",
            self.field.cols(),
            self.field.rows()
        );
    }

    /// Deposit a stimulus under screen pixel (x, y). Clicks outside the
    /// viewport are ignored. Returns the number of cells written.
    pub fn on_click(&mut self, x: u32, y: u32) -> usize {
        if x >= self.w || y >= self.h {
            log::debug!("click at ({x}, {y}) outside {}x{} viewport dropped", self.w, self.h);
            return 0;
        }

        let stimulus = Stimulus::from_screen(
            x,
            y,
            self.config.cell_size,
            self.config.stimulus_radius,
            self.config.stimulus_peak,
        );
        log::debug!("click at ({x}, {y}), grid ({}, {})", stimulus.col, stimulus.row);
        self.last_click = Some((x, y));
        if self.config.click_ring.enabled {
            if self.rings.len() == MAX_RINGS {
                self.rings.remove(0);
            }
            self.rings.push(Ring { x: x as f32, y: y as f32, age: 0 });
        }
        inject(&mut self.field, &stimulus)
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        self.propagator.step(&mut self.field);
        self.frame += 1;

        let lifetime = self.config.click_ring.lifetime;
        self.rings.retain_mut(|ring| {
            ring.age += 1;
            ring.age < lifetime
        });
    }

    /// Paint the latest state. Returns the number of cells drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let drawn = self.renderer.render(&self.field, surface);
        let click = self.last_click.map(|(x, y)| (x as f32, y as f32));
        self.renderer.render_overlays(click, &self.rings, self.pointer, surface);
        drawn
    }

    /// Click rings still on screen, oldest first.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Steps since creation or the last resize.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }
}

/// Grid shape for a viewport (floor division, may be 0).
pub fn grid_shape(w: u32, h: u32, cell_size: u32) -> (usize, usize) {
    let cell_size = cell_size.max(1);
    ((w / cell_size) as usize, (h / cell_size) as usize)
}
