// scenario.rs - Headless run description
//
// Example:
//
//   width = 800
//   height = 450
//   frames = 300
//   every = 2
//
//   [[clicks]]
//   frame = 0
//   x = 400
//   y = 225
//
//   [wave]
//   damping = 0.97

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use ripple_engine::WaveConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Click {
    /// Applied before this frame's step.
    pub frame: u64,
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    /// Export every Nth frame.
    pub every: u64,
    pub clicks: Vec<Click>,
    pub wave: WaveConfig,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            width: 640,
            height: 360,
            frames: 240,
            every: 4,
            clicks: vec![Click { frame: 0, x: 320, y: 180 }],
            wave: WaveConfig::default(),
        }
    }
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario '{}'", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid scenario '{}'", path.display()))
    }

    pub fn from_toml_str(src: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(src)?;
        scenario.clicks.sort_by_key(|c| c.frame);
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<()> {
        self.wave.validate()?;
        if self.width == 0 || self.height == 0 {
            bail!("viewport must be non-empty (got {}x{})", self.width, self.height);
        }
        if self.every == 0 {
            bail!("every must be at least 1");
        }
        for click in &self.clicks {
            if click.x >= self.width || click.y >= self.height {
                log::warn!(
                    "click at ({}, {}) lies outside the {}x{} viewport and will be ignored",
                    click.x,
                    click.y,
                    self.width,
                    self.height
                );
            }
        }
        Ok(())
    }

    /// Clicks scheduled for `frame`.
    pub fn clicks_at(&self, frame: u64) -> impl Iterator<Item = &Click> {
        self.clicks.iter().filter(move |c| c.frame == frame)
    }
}
