// config.rs - Tuning constants
//
// Fixed for the lifetime of a Simulation. A different configuration means
// building a new one.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::Rgba;

pub const CELL_SIZE: u32 = 5;
pub const DAMPING: f32 = 0.97;
pub const STIMULUS_RADIUS: u32 = 8;
/// Larger discs would make a single click unbounded work.
pub const MAX_STIMULUS_RADIUS: u32 = 1024;
pub const STIMULUS_PEAK: f32 = 800.0;
pub const VISIBILITY_THRESHOLD: f32 = 1.0;
pub const DISPLACEMENT_SCALE: f32 = 0.08;
pub const BRIGHTNESS_GAIN: f32 = 1.2;
pub const BRIGHTNESS_CAP: f32 = 120.0;
pub const DRAW_RADIUS: f32 = 4.0;
pub const DRAW_ALPHA: f32 = 0.7;

/// Simulation and rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Screen pixels per grid cell (linear).
    pub cell_size: u32,
    /// Per-step attenuation, strictly inside (0, 1).
    pub damping: f32,
    /// Stimulus radius in grid cells.
    pub stimulus_radius: u32,
    /// Stimulus value at the click centre.
    pub stimulus_peak: f32,
    /// Cells with |value| at or below this are not drawn.
    pub visibility_threshold: f32,
    pub displacement_scale: f32,
    pub brightness_gain: f32,
    pub brightness_cap: f32,
    /// Disc radius in screen pixels.
    pub draw_radius: f32,
    pub draw_alpha: f32,
    pub background: Rgba,
    pub click_marker: ClickMarker,
    pub pointer_light: PointerLight,
    pub click_ring: ClickRing,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            damping: DAMPING,
            stimulus_radius: STIMULUS_RADIUS,
            stimulus_peak: STIMULUS_PEAK,
            visibility_threshold: VISIBILITY_THRESHOLD,
            displacement_scale: DISPLACEMENT_SCALE,
            brightness_gain: BRIGHTNESS_GAIN,
            brightness_cap: BRIGHTNESS_CAP,
            draw_radius: DRAW_RADIUS,
            draw_alpha: DRAW_ALPHA,
            background: Rgba::BLACK,
            click_marker: ClickMarker::default(),
            pointer_light: PointerLight::default(),
            click_ring: ClickRing::default(),
        }
    }
}

/// Disc drawn over the last accepted click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickMarker {
    pub enabled: bool,
    pub radius: f32,
    pub color: Rgba,
}

impl Default for ClickMarker {
    fn default() -> Self {
        Self {
            enabled: false,
            radius: 10.0,
            color: Rgba::new(255, 0, 0, 0.5),
        }
    }
}

/// Soft white glow that follows the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerLight {
    pub enabled: bool,
    pub radius: f32,
    /// Alpha at the pointer position.
    pub alpha: f32,
    /// Fraction of `radius` where the glow reaches zero.
    pub falloff: f32,
}

impl Default for PointerLight {
    fn default() -> Self {
        Self {
            enabled: false,
            radius: 200.0,
            alpha: 0.15,
            falloff: 0.8,
        }
    }
}

/// Expanding ring spawned at every click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickRing {
    pub enabled: bool,
    /// Outer diameter in screen pixels when spawned.
    pub size: f32,
    /// Stroke width, drawn inside the diameter.
    pub stroke: f32,
    pub color: Rgba,
    /// Scale reached at the end of the lifetime.
    pub growth: f32,
    /// Frames until the ring is removed.
    pub lifetime: u32,
}

impl Default for ClickRing {
    fn default() -> Self {
        Self {
            enabled: false,
            size: 50.0,
            stroke: 4.0,
            color: Rgba::new(255, 255, 255, 0.8),
            growth: 3.0,
            lifetime: 120,
        }
    }
}

impl WaveConfig {
    /// Parse from TOML. Missing keys take their defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: WaveConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        // Also rejects NaN
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(1..=MAX_STIMULUS_RADIUS).contains(&self.stimulus_radius) {
            return Err(ConfigError::StimulusRadius(self.stimulus_radius));
        }

        let floats = [
            ("stimulus_peak", self.stimulus_peak),
            ("visibility_threshold", self.visibility_threshold),
            ("displacement_scale", self.displacement_scale),
            ("brightness_gain", self.brightness_gain),
            ("brightness_cap", self.brightness_cap),
            ("draw_radius", self.draw_radius),
            ("click_marker.radius", self.click_marker.radius),
            ("pointer_light.radius", self.pointer_light.radius),
            ("click_ring.size", self.click_ring.size),
            ("click_ring.stroke", self.click_ring.stroke),
            ("click_ring.growth", self.click_ring.growth),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        for (name, value) in [
            ("stimulus_peak", self.stimulus_peak),
            ("visibility_threshold", self.visibility_threshold),
            ("brightness_cap", self.brightness_cap),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let alphas = [
            ("draw_alpha", self.draw_alpha),
            ("background.a", self.background.a),
            ("click_marker.color.a", self.click_marker.color.a),
            ("pointer_light.alpha", self.pointer_light.alpha),
            ("pointer_light.falloff", self.pointer_light.falloff),
            ("click_ring.color.a", self.click_ring.color.a),
        ];
        for (name, value) in alphas {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Alpha { name, value });
            }
        }

        if self.draw_radius <= 0.0 {
            return Err(ConfigError::DrawRadius(self.draw_radius));
        }

        let ring = &self.click_ring;
        if ring.size <= 0.0 || ring.stroke <= 0.0 || ring.growth < 1.0 || ring.lifetime == 0 {
            return Err(ConfigError::ClickRing(format!(
                "size {} and stroke {} must be positive, growth {} at least 1, lifetime {} at least 1",
                ring.size, ring.stroke, ring.growth, ring.lifetime
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WaveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_size, 5);
        assert_eq!(config.damping, 0.97);
        assert_eq!(config.stimulus_radius, 8);
        assert_eq!(config.stimulus_peak, 800.0);
        assert_eq!(config.background, Rgba::BLACK);
        assert!(!config.click_marker.enabled);
        assert!(!config.pointer_light.enabled);
        assert!(!config.click_ring.enabled);
        assert_eq!(config.click_ring.lifetime, 120);
    }

    #[test]
    fn damping_must_strictly_attenuate() {
        for damping in [0.0, 1.0, 1.5, -0.2, f32::NAN] {
            let config = WaveConfig { damping, ..WaveConfig::default() };
            assert!(matches!(config.validate(), Err(ConfigError::Damping(_))), "{damping}");
        }
        let config = WaveConfig { damping: 0.999, ..WaveConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_cell_size_and_radius() {
        let config = WaveConfig { cell_size: 0, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::CellSize(0))));

        let config = WaveConfig { stimulus_radius: 0, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::StimulusRadius(0))));
    }

    #[test]
    fn stimulus_radius_is_capped() {
        let config = WaveConfig { stimulus_radius: MAX_STIMULUS_RADIUS, ..WaveConfig::default() };
        assert!(config.validate().is_ok());

        for radius in [MAX_STIMULUS_RADIUS + 1, u32::MAX] {
            let config = WaveConfig { stimulus_radius: radius, ..WaveConfig::default() };
            assert!(matches!(config.validate(), Err(ConfigError::StimulusRadius(r)) if r == radius));
        }
        assert!(matches!(
            WaveConfig::from_toml_str("stimulus_radius = 4294967295"),
            Err(ConfigError::StimulusRadius(_))
        ));
    }

    #[test]
    fn click_ring_limits() {
        let mut config = WaveConfig::default();
        config.click_ring.lifetime = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ClickRing(_))));

        let mut config = WaveConfig::default();
        config.click_ring.growth = 0.5;
        assert!(matches!(config.validate(), Err(ConfigError::ClickRing(_))));

        let mut config = WaveConfig::default();
        config.click_ring.stroke = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { name: "click_ring.stroke", .. })));

        let config = WaveConfig::from_toml_str("[click_ring]\nenabled = true\nlifetime = 30").unwrap();
        assert!(config.click_ring.enabled);
        assert_eq!(config.click_ring.size, 50.0);
    }

    #[test]
    fn rejects_bad_floats() {
        let config = WaveConfig { stimulus_peak: f32::INFINITY, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { name: "stimulus_peak", .. })));

        let config = WaveConfig { draw_alpha: 1.2, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Alpha { name: "draw_alpha", .. })));

        let config = WaveConfig { draw_radius: 0.0, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::DrawRadius(_))));

        let config = WaveConfig { brightness_cap: -1.0, ..WaveConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = WaveConfig::from_toml_str(
            r#"
            damping = 0.9
            cell_size = 4

            [pointer_light]
            enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.damping, 0.9);
        assert_eq!(config.cell_size, 4);
        assert_eq!(config.stimulus_peak, STIMULUS_PEAK);
        assert!(config.pointer_light.enabled);
        assert_eq!(config.pointer_light.radius, 200.0);
    }

    #[test]
    fn invalid_toml_values_are_rejected() {
        assert!(matches!(
            WaveConfig::from_toml_str("damping = 1.0"),
            Err(ConfigError::Damping(_))
        ));
        assert!(matches!(
            WaveConfig::from_toml_str("cell_size = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
