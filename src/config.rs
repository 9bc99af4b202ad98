//! Tuning knobs and screen geometry
//!
//! All values are fixed for the lifetime of a session. `Settings` can be
//! loaded from a TOML file; missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::Result;

/// Speed/clamp settings for gesture consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Degrees per second at a full-magnitude rotation gesture
    pub rotation_speed: f32,

    /// Units per second along a translation gesture's direction
    pub translation_speed: f32,

    /// Uniform scale step per compression/expansion tick
    pub scale_amount: f32,

    /// Smallest allowed model scale
    pub min_scale: f32,

    /// Largest allowed model scale
    pub max_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rotation_speed: 300.0,  // Full sweep spins ~300 deg/s
            translation_speed: 30.0,
            scale_amount: 0.05,
            min_scale: 0.01,
            max_scale: 5.0,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Screen {
    pub width: u32,
    pub height: u32,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reference magnitude for normalizing gesture strength across
    /// devices: half the smaller screen dimension. A drag spanning this
    /// distance counts as a full-speed gesture.
    pub fn ideal_magnitude(&self) -> f32 {
        self.width.min(self.height) as f32 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_magnitude_uses_smaller_dimension() {
        let portrait = Screen::new(360, 720);
        assert_eq!(portrait.ideal_magnitude(), 180.0);

        let landscape = Screen::new(1920, 1080);
        assert_eq!(landscape.ideal_magnitude(), 540.0);
    }

    #[test]
    fn test_settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.rotation_speed, 300.0);
        assert_eq!(s.translation_speed, 30.0);
        assert_eq!(s.scale_amount, 0.05);
        assert!(s.min_scale < s.max_scale);
    }

    #[test]
    fn test_settings_partial_toml_falls_back_to_defaults() {
        let s: Settings = toml::from_str("rotation_speed = 120.0").unwrap();
        assert_eq!(s.rotation_speed, 120.0);
        assert_eq!(s.translation_speed, 30.0);
        assert_eq!(s.max_scale, 5.0);
    }
}
