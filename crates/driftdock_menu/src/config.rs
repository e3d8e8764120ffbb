//! Motion tuning configuration (motion.toml)

use crate::error::{MenuError, Result};
use crate::fade::FadeTiming;
use driftdock_animation::SpringConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Physics and timing knobs for the floating menu
///
/// Every field is optional in TOML; missing fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplier on the base fling friction
    pub fling_friction_scalar: f32,
    /// Stiffness of the settle spring after a fling
    pub spring_stiffness: f32,
    /// Damping ratio of the settle spring after a fling
    pub spring_damping_ratio: f32,
    /// Horizontal speed (px/s) needed to fling away from the nearer edge
    pub escape_velocity: f32,
    /// Quiet period before fading out, in milliseconds
    pub fade_delay_ms: u64,
    /// Length of the fade-out, in milliseconds
    pub fade_duration_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            fling_friction_scalar: 1.9,
            spring_stiffness: 700.0,
            spring_damping_ratio: 0.85,
            escape_velocity: 750.0,
            fade_delay_ms: 3_000,
            fade_duration_ms: 1_000,
        }
    }
}

impl MotionConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| MenuError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Spring used to settle each axis after its fling
    pub fn settle_spring(&self) -> SpringConfig {
        SpringConfig::new(self.spring_stiffness, self.spring_damping_ratio)
    }

    pub fn fade_timing(&self) -> FadeTiming {
        FadeTiming {
            delay: Duration::from_millis(self.fade_delay_ms),
            duration: Duration::from_millis(self.fade_duration_ms),
        }
    }
}
