//! Game settings
//!
//! Every tunable lives here with the stock game's values as defaults.
//! Settings can be loaded from a JSON file; missing keys fall back to defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gravity vector in engine units (px/ms² before `scale`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravitySettings {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for GravitySettings {
    fn default() -> Self {
        Self {
            x: GRAVITY_X,
            y: GRAVITY_Y,
            scale: GRAVITY_SCALE,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    pub width: f32,
    pub height: f32,
    /// Peg rows (signed so a bad config file is reported, not wrapped)
    pub rows: i32,
    pub ball_radius: f32,

    // === Balls ===
    /// Balls stocked when the session starts
    pub initial_balls: usize,
    /// Hard cap on live balls
    pub max_balls: usize,
    /// Slider value used by the "create balls" button
    pub ball_count: u8,
    /// Spawn a ball wherever the pointer goes down
    pub pointer_spawn: bool,

    // === Physics ===
    pub gravity: GravitySettings,
    /// Seed for spawn heights
    pub seed: u64,

    // === Strike feedback ===
    pub flash_line_width: f32,
    pub strike_offset: f32,
    /// Delay before flashes and bounces revert (wall clock)
    pub revert_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            rows: ROWS as i32,
            ball_radius: BALL_RADIUS,

            initial_balls: INITIAL_BALLS,
            max_balls: MAX_BALLS,
            ball_count: DEFAULT_BALL_COUNT,
            pointer_spawn: true,

            gravity: GravitySettings::default(),
            seed: 0x5eed,

            flash_line_width: FLASH_LINE_WIDTH,
            strike_offset: STRIKE_OFFSET,
            revert_delay_ms: REVERT_DELAY.as_millis() as u64,
        }
    }
}

impl Settings {
    /// Revert delay as a `Duration`
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }

    /// Reject values the board or spawner cannot work with.
    ///
    /// Row count is checked against the board geometry by `Board::from_settings`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.ball_radius > 0.0) {
            return Err(ConfigError::InvalidBallRadius(self.ball_radius));
        }
        if !(MIN_BALL_COUNT..=MAX_BALL_COUNT).contains(&self.ball_count) {
            return Err(ConfigError::BallCountOutOfRange {
                value: self.ball_count,
                min: MIN_BALL_COUNT,
                max: MAX_BALL_COUNT,
            });
        }
        if self.max_balls == 0 {
            return Err(ConfigError::ZeroBallCap);
        }
        if self.rows < 0 {
            return Err(ConfigError::NegativeRows(self.rows));
        }
        Ok(())
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults (and logging why) on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
