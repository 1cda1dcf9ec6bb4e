//! Configuration errors
//!
//! Gameplay itself has no failure path: touching a body that is already gone
//! is a no-op. Only settings and board construction can be rejected.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("row count must not be negative, got {0}")]
    NegativeRows(i32),

    #[error("{rows} rows need {needed} px but the board is {available} px wide")]
    BoardOverflow { rows: u32, needed: f32, available: f32 },

    #[error("{rows} rows need a board {needed} px tall but it is {available} px")]
    BoardTooShort { rows: u32, needed: f32, available: f32 },

    #[error("board dimensions must be > 0, got {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    #[error("ball radius must be > 0, got {0}")]
    InvalidBallRadius(f32),

    #[error("ball count {value} outside {min}..={max}")]
    BallCountOutOfRange { value: u8, min: u8, max: u8 },

    #[error("max balls must be > 0")]
    ZeroBallCap,

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
