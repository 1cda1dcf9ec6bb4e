//! Plinko Board - a peg-board drop game
//!
//! Core modules:
//! - `board`: Deterministic peg/partition/wall layout
//! - `sim`: Bodies, world, physics stepping, strike handling, scoreboard
//! - `session`: Owns one running game (init, update, teardown)
//! - `overlay`: Per-frame multiplier labels
//! - `settings`: Data-driven configuration
//! - `ui`: Ball-count slider and spawn toggle model

pub mod board;
pub mod error;
pub mod overlay;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use board::Board;
pub use error::ConfigError;
pub use session::GameSession;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation timestep (120 Hz so balls don't skip over pegs)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Step length the material air friction is tuned for
    pub const BASE_DT: f32 = 1.0 / 60.0;

    /// Board dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 800.0;
    /// Pegs start this far below the top edge
    pub const TOP_MARGIN: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const MAX_BALLS: usize = 150;
    pub const INITIAL_BALLS: usize = 5;

    /// Peg grid
    pub const PEG_GAP: f32 = 4.0 * BALL_RADIUS;
    pub const PEG_RADIUS: f32 = 0.2 * BALL_RADIUS;
    pub const X_GAP: f32 = PEG_GAP;
    pub const Y_GAP: f32 = 0.5 * X_GAP;
    /// First peg row holds this many pegs
    pub const FIRST_ROW: u32 = 5;
    pub const ROWS: u32 = 10;

    /// Partitions
    pub const PARTITION_WIDTH: f32 = 35.0;
    pub const PARTITION_HEIGHT: f32 = 50.0;
    /// Partitions sit this far above the vertical center
    pub const PARTITION_RISE: f32 = 50.0;
    /// Extra columns beyond the row count
    pub const EXTRA_COLUMNS: u32 = 6;
    /// Largest multiplier (outermost partitions)
    pub const MAX_MULTIPLIER: f32 = 10.0;

    /// Walls are twice the board size so corners never gap
    pub const WALL_LENGTH: f32 = WIDTH * 2.0;
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Shared material
    pub const RESTITUTION: f32 = 0.6;
    pub const FRICTION: f32 = 0.05;
    pub const FRICTION_AIR: f32 = 0.06;
    pub const SLOP: f32 = 0.0;
    pub const WALL_RESTITUTION: f32 = 1.0;
    pub const WALL_DENSITY: f32 = 1.0;
    pub const DEFAULT_DENSITY: f32 = 0.001;

    /// Gravity in engine units (px/ms², before scale)
    pub const GRAVITY_X: f32 = 0.0;
    pub const GRAVITY_Y: f32 = 0.5;
    pub const GRAVITY_SCALE: f32 = 0.01;
    /// px/ms² -> px/s²
    pub const ENGINE_ACCEL_TO_SECONDS: f32 = 1_000_000.0;
    /// Largest sideways kick (px/s) a peg contact adds
    pub const PEG_NUDGE: f32 = 30.0;

    /// Strike visuals
    pub const FLASH_LINE_WIDTH: f32 = 15.0;
    pub const REST_LINE_WIDTH: f32 = 1.0;
    pub const STRIKE_OFFSET: f32 = 10.0;
    pub const REVERT_DELAY: Duration = Duration::from_millis(200);

    /// Scoreboard
    pub const SCOREBOARD_CAPACITY: usize = 2;
    /// Scoreboard column sits this far in from the right edge
    pub const SCOREBOARD_INSET: f32 = 50.0;
    pub const SCOREBOARD_SLOT_HEIGHT: f32 = 50.0;

    /// Ball count slider
    pub const MIN_BALL_COUNT: u8 = 1;
    pub const MAX_BALL_COUNT: u8 = 10;
    pub const DEFAULT_BALL_COUNT: u8 = 5;
}

/// Round to one decimal place, halves away from zero
#[inline]
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
