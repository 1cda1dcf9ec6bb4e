//! Board layout
//!
//! Places pegs, scoring partitions and walls for a given row count. Layout is
//! a pure function of the row count and board size; the world is populated
//! once and the board never changes afterwards.

use glam::Vec2;

use crate::consts::*;
use crate::error::ConfigError;
use crate::round_tenth;
use crate::settings::Settings;
use crate::sim::body::{self, Body, BodyId, Label};
use crate::sim::world::World;

/// A partition's place on the board and its multiplier text
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSlot {
    pub position: Vec2,
    pub annotation: String,
}

/// Immutable layout parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: u32,
    width: f32,
    height: f32,
    ball_radius: f32,
}

impl Board {
    /// Board with the stock dimensions
    pub fn new(rows: i32) -> Result<Self, ConfigError> {
        Self::with_dimensions(rows, WIDTH, HEIGHT, BALL_RADIUS)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Self::with_dimensions(
            settings.rows,
            settings.width,
            settings.height,
            settings.ball_radius,
        )
    }

    /// Validate and build. Rejects negative rows, any row count whose widest
    /// peg row or partition strip would not fit between the walls, and any
    /// height that would push the bottom peg row into the partitions.
    pub fn with_dimensions(
        rows: i32,
        width: f32,
        height: f32,
        ball_radius: f32,
    ) -> Result<Self, ConfigError> {
        if rows < 0 {
            return Err(ConfigError::NegativeRows(rows));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        if !(ball_radius > 0.0) {
            return Err(ConfigError::InvalidBallRadius(ball_radius));
        }

        let board = Self {
            rows: rows as u32,
            width,
            height,
            ball_radius,
        };
        let needed = board.required_width();
        let available = width - WALL_THICKNESS;
        if needed >= available {
            return Err(ConfigError::BoardOverflow {
                rows: board.rows,
                needed,
                available,
            });
        }
        let needed = board.required_height();
        if needed >= height {
            return Err(ConfigError::BoardTooShort {
                rows: board.rows,
                needed,
                available: height,
            });
        }
        Ok(board)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ball_radius(&self) -> f32 {
        self.ball_radius
    }

    pub fn peg_gap(&self) -> f32 {
        4.0 * self.ball_radius
    }

    pub fn peg_radius(&self) -> f32 {
        0.2 * self.ball_radius
    }

    fn x_gap(&self) -> f32 {
        self.peg_gap()
    }

    fn y_gap(&self) -> f32 {
        0.5 * self.x_gap()
    }

    /// Multiplier columns (one more than the partition count)
    pub fn columns(&self) -> u32 {
        self.rows + EXTRA_COLUMNS
    }

    pub fn partition_count(&self) -> usize {
        if self.rows == 0 {
            0
        } else {
            (self.columns() - 1) as usize
        }
    }

    pub fn peg_count(&self) -> usize {
        self.peg_rows().map(|row| row as usize).sum()
    }

    /// Peg row indices; row `n` holds `n` pegs
    fn peg_rows(&self) -> std::ops::Range<u32> {
        FIRST_ROW..FIRST_ROW + self.rows
    }

    /// Horizontal space the layout needs, edge to edge
    fn required_width(&self) -> f32 {
        if self.rows == 0 {
            return 0.0;
        }
        let widest_row = (FIRST_ROW + self.rows - 1) as f32;
        let pegs = self.x_gap() * (widest_row - 1.0) + 2.0 * self.peg_radius();
        let partitions = self.peg_gap() * (self.partition_count() as f32 - 1.0) + PARTITION_WIDTH;
        pegs.max(partitions)
    }

    /// Smallest height that keeps the bottom peg row clear of the partition
    /// tops, and the partitions clear of both walls
    fn required_height(&self) -> f32 {
        if self.rows == 0 {
            return 0.0;
        }
        let last_peg_bottom = self.row_y(FIRST_ROW + self.rows - 1) + self.peg_radius();
        // Partitions hang at height/2 - rise; their top must sit below the pegs
        let clear_of_pegs = 2.0 * (last_peg_bottom + PARTITION_RISE + PARTITION_HEIGHT / 2.0);
        let clear_of_top = 2.0 * (WALL_THICKNESS / 2.0 + PARTITION_RISE + PARTITION_HEIGHT / 2.0);
        let clear_of_floor = 2.0 * (PARTITION_HEIGHT / 2.0 - PARTITION_RISE + WALL_THICKNESS / 2.0);
        clear_of_pegs.max(clear_of_top).max(clear_of_floor)
    }

    fn row_y(&self, row: u32) -> f32 {
        TOP_MARGIN + self.y_gap() * (row - FIRST_ROW) as f32 + 10.0
    }

    /// Peg centers, top row first, left to right
    pub fn peg_positions(&self) -> Vec<Vec2> {
        let x_gap = self.x_gap();
        let mut positions = Vec::with_capacity(self.peg_count());
        for row in self.peg_rows() {
            let y = self.row_y(row);
            let row_offset = (x_gap * row as f32 - x_gap) / 2.0;
            for j in 0..row {
                positions.push(Vec2::new(
                    self.width / 2.0 - row_offset + x_gap * j as f32,
                    y,
                ));
            }
        }
        positions
    }

    /// Multipliers for partitions left to right
    pub fn multipliers(&self) -> Vec<f32> {
        if self.rows == 0 {
            return Vec::new();
        }
        multipliers(self.columns())
    }

    /// Partition centers with their "<value>x" text
    pub fn partition_slots(&self) -> Vec<PartitionSlot> {
        let gap = self.peg_gap();
        let left = self.width / 2.0 - (self.partition_count() as f32 * gap) / 2.0;
        let y = self.height / 2.0 - PARTITION_RISE;
        self.multipliers()
            .into_iter()
            .enumerate()
            .map(|(index, value)| PartitionSlot {
                position: Vec2::new(left + (index as f32 + 0.5) * gap, y),
                annotation: format!("{}x", format_multiplier(value)),
            })
            .collect()
    }

    pub fn pegs(&self) -> Vec<Body> {
        let radius = self.peg_radius();
        self.peg_positions()
            .into_iter()
            .map(|p| body::peg(p, radius))
            .collect()
    }

    pub fn partitions(&self) -> Vec<Body> {
        self.partition_slots()
            .into_iter()
            .map(|slot| body::partition(slot.position, slot.annotation))
            .collect()
    }

    /// Top, bottom, left, right
    pub fn walls(&self) -> [Body; 4] {
        [
            body::wall(Label::WallTop, Vec2::ZERO, WALL_LENGTH, WALL_THICKNESS),
            body::wall(
                Label::WallBottom,
                Vec2::new(0.0, self.height),
                WALL_LENGTH,
                WALL_THICKNESS,
            ),
            body::wall(Label::WallLeft, Vec2::ZERO, WALL_THICKNESS, WALL_LENGTH),
            body::wall(
                Label::WallRight,
                Vec2::new(self.width, 0.0),
                WALL_THICKNESS,
                WALL_LENGTH,
            ),
        ]
    }

    /// Inner edges of the walls (min, max)
    pub fn interior(&self) -> (Vec2, Vec2) {
        let inset = Vec2::splat(WALL_THICKNESS / 2.0);
        (inset, Vec2::new(self.width, self.height) - inset)
    }

    /// Add pegs then partitions to the world
    pub fn populate(&self, world: &mut World) -> Vec<BodyId> {
        let mut ids = world.extend(self.pegs());
        ids.extend(world.extend(self.partitions()));
        log::info!(
            "Board: {} rows, {} pegs, {} partitions",
            self.rows,
            self.peg_count(),
            self.partition_count()
        );
        ids
    }
}

/// Palindromic multiplier sequence for `columns` columns.
///
/// Entry `i` (1-based, `1..columns`) is `10 / min(i, columns - i)` rounded to
/// one decimal.
pub fn multipliers(columns: u32) -> Vec<f32> {
    (1..columns)
        .map(|i| round_tenth(MAX_MULTIPLIER / i.min(columns - i) as f32))
        .collect()
}

/// "10", "3.3", "2": one decimal, trailing ".0" dropped
pub fn format_multiplier(value: f32) -> String {
    let rounded = round_tenth(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{:.1}", rounded)
    }
}
