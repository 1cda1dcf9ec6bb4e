//! Control panel model
//!
//! A ball-count slider (1..=10), a button that drops that many balls, and a
//! "spawn at pointer" checkbox that is shown but locked on.

use glam::Vec2;

use crate::consts::*;

/// Input from the control panel or the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiCommand {
    /// Slider moved; nothing spawns until it is released
    SetBallCount(u8),
    /// Slider released at a value: drop that many balls
    SliderReleased(u8),
    /// "Create balls" button
    CreateBalls,
    /// Checkbox clicked
    TogglePointerSpawn,
    /// Pointer pressed on the board
    MouseDown(Vec2),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    ball_count: u8,
    pointer_spawn: bool,
    /// The checkbox is rendered disabled
    toggle_enabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            ball_count: DEFAULT_BALL_COUNT,
            pointer_spawn: true,
            toggle_enabled: false,
        }
    }
}

impl Controls {
    pub fn new(ball_count: u8, pointer_spawn: bool) -> Self {
        Self {
            ball_count: clamp_ball_count(ball_count),
            pointer_spawn,
            toggle_enabled: false,
        }
    }

    pub fn ball_count(&self) -> u8 {
        self.ball_count
    }

    /// Set the slider, clamped to its range
    pub fn set_ball_count(&mut self, value: u8) -> u8 {
        self.ball_count = clamp_ball_count(value);
        self.ball_count
    }

    pub fn pointer_spawn(&self) -> bool {
        self.pointer_spawn
    }

    /// Flip pointer spawning. Returns false (and changes nothing) while the
    /// checkbox is disabled.
    pub fn toggle_pointer_spawn(&mut self) -> bool {
        if !self.toggle_enabled {
            log::debug!("Pointer spawn toggle is disabled");
            return false;
        }
        self.pointer_spawn = !self.pointer_spawn;
        true
    }

    /// Unlock the checkbox
    pub fn enable_toggle(&mut self) {
        self.toggle_enabled = true;
    }
}

pub fn clamp_ball_count(value: u8) -> u8 {
    value.clamp(MIN_BALL_COUNT, MAX_BALL_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = Controls::default();
        assert_eq!(controls.ball_count(), 5);
        assert!(controls.pointer_spawn());
    }

    #[test]
    fn test_slider_clamps() {
        let mut controls = Controls::default();
        assert_eq!(controls.set_ball_count(0), 1);
        assert_eq!(controls.set_ball_count(42), 10);
        assert_eq!(controls.set_ball_count(7), 7);
    }

    #[test]
    fn test_toggle_locked_by_default() {
        let mut controls = Controls::default();
        assert!(!controls.toggle_pointer_spawn());
        assert!(controls.pointer_spawn());

        controls.enable_toggle();
        assert!(controls.toggle_pointer_spawn());
        assert!(!controls.pointer_spawn());
    }
}
