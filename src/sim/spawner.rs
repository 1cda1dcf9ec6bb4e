//! Ball spawning
//!
//! Bulk drops come in at the top center with an engine-random height; pointer
//! drops land exactly where the pointer went down. Both respect the ball cap.

use glam::Vec2;

use super::body::{self, BodyId, Label};
use super::engine::Engine;
use super::world::World;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct BallSpawner {
    drop_x: f32,
    radius: f32,
    max_balls: usize,
    pointer_enabled: bool,
}

impl BallSpawner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            drop_x: settings.width / 2.0,
            radius: settings.ball_radius,
            max_balls: settings.max_balls,
            pointer_enabled: settings.pointer_spawn,
        }
    }

    pub fn pointer_enabled(&self) -> bool {
        self.pointer_enabled
    }

    pub fn set_pointer_enabled(&mut self, enabled: bool) {
        self.pointer_enabled = enabled;
    }

    /// Room left under the cap
    pub fn room(&self, world: &World) -> usize {
        self.max_balls.saturating_sub(world.count(Label::Ball))
    }

    /// Drop `count` balls at the top center. Requests past the cap are cut short.
    pub fn create_balls(&self, world: &mut World, engine: &mut Engine, count: usize) -> Vec<BodyId> {
        let allowed = count.min(self.room(world));
        if allowed < count {
            log::warn!(
                "Ball cap {} reached: spawning {} of {} requested",
                self.max_balls,
                allowed,
                count
            );
        }
        (0..allowed)
            .map(|_| {
                let y = engine.random();
                world.add(body::ball(Vec2::new(self.drop_x, y), self.radius))
            })
            .collect()
    }

    /// Drop one ball at the pointer. Ignored when pointer spawning is off or
    /// the cap is reached.
    pub fn spawn_at(&self, world: &mut World, position: Vec2) -> Option<BodyId> {
        if !self.pointer_enabled {
            return None;
        }
        if self.room(world) == 0 {
            log::warn!("Ball cap {} reached: pointer spawn ignored", self.max_balls);
            return None;
        }
        Some(world.add(body::ball(position, self.radius)))
    }
}
