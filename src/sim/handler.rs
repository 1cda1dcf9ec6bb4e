//! Strike handling
//!
//! Reacts to collision-start pairs. Both members of a pair are inspected, so
//! the outcome does not depend on which body the stepper listed first.
//!
//! Peg: outline flashes wide, reverts after the delay.
//! Partition + ball: ball removed, partition drops and turns navy, the hit is
//! recorded, and the partition bounces back (position and red fill) after the
//! delay. A ball that is already gone cannot score again.

use std::time::Duration;

use glam::Vec2;

use super::body::{BodyId, Fill, Label};
use super::events::CollisionPair;
use super::scoreboard::Scoreboard;
use super::timers::{Effect, Restore, Timers};
use super::world::World;
use crate::settings::Settings;

/// What a handled pair did
#[derive(Debug, Clone, PartialEq)]
pub enum Strike {
    PegFlash {
        peg: BodyId,
    },
    PartitionHit {
        partition: BodyId,
        ball: BodyId,
        /// Scoreboard entry created for the hit
        entry: Option<BodyId>,
        annotation: Option<String>,
    },
}

/// Everything a strike is allowed to touch
pub struct StrikeContext<'a> {
    pub world: &'a mut World,
    pub timers: &'a mut Timers,
    pub scoreboard: &'a mut Scoreboard,
    /// Wall-clock time of the event
    pub now: Duration,
}

#[derive(Debug, Clone)]
pub struct CollisionHandler {
    flash_line_width: f32,
    strike_offset: f32,
    revert_delay: Duration,
}

impl CollisionHandler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            flash_line_width: settings.flash_line_width,
            strike_offset: settings.strike_offset,
            revert_delay: settings.revert_delay(),
        }
    }

    /// Handle one collision-start event's pairs, in order
    pub fn collision_start(&self, ctx: &mut StrikeContext<'_>, pairs: &[CollisionPair]) -> Vec<Strike> {
        let mut strikes = Vec::new();
        for pair in pairs {
            strikes.extend(self.handle_pair(ctx, *pair));
        }
        strikes
    }

    /// Collision ends carry no game logic
    pub fn collision_end(&self, pairs: &[CollisionPair]) {
        for pair in pairs {
            log::trace!("collision end {} / {}", pair.body_a, pair.body_b);
        }
    }

    fn handle_pair(&self, ctx: &mut StrikeContext<'_>, pair: CollisionPair) -> Vec<Strike> {
        let label_of = |id: BodyId| ctx.world.get(id).map(|b| b.label);
        let (Some(label_a), Some(label_b)) = (label_of(pair.body_a), label_of(pair.body_b)) else {
            // One side already removed earlier in this event
            return Vec::new();
        };

        let mut strikes = Vec::new();
        for (id, label) in [(pair.body_a, label_a), (pair.body_b, label_b)] {
            if label == Label::Peg {
                self.flash_peg(ctx, id);
                strikes.push(Strike::PegFlash { peg: id });
            }
        }

        let partition_hit = match (label_a, label_b) {
            (Label::Partition, Label::Ball) => Some((pair.body_a, pair.body_b)),
            (Label::Ball, Label::Partition) => Some((pair.body_b, pair.body_a)),
            _ => None,
        };
        if let Some((partition, ball)) = partition_hit {
            strikes.extend(self.strike_partition(ctx, partition, ball));
        }
        strikes
    }

    fn flash_peg(&self, ctx: &mut StrikeContext<'_>, peg: BodyId) {
        let Some(body) = ctx.world.get_mut(peg) else {
            return;
        };
        let rest = ctx
            .timers
            .resting(peg, Effect::PegFlash)
            .unwrap_or(Restore::LineWidth(body.render.line_width));
        body.render.line_width = self.flash_line_width;
        ctx.timers
            .arm(peg, Effect::PegFlash, ctx.now + self.revert_delay, rest);
    }

    fn strike_partition(
        &self,
        ctx: &mut StrikeContext<'_>,
        partition: BodyId,
        ball: BodyId,
    ) -> Option<Strike> {
        ctx.world.remove(ball)?;
        ctx.timers.forget(ball);

        let body = ctx.world.get_mut(partition)?;
        let rest = match ctx.timers.resting(partition, Effect::PartitionBounce) {
            Some(rest) => rest,
            None => Restore::Bounce {
                y: body.position.y,
                fill: body.render.fill,
            },
        };
        let Restore::Bounce { y: rest_y, .. } = rest else {
            return None;
        };
        // Offset from rest, so a re-strike mid-bounce doesn't sink it further
        body.position = Vec2::new(body.position.x, rest_y + self.strike_offset);
        body.render.fill = Fill::Navy;
        let annotation = body.annotation.clone();

        let entry = ctx.scoreboard.record_hit(ctx.world, partition);
        let superseded = ctx.timers.arm(
            partition,
            Effect::PartitionBounce,
            ctx.now + self.revert_delay,
            rest,
        );
        log::debug!(
            "Ball {} scored {} on partition {}{}",
            ball,
            annotation.as_deref().unwrap_or("?"),
            partition,
            if superseded { " (re-strike)" } else { "" }
        );

        Some(Strike::PartitionHit {
            partition,
            ball,
            entry,
            annotation,
        })
    }
}
