//! Delayed visual reverts
//!
//! A strike changes how a body looks and schedules a revert. Each body holds
//! at most one pending revert per effect: striking it again pushes the
//! deadline out but keeps the resting state captured by the first strike, so
//! the body always returns to how it looked before it was ever hit.

use std::collections::HashMap;
use std::time::Duration;

use super::body::{BodyId, Fill};
use super::world::World;

/// Which visual effect a revert undoes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Effect {
    PegFlash,
    PartitionBounce,
}

/// Resting state to put back
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Restore {
    LineWidth(f32),
    Bounce { y: f32, fill: Fill },
}

impl Restore {
    /// Apply to the body if it still exists
    pub fn apply(&self, world: &mut World, id: BodyId) -> bool {
        let Some(body) = world.get_mut(id) else {
            return false;
        };
        match *self {
            Restore::LineWidth(width) => body.render.line_width = width,
            Restore::Bounce { y, fill } => {
                body.position.y = y;
                body.render.fill = fill;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    restore: Restore,
}

/// A revert whose deadline has passed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DueRevert {
    pub body: BodyId,
    pub effect: Effect,
    pub restore: Restore,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    pending: HashMap<(BodyId, Effect), Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resting state held by a pending revert, if any
    pub fn resting(&self, body: BodyId, effect: Effect) -> Option<Restore> {
        self.pending.get(&(body, effect)).map(|p| p.restore)
    }

    /// Schedule a revert at `due`.
    ///
    /// If one is already pending for this body and effect it is superseded:
    /// the new deadline wins and the original resting state is kept.
    /// Returns true when an earlier revert was superseded.
    pub fn arm(&mut self, body: BodyId, effect: Effect, due: Duration, restore: Restore) -> bool {
        match self.pending.get_mut(&(body, effect)) {
            Some(existing) => {
                existing.due = due;
                true
            }
            None => {
                self.pending.insert((body, effect), Pending { due, restore });
                false
            }
        }
    }

    /// Remove and return every revert due at or before `now`, oldest deadline first
    pub fn take_due(&mut self, now: Duration) -> Vec<DueRevert> {
        let mut due: Vec<(Duration, DueRevert)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(&(body, effect), p)| {
                (
                    p.due,
                    DueRevert {
                        body,
                        effect,
                        restore: p.restore,
                    },
                )
            })
            .collect();
        due.sort_by_key(|(at, r)| (*at, r.body, r.effect));

        for (_, revert) in &due {
            self.pending.remove(&(revert.body, revert.effect));
        }
        due.into_iter().map(|(_, r)| r).collect()
    }

    /// Drop every pending revert for a body (e.g. it left the world)
    pub fn forget(&mut self, body: BodyId) {
        self.pending.retain(|(id, _), _| *id != body);
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_not_due_before_deadline() {
        let mut timers = Timers::new();
        timers.arm(BodyId(1), Effect::PegFlash, ms(200), Restore::LineWidth(1.0));
        assert!(timers.take_due(ms(199)).is_empty());
        assert_eq!(timers.take_due(ms(200)).len(), 1);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_restrike_supersedes_and_keeps_rest_state() {
        let mut timers = Timers::new();
        let id = BodyId(4);
        let rest = Restore::Bounce {
            y: 350.0,
            fill: Fill::Red,
        };
        assert!(!timers.arm(id, Effect::PartitionBounce, ms(200), rest));
        // Second strike 150ms later would capture the struck state; it must not win
        let struck = Restore::Bounce {
            y: 360.0,
            fill: Fill::Navy,
        };
        assert!(timers.arm(id, Effect::PartitionBounce, ms(350), struck));

        assert!(timers.take_due(ms(200)).is_empty());
        let due = timers.take_due(ms(350));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].restore, rest);
    }

    #[test]
    fn test_effects_are_independent() {
        let mut timers = Timers::new();
        let id = BodyId(2);
        timers.arm(id, Effect::PegFlash, ms(100), Restore::LineWidth(1.0));
        timers.arm(
            id,
            Effect::PartitionBounce,
            ms(100),
            Restore::Bounce {
                y: 0.0,
                fill: Fill::Red,
            },
        );
        assert_eq!(timers.len(), 2);
        timers.forget(id);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_due_sorted_by_deadline() {
        let mut timers = Timers::new();
        timers.arm(BodyId(9), Effect::PegFlash, ms(50), Restore::LineWidth(1.0));
        timers.arm(BodyId(3), Effect::PegFlash, ms(80), Restore::LineWidth(1.0));
        timers.arm(BodyId(5), Effect::PegFlash, ms(20), Restore::LineWidth(1.0));
        let order: Vec<_> = timers.take_due(ms(100)).iter().map(|r| r.body).collect();
        assert_eq!(order, vec![BodyId(5), BodyId(9), BodyId(3)]);
    }

    #[test]
    fn test_restore_on_absent_body() {
        let mut world = World::new();
        assert!(!Restore::LineWidth(1.0).apply(&mut world, BodyId(1)));
    }
}
