//! Collision/pointer events and the session's subscriptions to them

use std::collections::HashSet;

use super::body::BodyId;

/// Event kinds a session can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    CollisionStart,
    CollisionEnd,
    MouseDown,
}

/// Two bodies that touched. Order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub body_a: BodyId,
    pub body_b: BodyId,
}

impl CollisionPair {
    pub fn new(body_a: BodyId, body_b: BodyId) -> Self {
        Self { body_a, body_b }
    }

    /// Same pair with a canonical (lower id first) order, for contact tracking
    pub fn canonical(self) -> Self {
        if self.body_a <= self.body_b {
            self
        } else {
            Self::new(self.body_b, self.body_a)
        }
    }

    pub fn involves(&self, id: BodyId) -> bool {
        self.body_a == id || self.body_b == id
    }
}

/// Collision events produced by one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepEvents {
    pub collision_start: Vec<CollisionPair>,
    pub collision_end: Vec<CollisionPair>,
}

impl StepEvents {
    pub fn is_empty(&self) -> bool {
        self.collision_start.is_empty() && self.collision_end.is_empty()
    }
}

/// Which event kinds are currently delivered
#[derive(Debug, Clone, Default)]
pub struct Subscriptions {
    active: HashSet<EventKind>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind) {
        self.active.insert(kind);
    }

    pub fn off(&mut self, kind: EventKind) {
        self.active.remove(&kind);
    }

    /// Detach everything
    pub fn off_all(&mut self) {
        self.active.clear();
    }

    pub fn is_on(&self, kind: EventKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_pair_order() {
        let pair = CollisionPair::new(BodyId(9), BodyId(3));
        assert_eq!(pair.canonical(), CollisionPair::new(BodyId(3), BodyId(9)));
        assert!(pair.involves(BodyId(3)));
        assert!(!pair.involves(BodyId(4)));
    }

    #[test]
    fn test_subscriptions() {
        let mut subs = Subscriptions::new();
        subs.on(EventKind::CollisionStart);
        subs.on(EventKind::MouseDown);
        assert!(subs.is_on(EventKind::CollisionStart));
        subs.off(EventKind::CollisionStart);
        assert!(!subs.is_on(EventKind::CollisionStart));
        subs.off_all();
        assert!(subs.is_empty());
    }
}
