//! The world: sole owner of every body
//!
//! Bodies are kept in insertion order, which the scoreboard relies on for
//! "oldest first". Operations on an id that is no longer present are no-ops.

use glam::Vec2;

use super::body::{Body, BodyId, Label};

#[derive(Debug, Clone, Default)]
pub struct World {
    bodies: Vec<Body>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 1,
        }
    }

    /// Take ownership of a body and assign its id
    pub fn add(&mut self, mut body: Body) -> BodyId {
        // `Default` leaves next_id at 0; ids start at 1 either way
        self.next_id = self.next_id.max(1);
        let id = BodyId(self.next_id);
        self.next_id += 1;
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Add several bodies, returning their ids in order
    pub fn extend(&mut self, bodies: impl IntoIterator<Item = Body>) -> Vec<BodyId> {
        bodies.into_iter().map(|b| self.add(b)).collect()
    }

    /// Remove a body. Removing an absent body returns `None` and does nothing.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let index = self.index_of(id)?;
        Some(self.bodies.remove(index))
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Move a body without touching its velocity. Returns false if absent.
    pub fn set_position(&mut self, id: BodyId, position: Vec2) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    /// Bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Bodies with a label, in insertion order
    pub fn with_label(&self, label: Label) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.label == label)
    }

    pub fn count(&self, label: Label) -> usize {
        self.with_label(label).count()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drop every body. Ids keep counting up so stale handles never alias.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body;

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut world = World::new();
        let a = world.add(body::ball(Vec2::ZERO, 10.0));
        let b = world.add(body::peg(Vec2::ONE, 2.0));
        assert_eq!(a, BodyId(1));
        assert_eq!(b, BodyId(2));
        assert_eq!(world.get(b).map(|b| b.label), Some(Label::Peg));
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut world = World::new();
        let id = world.add(body::ball(Vec2::ZERO, 10.0));
        world.add(body::peg(Vec2::ONE, 2.0));

        assert!(world.remove(id).is_some());
        assert!(world.remove(id).is_none());
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_set_position_on_absent_body() {
        let mut world = World::new();
        let id = world.add(body::ball(Vec2::ZERO, 10.0));
        world.remove(id);
        assert!(!world.set_position(id, Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_set_position_keeps_velocity() {
        let mut world = World::new();
        let id = world.add(body::ball(Vec2::ZERO, 10.0));
        world.get_mut(id).unwrap().velocity = Vec2::new(3.0, 4.0);
        assert!(world.set_position(id, Vec2::new(1.0, 2.0)));
        let b = world.get(id).unwrap();
        assert_eq!(b.position, Vec2::new(1.0, 2.0));
        assert_eq!(b.velocity, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let mut world = World::new();
        let old = world.add(body::ball(Vec2::ZERO, 10.0));
        world.clear();
        let new = world.add(body::ball(Vec2::ZERO, 10.0));
        assert_ne!(old, new);
        assert!(world.get(old).is_none());
    }

    #[test]
    fn test_with_label_keeps_insertion_order() {
        let mut world = World::new();
        let first = world.add(body::ball(Vec2::ZERO, 10.0));
        world.add(body::peg(Vec2::ZERO, 2.0));
        let second = world.add(body::ball(Vec2::ONE, 10.0));
        let ids: Vec<_> = world.with_label(Label::Ball).map(|b| b.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(world.count(Label::Peg), 1);
    }
}
