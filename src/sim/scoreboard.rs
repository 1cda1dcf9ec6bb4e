//! Recent-hit scoreboard
//!
//! Keeps the last two struck multipliers on screen as their own display
//! bodies, stacked in the top-right corner. The gameplay partitions are never
//! moved there; each entry is a fresh body with a copy of the text.

use glam::Vec2;

use super::body::{self, Body, BodyId, Label};
use super::world::World;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Scoreboard {
    capacity: usize,
    /// Column x for every slot
    anchor_x: f32,
    slot_height: f32,
    /// Hits recorded over the session (not bounded)
    total_hits: u64,
}

impl Scoreboard {
    /// Scoreboard anchored to the top-right corner of a board this wide
    pub fn new(board_width: f32) -> Self {
        Self {
            capacity: SCOREBOARD_CAPACITY,
            anchor_x: board_width - SCOREBOARD_INSET,
            slot_height: SCOREBOARD_SLOT_HEIGHT,
            total_hits: 0,
        }
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    /// Display position of a slot (0 = top)
    pub fn slot_position(&self, slot: usize) -> Vec2 {
        Vec2::new(self.anchor_x, self.slot_height * (slot as f32 + 1.0))
    }

    /// Record a hit on `partition`.
    ///
    /// Evicts the oldest entry when full, adds a new entry carrying a copy of
    /// the partition's annotation, then restacks every entry. Returns the new
    /// entry's id, or `None` if the partition is no longer in the world.
    pub fn record_hit(&mut self, world: &mut World, partition: BodyId) -> Option<BodyId> {
        let source = world.get(partition)?;
        let size = source.shape.size();
        let annotation = source.annotation.clone();

        let mut existing: Vec<BodyId> =
            world.with_label(Label::PartitionPoint).map(|b| b.id).collect();
        while existing.len() >= self.capacity && !existing.is_empty() {
            let oldest = existing.remove(0);
            world.remove(oldest);
            log::debug!("Scoreboard evicted {}", oldest);
        }

        let entry = world.add(body::partition_point(self.slot_position(0), size, annotation));
        self.total_hits += 1;
        self.relayout(world);

        log::debug!("Scoreboard: {:?}", self.annotations(world));
        Some(entry)
    }

    /// Stack entries into contiguous slots, oldest on top
    pub fn relayout(&self, world: &mut World) {
        let ids: Vec<BodyId> = world.with_label(Label::PartitionPoint).map(|b| b.id).collect();
        for (slot, id) in ids.into_iter().enumerate() {
            world.set_position(id, self.slot_position(slot));
        }
    }

    /// Current entries, oldest first
    pub fn entries<'a>(&self, world: &'a World) -> Vec<&'a Body> {
        world.with_label(Label::PartitionPoint).collect()
    }

    /// Entry texts, oldest first
    pub fn annotations(&self, world: &World) -> Vec<String> {
        world
            .with_label(Label::PartitionPoint)
            .map(|b| b.annotation.clone().unwrap_or_default())
            .collect()
    }
}
