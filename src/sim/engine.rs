//! Rigid-body stepper
//!
//! Just enough physics for a peg board: gravity, air friction, and
//! ball-vs-everything contact resolution. The interesting output is the
//! start/end collision pair lists each step produces.

use std::collections::HashSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::{BodyId, Shape};
use super::collision::{bounce_velocity, body_contact};
use super::events::{CollisionPair, StepEvents};
use super::world::World;
use crate::consts::*;
use crate::settings::GravitySettings;

/// One contact found during a step
struct Contact {
    pair: CollisionPair,
    normal: Vec2,
    penetration: f32,
    /// Index into world bodies for the moving circle
    circle: usize,
    other: usize,
}

#[derive(Debug, Clone)]
pub struct Engine {
    /// Acceleration in px/s²
    gravity: Vec2,
    rng: Pcg32,
    /// Pairs overlapping at the end of the previous step
    contacts: HashSet<CollisionPair>,
}

impl Engine {
    pub fn new(gravity: GravitySettings, seed: u64) -> Self {
        let gravity =
            Vec2::new(gravity.x, gravity.y) * gravity.scale * ENGINE_ACCEL_TO_SECONDS;
        Self {
            gravity,
            rng: Pcg32::seed_from_u64(seed),
            contacts: HashSet::new(),
        }
    }

    /// Gravity in px/s²
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Uniform in [0, 1)
    pub fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Forget tracked contacts (used on teardown)
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Advance all dynamic bodies by `dt` seconds
    pub fn step(&mut self, world: &mut World, dt: f32) -> StepEvents {
        self.integrate(world, dt);
        let found = self.detect(world);
        self.resolve(world, &found);

        let current: HashSet<CollisionPair> = found.iter().map(|c| c.pair).collect();
        let mut events = StepEvents::default();

        // Report in contact discovery order so handlers see a stable sequence
        let mut seen = HashSet::new();
        for contact in &found {
            if !self.contacts.contains(&contact.pair) && seen.insert(contact.pair) {
                events.collision_start.push(contact.pair);
            }
        }

        let mut ended: Vec<CollisionPair> = self
            .contacts
            .iter()
            .filter(|pair| !current.contains(pair))
            // Removed bodies just drop out; they don't "end" a collision
            .filter(|pair| world.contains(pair.body_a) && world.contains(pair.body_b))
            .copied()
            .collect();
        ended.sort_by_key(|p| (p.body_a, p.body_b));
        events.collision_end = ended;

        self.contacts = current;
        events
    }

    fn integrate(&self, world: &mut World, dt: f32) {
        let air_scale = dt / BASE_DT;
        for body in world.bodies_mut().iter_mut().filter(|b| !b.is_static) {
            body.velocity += self.gravity * dt;
            body.velocity *= (1.0 - body.material.friction_air * air_scale).max(0.0);
            body.position += body.velocity * dt;
        }
    }

    fn detect(&self, world: &World) -> Vec<Contact> {
        let bodies = world.bodies();
        let mut found = Vec::new();

        for (i, circle) in bodies.iter().enumerate().filter(|(_, b)| !b.is_static) {
            for (j, other) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                // Each dynamic-dynamic pair once
                if !other.is_static && j < i {
                    continue;
                }
                let result = body_contact(circle, other);
                let slop = circle.material.slop.max(other.material.slop);
                if result.hit && result.penetration > slop {
                    found.push(Contact {
                        pair: CollisionPair::new(other.id, circle.id).canonical(),
                        normal: result.normal,
                        penetration: result.penetration,
                        circle: i,
                        other: j,
                    });
                }
            }
        }
        found
    }

    fn resolve(&mut self, world: &mut World, found: &[Contact]) {
        let bodies = world.bodies_mut();
        let others: Vec<&Contact> = found
            .iter()
            .filter(|c| !bodies[c.other].label.is_wall())
            .collect();

        for contact in others {
            let restitution = bodies[contact.circle]
                .material
                .restitution
                .max(bodies[contact.other].material.restitution);
            let friction = bodies[contact.circle]
                .material
                .friction
                .max(bodies[contact.other].material.friction);

            if bodies[contact.other].is_static {
                let round_obstacle = matches!(bodies[contact.other].shape, Shape::Circle { .. });
                let ball = &mut bodies[contact.circle];
                ball.position += contact.normal * contact.penetration;
                ball.velocity =
                    bounce_velocity(ball.velocity, contact.normal, restitution, friction);
                // A ball dropped dead-center on a peg would balance there forever
                if round_obstacle {
                    let tangent = contact.normal.perp();
                    let nudge = (self.rng.random::<f32>() * 2.0 - 1.0) * PEG_NUDGE;
                    ball.velocity += tangent * nudge;
                }
            } else {
                // Two balls: split the push, bounce on relative velocity
                let half = contact.normal * (contact.penetration * 0.5);
                let relative = bodies[contact.circle].velocity - bodies[contact.other].velocity;
                let bounced = bounce_velocity(relative, contact.normal, restitution, friction);
                let delta = (bounced - relative) * 0.5;

                bodies[contact.circle].position += half;
                bodies[contact.circle].velocity += delta;
                bodies[contact.other].position -= half;
                bodies[contact.other].velocity -= delta;
            }
        }

        // Walls go last and are re-measured against every moving body, so
        // stacked ball-ball pushes can't leave a ball outside
        let walls: Vec<usize> = (0..bodies.len())
            .filter(|&i| bodies[i].label.is_wall())
            .collect();
        for i in 0..bodies.len() {
            if bodies[i].is_static {
                continue;
            }
            for &w in &walls {
                let result = body_contact(&bodies[i], &bodies[w]);
                if !result.hit {
                    continue;
                }
                let restitution = bodies[i].material.restitution.max(bodies[w].material.restitution);
                let friction = bodies[i].material.friction.max(bodies[w].material.friction);
                let ball = &mut bodies[i];
                ball.position += result.normal * result.penetration;
                ball.velocity = bounce_velocity(ball.velocity, result.normal, restitution, friction);
            }
        }
    }

    /// Whether a body is part of any tracked contact
    pub fn is_touching(&self, id: BodyId) -> bool {
        self.contacts.iter().any(|p| p.involves(id))
    }
}
