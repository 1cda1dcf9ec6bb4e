//! Simulation module
//!
//! All gameplay state lives here:
//! - Bodies and the world that owns them
//! - The physics stepper and its collision events
//! - Strike handling, delayed reverts and the scoreboard
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod engine;
pub mod events;
pub mod handler;
pub mod runner;
pub mod scoreboard;
pub mod spawner;
pub mod timers;
pub mod world;

pub use body::{Body, BodyId, Fill, Label, Material, RenderStyle, Shape};
pub use collision::{CollisionResult, body_contact};
pub use engine::Engine;
pub use events::{CollisionPair, EventKind, StepEvents, Subscriptions};
pub use handler::{CollisionHandler, Strike, StrikeContext};
pub use runner::Runner;
pub use scoreboard::Scoreboard;
pub use spawner::BallSpawner;
pub use timers::{DueRevert, Effect, Restore, Timers};
pub use world::World;
