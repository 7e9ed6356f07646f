//! Skyisle Core — game-state engine for a 3D exploration game.
//!
//! The engine owns the simulation state: the environment clock, input and
//! camera, the ECS world of interactable objects, and the resource
//! economy. Rendering and physics stay outside; the engine consumes a
//! per-frame body sample through the [`engine::PhysicsBody`] seam and
//! exposes velocity commands, clock state, ledger snapshots, and a stream
//! of domain events.
//!
//! # Example
//!
//! ```rust,no_run
//! use skyisle_core::prelude::*;
//! use skyisle_logic::config::GameConfig;
//!
//! let mut engine = GameEngine::with_builtin_catalogs(GameConfig::default()).unwrap();
//! let mut body = FixedBody::standing_at(glam::Vec3::new(0.0, 1.0, 5.0));
//!
//! loop {
//!     engine.update(1.0 / 60.0, &mut body);
//!     for event in engine.drain_events() {
//!         // hand to the UI layer
//!         let _ = event;
//!     }
//! }
//! ```

pub mod catalog;
pub mod engine;
pub mod events;
pub mod resolver;
pub mod world;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::engine::{FixedBody, GameEngine, PhysicsBody};
    pub use crate::events::GameEvent;
}
