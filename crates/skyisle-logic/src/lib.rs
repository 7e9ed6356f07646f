//! Pure simulation logic for Skyisle.
//!
//! This crate contains all game logic that is independent of the engine,
//! the renderer, and the physics body. Functions take plain data and
//! return results, making them unit-testable and portable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`clock`] | Day-cycle clock, time-of-day phases, lighting table |
//! | [`config`] | Game tuning parameters and session defaults |
//! | [`economy`] | Inventory ledger, crafting recipes, quest completion |
//! | [`interaction`] | Interactable kinds and proximity/facing target selection |
//! | [`movement`] | Key state to velocity command, pointer deltas to yaw/pitch |

pub mod clock;
pub mod config;
pub mod economy;
pub mod interaction;
pub mod movement;
