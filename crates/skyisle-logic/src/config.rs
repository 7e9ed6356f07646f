//! Game tuning parameters.
//!
//! Everything the simulation treats as a constant lives here so a session
//! can be tuned without touching the step loop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::NOON;

/// Top-level configuration for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Walking speed in m/s.
    pub base_speed: f32,
    /// Sprint speed in m/s (shift held).
    pub sprint_speed: f32,
    /// Upward velocity set on a grounded jump.
    pub jump_impulse: f32,
    /// |vertical velocity| below this counts as grounded.
    pub grounded_epsilon: f32,
    /// Radians of yaw/pitch per pointer-delta unit.
    pub look_sensitivity: f32,
    /// Camera eye height above the body position.
    pub eye_height: f32,
    /// Half-angle of the facing cone for interaction, in radians.
    pub facing_cone: f32,
    /// Real seconds per simulated minute.
    pub seconds_per_minute: f32,
    /// Clock offset at session start, in minutes of day.
    pub start_minutes: u32,
    /// Inventory contents at session start.
    pub starting_inventory: BTreeMap<String, u64>,
    /// Seed for world layout and yield rolls.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut starting_inventory = BTreeMap::new();
        starting_inventory.insert("wood".to_string(), 5);
        starting_inventory.insert("stone".to_string(), 3);
        starting_inventory.insert("crystal".to_string(), 1);
        Self {
            base_speed: 5.0,
            sprint_speed: 8.0,
            jump_impulse: 10.0,
            grounded_epsilon: 0.1,
            look_sensitivity: 0.002,
            eye_height: 1.5,
            facing_cone: std::f32::consts::FRAC_PI_4,
            seconds_per_minute: 3.0,
            start_minutes: NOON,
            starting_inventory,
            seed: 42,
        }
    }
}
