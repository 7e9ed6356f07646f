//! Game engine — the single-threaded cooperative step loop.
//!
//! One `update` call advances the clock, runs the movement controller
//! against the sampled physics body, drains queued interaction triggers
//! in arrival order, and applies economy requests one at a time. The
//! economy is the sole ledger writer; everything downstream observes
//! snapshots and the drained event stream.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skyisle_logic::clock::{ClockState, DayPhase, WorldClock};
use skyisle_logic::config::GameConfig;
use skyisle_logic::economy::{Economy, Quest, Recipe, ResourceMap};
use skyisle_logic::movement::{horizontal_velocity, vertical_velocity, Camera, InputState, MoveKey};

use crate::catalog::{builtin_quests, builtin_recipes, CatalogError};
use crate::events::GameEvent;
use crate::resolver::{resolve_trigger, InteractionOutcome};
use crate::world::build_island;

/// The externally owned physics body. The engine reads position and
/// vertical velocity each frame and writes back a full velocity command;
/// it never writes position.
pub trait PhysicsBody {
    fn position(&self) -> Vec3;
    fn vertical_velocity(&self) -> f32;
    fn set_velocity(&mut self, velocity: Vec3);
}

/// Trivial body for tests and headless runs: position is fixed, vertical
/// velocity is whatever the harness sets.
#[derive(Debug, Clone, Copy)]
pub struct FixedBody {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub commanded: Vec3,
}

impl FixedBody {
    /// A grounded body at `position`.
    pub fn standing_at(position: Vec3) -> Self {
        Self {
            position,
            vertical_velocity: 0.0,
            commanded: Vec3::ZERO,
        }
    }
}

impl PhysicsBody for FixedBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.commanded = velocity;
        self.vertical_velocity = velocity.y;
    }
}

/// A deferred economy operation raised by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EconomyRequest {
    Craft(String),
    CompleteQuest(String),
}

/// Main game-state engine.
pub struct GameEngine {
    config: GameConfig,
    clock: WorldClock,
    /// Real seconds accumulated toward the next simulated minute.
    clock_accumulator: f32,
    input: InputState,
    camera: Camera,
    economy: Economy,
    world: World,
    pending_triggers: usize,
    pending_requests: VecDeque<EconomyRequest>,
    outbox: Vec<GameEvent>,
    rng: StdRng,
}

impl GameEngine {
    /// Engine with explicit catalogs.
    pub fn new(config: GameConfig, recipes: Vec<Recipe>, quests: Vec<Quest>) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut world = World::new();
        build_island(&mut world, &mut rng);

        let economy = Economy::new(config.starting_inventory.clone(), recipes, quests);
        let clock = WorldClock::starting_at(config.start_minutes);

        Self {
            config,
            clock,
            clock_accumulator: 0.0,
            input: InputState::default(),
            camera: Camera::default(),
            economy,
            world,
            pending_triggers: 0,
            pending_requests: VecDeque::new(),
            outbox: Vec::new(),
            rng,
        }
    }

    /// Engine with the shipped recipe and quest catalogs.
    pub fn with_builtin_catalogs(config: GameConfig) -> Result<Self, CatalogError> {
        Ok(Self::new(config, builtin_recipes()?, builtin_quests()?))
    }

    // --- Inbound input plumbing ---

    pub fn key_event(&mut self, key: MoveKey, pressed: bool) {
        self.input.set_key(key, pressed);
    }

    /// Edge-triggered jump request (space pressed).
    pub fn jump_pressed(&mut self) {
        self.input.request_jump();
    }

    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.input.push_pointer_delta(dx, dy);
    }

    /// Pointer-lock gained/lost.
    pub fn set_look_active(&mut self, active: bool) {
        self.input.set_look_active(active);
    }

    /// Queue a discrete interact trigger. Never dropped; drained in
    /// arrival order on the next update.
    pub fn trigger_interact(&mut self) {
        self.pending_triggers += 1;
    }

    pub fn request_craft(&mut self, recipe_id: impl Into<String>) {
        self.pending_requests
            .push_back(EconomyRequest::Craft(recipe_id.into()));
    }

    pub fn request_quest_completion(&mut self, quest_id: impl Into<String>) {
        self.pending_requests
            .push_back(EconomyRequest::CompleteQuest(quest_id.into()));
    }

    // --- Step loop ---

    /// Advance the simulation by `delta_seconds` of real time.
    pub fn update(&mut self, delta_seconds: f32, body: &mut impl PhysicsBody) {
        self.advance_clock(delta_seconds);
        self.run_movement(body);
        self.drain_triggers(body.position());
        self.drain_requests();
    }

    fn advance_clock(&mut self, delta_seconds: f32) {
        self.clock_accumulator += delta_seconds;
        let mut whole_minutes = 0;
        while self.clock_accumulator >= self.config.seconds_per_minute {
            self.clock_accumulator -= self.config.seconds_per_minute;
            whole_minutes += 1;
        }
        if whole_minutes == 0 {
            return;
        }
        let before = self.clock.phase();
        if let Err(err) = self.clock.advance(whole_minutes) {
            tracing::error!(%err, "clock advance rejected");
            return;
        }
        let after = self.clock.phase();
        if before != after {
            tracing::info!(?before, ?after, time = %self.clock.format_time(), "day phase changed");
        }
    }

    fn run_movement(&mut self, body: &mut impl PhysicsBody) {
        let delta = self.input.take_pointer_delta();
        if delta != glam::Vec2::ZERO {
            self.camera.apply_look(delta, self.config.look_sensitivity);
        }

        let horizontal = horizontal_velocity(
            &self.input,
            self.camera.yaw,
            self.config.base_speed,
            self.config.sprint_speed,
        );
        // The jump edge is consumed every step, grounded or not, so a
        // request made mid-air cannot fire on landing.
        let jump = self.input.take_jump();
        let vy = vertical_velocity(
            jump,
            body.vertical_velocity(),
            self.config.jump_impulse,
            self.config.grounded_epsilon,
        );
        body.set_velocity(Vec3::new(horizontal.x, vy, horizontal.z));
    }

    fn drain_triggers(&mut self, player_pos: Vec3) {
        while self.pending_triggers > 0 {
            self.pending_triggers -= 1;
            let outcome = resolve_trigger(
                &mut self.world,
                player_pos,
                self.camera.forward(),
                self.config.facing_cone,
                &mut self.rng,
            );
            let Some(outcome) = outcome else { continue };
            match outcome {
                InteractionOutcome::ResourceCollected { resource, amount } => {
                    match self.economy.apply_collection(&resource, amount) {
                        Ok(()) => {
                            tracing::info!(%resource, amount, "resource collected");
                            self.outbox
                                .push(GameEvent::ResourceCollected { resource, amount });
                        }
                        Err(err) => tracing::error!(%err, %resource, "collection rejected"),
                    }
                }
                InteractionOutcome::NpcInteracted { npc_id } => {
                    tracing::info!(%npc_id, "npc interaction");
                    self.outbox.push(GameEvent::NpcInteracted { npc_id });
                }
                InteractionOutcome::RewardGranted { rewards } => {
                    self.economy.credit_rewards(&rewards);
                    tracing::info!(?rewards, "container opened");
                    self.outbox.push(GameEvent::RewardGranted { rewards });
                }
            }
        }
    }

    fn drain_requests(&mut self) {
        while let Some(request) = self.pending_requests.pop_front() {
            match request {
                EconomyRequest::Craft(recipe_id) => match self.economy.craft(&recipe_id) {
                    Ok(recipe) => {
                        tracing::info!(%recipe_id, "craft succeeded");
                        self.outbox.push(GameEvent::CraftSucceeded {
                            recipe_id,
                            name: recipe.name,
                        });
                    }
                    Err(err) => {
                        tracing::info!(%recipe_id, %err, "craft failed");
                        self.outbox.push(GameEvent::CraftFailed {
                            recipe_id,
                            reason: err.to_string(),
                        });
                    }
                },
                EconomyRequest::CompleteQuest(quest_id) => {
                    match self.economy.complete_quest(&quest_id) {
                        Ok(quest) => {
                            tracing::info!(%quest_id, "quest completed");
                            self.outbox.push(GameEvent::QuestCompleted {
                                quest_id,
                                name: quest.name,
                            });
                        }
                        Err(err) => {
                            tracing::info!(%quest_id, %err, "quest completion failed");
                            self.outbox.push(GameEvent::QuestFailed {
                                quest_id,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }
        }
    }

    // --- Outbound views ---

    /// Clock snapshot for presentation (phase, lighting, sky color).
    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn day_phase(&self) -> DayPhase {
        self.clock.phase()
    }

    /// Camera orientation for the renderer.
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Camera eye position for a given body position.
    pub fn eye_position(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::new(0.0, self.config.eye_height, 0.0)
    }

    /// Current inventory snapshot.
    pub fn ledger(&self) -> &ResourceMap {
        self.economy.ledger()
    }

    pub fn recipes(&self) -> &[Recipe] {
        self.economy.recipes()
    }

    pub fn quests(&self) -> &[Quest] {
        self.economy.quests()
    }

    /// Take all events raised since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameConfig::default(), Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_builtin_catalogs(GameConfig::default()).unwrap()
    }

    #[test]
    fn test_clock_accumulates_whole_minutes() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::new(0.0, 1.0, 5.0));
        assert_eq!(eng.clock_state().minutes_of_day, 720);

        // Default rate: 3 real seconds per sim minute.
        eng.update(2.9, &mut body);
        assert_eq!(eng.clock_state().minutes_of_day, 720);

        eng.update(0.2, &mut body);
        assert_eq!(eng.clock_state().minutes_of_day, 721);

        eng.update(9.0, &mut body);
        assert_eq!(eng.clock_state().minutes_of_day, 724);
    }

    #[test]
    fn test_movement_command_written_to_body() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::ZERO);
        eng.key_event(MoveKey::Forward, true);
        eng.update(0.016, &mut body);
        assert!((body.commanded.z + 5.0).abs() < 1e-4);
        assert_eq!(body.commanded.y, 0.0);

        eng.key_event(MoveKey::Forward, false);
        eng.update(0.016, &mut body);
        assert_eq!(body.commanded, Vec3::ZERO);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::ZERO);
        eng.jump_pressed();
        eng.update(0.016, &mut body);
        assert_eq!(body.commanded.y, 10.0);

        // Airborne now; a second request is consumed without effect.
        body.vertical_velocity = 4.0;
        eng.jump_pressed();
        eng.update(0.016, &mut body);
        assert_eq!(body.commanded.y, 4.0);

        // Landing without a fresh press: no spurious jump.
        body.vertical_velocity = 0.0;
        eng.update(0.016, &mut body);
        assert_eq!(body.commanded.y, 0.0);
    }

    #[test]
    fn test_pointer_look_requires_look_mode() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::ZERO);
        eng.pointer_moved(100.0, 0.0);
        eng.update(0.016, &mut body);
        assert_eq!(eng.camera().yaw, 0.0);

        eng.set_look_active(true);
        eng.pointer_moved(100.0, 0.0);
        eng.update(0.016, &mut body);
        assert!((eng.camera().yaw + 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_trigger_with_no_target_is_silent() {
        let mut eng = engine();
        // Far away from every interactable.
        let mut body = FixedBody::standing_at(Vec3::new(500.0, 1.0, 500.0));
        eng.trigger_interact();
        eng.update(0.016, &mut body);
        assert!(eng.drain_events().is_empty());
    }

    #[test]
    fn test_craft_request_emits_event_and_mutates_ledger() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::new(500.0, 1.0, 500.0));
        eng.request_craft("axe");
        eng.update(0.016, &mut body);

        let events = eng.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::CraftSucceeded { recipe_id, .. }] if recipe_id == "axe"
        ));
        assert_eq!(eng.ledger().get("axe"), Some(&1));
        assert_eq!(eng.ledger().get("wood"), Some(&2));
        assert_eq!(eng.ledger().get("stone"), Some(&2));
    }

    #[test]
    fn test_failed_craft_reports_reason() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::new(500.0, 1.0, 500.0));
        eng.request_craft("staff"); // needs 3 crystal, have 1
        eng.update(0.016, &mut body);

        let events = eng.drain_events();
        match events.as_slice() {
            [GameEvent::CraftFailed { recipe_id, reason }] => {
                assert_eq!(recipe_id, "staff");
                assert!(reason.contains("insufficient"), "{reason}");
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn test_quest_flow_through_requests() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::new(500.0, 1.0, 500.0));

        // gather_wood requires 5 wood; start inventory already has 5.
        eng.request_quest_completion("gather_wood");
        eng.update(0.016, &mut body);
        let events = eng.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::QuestCompleted { quest_id, .. }] if quest_id == "gather_wood"
        ));
        assert_eq!(eng.ledger().get("crystal"), Some(&3), "1 + reward 2");

        // Second attempt fails and changes nothing.
        let before = eng.ledger().clone();
        eng.request_quest_completion("gather_wood");
        eng.update(0.016, &mut body);
        let events = eng.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::QuestFailed { .. }]));
        assert_eq!(eng.ledger(), &before);
    }

    #[test]
    fn test_requests_processed_in_arrival_order() {
        let mut eng = engine();
        let mut body = FixedBody::standing_at(Vec3::new(500.0, 1.0, 500.0));
        // First craft consumes the wood the second needs.
        eng.request_craft("axe"); // wood 5 -> 2
        eng.request_craft("pickaxe"); // needs wood 2 + stone 3, stone is 2 now
        eng.update(0.016, &mut body);

        let events = eng.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], GameEvent::CraftSucceeded { recipe_id, .. } if recipe_id == "axe"));
        assert!(matches!(&events[1], GameEvent::CraftFailed { recipe_id, .. } if recipe_id == "pickaxe"));
    }
}
