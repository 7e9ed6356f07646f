//! Interaction resolution — turns a trigger into at most one typed outcome.
//!
//! Triggers are drained strictly one at a time by the engine's step loop;
//! each resolution reads the world, mutates the chosen target's state
//! (use count, consumed flag), and returns the outcome for the economy.

use glam::Vec3;
use hecs::World;
use rand::Rng;
use skyisle_logic::economy::ResourceMap;
use skyisle_logic::interaction::{select_target, Interactable, InteractableKind};

use crate::world::WorldPos;

/// Typed result of a resolved trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    ResourceCollected { resource: String, amount: u64 },
    NpcInteracted { npc_id: String },
    RewardGranted { rewards: ResourceMap },
}

/// Resolve one interact trigger against the world.
///
/// Selects the closest non-inert interactable within its radius and the
/// facing cone, then derives the outcome by kind. Returns `None` for a
/// miss or an inert target — legitimate silent outcomes of normal play.
pub fn resolve_trigger(
    world: &mut World,
    player_pos: Vec3,
    forward: Vec3,
    facing_cone: f32,
    rng: &mut impl Rng,
) -> Option<InteractionOutcome> {
    let target = {
        let mut query = world.query::<(&WorldPos, &Interactable)>();
        select_target(
            player_pos,
            forward,
            query
                .iter()
                .map(|(entity, (pos, item))| (entity, pos.0, item.radius, item.kind.is_inert())),
            facing_cone,
        )
    }?;

    let mut interactable = world.get::<&mut Interactable>(target).ok()?;
    let outcome = match &mut interactable.kind {
        InteractableKind::ResourceNode {
            resource,
            yield_min,
            yield_max,
            remaining_uses,
        } => {
            // Spent nodes are filtered during selection; a zero here is
            // still a silent miss, not an error.
            if *remaining_uses == Some(0) {
                return None;
            }
            let amount = rng.gen_range(*yield_min..=*yield_max) as u64;
            if let Some(uses) = remaining_uses {
                *uses -= 1;
            }
            InteractionOutcome::ResourceCollected {
                resource: resource.clone(),
                amount,
            }
        }
        InteractableKind::Npc { npc_id } => InteractionOutcome::NpcInteracted {
            npc_id: npc_id.clone(),
        },
        InteractableKind::Container { rewards, consumed } => {
            if *consumed {
                return None;
            }
            *consumed = true;
            InteractionOutcome::RewardGranted {
                rewards: rewards.clone(),
            }
        }
    };

    tracing::debug!(target_name = %interactable.name, ?outcome, "interaction resolved");
    Some(outcome)
}
