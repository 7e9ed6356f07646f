//! World build — spawns the floating island's interactables into the ECS.
//!
//! The default island is a ring of trees, an inner ring
//! of rocks, a tight ring of crystals, one NPC, and one treasure chest.
//! Entities are created once at session start and never despawned; spent
//! nodes and opened containers simply go inert.

use std::collections::BTreeMap;

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use skyisle_logic::interaction::{Interactable, InteractableKind};

/// World-space position component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPos(pub Vec3);

const TREE_COUNT: usize = 8;
const ROCK_COUNT: usize = 6;
const CRYSTAL_COUNT: usize = 4;

const NODE_RADIUS: f32 = 2.5;
const NPC_RADIUS: f32 = 3.0;
const CHEST_RADIUS: f32 = 2.0;

fn ring_position(index: usize, count: usize, offset: f32, radius: f32) -> Vec3 {
    let angle = (index as f32 / count as f32) * std::f32::consts::TAU + offset;
    Vec3::new(angle.cos() * radius, 1.0, angle.sin() * radius)
}

fn resource_node(
    resource: &str,
    yield_min: u32,
    yield_max: u32,
    remaining_uses: Option<u32>,
) -> InteractableKind {
    InteractableKind::ResourceNode {
        resource: resource.to_string(),
        yield_min,
        yield_max,
        remaining_uses,
    }
}

/// Build the island into `world`. Placement radii are jittered from `rng`
/// so a seeded rng reproduces the exact layout. Returns the spawned
/// entities in spawn order.
pub fn build_island(world: &mut World, rng: &mut impl Rng) -> Vec<Entity> {
    let mut spawned = Vec::new();

    // Outer ring: trees yield wood, five harvests each.
    for i in 0..TREE_COUNT {
        let radius = 4.0 + rng.gen_range(0.0..2.0);
        let entity = world.spawn((
            WorldPos(ring_position(i, TREE_COUNT, 0.0, radius)),
            Interactable {
                name: format!("Tree {}", i + 1),
                kind: resource_node("wood", 1, 3, Some(5)),
                radius: NODE_RADIUS,
            },
        ));
        spawned.push(entity);
    }

    // Middle ring: rocks yield stone.
    for i in 0..ROCK_COUNT {
        let radius = 2.0 + rng.gen_range(0.0..1.5);
        let entity = world.spawn((
            WorldPos(ring_position(i, ROCK_COUNT, std::f32::consts::FRAC_PI_6, radius)),
            Interactable {
                name: format!("Rock {}", i + 1),
                kind: resource_node("stone", 1, 2, Some(4)),
                radius: NODE_RADIUS,
            },
        ));
        spawned.push(entity);
    }

    // Inner ring: crystals are scarce, two harvests each.
    for i in 0..CRYSTAL_COUNT {
        let radius = 1.0 + rng.gen_range(0.0..1.0);
        let entity = world.spawn((
            WorldPos(ring_position(i, CRYSTAL_COUNT, std::f32::consts::FRAC_PI_4, radius)),
            Interactable {
                name: format!("Crystal {}", i + 1),
                kind: resource_node("crystal", 1, 1, Some(2)),
                radius: NODE_RADIUS,
            },
        ));
        spawned.push(entity);
    }

    // The island elder, always available for conversation. Placed outside
    // the resource rings so nearby nodes cannot shadow it.
    spawned.push(world.spawn((
        WorldPos(Vec3::new(0.0, 1.0, 6.5)),
        Interactable {
            name: "Island Elder".to_string(),
            kind: InteractableKind::Npc {
                npc_id: "island_elder".to_string(),
            },
            radius: NPC_RADIUS,
        },
    )));

    // One single-use treasure chest at the island's edge.
    let mut rewards = BTreeMap::new();
    rewards.insert("wood".to_string(), 5);
    rewards.insert("stone".to_string(), 3);
    rewards.insert("crystal".to_string(), 2);
    spawned.push(world.spawn((
        WorldPos(Vec3::new(-5.0, 1.0, -4.0)),
        Interactable {
            name: "Treasure Chest".to_string(),
            kind: InteractableKind::Container {
                rewards,
                consumed: false,
            },
            radius: CHEST_RADIUS,
        },
    )));

    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_island_population() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spawned = build_island(&mut world, &mut rng);
        assert_eq!(spawned.len(), TREE_COUNT + ROCK_COUNT + CRYSTAL_COUNT + 2);

        let mut nodes = 0;
        let mut npcs = 0;
        let mut containers = 0;
        for (_, interactable) in world.query::<&Interactable>().iter() {
            match &interactable.kind {
                InteractableKind::ResourceNode { .. } => nodes += 1,
                InteractableKind::Npc { .. } => npcs += 1,
                InteractableKind::Container { consumed, .. } => {
                    assert!(!consumed);
                    containers += 1;
                }
            }
        }
        assert_eq!(nodes, TREE_COUNT + ROCK_COUNT + CRYSTAL_COUNT);
        assert_eq!(npcs, 1);
        assert_eq!(containers, 1);
    }

    #[test]
    fn test_seeded_layout_is_deterministic() {
        let mut a = World::new();
        let mut b = World::new();
        build_island(&mut a, &mut StdRng::seed_from_u64(7));
        build_island(&mut b, &mut StdRng::seed_from_u64(7));

        let positions = |world: &World| -> Vec<Vec3> {
            world
                .query::<&WorldPos>()
                .iter()
                .map(|(_, p)| p.0)
                .collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_nothing_spawns_inert() {
        let mut world = World::new();
        build_island(&mut world, &mut StdRng::seed_from_u64(1));
        for (_, interactable) in world.query::<&Interactable>().iter() {
            assert!(!interactable.kind.is_inert(), "{}", interactable.name);
        }
    }
}
