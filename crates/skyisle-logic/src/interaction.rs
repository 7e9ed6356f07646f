//! Interactable world objects and trigger target selection.
//!
//! Each interactable is one of a closed set of kinds; outcome derivation
//! switches exhaustively over the tag. Selection is proximity plus facing:
//! among non-inert candidates inside their interaction radius and within
//! the facing cone, the closest wins. Finding nothing is a silent no-op.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What an interactable does when triggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteractableKind {
    /// Yields a resource on each harvest. `remaining_uses: None` means
    /// infinite; a finite node goes inert at zero and stays inert.
    ResourceNode {
        resource: String,
        yield_min: u32,
        yield_max: u32,
        remaining_uses: Option<u32>,
    },
    /// Conversation target. Never goes inert.
    Npc { npc_id: String },
    /// One-time reward grant. Permanently inert once consumed.
    Container {
        rewards: BTreeMap<String, u64>,
        consumed: bool,
    },
}

impl InteractableKind {
    /// Inert objects are skipped during target selection. Inert state is
    /// terminal for the session; entities are never despawned.
    pub fn is_inert(&self) -> bool {
        match self {
            Self::ResourceNode { remaining_uses, .. } => *remaining_uses == Some(0),
            Self::Npc { .. } => false,
            Self::Container { consumed, .. } => *consumed,
        }
    }
}

/// A world object the player can trigger an interaction against.
/// Instantiated once at world build time; mutated only by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interactable {
    pub name: String,
    pub kind: InteractableKind,
    /// Trigger range in meters, measured from the player position.
    pub radius: f32,
}

/// Pick the interaction target: the closest non-inert candidate within its
/// radius and inside the facing cone (angle between `forward` and the
/// to-target vector at most `facing_cone` radians). Returns `None` when
/// nothing qualifies — a valid silent outcome, not an error.
///
/// A candidate essentially on top of the player always passes the facing
/// check; the direction to it is meaningless.
pub fn select_target<I>(
    player_pos: Vec3,
    forward: Vec3,
    candidates: impl IntoIterator<Item = (I, Vec3, f32, bool)>,
    facing_cone: f32,
) -> Option<I> {
    let facing_cos = facing_cone.cos();
    let mut best: Option<(I, f32)> = None;
    for (id, pos, radius, inert) in candidates {
        if inert {
            continue;
        }
        let to_target = pos - player_pos;
        let dist = to_target.length();
        if dist > radius {
            continue;
        }
        if dist > 1e-4 {
            let cos_angle = forward.normalize_or_zero().dot(to_target / dist);
            if cos_angle < facing_cos {
                continue;
            }
        }
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((id, dist)),
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(uses: Option<u32>) -> InteractableKind {
        InteractableKind::ResourceNode {
            resource: "wood".into(),
            yield_min: 1,
            yield_max: 3,
            remaining_uses: uses,
        }
    }

    #[test]
    fn test_inert_states() {
        assert!(node(Some(0)).is_inert());
        assert!(!node(Some(1)).is_inert());
        assert!(!node(None).is_inert(), "infinite nodes never go inert");
        assert!(!InteractableKind::Npc {
            npc_id: "elder".into()
        }
        .is_inert());
        let chest = InteractableKind::Container {
            rewards: BTreeMap::new(),
            consumed: true,
        };
        assert!(chest.is_inert());
    }

    fn cone() -> f32 {
        std::f32::consts::FRAC_PI_4
    }

    #[test]
    fn picks_closest_in_front() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let picked = select_target(
            Vec3::ZERO,
            forward,
            vec![
                ("far", Vec3::new(0.0, 0.0, -4.0), 5.0, false),
                ("near", Vec3::new(0.0, 0.0, -2.0), 5.0, false),
            ],
            cone(),
        );
        assert_eq!(picked, Some("near"));
    }

    #[test]
    fn out_of_radius_is_skipped() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let picked = select_target(
            Vec3::ZERO,
            forward,
            vec![("tree", Vec3::new(0.0, 0.0, -6.0), 2.5, false)],
            cone(),
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn behind_player_is_skipped() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let picked = select_target(
            Vec3::ZERO,
            forward,
            vec![("rock", Vec3::new(0.0, 0.0, 3.0), 5.0, false)],
            cone(),
        );
        assert_eq!(picked, None);
    }

    #[test]
    fn edge_of_cone_counts() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        // ~40° off axis, inside a 45° cone.
        let pos = Vec3::new(1.6, 0.0, -2.0);
        let picked = select_target(Vec3::ZERO, forward, vec![("a", pos, 5.0, false)], cone());
        assert_eq!(picked, Some("a"));
        // ~60° off axis, outside.
        let pos = Vec3::new(3.5, 0.0, -2.0);
        let picked = select_target(Vec3::ZERO, forward, vec![("a", pos, 5.0, false)], cone());
        assert_eq!(picked, None);
    }

    #[test]
    fn inert_candidate_yields_to_next() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let picked = select_target(
            Vec3::ZERO,
            forward,
            vec![
                ("dead", Vec3::new(0.0, 0.0, -1.0), 5.0, true),
                ("live", Vec3::new(0.0, 0.0, -2.0), 5.0, false),
            ],
            cone(),
        );
        assert_eq!(picked, Some("live"));
    }

    #[test]
    fn no_candidates_is_none() {
        let picked: Option<u32> =
            select_target(Vec3::ZERO, Vec3::NEG_Z, Vec::new(), cone());
        assert_eq!(picked, None);
    }

    #[test]
    fn on_top_of_player_passes_facing() {
        let picked = select_target(
            Vec3::ZERO,
            Vec3::NEG_Z,
            vec![("here", Vec3::ZERO, 1.0, false)],
            cone(),
        );
        assert_eq!(picked, Some("here"));
    }
}
