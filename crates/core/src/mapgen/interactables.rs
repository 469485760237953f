//! Interactable placement across the rooms not used by the player start or stairs.

use rand::Rng;
use tracing::warn;

use crate::config::InteractableConfig;
use crate::grid::Grid;
use crate::types::InteractableKind;

use super::bsp::Rect;
use super::carve::room_center;
use super::model::InteractableSpawn;
use super::seed::{random_index, roll_percent, weighted_index};

/// Guarantees one merchant and one treasure chest in distinct rooms when at least two rooms
/// are eligible; every other eligible room gets a weighted pick with `fill_chance_percent`.
pub fn mark_interactables(
    grid: &Grid,
    rng: &mut impl Rng,
    eligible_rooms: &[Rect],
    config: &InteractableConfig,
) -> Vec<InteractableSpawn> {
    let mut pool = eligible_rooms.to_vec();
    let mut spawns = Vec::new();

    if pool.len() < 2 {
        warn!(eligible = pool.len(), "not enough rooms for both merchant and treasure");
    }

    for kind in [InteractableKind::Merchant, InteractableKind::TreasureChest] {
        if pool.is_empty() {
            break;
        }
        let room = pool.remove(random_index(rng, pool.len()));
        spawns.push(InteractableSpawn { kind, pos: room_center(grid, rng, room) });
    }

    let weights: Vec<u32> = config.fill_table.iter().map(|entry| entry.weight).collect();
    for room in pool {
        if !roll_percent(rng, config.fill_chance_percent) {
            continue;
        }
        let Some(index) = weighted_index(rng, &weights) else {
            break;
        };
        spawns.push(InteractableSpawn {
            kind: config.fill_table[index].kind,
            pos: room_center(grid, rng, room),
        });
    }

    spawns
}
