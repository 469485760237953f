//! Procedural floor generation split into coherent submodules.

pub mod model;

mod bsp;
mod carve;
mod generator;
mod interactables;
mod placement;
mod seed;

pub use bsp::Rect;
pub use generator::DungeonGenerator;
pub use interactables::mark_interactables;
pub use model::{GeneratedDungeon, InteractableSpawn, Room, RoomTag};

pub(crate) use seed::{random_index, weighted_index};

use crate::config::{DungeonConfig, InteractableConfig};

pub fn generate_dungeon(
    dungeon: &DungeonConfig,
    interactables: &InteractableConfig,
    run_seed: u64,
    floor_index: u32,
) -> GeneratedDungeon {
    DungeonGenerator::new(run_seed, dungeon.clone(), interactables.clone()).generate(floor_index)
}
