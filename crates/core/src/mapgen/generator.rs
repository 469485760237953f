//! Floor generation orchestration: partition, carve, connect, tag rooms, place interactables.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::config::{DungeonConfig, InteractableConfig};
use crate::grid::{Grid, GridError};
use crate::types::InteractableKind;

use super::bsp::{Rect, partition};
use super::carve::{connect_rooms, place_room};
use super::interactables::mark_interactables;
use super::model::{GeneratedDungeon, InteractableSpawn, Room, RoomTag};
use super::placement::choose_player_and_stairs;
use super::seed::floor_rng;

pub struct DungeonGenerator {
    run_seed: u64,
    dungeon: DungeonConfig,
    interactables: InteractableConfig,
}

impl DungeonGenerator {
    pub fn new(run_seed: u64, dungeon: DungeonConfig, interactables: InteractableConfig) -> Self {
        Self { run_seed, dungeon, interactables }
    }

    pub fn generate(&self, floor_index: u32) -> GeneratedDungeon {
        let mut rng = floor_rng(self.run_seed, floor_index);
        match self.generate_with(&mut rng, floor_index) {
            Ok(dungeon) => dungeon,
            Err(error) => {
                // Partition leaves never leave the grid, so this only fires on a broken config.
                warn!(%error, floor_index, "generation failed, falling back to a single room");
                self.single_room_fallback(floor_index)
            }
        }
    }

    fn generate_with(
        &self,
        rng: &mut ChaCha8Rng,
        floor_index: u32,
    ) -> Result<GeneratedDungeon, GridError> {
        let DungeonConfig { rows, cols, min_room_size, max_room_size, tile_spacing } =
            self.dungeon;
        let mut grid = Grid::new(rows, cols, tile_spacing);
        let bounds = Rect { x: 0, y: 0, width: rows, height: cols };

        let areas = partition(rng, bounds, min_room_size, max_room_size);
        let mut room_bounds = Vec::with_capacity(areas.len());
        for &area in &areas {
            room_bounds.push(place_room(&mut grid, rng, area, min_room_size, max_room_size)?);
        }
        connect_rooms(&mut grid, rng, &room_bounds)?;

        let special = choose_player_and_stairs(&grid, rng, &room_bounds);
        let rooms: Vec<Room> = areas
            .iter()
            .zip(&room_bounds)
            .enumerate()
            .map(|(index, (&area, &bounds))| {
                let tag = if index == special.player_room {
                    RoomTag::Player
                } else if Some(index) == special.stairs_room {
                    RoomTag::Stairs
                } else {
                    RoomTag::Eligible
                };
                Room { area, bounds, tag }
            })
            .collect();

        let eligible: Vec<Rect> = rooms
            .iter()
            .filter(|room| room.tag == RoomTag::Eligible)
            .map(|room| room.bounds)
            .collect();
        let mut interactable_spawns = Vec::new();
        if let Some(stairs) = special.stairs {
            interactable_spawns
                .push(InteractableSpawn { kind: InteractableKind::Stairs, pos: stairs });
        }
        interactable_spawns.extend(mark_interactables(&grid, rng, &eligible, &self.interactables));

        grid.open_all_floor_walls()?;
        grid.seal();

        debug!(
            floor_index,
            rooms = rooms.len(),
            interactables = interactable_spawns.len(),
            "dungeon floor generated"
        );

        Ok(GeneratedDungeon {
            floor_index,
            grid,
            rooms,
            player_start: special.player_start,
            stairs: special.stairs,
            interactable_spawns,
        })
    }

    fn single_room_fallback(&self, floor_index: u32) -> GeneratedDungeon {
        let mut grid = Grid::new(self.dungeon.rows, self.dungeon.cols, self.dungeon.tile_spacing);
        let bounds = Rect { x: 0, y: 0, width: self.dungeon.rows, height: self.dungeon.cols };
        let player_start = bounds.geometric_center();
        if grid.carve_floor(player_start).is_err() {
            warn!(?player_start, "fallback floor could not be carved");
        }
        let _ = grid.open_all_floor_walls();
        grid.seal();
        GeneratedDungeon {
            floor_index,
            grid,
            rooms: vec![Room { area: bounds, bounds, tag: RoomTag::Player }],
            player_start,
            stairs: None,
            interactable_spawns: Vec::new(),
        }
    }
}
