//! Floor installation, descent, and run reset.
//! This module exists to isolate the wholesale replacement of per-floor state.
//! It does not own floor layout, which comes from `mapgen`.

use slotmap::SlotMap;

use super::*;
use super::spawn::place_interactable;

/// Builds the state for a freshly generated floor around `player`, who is placed on the
/// dungeon's start tile facing north.
pub(super) fn install_floor(
    dungeon: GeneratedDungeon,
    mut player: Character,
    events: &mut Vec<GameEvent>,
) -> GameState {
    let floor_index = dungeon.floor_index;
    let spawns = dungeon.interactable_spawns.clone();
    player.pos = dungeon.player_start;
    player.facing = Direction::North;

    let mut characters = SlotMap::with_key();
    let player_id = characters.insert(player);
    let mut state = GameState {
        floor_index,
        dungeon,
        characters,
        interactables: SlotMap::with_key(),
        player_id,
        enemies: Vec::new(),
    };

    let start = state.dungeon.player_start;
    if let Err(error) = state.grid_mut().place(start, Occupant::Character(player_id)) {
        warn!(%error, ?start, "player start could not be occupied");
    }
    for spawn in spawns {
        place_interactable(&mut state, spawn.kind, spawn.pos);
    }

    events.push(GameEvent::FloorEntered { floor_index });
    debug!(floor_index, interactables = state.interactables.len(), "floor installed");
    state
}

impl Game {
    /// Moves the run to a newly generated floor one level down. The player keeps body
    /// points and stats; the turn cycle restarts at its first phase.
    pub(super) fn descend(&mut self) -> u32 {
        let floor_index = self.state.floor_index + 1;
        let dungeon = generate_dungeon(
            &self.config.dungeon,
            &self.config.interactables,
            self.seed,
            floor_index,
        );
        let player = self.state.player().clone();
        self.state = install_floor(dungeon, player, &mut self.events);
        self.spawn_enemies();
        self.restart_turn_cycle();
        info!(floor_index, "descended");
        floor_index
    }

    /// Restarts the run on floor 0 with a fully healed player. The floor and every draw
    /// after it replay exactly as for a fresh game with the same seed.
    pub fn reset(&mut self) {
        let dungeon =
            generate_dungeon(&self.config.dungeon, &self.config.interactables, self.seed, 0);
        let mut player = self.state.player().clone();
        player.heal_fully();

        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.tick = 0;
        self.outcome = None;
        self.events.clear();
        self.state = install_floor(dungeon, player, &mut self.events);
        self.spawn_enemies();
        self.restart_turn_cycle();
        info!(seed = self.seed, "run reset");
    }

    fn restart_turn_cycle(&mut self) {
        self.scheduler.reset();
        self.enemy_cursor = 0;
        self.scheduler.start(&mut self.events);
    }
}
