//! Turn-based simulation over one dungeon floor at a time.
//!
//! `Game` owns the floor, the characters on it, the turn scheduler, and the event queue.
//! Callers drive it with [`Game::tick`] and the player actions, then drain
//! [`GameEvent`]s for presentation.

use std::mem;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, GameConfig};
use crate::grid::{Grid, Occupant};
use crate::mapgen::{GeneratedDungeon, generate_dungeon};
use crate::state::{Character, CharacterKind, EnemyBrain, GameState, Interactable, RotationPlan};
use crate::types::*;

mod actions;
mod combat;
mod enemy_ai;
mod floor;
mod hash;
mod movement;
mod spawn;
mod turns;
mod visibility;

#[cfg(test)]
mod test_support;

pub use combat::{
    DiceSource, ENEMY_BLOCK_CHANCE, HIT_CHANCE, PLAYER_BLOCK_CHANCE, block_chance, resolve_attack,
};
pub use movement::{adjacent_tile, can_move_to, is_tile_blocked_by_wall};
pub use turns::TurnScheduler;
pub use visibility::{has_line_of_sight, is_adjacent_and_reachable};

pub struct Game {
    config: GameConfig,
    seed: u64,
    tick: u64,
    rng: ChaCha8Rng,
    state: GameState,
    scheduler: TurnScheduler,
    // Index into `state.enemies` of the next enemy to act this enemy phase.
    enemy_cursor: usize,
    events: Vec<GameEvent>,
    outcome: Option<RunOutcome>,
}

impl Game {
    /// Generates floor 0 for `seed`, spawns the player, interactables, and enemies, and
    /// starts the first phase of the turn order.
    pub fn new(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dungeon = generate_dungeon(&config.dungeon, &config.interactables, seed, 0);
        let mut game = Self::bootstrap(seed, config, dungeon)?;
        game.spawn_enemies();
        game.scheduler.start(&mut game.events);
        Ok(game)
    }

    /// Starts a run on a prepared floor. Only the player and the dungeon's interactable
    /// spawns are placed; enemies come from [`Game::spawn_enemy`].
    pub fn with_dungeon(
        seed: u64,
        config: GameConfig,
        dungeon: GeneratedDungeon,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut game = Self::bootstrap(seed, config, dungeon)?;
        game.scheduler.start(&mut game.events);
        Ok(game)
    }

    fn bootstrap(
        seed: u64,
        config: GameConfig,
        dungeon: GeneratedDungeon,
    ) -> Result<Self, ConfigError> {
        let scheduler =
            TurnScheduler::new(config.turn_order.clone(), config.phase_transition_delay_ticks)?;
        let player = Character::from_template(
            config.player.names.first().cloned().unwrap_or_else(|| "Player".to_string()),
            &config.player,
            CharacterKind::Player,
            dungeon.player_start,
        );
        let mut events = Vec::new();
        let state = floor::install_floor(dungeon, player, &mut events);
        info!(seed, floor_index = state.floor_index, "run started");

        Ok(Self {
            config,
            seed,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state,
            scheduler,
            enemy_cursor: 0,
            events,
            outcome: None,
        })
    }

    /// Advances the simulation by one step.
    pub fn tick(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        self.tick += 1;

        if self.scheduler.is_transitioning() {
            if self.scheduler.tick(&mut self.events) == Some(TurnPhase::Enemy) {
                self.enemy_cursor = 0;
            }
            return Ok(());
        }

        if self.scheduler.current() == TurnPhase::Enemy {
            self.run_enemy_phase();
        }
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    pub fn floor_index(&self) -> u32 {
        self.state.floor_index
    }

    pub fn player_id(&self) -> CharacterId {
        self.state.player_id
    }

    pub fn player(&self) -> &Character {
        self.state.player()
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.state.characters.get(id)
    }

    pub fn enemies(&self) -> &[CharacterId] {
        &self.state.enemies
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// The phase currently accepting actions, or `None` while a transition is pending.
    pub fn active_phase(&self) -> Option<TurnPhase> {
        (!self.scheduler.is_transitioning()).then(|| self.scheduler.current())
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Ends the active phase. Repeated calls before the transition completes are ignored.
    pub fn end_current_phase(&mut self) -> bool {
        let phase = self.scheduler.current();
        let ended = self.scheduler.end_current_phase(&mut self.events);
        if ended {
            debug!(?phase, tick = self.tick, "phase ended");
            if !self.scheduler.is_transitioning() && self.scheduler.current() == TurnPhase::Enemy {
                self.enemy_cursor = 0;
            }
        }
        ended
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.outcome {
            Some(outcome) => Err(GameError::RunOver(outcome)),
            None => Ok(()),
        }
    }

    fn rotate_character(&mut self, id: CharacterId, clockwise: bool) -> Option<Direction> {
        let character = self.state.characters.get_mut(id)?;
        character.facing = character.facing.turned(clockwise);
        let facing = character.facing;
        self.events.push(GameEvent::Turned { character: id, facing });
        Some(facing)
    }

    /// Steps `id` one tile along its facing. Returns the `(from, to)` pair on success.
    fn attempt_move(&mut self, id: CharacterId) -> Option<(Pos, Pos)> {
        let character = self.state.characters.get(id)?;
        if !character.is_alive() {
            return None;
        }
        let (from, facing) = (character.pos, character.facing);
        if !can_move_to(self.state.grid(), from, facing) {
            return None;
        }
        let to = from.step(facing);
        if let Err(error) = self.state.grid_mut().relocate(from, to) {
            debug!(%error, ?from, ?to, "move rejected by grid");
            return None;
        }
        self.state.characters[id].pos = to;
        self.events.push(GameEvent::Moved { character: id, from, to });
        Some((from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn new_game_places_player_and_starts_first_phase() {
        let mut game = Game::new(7, GameConfig::default()).expect("default config is valid");
        let player = game.player().clone();
        assert_eq!(player.pos, game.state().dungeon.player_start);
        assert_eq!(
            game.grid().tile(player.pos).and_then(|tile| tile.character()),
            Some(game.player_id())
        );
        assert_eq!(game.active_phase(), Some(TurnPhase::Player));

        let events = game.drain_events();
        assert_eq!(events.first(), Some(&GameEvent::FloorEntered { floor_index: 0 }));
        assert_eq!(events.last(), Some(&GameEvent::PhaseStarted(TurnPhase::Player)));
        assert!(game.events().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected_before_generation() {
        let config = GameConfig { turn_order: Vec::new(), ..GameConfig::default() };
        assert_eq!(Game::new(1, config).err(), Some(ConfigError::EmptyTurnOrder));
    }

    #[test]
    fn zero_delay_ends_the_phase_and_starts_the_next_at_once() {
        let mut config = test_config(10);
        config.phase_transition_delay_ticks = 0;
        let mut game = game_on(corridor_grid(3), Pos::new(0, 0), config);
        game.enemy_cursor = 3;
        game.drain_events();

        assert!(game.end_current_phase());
        assert_eq!(
            game.drain_events(),
            vec![
                GameEvent::PhaseEnded(TurnPhase::Player),
                GameEvent::PhaseStarted(TurnPhase::Enemy),
            ]
        );
        assert_eq!(game.active_phase(), Some(TurnPhase::Enemy));
        assert_eq!(game.enemy_cursor, 0);
    }

    #[test]
    fn ticks_in_player_phase_only_advance_the_clock() {
        let mut game = corridor_game(3);
        game.drain_events();
        for _ in 0..5 {
            game.tick().expect("running");
        }
        assert_eq!(game.current_tick(), 5);
        assert_eq!(game.active_phase(), Some(TurnPhase::Player));
        assert!(game.events().is_empty());
    }

    #[test]
    fn attempt_move_follows_facing_and_keeps_occupancy_consistent() {
        let mut game = corridor_game(3);
        let player = game.player_id();
        assert_eq!(game.attempt_move(player), None, "facing north into the corridor wall");

        game.rotate_character(player, true);
        assert_eq!(game.attempt_move(player), Some((Pos::new(0, 0), Pos::new(1, 0))));
        assert!(!game.grid().is_occupied(Pos::new(0, 0)));
        assert_eq!(
            game.grid().tile(Pos::new(1, 0)).and_then(|tile| tile.character()),
            Some(player)
        );
    }

    #[test]
    fn enemy_phase_with_no_enemies_ends_immediately() {
        let mut game = corridor_game(3);
        game.end_current_phase();
        game.tick().expect("running");
        assert_eq!(game.active_phase(), Some(TurnPhase::Enemy));
        game.tick().expect("running");
        assert!(game.scheduler().is_transitioning());
        game.tick().expect("running");
        assert_eq!(game.active_phase(), Some(TurnPhase::Player));
    }
}
