//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating grid and character setup across many tests.
//! It does not own production gameplay logic.

use rand::Rng;
use slotmap::SlotMap;

use super::*;
use crate::mapgen::{Rect, Room, RoomTag};

/// Every tile is floor with no walls. Left unsealed so tests can add walls.
pub(crate) fn open_grid(rows: usize, cols: usize) -> Grid {
    let mut grid = Grid::new(rows, cols, 1.0);
    for x in 0..rows {
        for y in 0..cols {
            grid.carve_floor(Pos::new(x as i32, y as i32)).expect("in bounds");
        }
    }
    grid.open_all_floor_walls().expect("unsealed");
    grid
}

/// A one-tile-wide corridor running east along `x`.
pub(crate) fn corridor_grid(len: usize) -> Grid {
    open_grid(len, 1)
}

/// Two 2x2 rooms at `x = 0..=1` and `x = 3..=4`, separated by a rock column at `x = 2`.
pub(crate) fn two_rooms_grid() -> Grid {
    let mut grid = Grid::new(5, 2, 1.0);
    for x in [0, 1, 3, 4] {
        for y in 0..2 {
            grid.carve_floor(Pos::new(x, y)).expect("in bounds");
        }
    }
    grid.open_all_floor_walls().expect("unsealed");
    grid
}

/// An all-floor grid with random interior walls, each set on both sides of its edge.
pub(crate) fn symmetric_walled_grid(seed: u64, rows: usize, cols: usize) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut grid = open_grid(rows, cols);
    for x in 0..rows as i32 {
        for y in 0..cols as i32 {
            let pos = Pos::new(x, y);
            for direction in [Direction::East, Direction::North] {
                if grid.in_bounds(pos.step(direction)) {
                    let present = rng.random_bool(0.25);
                    grid.set_wall_between(pos, direction, present).expect("unsealed");
                }
            }
        }
    }
    grid
}

/// A key minted outside any game; never present in a game's registry.
pub(crate) fn detached_character_id() -> CharacterId {
    SlotMap::<CharacterId, ()>::with_key().insert(())
}

/// Default config without random enemies, so tests place every enemy themselves.
pub(crate) fn test_config(max_pursuit: u32) -> GameConfig {
    let mut config = GameConfig::default();
    config.enemies.count = 0;
    config.enemies.max_pursuit = max_pursuit;
    config
}

/// Wraps `grid` in a single-room floor and starts a game on it.
pub(crate) fn game_on(mut grid: Grid, player_start: Pos, config: GameConfig) -> Game {
    let area = Rect { x: 0, y: 0, width: grid.rows(), height: grid.cols() };
    grid.seal();
    let dungeon = GeneratedDungeon {
        floor_index: 0,
        grid,
        rooms: vec![Room { area, bounds: area, tag: RoomTag::Player }],
        player_start,
        stairs: None,
        interactable_spawns: Vec::new(),
    };
    Game::with_dungeon(7, config, dungeon).expect("valid test config")
}

/// Player at the west end of a corridor, facing north into its side wall.
pub(crate) fn corridor_game(len: usize) -> Game {
    game_on(corridor_grid(len), Pos::new(0, 0), test_config(10))
}

pub(crate) fn open_room_game(rows: usize, cols: usize, player_start: Pos) -> Game {
    game_on(open_grid(rows, cols), player_start, test_config(10))
}

/// A corridor along `x = 0..len` at `y = 0` with a one-tile pocket at `(0, 1)`. Rock fills
/// the rest of `y = 1`, so a player in the pocket is hidden from most of the corridor.
pub(crate) fn walled_corridor_game(len: usize, max_pursuit: u32) -> Game {
    let mut grid = Grid::new(len, 2, 1.0);
    for x in 0..len as i32 {
        grid.carve_floor(Pos::new(x, 0)).expect("in bounds");
    }
    grid.carve_floor(Pos::new(0, 1)).expect("in bounds");
    grid.open_all_floor_walls().expect("unsealed");
    game_on(grid, Pos::new(0, 0), test_config(max_pursuit))
}

pub(crate) fn face(game: &mut Game, id: CharacterId, facing: Direction) {
    game.state.characters[id].facing = facing;
}

/// Moves the player without spending an action, keeping occupancy in step.
pub(crate) fn move_player_to(game: &mut Game, to: Pos) {
    let from = game.state.player().pos;
    game.state.grid_mut().relocate(from, to).expect("free floor tile");
    let player = game.state.player_id;
    game.state.characters[player].pos = to;
}

/// Steps the player into the pocket of a [`walled_corridor_game`].
pub(crate) fn block_sight(game: &mut Game) {
    move_player_to(game, Pos::new(0, 1));
}
