pub mod config;
pub mod game;
pub mod grid;
pub mod mapgen;
pub mod state;
pub mod types;

pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use grid::{Grid, GridError, Occupant, Tile};
pub use mapgen::{DungeonGenerator, GeneratedDungeon, generate_dungeon};
pub use state::{Character, CharacterKind, GameState};
pub use types::*;
