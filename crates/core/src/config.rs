//! Tunables for dungeon generation, character stats, spawning, and turn pacing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{InteractableKind, TurnPhase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("dungeon must be at least 1x1, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("room sizes must satisfy 1 <= min ({min}) <= max ({max})")]
    RoomSizeRange { min: usize, max: usize },
    #[error("turn order must contain at least one phase")]
    EmptyTurnOrder,
    #[error("{table} weights must not all be zero")]
    ZeroWeights { table: &'static str },
    #[error("fill chance must be a percentage, got {0}")]
    FillChance(u32),
    #[error("tile spacing must be finite and positive")]
    TileSpacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    pub rows: usize,
    pub cols: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub tile_spacing: f32,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self { rows: 15, cols: 15, min_room_size: 3, max_room_size: 5, tile_spacing: 4.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTemplate {
    pub names: Vec<String>,
    pub body_points: i32,
    pub attack_dice: u32,
    pub defend_dice: u32,
    pub weight: u32,
}

impl Default for CharacterTemplate {
    fn default() -> Self {
        Self { names: Vec::new(), body_points: 8, attack_dice: 3, defend_dice: 2, weight: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub count: usize,
    /// Turns an enemy keeps chasing after losing sight of the player.
    pub max_pursuit: u32,
    pub templates: Vec<CharacterTemplate>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            count: 5,
            max_pursuit: 10,
            templates: vec![
                CharacterTemplate {
                    names: vec!["Grub".to_string(), "Snag".to_string(), "Mire".to_string()],
                    body_points: 1,
                    attack_dice: 2,
                    defend_dice: 1,
                    weight: 3,
                },
                CharacterTemplate {
                    names: vec!["Brute".to_string(), "Gorm".to_string()],
                    body_points: 3,
                    attack_dice: 3,
                    defend_dice: 2,
                    weight: 1,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedInteractable {
    pub kind: InteractableKind,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractableConfig {
    pub fill_chance_percent: u32,
    pub fill_table: Vec<WeightedInteractable>,
}

impl Default for InteractableConfig {
    fn default() -> Self {
        Self {
            fill_chance_percent: 30,
            fill_table: vec![
                WeightedInteractable { kind: InteractableKind::TreasureChest, weight: 3 },
                WeightedInteractable { kind: InteractableKind::Merchant, weight: 1 },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub dungeon: DungeonConfig,
    pub player: CharacterTemplate,
    pub enemies: EnemyConfig,
    pub interactables: InteractableConfig,
    pub turn_order: Vec<TurnPhase>,
    pub phase_transition_delay_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dungeon: DungeonConfig::default(),
            player: CharacterTemplate {
                names: vec!["Barbarian".to_string()],
                ..CharacterTemplate::default()
            },
            enemies: EnemyConfig::default(),
            interactables: InteractableConfig::default(),
            turn_order: vec![TurnPhase::Player, TurnPhase::Enemy],
            phase_transition_delay_ticks: 1,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dungeon.validate()?;
        if self.turn_order.is_empty() {
            return Err(ConfigError::EmptyTurnOrder);
        }
        if !self.enemies.templates.is_empty()
            && self.enemies.templates.iter().all(|template| template.weight == 0)
        {
            return Err(ConfigError::ZeroWeights { table: "enemy template" });
        }
        if self.interactables.fill_chance_percent > 100 {
            return Err(ConfigError::FillChance(self.interactables.fill_chance_percent));
        }
        if !self.interactables.fill_table.is_empty()
            && self.interactables.fill_table.iter().all(|entry| entry.weight == 0)
        {
            return Err(ConfigError::ZeroWeights { table: "interactable fill" });
        }
        Ok(())
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid { rows: self.rows, cols: self.cols });
        }
        if self.min_room_size == 0 || self.min_room_size > self.max_room_size {
            return Err(ConfigError::RoomSizeRange {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if !self.tile_spacing.is_finite() || self.tile_spacing <= 0.0 {
            return Err(ConfigError::TileSpacing);
        }
        Ok(())
    }
}
