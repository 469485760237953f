//! Characters, interactables, and the per-floor world they occupy.

use serde::Serialize;
use slotmap::SlotMap;

use crate::config::CharacterTemplate;
use crate::grid::Grid;
use crate::mapgen::GeneratedDungeon;
use crate::types::*;

/// A queued multi-tick turn. Each tick rotates one 90 degree step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RotationPlan {
    pub clockwise: bool,
    pub remaining: u8,
    /// Resolve an attack on the player once the rotation finishes.
    pub then_attack: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EnemyBrain {
    pub state: EnemyState,
    pub pursuit_counter: u32,
    pub rotation: Option<RotationPlan>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CharacterKind {
    Player,
    Enemy(EnemyBrain),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: String,
    pub kind: CharacterKind,
    pub facing: Direction,
    pub pos: Pos,
    pub body_points: i32,
    pub max_body_points: i32,
    pub attack_dice: u32,
    pub defend_dice: u32,
    alive: bool,
}

impl Character {
    pub fn from_template(
        name: String,
        template: &CharacterTemplate,
        kind: CharacterKind,
        pos: Pos,
    ) -> Self {
        Self {
            name,
            kind,
            facing: Direction::default(),
            pos,
            body_points: template.body_points,
            max_body_points: template.body_points,
            attack_dice: template.attack_dice,
            defend_dice: template.defend_dice,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, CharacterKind::Player)
    }

    pub fn category(&self) -> CombatantCategory {
        match self.kind {
            CharacterKind::Player => CombatantCategory::Player,
            CharacterKind::Enemy(_) => CombatantCategory::Enemy,
        }
    }

    pub fn brain(&self) -> Option<&EnemyBrain> {
        match &self.kind {
            CharacterKind::Enemy(brain) => Some(brain),
            CharacterKind::Player => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut EnemyBrain> {
        match &mut self.kind {
            CharacterKind::Enemy(brain) => Some(brain),
            CharacterKind::Player => None,
        }
    }

    /// Absorbs `damage` body points. Returns `true` on the hit that kills.
    pub fn take_hits(&mut self, damage: u32) -> bool {
        if !self.alive || damage == 0 {
            return false;
        }
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        self.body_points = self.body_points.saturating_sub(damage);
        if self.body_points <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn heal_fully(&mut self) {
        self.body_points = self.max_body_points;
        self.alive = true;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Interactable {
    pub kind: InteractableKind,
    pub pos: Pos,
}

/// Everything that lives on the current floor. Discarded wholesale on descend or reset,
/// except the player which is carried over.
pub struct GameState {
    pub floor_index: u32,
    pub dungeon: GeneratedDungeon,
    pub characters: SlotMap<CharacterId, Character>,
    pub interactables: SlotMap<InteractableId, Interactable>,
    pub player_id: CharacterId,
    /// Enemies in spawn order; the enemy phase walks this list.
    pub enemies: Vec<CharacterId>,
}

impl GameState {
    pub fn grid(&self) -> &Grid {
        &self.dungeon.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.dungeon.grid
    }

    pub fn player(&self) -> &Character {
        &self.characters[self.player_id]
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
        self.enemies
            .iter()
            .filter_map(|&id| self.characters.get(id).map(|character| (id, character)))
            .filter(|(_, character)| character.is_alive())
    }

    pub fn interactable_at(&self, pos: Pos) -> Option<(InteractableId, &Interactable)> {
        let id = self.grid().tile(pos)?.interactable()?;
        self.interactables.get(id).map(|interactable| (id, interactable))
    }
}
