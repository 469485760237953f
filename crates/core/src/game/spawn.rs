//! Enemy and interactable spawning onto the current floor.
//! This module exists to keep occupancy bookkeeping for new arrivals in one place.
//! It does not own where the generator decides interactables go.

use super::*;
use crate::config::CharacterTemplate;
use crate::mapgen::{random_index, weighted_index};

const DEFAULT_ENEMY_NAME: &str = "defaultName";

impl Game {
    /// Spawns an enemy from a weighted template on `pos`, facing north. Returns `None`
    /// when the tile is not free floor.
    pub fn spawn_enemy(&mut self, pos: Pos) -> Option<CharacterId> {
        if !self.state.grid().is_floor(pos) || self.state.grid().is_occupied(pos) {
            warn!(?pos, "enemy spawn skipped, tile is not free floor");
            return None;
        }
        let template = self.pick_enemy_template();
        let name = match template.names.len() {
            0 => DEFAULT_ENEMY_NAME.to_string(),
            len => template.names[random_index(&mut self.rng, len)].clone(),
        };
        let enemy = Character::from_template(
            name,
            &template,
            CharacterKind::Enemy(EnemyBrain::default()),
            pos,
        );

        let id = self.state.characters.insert(enemy);
        if let Err(error) = self.state.grid_mut().place(pos, Occupant::Character(id)) {
            warn!(%error, ?pos, "enemy spawn skipped");
            self.state.characters.remove(id);
            return None;
        }
        self.state.enemies.push(id);
        debug!(name = %self.state.characters[id].name, ?pos, "enemy spawned");
        Some(id)
    }

    pub fn spawn_interactable(
        &mut self,
        kind: InteractableKind,
        pos: Pos,
    ) -> Option<InteractableId> {
        place_interactable(&mut self.state, kind, pos)
    }

    /// Spawns the configured number of enemies on random free floor tiles.
    pub(super) fn spawn_enemies(&mut self) {
        for _ in 0..self.config.enemies.count {
            let free: Vec<Pos> = self
                .state
                .grid()
                .tiles()
                .filter(|tile| tile.is_floor() && !tile.is_occupied())
                .map(|tile| tile.pos)
                .collect();
            if free.is_empty() {
                warn!("no unoccupied tile available for enemy spawn");
                continue;
            }
            let pos = free[random_index(&mut self.rng, free.len())];
            self.spawn_enemy(pos);
        }
    }

    fn pick_enemy_template(&mut self) -> CharacterTemplate {
        let templates = &self.config.enemies.templates;
        let weights: Vec<u32> = templates.iter().map(|template| template.weight).collect();
        weighted_index(&mut self.rng, &weights)
            .and_then(|index| templates.get(index))
            .cloned()
            .unwrap_or_default()
    }
}

/// Registers an interactable and marks its tile. Skipped with a warning when the tile is
/// not free floor.
pub(super) fn place_interactable(
    state: &mut GameState,
    kind: InteractableKind,
    pos: Pos,
) -> Option<InteractableId> {
    let id = state.interactables.insert(Interactable { kind, pos });
    if let Err(error) = state.grid_mut().place(pos, Occupant::Interactable(id)) {
        warn!(%error, ?kind, ?pos, "interactable spawn skipped");
        state.interactables.remove(id);
        return None;
    }
    Some(id)
}
