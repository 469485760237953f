//! Player actions accepted during the player phase.
//! This module exists to validate and apply the four player inputs.
//! It does not own input devices or key bindings.

use super::*;

impl Game {
    /// Rotates the player one 90 degree step. Does not end the phase.
    pub fn turn_player(&mut self, clockwise: bool) -> Result<ActionOutcome, GameError> {
        self.ensure_player_phase()?;
        let facing = self.state.player().facing.turned(clockwise);
        self.rotate_character(self.state.player_id, clockwise);
        Ok(ActionOutcome::Turned(facing))
    }

    /// Steps the player forward. A successful move ends the phase.
    pub fn attempt_move_player(&mut self) -> Result<ActionOutcome, GameError> {
        self.ensure_player_phase()?;
        match self.attempt_move(self.state.player_id) {
            Some((from, to)) => {
                self.end_current_phase();
                Ok(ActionOutcome::Moved { from, to })
            }
            None => {
                debug!(pos = ?self.state.player().pos, "player move blocked");
                Ok(ActionOutcome::MoveBlocked)
            }
        }
    }

    /// Attacks whatever character stands on the tile ahead. A resolved attack ends the
    /// phase.
    pub fn attempt_player_attack(&mut self) -> Result<ActionOutcome, GameError> {
        self.ensure_player_phase()?;
        let player = self.state.player();
        let target = self
            .tile_ahead(player.pos, player.facing)
            .and_then(|pos| self.state.grid().tile(pos)?.character());
        let Some(defender) = target else {
            debug!("no valid attack target");
            return Ok(ActionOutcome::NoTarget);
        };
        match self.perform_attack(self.state.player_id, defender) {
            Some(outcome) => {
                self.end_current_phase();
                Ok(ActionOutcome::Attacked { defender, outcome })
            }
            None => Ok(ActionOutcome::NoTarget),
        }
    }

    /// Uses the interactable on the tile ahead. Stairs descend to the next floor and
    /// restart the turn cycle; anything else ends the phase.
    pub fn attempt_player_interact(&mut self) -> Result<ActionOutcome, GameError> {
        self.ensure_player_phase()?;
        let player = self.state.player();
        let target = self
            .tile_ahead(player.pos, player.facing)
            .and_then(|pos| self.state.interactable_at(pos))
            .map(|(_, interactable)| *interactable);
        let Some(interactable) = target else {
            return Ok(ActionOutcome::NoTarget);
        };

        self.events.push(GameEvent::Interacted { kind: interactable.kind, pos: interactable.pos });
        debug!(kind = ?interactable.kind, pos = ?interactable.pos, "player interacted");
        if interactable.kind == InteractableKind::Stairs {
            let floor_index = self.descend();
            return Ok(ActionOutcome::Descended { floor_index });
        }
        self.end_current_phase();
        Ok(ActionOutcome::Interacted(interactable.kind))
    }

    fn ensure_player_phase(&self) -> Result<(), GameError> {
        self.ensure_running()?;
        if self.active_phase() != Some(TurnPhase::Player) {
            return Err(GameError::NotPlayerPhase);
        }
        Ok(())
    }

    /// The neighbour ahead, provided no wall stands between.
    fn tile_ahead(&self, pos: Pos, facing: Direction) -> Option<Pos> {
        let grid = self.state.grid();
        if is_tile_blocked_by_wall(grid, pos, facing) {
            return None;
        }
        adjacent_tile(grid, pos, facing)
    }
}
