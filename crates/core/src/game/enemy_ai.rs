//! Enemy decisions for the enemy phase: attack, pursue, or idle.
//! This module exists to keep per-enemy state transitions and their ordering together.
//! It does not own sight or reach rules, which live in `visibility`.

use super::*;

/// Whether the current enemy still needs ticks before the next one may act.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    Done,
    Busy,
}

impl Game {
    /// Processes enemies in registry order until one is mid-rotation or all have acted,
    /// then ends the phase.
    pub(super) fn run_enemy_phase(&mut self) {
        while let Some(&id) = self.state.enemies.get(self.enemy_cursor) {
            if self.outcome.is_some() {
                return;
            }
            let alive = self.state.characters.get(id).is_some_and(Character::is_alive);
            if alive && self.enemy_act(id) == Progress::Busy {
                return;
            }
            self.enemy_cursor += 1;
        }
        if self.outcome.is_none() {
            self.end_current_phase();
        }
    }

    fn enemy_act(&mut self, id: CharacterId) -> Progress {
        let plan = self.state.characters.get(id).and_then(Character::brain);
        match plan.and_then(|brain| brain.rotation) {
            Some(plan) => self.continue_rotation(id, plan),
            None => self.decide(id),
        }
    }

    /// One decision per enemy per phase, in priority order: attack when adjacent, pursue
    /// on sight, keep pursuing for up to `max_pursuit` blind turns, otherwise idle.
    fn decide(&mut self, id: CharacterId) -> Progress {
        let Some(enemy) = self.state.characters.get(id) else {
            return Progress::Done;
        };
        let Some(brain) = enemy.brain().copied() else {
            return Progress::Done;
        };
        let (enemy_pos, facing) = (enemy.pos, enemy.facing);
        let player_pos = self.state.player().pos;
        let grid = self.state.grid();

        if let Some(direction) = is_adjacent_and_reachable(grid, enemy_pos, player_pos) {
            self.set_enemy_state(id, EnemyState::Attacking);
            return self.face_then(id, facing, direction, true);
        }

        if has_line_of_sight(grid, enemy_pos, player_pos) {
            self.set_enemy_state(id, EnemyState::Pursuing);
            self.set_pursuit_counter(id, 0);
            return self.pursue(id);
        }

        if brain.state == EnemyState::Pursuing {
            if brain.pursuit_counter < self.config.enemies.max_pursuit {
                self.set_pursuit_counter(id, brain.pursuit_counter + 1);
                return self.pursue(id);
            }
            debug!(enemy = ?id, "pursuit abandoned");
            self.set_pursuit_counter(id, 0);
        }
        self.set_enemy_state(id, EnemyState::Idle);
        Progress::Done
    }

    /// A single pursuit step along the dominant axis. Turning consumes the step.
    fn pursue(&mut self, id: CharacterId) -> Progress {
        let Some(enemy) = self.state.characters.get(id) else {
            return Progress::Done;
        };
        let (enemy_pos, facing) = (enemy.pos, enemy.facing);
        let direction = dominant_direction(enemy_pos, self.state.player().pos);

        if facing != direction {
            let (clockwise, _) = facing.rotation_towards(direction);
            self.rotate_character(id, clockwise);
            return Progress::Done;
        }
        if self.attempt_move(id).is_none() {
            return Progress::Done;
        }

        let (enemy_pos, player_pos) = (self.state.characters[id].pos, self.state.player().pos);
        match is_adjacent_and_reachable(self.state.grid(), enemy_pos, player_pos) {
            Some(target) => self.face_then(id, direction, target, false),
            None => Progress::Done,
        }
    }

    /// Starts a rotation from `facing` to `target`, taking the first step this tick. With
    /// no rotation needed the follow-up attack resolves immediately.
    fn face_then(
        &mut self,
        id: CharacterId,
        facing: Direction,
        target: Direction,
        then_attack: bool,
    ) -> Progress {
        let (clockwise, remaining) = facing.rotation_towards(target);
        if remaining == 0 {
            if then_attack {
                self.attack_player_if_reachable(id);
            }
            return Progress::Done;
        }
        self.continue_rotation(id, RotationPlan { clockwise, remaining, then_attack })
    }

    fn continue_rotation(&mut self, id: CharacterId, plan: RotationPlan) -> Progress {
        self.rotate_character(id, plan.clockwise);
        let remaining = plan.remaining.saturating_sub(1);
        let next = (remaining > 0).then_some(RotationPlan { remaining, ..plan });
        if let Some(brain) = self.state.characters.get_mut(id).and_then(Character::brain_mut) {
            brain.rotation = next;
        }
        if next.is_some() {
            return Progress::Busy;
        }
        if plan.then_attack {
            self.attack_player_if_reachable(id);
        }
        Progress::Done
    }

    /// The player may have stepped away while a rotation was in progress.
    fn attack_player_if_reachable(&mut self, id: CharacterId) {
        let Some(enemy_pos) = self.state.characters.get(id).map(|enemy| enemy.pos) else {
            return;
        };
        let player_pos = self.state.player().pos;
        if is_adjacent_and_reachable(self.state.grid(), enemy_pos, player_pos).is_some() {
            self.perform_attack(id, self.state.player_id);
        } else {
            debug!(enemy = ?id, "attack target out of reach");
        }
    }

    fn set_enemy_state(&mut self, id: CharacterId, state: EnemyState) {
        let Some(brain) = self.state.characters.get_mut(id).and_then(Character::brain_mut) else {
            return;
        };
        if brain.state != state {
            brain.state = state;
            self.events.push(GameEvent::EnemyStateChanged { enemy: id, state });
        }
    }

    fn set_pursuit_counter(&mut self, id: CharacterId, value: u32) {
        if let Some(brain) = self.state.characters.get_mut(id).and_then(Character::brain_mut) {
            brain.pursuit_counter = value;
        }
    }
}

/// Cardinal direction from `from` towards `to` along the axis with the larger delta.
/// Horizontal wins only when strictly larger.
pub(super) fn dominant_direction(from: Pos, to: Pos) -> Direction {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    if dx.abs() > dy.abs() {
        if dx > 0 { Direction::East } else { Direction::West }
    } else if dy > 0 {
        Direction::North
    } else {
        Direction::South
    }
}
