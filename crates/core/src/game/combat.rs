//! Dice-based attack resolution and damage application.
//! This module exists to keep hit and block odds in one deterministic place.
//! It does not own target selection.

use rand::Rng;

use super::*;

/// Percent chance for one attack die to hit.
pub const HIT_CHANCE: u32 = 50;
/// Percent chance for one defend die to block when the defender is an enemy.
pub const ENEMY_BLOCK_CHANCE: u32 = 17;
/// Percent chance for one defend die to block when the defender is the player.
pub const PLAYER_BLOCK_CHANCE: u32 = 33;

/// Source of independent uniform draws in `0..100`.
pub trait DiceSource {
    fn roll_percent(&mut self) -> u32;
}

impl<R: Rng> DiceSource for R {
    fn roll_percent(&mut self) -> u32 {
        self.random_range(0..100)
    }
}

pub fn block_chance(category: CombatantCategory) -> u32 {
    match category {
        CombatantCategory::Enemy => ENEMY_BLOCK_CHANCE,
        CombatantCategory::Player => PLAYER_BLOCK_CHANCE,
    }
}

/// Rolls the attacker's hit dice against the defender's block dice. Nothing is applied.
pub fn resolve_attack(
    dice: &mut impl DiceSource,
    attacker: &Character,
    defender: &Character,
) -> AttackOutcome {
    let hits = count_successes(dice, attacker.attack_dice, HIT_CHANCE);
    let blocks = count_successes(dice, defender.defend_dice, block_chance(defender.category()));
    AttackOutcome { hits, blocks, damage: hits.saturating_sub(blocks) }
}

fn count_successes(dice: &mut impl DiceSource, count: u32, chance: u32) -> u32 {
    (0..count).map(|_| u32::from(dice.roll_percent() < chance)).sum()
}

impl Game {
    /// Resolves and applies one attack. Kills vacate the defender's tile; killing the
    /// player ends the run.
    pub(super) fn perform_attack(
        &mut self,
        attacker: CharacterId,
        defender: CharacterId,
    ) -> Option<AttackOutcome> {
        let (attacker_sheet, defender_sheet) =
            (self.state.characters.get(attacker)?, self.state.characters.get(defender)?);
        if !attacker_sheet.is_alive() || !defender_sheet.is_alive() {
            return None;
        }
        let outcome = resolve_attack(&mut self.rng, attacker_sheet, defender_sheet);
        debug!(
            attacker = %attacker_sheet.name,
            defender = %defender_sheet.name,
            hits = outcome.hits,
            blocks = outcome.blocks,
            damage = outcome.damage,
            "attack resolved"
        );
        self.events.push(GameEvent::Attacked { attacker, defender, outcome });

        let target = &mut self.state.characters[defender];
        if target.take_hits(outcome.damage) {
            let (pos, is_player) = (target.pos, target.is_player());
            info!(name = %target.name, ?pos, "character died");
            if let Err(error) = self.state.grid_mut().vacate(pos) {
                warn!(%error, ?pos, "dead character was not on its tile");
            }
            self.events.push(GameEvent::Died { character: defender });
            if is_player {
                self.outcome = Some(RunOutcome::Defeat);
                info!(floor_index = self.state.floor_index, tick = self.tick, "run lost");
            }
        }
        Some(outcome)
    }
}
