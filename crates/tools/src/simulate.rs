//! Headless scripted runs: a naive player explores, fights, and takes stairs while the
//! engine plays every enemy.

use std::fmt;

use anyhow::Result;
use basement_core::{ActionOutcome, Game, GameConfig, GameError, GameEvent, RunOutcome, TurnPhase};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub seed: u64,
    pub ticks: u64,
    pub floor_index: u32,
    pub moves: u32,
    pub attacks: u32,
    pub deaths: u32,
    pub player_body_points: i32,
    pub outcome: Option<RunOutcome>,
    pub snapshot_hash: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Floor: {}", self.floor_index)?;
        writeln!(f, "Moves: {}  Attacks: {}  Deaths: {}", self.moves, self.attacks, self.deaths)?;
        writeln!(f, "Player body points: {}", self.player_body_points)?;
        writeln!(f, "Outcome: {:?}", self.outcome)?;
        write!(f, "Snapshot Hash: {}", self.snapshot_hash)
    }
}

/// Runs until the player dies or `max_ticks` ticks have elapsed. The scripted player draws
/// from its own stream seeded with `seed`, so the whole run is reproducible.
pub fn run(seed: u64, config: GameConfig, max_ticks: u64) -> Result<Summary> {
    let mut game = Game::new(seed, config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = Summary {
        seed,
        ticks: 0,
        floor_index: 0,
        moves: 0,
        attacks: 0,
        deaths: 0,
        player_body_points: game.player().body_points,
        outcome: None,
        snapshot_hash: 0,
    };

    while game.current_tick() < max_ticks && game.outcome().is_none() {
        if game.active_phase() == Some(TurnPhase::Player) {
            player_turn(&mut game, &mut rng)?;
        }
        game.tick()?;
        for event in game.drain_events() {
            match event {
                GameEvent::Moved { .. } => summary.moves += 1,
                GameEvent::Attacked { .. } => summary.attacks += 1,
                GameEvent::Died { .. } => summary.deaths += 1,
                _ => {}
            }
        }
    }

    summary.ticks = game.current_tick();
    summary.floor_index = game.floor_index();
    summary.player_body_points = game.player().body_points;
    summary.outcome = game.outcome();
    summary.snapshot_hash = game.snapshot_hash();
    info!(seed, ticks = summary.ticks, floor_index = summary.floor_index, "simulation finished");
    Ok(summary)
}

/// Attack, then interact, then usually step forward; turn at random when nothing else
/// applies. Turning keeps the phase open, so the next tick tries again.
fn player_turn(game: &mut Game, rng: &mut ChaCha8Rng) -> Result<(), GameError> {
    if matches!(game.attempt_player_attack()?, ActionOutcome::Attacked { .. }) {
        return Ok(());
    }
    if !matches!(game.attempt_player_interact()?, ActionOutcome::NoTarget) {
        return Ok(());
    }
    if rng.next_u32() % 4 != 0
        && matches!(game.attempt_move_player()?, ActionOutcome::Moved { .. })
    {
        return Ok(());
    }
    game.turn_player(rng.next_u32() % 2 == 0)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_the_same_run() {
        let a = run(9, GameConfig::default(), 400).expect("run");
        let b = run(9, GameConfig::default(), 400).expect("run");
        assert_eq!(a, b);
    }

    #[test]
    fn run_stops_at_the_tick_budget_or_on_defeat() {
        let summary = run(21, GameConfig::default(), 300).expect("run");
        assert!(summary.ticks <= 300);
        if summary.outcome.is_none() {
            assert_eq!(summary.ticks, 300);
            assert!(summary.player_body_points > 0);
        }
        assert!(summary.moves > 0, "the scripted player should wander");
    }

    #[test]
    fn summary_prints_the_snapshot_hash() {
        let summary = run(4, GameConfig::default(), 50).expect("run");
        let text = summary.to_string();
        assert!(text.contains(&format!("Snapshot Hash: {}", summary.snapshot_hash)));
    }
}
