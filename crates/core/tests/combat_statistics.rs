use basement_core::config::CharacterTemplate;
use basement_core::game::{ENEMY_BLOCK_CHANCE, HIT_CHANCE, PLAYER_BLOCK_CHANCE, resolve_attack};
use basement_core::state::EnemyBrain;
use basement_core::{Character, CharacterKind, Pos};
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

const TRIALS: u32 = 100_000;
const TOLERANCE: f64 = 0.01;

fn combatant(kind: CharacterKind, attack_dice: u32, defend_dice: u32) -> Character {
    let template = CharacterTemplate { attack_dice, defend_dice, ..CharacterTemplate::default() };
    Character::from_template("dummy".to_string(), &template, kind, Pos::default())
}

/// Observed per-die hit and block rates over `TRIALS` attacks.
fn observed_rates(attacker: &Character, defender: &Character, seed: u64) -> (f64, f64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (mut hits, mut blocks) = (0_u64, 0_u64);
    for _ in 0..TRIALS {
        let outcome = resolve_attack(&mut rng, attacker, defender);
        assert_eq!(outcome.damage, outcome.hits.saturating_sub(outcome.blocks));
        hits += u64::from(outcome.hits);
        blocks += u64::from(outcome.blocks);
    }
    let hit_dice = f64::from(TRIALS) * f64::from(attacker.attack_dice);
    let block_dice = f64::from(TRIALS) * f64::from(defender.defend_dice);
    (hits as f64 / hit_dice, blocks as f64 / block_dice)
}

fn assert_close(observed: f64, expected_percent: u32) {
    let expected = f64::from(expected_percent) / 100.0;
    assert!(
        (observed - expected).abs() < TOLERANCE,
        "observed {observed:.4}, expected {expected:.4}"
    );
}

#[test]
fn player_attacking_an_enemy_converges_to_configured_rates() {
    let attacker = combatant(CharacterKind::Player, 3, 2);
    let defender = combatant(CharacterKind::Enemy(EnemyBrain::default()), 3, 2);
    let (hit_rate, block_rate) = observed_rates(&attacker, &defender, 0xD1CE);
    assert_close(hit_rate, HIT_CHANCE);
    assert_close(block_rate, ENEMY_BLOCK_CHANCE);
}

#[test]
fn enemy_attacking_the_player_faces_the_higher_block_rate() {
    let attacker = combatant(CharacterKind::Enemy(EnemyBrain::default()), 3, 2);
    let defender = combatant(CharacterKind::Player, 3, 2);
    let (hit_rate, block_rate) = observed_rates(&attacker, &defender, 0xBEEF);
    assert_close(hit_rate, HIT_CHANCE);
    assert_close(block_rate, PLAYER_BLOCK_CHANCE);
}
