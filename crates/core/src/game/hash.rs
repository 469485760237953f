//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own event replay.

use std::hash::Hasher;
use std::iter;

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

use super::*;

impl Game {
    /// Hash of everything that steers future ticks. Two runs with equal hashes and equal
    /// inputs stay in lockstep.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.state.floor_index);
        hasher.write_u64(xxh3_64(&self.state.dungeon.canonical_bytes()));
        hasher.write_usize(self.scheduler.cursor());
        hasher.write_u8(u8::from(self.scheduler.is_transitioning()));
        hasher.write_usize(self.enemy_cursor);

        let ids = iter::once(self.state.player_id).chain(self.state.enemies.iter().copied());
        for id in ids {
            let Some(character) = self.state.characters.get(id) else {
                continue;
            };
            hasher.write_i32(character.pos.x);
            hasher.write_i32(character.pos.y);
            hasher.write_u8(character.facing.index() as u8);
            hasher.write_i32(character.body_points);
            hasher.write_u8(u8::from(character.is_alive()));
            if let Some(brain) = character.brain() {
                hasher.write_u8(match brain.state {
                    EnemyState::Idle => 0,
                    EnemyState::Pursuing => 1,
                    EnemyState::Attacking => 2,
                });
                hasher.write_u32(brain.pursuit_counter);
                if let Some(plan) = brain.rotation {
                    hasher.write_u8(u8::from(plan.clockwise));
                    hasher.write_u8(plan.remaining);
                    hasher.write_u8(u8::from(plan.then_attack));
                }
            }
        }

        for (_, interactable) in &self.state.interactables {
            hasher.write_i32(interactable.pos.x);
            hasher.write_i32(interactable.pos.y);
        }
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Defeat) => 1,
        });
        hasher.finish()
    }
}
