//! Cyclic turn-phase scheduling with a debounced phase transition.
//! This module exists to keep phase ordering and end-of-phase guarding in one place.
//! It does not own what happens inside a phase.

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnScheduler {
    order: Vec<TurnPhase>,
    cursor: usize,
    delay_ticks: u32,
    // Remaining delay of an ended phase; `Some` means ending is already in progress.
    pending: Option<u32>,
}

impl TurnScheduler {
    pub fn new(order: Vec<TurnPhase>, delay_ticks: u32) -> Result<Self, ConfigError> {
        if order.is_empty() {
            return Err(ConfigError::EmptyTurnOrder);
        }
        Ok(Self { order, cursor: 0, delay_ticks, pending: None })
    }

    pub fn current(&self) -> TurnPhase {
        self.order[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn order(&self) -> &[TurnPhase] {
        &self.order
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// Announces the current phase without advancing.
    pub fn start(&mut self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::PhaseStarted(self.current()));
    }

    /// Returns `false` when the phase is already ending.
    pub fn end_current_phase(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.pending.is_some() {
            return false;
        }
        events.push(GameEvent::PhaseEnded(self.current()));
        if self.delay_ticks == 0 {
            self.advance(events);
        } else {
            self.pending = Some(self.delay_ticks);
        }
        true
    }

    /// Counts down a pending transition. Returns the newly started phase when it fires.
    pub fn tick(&mut self, events: &mut Vec<GameEvent>) -> Option<TurnPhase> {
        let remaining = self.pending?;
        if remaining > 1 {
            self.pending = Some(remaining - 1);
            return None;
        }
        Some(self.advance(events))
    }

    /// Back to the first phase with nothing pending. Does not announce it.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.pending = None;
    }

    fn advance(&mut self, events: &mut Vec<GameEvent>) -> TurnPhase {
        self.pending = None;
        self.cursor = (self.cursor + 1) % self.order.len();
        let phase = self.current();
        events.push(GameEvent::PhaseStarted(phase));
        phase
    }
}
