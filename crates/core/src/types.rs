use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct CharacterId;
    pub struct InteractableId;
}

/// Integer grid coordinate. `x` runs across the grid's rows, `y` across its columns.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Cardinal facing. Declaration order is the clockwise cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// North is `+y`, East is `+x`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn turned(self, clockwise: bool) -> Self {
        let index = self.index();
        let next = if clockwise { (index + 1) % 4 } else { (index + 3) % 4 };
        Self::ALL[next]
    }

    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Shortest rotation towards `target` as `(clockwise, steps)`. Ties turn clockwise.
    pub fn rotation_towards(self, target: Direction) -> (bool, u8) {
        let clockwise_steps = (target.index() + 4 - self.index()) % 4;
        let counter_clockwise_steps = (self.index() + 4 - target.index()) % 4;
        if clockwise_steps <= counter_clockwise_steps {
            (true, clockwise_steps as u8)
        } else {
            (false, counter_clockwise_steps as u8)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Idle,
    Pursuing,
    Attacking,
}

/// Which block chance a defender rolls with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantCategory {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InteractableKind {
    Stairs,
    Merchant,
    TreasureChest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is not the player's phase")]
    NotPlayerPhase,
    #[error("the run is over: {0:?}")]
    RunOver(RunOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub hits: u32,
    pub blocks: u32,
    pub damage: u32,
}

/// Notifications for the presentation layer, queued by the engine and drained by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseStarted(TurnPhase),
    PhaseEnded(TurnPhase),
    FloorEntered { floor_index: u32 },
    EnemyStateChanged { enemy: CharacterId, state: EnemyState },
    Turned { character: CharacterId, facing: Direction },
    Moved { character: CharacterId, from: Pos, to: Pos },
    Attacked { attacker: CharacterId, defender: CharacterId, outcome: AttackOutcome },
    Died { character: CharacterId },
    Interacted { kind: InteractableKind, pos: Pos },
}

/// Result of a single player action during the player phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Turned(Direction),
    Moved { from: Pos, to: Pos },
    MoveBlocked,
    Attacked { defender: CharacterId, outcome: AttackOutcome },
    NoTarget,
    Interacted(InteractableKind),
    Descended { floor_index: u32 },
}
