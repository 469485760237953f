//! Player-start and stairs room selection.

use rand::Rng;
use tracing::warn;

use crate::grid::Grid;
use crate::types::Pos;

use super::bsp::Rect;
use super::carve::room_center;
use super::seed::random_index;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct SpecialRooms {
    pub(super) player_room: usize,
    pub(super) player_start: Pos,
    pub(super) stairs_room: Option<usize>,
    pub(super) stairs: Option<Pos>,
}

/// Picks two distinct rooms uniformly. With fewer than two rooms the stairs go on the floor
/// tile farthest from the player start, if there is one.
pub(super) fn choose_player_and_stairs(
    grid: &Grid,
    rng: &mut impl Rng,
    rooms: &[Rect],
) -> SpecialRooms {
    if rooms.len() < 2 {
        warn!(rooms = rooms.len(), "not enough rooms to place player and stairs apart");
        let player_start = rooms
            .first()
            .map(|&room| room_center(grid, rng, room))
            .filter(|&pos| grid.is_floor(pos))
            .or_else(|| first_floor_tile(grid))
            .unwrap_or_default();
        let stairs = farthest_floor_tile(grid, player_start);
        return SpecialRooms { player_room: 0, player_start, stairs_room: None, stairs };
    }

    let player_room = random_index(rng, rooms.len());
    let mut stairs_room = random_index(rng, rooms.len() - 1);
    if stairs_room >= player_room {
        stairs_room += 1;
    }

    let mut player_start = room_center(grid, rng, rooms[player_room]);
    if !grid.is_floor(player_start) {
        warn!(?player_start, "player start is not on a floor tile, scanning for a fallback");
        player_start = first_floor_tile(grid).unwrap_or(player_start);
    }
    let stairs = room_center(grid, rng, rooms[stairs_room]);

    SpecialRooms { player_room, player_start, stairs_room: Some(stairs_room), stairs: Some(stairs) }
}

pub(super) fn first_floor_tile(grid: &Grid) -> Option<Pos> {
    grid.floor_positions().next()
}

fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

fn farthest_floor_tile(grid: &Grid, from: Pos) -> Option<Pos> {
    let mut best: Option<(Pos, u32)> = None;
    for pos in grid.floor_positions() {
        let distance = manhattan(from, pos);
        if distance == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_distance)) => distance > best_distance,
        };
        if better {
            best = Some((pos, distance));
        }
    }
    best.map(|(pos, _)| pos)
}
