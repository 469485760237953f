//! Wall-aware neighbour lookups and movement legality.

use super::*;

/// Neighbour of `pos` in `direction`, with no wall or occupancy check.
pub fn adjacent_tile(grid: &Grid, pos: Pos, direction: Direction) -> Option<Pos> {
    let next = pos.step(direction);
    grid.in_bounds(next).then_some(next)
}

/// True when the edge between `pos` and its neighbour in `direction` is walled on either
/// side, or when there is no neighbour.
pub fn is_tile_blocked_by_wall(grid: &Grid, pos: Pos, direction: Direction) -> bool {
    let Some(next) = adjacent_tile(grid, pos, direction) else {
        return true;
    };
    grid.has_wall(pos, direction) || grid.has_wall(next, direction.opposite())
}

pub fn can_move_to(grid: &Grid, pos: Pos, direction: Direction) -> bool {
    match adjacent_tile(grid, pos, direction) {
        Some(next) => !is_tile_blocked_by_wall(grid, pos, direction) && !grid.is_occupied(next),
        None => false,
    }
}
