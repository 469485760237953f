//! Line-of-sight and melee reach between tiles.
//! This module exists to keep perception rules deterministic and isolated from AI policy.
//! It does not own enemy state transitions.

use super::*;

/// Integer Bresenham walk between `from` and `to`. Every step, including diagonal ones,
/// is blocked by a wall on either side of the crossed edge or by leaving the grid.
///
/// The walk always starts from the smaller endpoint, so the answer does not depend on
/// argument order.
pub fn has_line_of_sight(grid: &Grid, from: Pos, to: Pos) -> bool {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return false;
    }
    let (from, to) = if from <= to { (from, to) } else { (to, from) };

    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let step_x = if from.x < to.x { Direction::East } else { Direction::West };
    let step_y = if from.y < to.y { Direction::North } else { Direction::South };
    let mut err = dx - dy;
    let mut current = from;

    while current != to {
        let e2 = 2 * err;
        let mut next = current;
        let mut crossed = [None, None];
        if e2 > -dy {
            err -= dy;
            next = next.step(step_x);
            crossed[0] = Some(step_x);
        }
        if e2 < dx {
            err += dx;
            next = next.step(step_y);
            crossed[1] = Some(step_y);
        }

        if !grid.in_bounds(next) {
            return false;
        }
        for direction in crossed.into_iter().flatten() {
            if grid.has_wall(current, direction) || grid.has_wall(next, direction.opposite()) {
                return false;
            }
        }
        current = next;
    }
    true
}

/// When `to` is a cardinal neighbour of `from` and `to` has no wall facing back towards
/// `from`, returns the direction `from` must face to reach it.
pub fn is_adjacent_and_reachable(grid: &Grid, from: Pos, to: Pos) -> Option<Direction> {
    Direction::ALL.into_iter().find(|&direction| {
        adjacent_tile(grid, from, direction) == Some(to)
            && !grid.has_wall(to, direction.opposite())
    })
}
