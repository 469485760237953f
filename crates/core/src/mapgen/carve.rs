//! Room carving inside partition leaves and corridor carving between rooms.

use rand::Rng;

use crate::grid::{Grid, GridError};
use crate::types::{Direction, Pos};

use super::bsp::Rect;
use super::seed::random_inclusive;

const ROOM_CENTER_ATTEMPTS: usize = 10;

/// Draws a room inside `area`, clamped to the grid, and carves it open.
pub(super) fn place_room(
    grid: &mut Grid,
    rng: &mut impl Rng,
    area: Rect,
    min_room_size: usize,
    max_room_size: usize,
) -> Result<Rect, GridError> {
    let width = random_inclusive(
        rng,
        min_room_size.min(area.width),
        max_room_size.min(area.width),
    );
    let height = random_inclusive(
        rng,
        min_room_size.min(area.height),
        max_room_size.min(area.height),
    );
    let x = area.x + random_inclusive(rng, 0, area.width - width);
    let y = area.y + random_inclusive(rng, 0, area.height - height);

    let room = Rect {
        x,
        y,
        width: width.min(grid.rows().saturating_sub(x)),
        height: height.min(grid.cols().saturating_sub(y)),
    };
    carve_room(grid, room)?;
    Ok(room)
}

pub(super) fn carve_room(grid: &mut Grid, room: Rect) -> Result<(), GridError> {
    for x in room.x..room.x + room.width {
        for y in room.y..room.y + room.height {
            let pos = Pos { y: y as i32, x: x as i32 };
            grid.carve_floor(pos)?;
            if x > room.x {
                grid.open_wall_between(pos, Direction::West)?;
            }
            if y > room.y {
                grid.open_wall_between(pos, Direction::South)?;
            }
        }
    }
    Ok(())
}

/// Samples a few random tiles of `room` looking for floor, then falls back to the
/// geometric center clamped to the grid.
pub(super) fn room_center(grid: &Grid, rng: &mut impl Rng, room: Rect) -> Pos {
    let max_x = grid.rows().saturating_sub(1) as i32;
    let max_y = grid.cols().saturating_sub(1) as i32;
    let clamp = |pos: Pos| Pos { y: pos.y.clamp(0, max_y), x: pos.x.clamp(0, max_x) };

    for _ in 0..ROOM_CENTER_ATTEMPTS {
        let candidate = clamp(Pos {
            y: random_inclusive(rng, room.y, room.top()) as i32,
            x: random_inclusive(rng, room.x, room.right()) as i32,
        });
        if grid.is_floor(candidate) {
            return candidate;
        }
    }
    clamp(room.geometric_center())
}

/// Links each consecutive pair of rooms with an L-shaped corridor.
pub(super) fn connect_rooms(
    grid: &mut Grid,
    rng: &mut impl Rng,
    rooms: &[Rect],
) -> Result<(), GridError> {
    for pair in rooms.windows(2) {
        let start = room_center(grid, rng, pair[0]);
        let end = room_center(grid, rng, pair[1]);
        carve_corridor(grid, start, end)?;
    }
    Ok(())
}

/// Walks along `x` first, then along `y`, opening the crossed edge on both sides of each step.
pub(super) fn carve_corridor(grid: &mut Grid, start: Pos, end: Pos) -> Result<(), GridError> {
    let mut cursor = start;
    grid.carve_floor(cursor)?;

    while cursor.x != end.x {
        let direction = if end.x > cursor.x { Direction::East } else { Direction::West };
        grid.open_wall_between(cursor, direction)?;
        cursor = cursor.step(direction);
        grid.carve_floor(cursor)?;
    }
    while cursor.y != end.y {
        let direction = if end.y > cursor.y { Direction::North } else { Direction::South };
        grid.open_wall_between(cursor, direction)?;
        cursor = cursor.step(direction);
        grid.carve_floor(cursor)?;
    }
    Ok(())
}
