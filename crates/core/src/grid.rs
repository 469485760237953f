//! Tile lattice with per-tile wall flags and occupancy.
//!
//! The grid is built and carved during generation, then sealed. After sealing only
//! occupancy may change.

use serde::Serialize;
use thiserror::Error;

use crate::types::{CharacterId, Direction, InteractableId, Pos};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("{0:?} is outside the grid")]
    OutOfBounds(Pos),
    #[error("{0:?} is not a floor tile")]
    NotFloor(Pos),
    #[error("{0:?} is already occupied")]
    Occupied(Pos),
    #[error("{0:?} has no occupant")]
    Vacant(Pos),
    #[error("grid is sealed; tile layout can no longer change")]
    Sealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Walls {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls { north: true, south: true, east: true, west: true };
    pub const OPEN: Walls = Walls { north: false, south: false, east: false, west: false };

    pub fn has(self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    pub fn set(&mut self, direction: Direction, present: bool) {
        match direction {
            Direction::North => self.north = present,
            Direction::South => self.south = present,
            Direction::East => self.east = present,
            Direction::West => self.west = present,
        }
    }
}

/// A tile holds a character or an interactable, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Occupant {
    Character(CharacterId),
    Interactable(InteractableId),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub pos: Pos,
    pub world_position: WorldPos,
    pub walls: Walls,
    is_floor: bool,
    occupant: Option<Occupant>,
}

impl Tile {
    pub fn is_floor(&self) -> bool {
        self.is_floor
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    pub fn character(&self) -> Option<CharacterId> {
        match self.occupant {
            Some(Occupant::Character(id)) => Some(id),
            _ => None,
        }
    }

    pub fn interactable(&self) -> Option<InteractableId> {
        match self.occupant {
            Some(Occupant::Interactable(id)) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
    sealed: bool,
}

impl Grid {
    /// Every tile starts as non-floor with all four walls, laid out `spacing` world units apart.
    pub fn new(rows: usize, cols: usize, spacing: f32) -> Self {
        let mut tiles = Vec::with_capacity(rows * cols);
        for x in 0..rows {
            for y in 0..cols {
                tiles.push(Tile {
                    pos: Pos { y: y as i32, x: x as i32 },
                    world_position: WorldPos { x: x as f32 * spacing, z: y as f32 * spacing },
                    walls: Walls::CLOSED,
                    is_floor: false,
                    occupant: None,
                });
            }
        }
        Self { rows, cols, tiles, sealed: false }
    }

    /// Extent along `x`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Extent along `y`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.rows && (pos.y as usize) < self.cols
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        self.index(pos).map(|index| &self.tiles[index])
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn floor_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter().filter(|tile| tile.is_floor).map(|tile| tile.pos)
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(Tile::is_floor)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.tile(pos).is_some_and(Tile::is_occupied)
    }

    pub fn has_wall(&self, pos: Pos, direction: Direction) -> bool {
        self.tile(pos).is_some_and(|tile| tile.walls.has(direction))
    }

    pub fn carve_floor(&mut self, pos: Pos) -> Result<(), GridError> {
        let index = self.layout_index(pos)?;
        self.tiles[index].is_floor = true;
        Ok(())
    }

    /// Clears the shared edge between `pos` and its neighbour on both sides.
    pub fn open_wall_between(&mut self, pos: Pos, direction: Direction) -> Result<(), GridError> {
        self.set_wall_between(pos, direction, false)
    }

    /// Sets or clears the shared edge between `pos` and its neighbour on both sides.
    /// At the grid edge only `pos`'s own wall is touched.
    pub fn set_wall_between(
        &mut self,
        pos: Pos,
        direction: Direction,
        present: bool,
    ) -> Result<(), GridError> {
        let index = self.layout_index(pos)?;
        self.tiles[index].walls.set(direction, present);
        if let Some(neighbour) = self.index(pos.step(direction)) {
            self.tiles[neighbour].walls.set(direction.opposite(), present);
        }
        Ok(())
    }

    /// Sets a single wall flag without touching the neighbour.
    pub fn set_wall(
        &mut self,
        pos: Pos,
        direction: Direction,
        present: bool,
    ) -> Result<(), GridError> {
        let index = self.layout_index(pos)?;
        self.tiles[index].walls.set(direction, present);
        Ok(())
    }

    /// Forces every floor tile open on all four sides.
    pub fn open_all_floor_walls(&mut self) -> Result<(), GridError> {
        if self.sealed {
            return Err(GridError::Sealed);
        }
        for tile in self.tiles.iter_mut().filter(|tile| tile.is_floor) {
            tile.walls = Walls::OPEN;
        }
        Ok(())
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn place(&mut self, pos: Pos, occupant: Occupant) -> Result<(), GridError> {
        let index = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        let tile = &mut self.tiles[index];
        if !tile.is_floor {
            return Err(GridError::NotFloor(pos));
        }
        if tile.occupant.is_some() {
            return Err(GridError::Occupied(pos));
        }
        tile.occupant = Some(occupant);
        Ok(())
    }

    pub fn vacate(&mut self, pos: Pos) -> Result<Occupant, GridError> {
        let index = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.tiles[index].occupant.take().ok_or(GridError::Vacant(pos))
    }

    /// Moves whatever occupies `from` onto `to`; leaves both tiles untouched on failure.
    pub fn relocate(&mut self, from: Pos, to: Pos) -> Result<Occupant, GridError> {
        let from_index = self.index(from).ok_or(GridError::OutOfBounds(from))?;
        let to_index = self.index(to).ok_or(GridError::OutOfBounds(to))?;
        let occupant = self.tiles[from_index].occupant.ok_or(GridError::Vacant(from))?;
        if !self.tiles[to_index].is_floor {
            return Err(GridError::NotFloor(to));
        }
        if self.tiles[to_index].occupant.is_some() {
            return Err(GridError::Occupied(to));
        }
        self.tiles[from_index].occupant = None;
        self.tiles[to_index].occupant = Some(occupant);
        Ok(occupant)
    }

    fn layout_index(&self, pos: Pos) -> Result<usize, GridError> {
        if self.sealed {
            return Err(GridError::Sealed);
        }
        self.index(pos).ok_or(GridError::OutOfBounds(pos))
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.x as usize) * self.cols + (pos.y as usize))
    }
}
