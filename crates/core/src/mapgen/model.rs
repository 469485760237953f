//! Public data models for generated floors: rooms, special tiles, and interactable spawns.

use serde::Serialize;

use crate::grid::Grid;
use crate::types::{InteractableKind, Pos};

use super::bsp::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RoomTag {
    Player,
    Stairs,
    Eligible,
}

/// A partition leaf and the room carved inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Room {
    pub area: Rect,
    pub bounds: Rect,
    pub tag: RoomTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct InteractableSpawn {
    pub kind: InteractableKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneratedDungeon {
    pub floor_index: u32,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub player_start: Pos,
    pub stairs: Option<Pos>,
    pub interactable_spawns: Vec<InteractableSpawn>,
}

impl GeneratedDungeon {
    pub fn eligible_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|room| room.tag == RoomTag::Eligible)
    }

    pub fn room_with_tag(&self, tag: RoomTag) -> Option<&Room> {
        self.rooms.iter().find(|room| room.tag == tag)
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.floor_index.to_le_bytes());
        bytes.extend((self.grid.rows() as u32).to_le_bytes());
        bytes.extend((self.grid.cols() as u32).to_le_bytes());
        for tile in self.grid.tiles() {
            let walls = tile.walls;
            bytes.push(
                u8::from(tile.is_floor())
                    | (u8::from(walls.north) << 1)
                    | (u8::from(walls.south) << 2)
                    | (u8::from(walls.east) << 3)
                    | (u8::from(walls.west) << 4),
            );
        }

        push_pos(&mut bytes, self.player_start);
        match self.stairs {
            Some(pos) => {
                bytes.push(1);
                push_pos(&mut bytes, pos);
            }
            None => bytes.push(0),
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            for rect in [room.area, room.bounds] {
                for value in [rect.x, rect.y, rect.width, rect.height] {
                    bytes.extend((value as u32).to_le_bytes());
                }
            }
            bytes.push(match room.tag {
                RoomTag::Player => 0,
                RoomTag::Stairs => 1,
                RoomTag::Eligible => 2,
            });
        }

        bytes.extend((self.interactable_spawns.len() as u32).to_le_bytes());
        for spawn in &self.interactable_spawns {
            bytes.push(match spawn.kind {
                InteractableKind::Stairs => 0,
                InteractableKind::Merchant => 1,
                InteractableKind::TreasureChest => 2,
            });
            push_pos(&mut bytes, spawn.pos);
        }

        bytes
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}
