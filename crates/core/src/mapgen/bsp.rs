//! Binary space partitioning of the grid into candidate room regions.

use std::collections::VecDeque;

use rand::Rng;
use serde::Serialize;

use crate::types::Pos;

use super::seed::random_inclusive;

/// Axis-aligned rectangle of tiles; `width` spans `x`, `height` spans `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn right(self) -> usize {
        self.x + self.width.saturating_sub(1)
    }

    pub fn top(self) -> usize {
        self.y + self.height.saturating_sub(1)
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 || self.width == 0 || self.height == 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.top()
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.top()
            && self.top() >= other.y
    }

    pub fn geometric_center(self) -> Pos {
        Pos { y: (self.y + self.height / 2) as i32, x: (self.x + self.width / 2) as i32 }
    }
}

#[derive(Debug)]
struct BspNode {
    area: Rect,
    children: Option<Box<(BspNode, BspNode)>>,
}

impl BspNode {
    fn leaf(area: Rect) -> Self {
        Self { area, children: None }
    }
}

/// Splits `bounds` until no node exceeds `2 * max_room_size` on either axis or a split is
/// rejected, and returns the leaf areas in breadth-first discovery order.
pub(crate) fn partition(
    rng: &mut impl Rng,
    bounds: Rect,
    min_room_size: usize,
    max_room_size: usize,
) -> Vec<Rect> {
    let mut root = BspNode::leaf(bounds);
    let split_threshold = max_room_size * 2;

    let mut open: VecDeque<&mut BspNode> = VecDeque::from([&mut root]);
    while let Some(node) = open.pop_front() {
        if node.area.width <= split_threshold && node.area.height <= split_threshold {
            continue;
        }
        let Some((left, right)) = split_area(rng, node.area, min_room_size) else {
            continue;
        };
        let children =
            node.children.insert(Box::new((BspNode::leaf(left), BspNode::leaf(right))));
        let (left_node, right_node) = &mut **children;
        open.push_back(left_node);
        open.push_back(right_node);
    }

    collect_leaves(&root)
}

/// Picks an orientation uniformly and rejects it if either half would fall below
/// `min_room_size` on the split axis.
fn split_area(rng: &mut impl Rng, area: Rect, min_room_size: usize) -> Option<(Rect, Rect)> {
    let split_along_y = rng.random_bool(0.5);
    let extent = if split_along_y { area.height } else { area.width };
    if extent < min_room_size * 2 {
        return None;
    }
    let offset = random_inclusive(rng, min_room_size, extent - min_room_size);

    if split_along_y {
        Some((
            Rect { height: offset, ..area },
            Rect { y: area.y + offset, height: area.height - offset, ..area },
        ))
    } else {
        Some((
            Rect { width: offset, ..area },
            Rect { x: area.x + offset, width: area.width - offset, ..area },
        ))
    }
}

fn collect_leaves(root: &BspNode) -> Vec<Rect> {
    let mut leaves = Vec::new();
    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        match &node.children {
            None => leaves.push(node.area),
            Some(children) => {
                queue.push_back(&children.0);
                queue.push_back(&children.1);
            }
        }
    }
    leaves
}
