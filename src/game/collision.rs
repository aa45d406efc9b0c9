use super::constants::NODE_RADIUS;
use super::types::{Point, Rect};
use serde::Serialize;

// Terminal conditions for a round, in check priority order. These are
// expected game-over signals, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionKind {
    SelfHit,
    Wall,
    Obstacle,
}

impl CollisionKind {
    pub fn code(self) -> u8 {
        match self {
            CollisionKind::SelfHit => 1,
            CollisionKind::Wall => 2,
            CollisionKind::Obstacle => 3,
        }
    }
}

pub fn segment_bounds(center: Point) -> Rect {
    Rect {
        x: center.x - NODE_RADIUS,
        y: center.y - NODE_RADIUS,
        width: NODE_RADIUS * 2.0,
        height: NODE_RADIUS * 2.0,
    }
}

pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

pub fn circles_overlap(a: Point, b: Point, radius: f64) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() < radius * 2.0
}
