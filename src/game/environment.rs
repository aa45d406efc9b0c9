use super::collision::{circles_overlap, rects_overlap, segment_bounds};
use super::constants::{
  MAX_SPAWN_ATTEMPTS, NODE_RADIUS, OBSTACLE_COUNT, OBSTACLE_MAX_SIZE, OBSTACLE_MIN_SIZE,
  SPAWN_MARGIN,
};
use super::math::clamp;
use super::types::{Point, Rect, Segment};
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoFreePosition;

impl fmt::Display for NoFreePosition {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "no free spawn position after {MAX_SPAWN_ATTEMPTS} attempts")
  }
}

impl std::error::Error for NoFreePosition {}

pub fn generate_obstacles(rng: &mut impl Rng, width: f64, height: f64) -> Vec<Rect> {
  (0..OBSTACLE_COUNT)
    .map(|_| {
      let w = rng.gen_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
      let h = rng.gen_range(OBSTACLE_MIN_SIZE..OBSTACLE_MAX_SIZE);
      Rect {
        x: rng.gen_range(0.0..width - w),
        y: rng.gen_range(0.0..height - h),
        width: w,
        height: h,
      }
    })
    .collect()
}

// Broadphase predicate shared by the spawner: a candidate node center is free
// when its circle clears every occupied segment circle and its bounding
// square clears every obstacle rect.
pub fn position_is_free(candidate: Point, occupied: &[Point], obstacles: &[Rect]) -> bool {
  if occupied
    .iter()
    .any(|center| circles_overlap(candidate, *center, NODE_RADIUS))
  {
    return false;
  }
  let extent = segment_bounds(candidate);
  obstacles.iter().all(|rect| !rects_overlap(extent, *rect))
}

// Rejection-sample a pickup location away from the canvas edge. The bounded
// attempt count keeps a saturated canvas from hanging the spawner.
pub fn spawn_pickup(
  rng: &mut impl Rng,
  occupied: &[Point],
  obstacles: &[Rect],
  width: f64,
  height: f64,
) -> Result<Segment, NoFreePosition> {
  if width <= SPAWN_MARGIN * 2.0 || height <= SPAWN_MARGIN * 2.0 {
    return Err(NoFreePosition);
  }
  for _ in 0..MAX_SPAWN_ATTEMPTS {
    let candidate = Point {
      x: rng.gen_range(SPAWN_MARGIN..width - SPAWN_MARGIN),
      y: rng.gen_range(SPAWN_MARGIN..height - SPAWN_MARGIN),
    };
    if position_is_free(candidate, occupied, obstacles) {
      return Ok(Segment::new(candidate.x, candidate.y));
    }
  }
  Err(NoFreePosition)
}

// Place a node at a requested position, clamped inside the spawn margins.
// Used for the initial head, which starts under the pointer.
pub fn spawn_at(position: Point, width: f64, height: f64) -> Segment {
  Segment::new(
    clamp(position.x, SPAWN_MARGIN, width - SPAWN_MARGIN),
    clamp(position.y, SPAWN_MARGIN, height - SPAWN_MARGIN),
  )
}
