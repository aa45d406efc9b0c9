use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
  pub x: f64,
  pub y: f64,
  pub width: f64,
  pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentState {
  Fresh,
  Captured,
  Collided,
}

#[derive(Debug)]
pub struct Segment {
  pub center: Point,
  pub state: SegmentState,
  pub smoothed_target: Option<Point>,
  pub past_error: f64,
  pub next: Option<Box<Segment>>,
}

impl Segment {
  pub fn new(x: f64, y: f64) -> Self {
    Self {
      center: Point { x, y },
      state: SegmentState::Fresh,
      smoothed_target: None,
      past_error: 0.0,
      next: None,
    }
  }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SegmentSnapshot {
  pub x: f64,
  pub y: f64,
  pub state: SegmentState,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundSnapshot {
  pub tick: u64,
  pub score: usize,
  pub segments: Vec<SegmentSnapshot>,
  pub pickup: Option<SegmentSnapshot>,
  pub obstacles: Vec<Rect>,
}
