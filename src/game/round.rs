use super::chain::Chain;
use super::collision::CollisionKind;
use super::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use super::environment::{generate_obstacles, spawn_at, spawn_pickup, NoFreePosition};
use super::types::{Point, Rect, RoundSnapshot, Segment, SegmentSnapshot, SegmentState};
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy)]
pub struct RoundConfig {
  pub canvas_width: f64,
  pub canvas_height: f64,
}

impl Default for RoundConfig {
  fn default() -> Self {
    Self {
      canvas_width: CANVAS_WIDTH,
      canvas_height: CANVAS_HEIGHT,
    }
  }
}

#[derive(Debug, Clone, Copy)]
pub struct TickReport {
  pub score: usize,
  pub captured: bool,
  pub collision: Option<CollisionKind>,
  pub pickup_spawn_failed: bool,
}

// One game round: the chain, the obstacles it must avoid, and the pickup it
// is chasing. The driving loop owns the clock and feeds pointer coordinates;
// everything here runs synchronously inside a single tick.
#[derive(Debug)]
pub struct Round {
  config: RoundConfig,
  chain: Chain,
  obstacles: Vec<Rect>,
  pickup: Option<Segment>,
  rng: StdRng,
  tick: u64,
  outcome: Option<CollisionKind>,
}

impl Round {
  pub fn new(config: RoundConfig, pointer: Point, mut rng: StdRng) -> Result<Self, NoFreePosition> {
    let obstacles = generate_obstacles(&mut rng, config.canvas_width, config.canvas_height);
    let mut head = spawn_at(pointer, config.canvas_width, config.canvas_height);
    head.state = SegmentState::Captured;
    let chain = Chain::new(head, config.canvas_width, config.canvas_height);

    let occupied: Vec<Point> = chain.segment_centers().collect();
    let pickup = spawn_pickup(
      &mut rng,
      &occupied,
      &obstacles,
      config.canvas_width,
      config.canvas_height,
    )?;

    tracing::info!(
      obstacles = obstacles.len(),
      width = config.canvas_width,
      height = config.canvas_height,
      "round started"
    );

    Ok(Self {
      config,
      chain,
      obstacles,
      pickup: Some(pickup),
      rng,
      tick: 0,
      outcome: None,
    })
  }

  pub fn score(&self) -> usize {
    self.chain.segment_count()
  }

  pub fn outcome(&self) -> Option<CollisionKind> {
    self.outcome
  }

  pub fn chain(&self) -> &Chain {
    &self.chain
  }

  pub fn obstacles(&self) -> &[Rect] {
    &self.obstacles
  }

  pub fn pickup_position(&self) -> Option<Point> {
    self.pickup.as_ref().map(|pickup| pickup.center)
  }

  pub fn tick(&mut self, pointer: Point) -> TickReport {
    if let Some(kind) = self.outcome {
      return TickReport {
        score: self.chain.segment_count(),
        captured: false,
        collision: Some(kind),
        pickup_spawn_failed: false,
      };
    }

    self.tick += 1;
    let mut captured = false;
    let mut pickup_spawn_failed = false;

    if let Some(node) = self.pickup.take() {
      match self.chain.capture(node) {
        Ok(()) => {
          captured = true;
          tracing::debug!(score = self.chain.segment_count(), "pickup captured");
          match self.spawn_replacement() {
            Ok(node) => self.pickup = Some(node),
            Err(error) => {
              pickup_spawn_failed = true;
              tracing::warn!(%error, "pickup spawn failed");
            }
          }
        }
        Err(node) => self.pickup = Some(node),
      }
    }

    self.chain.update(pointer);

    let collision = self.chain.check_collision(&self.obstacles);
    if let Some(kind) = collision {
      self.outcome = Some(kind);
      tracing::debug!(?kind, score = self.chain.segment_count(), "round over");
    }

    TickReport {
      score: self.chain.segment_count(),
      captured,
      collision,
      pickup_spawn_failed,
    }
  }

  pub fn snapshot(&self) -> RoundSnapshot {
    RoundSnapshot {
      tick: self.tick,
      score: self.chain.segment_count(),
      segments: self.chain.segments().map(snapshot_segment).collect(),
      pickup: self.pickup.as_ref().map(snapshot_segment),
      obstacles: self.obstacles.clone(),
    }
  }

  fn spawn_replacement(&mut self) -> Result<Segment, NoFreePosition> {
    let occupied: Vec<Point> = self.chain.segment_centers().collect();
    spawn_pickup(
      &mut self.rng,
      &occupied,
      &self.obstacles,
      self.config.canvas_width,
      self.config.canvas_height,
    )
  }
}

fn snapshot_segment(segment: &Segment) -> SegmentSnapshot {
  SegmentSnapshot {
    x: segment.center.x,
    y: segment.center.y,
    state: segment.state,
  }
}
