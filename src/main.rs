use rand::rngs::StdRng;
use rand::SeedableRng;
use snake_game_core::game::constants::{CANVAS_HEIGHT, CANVAS_WIDTH, TICK_MS};
use snake_game_core::game::round::{Round, RoundConfig};
use snake_game_core::game::types::Point;
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// Headless driving loop: a fixed-rate clock and a synthetic pointer that
// steers toward the current pickup, standing in for a windowed frontend.
const POINTER_SPEED: f64 = 6.0;

fn env_f64(name: &str, default: f64) -> f64 {
  env::var(name)
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
  env::var(name)
    .ok()
    .and_then(|value| value.parse().ok())
    .unwrap_or(default)
}

fn env_flag(name: &str) -> bool {
  env::var(name)
    .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE"))
    .unwrap_or(false)
}

fn steer_toward_pickup(pointer: Point, round: &Round) -> Point {
  let Some(target) = round.pickup_position() else {
    return pointer;
  };
  let dx = target.x - pointer.x;
  let dy = target.y - pointer.y;
  let dist = (dx * dx + dy * dy).sqrt();
  if dist <= POINTER_SPEED {
    return target;
  }
  Point {
    x: pointer.x + dx / dist * POINTER_SPEED,
    y: pointer.y + dy / dist * POINTER_SPEED,
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let canvas_width = env_f64("CANVAS_WIDTH", CANVAS_WIDTH);
  let canvas_height = env_f64("CANVAS_HEIGHT", CANVAS_HEIGHT);
  let seed = env_u64("SEED", 0x5eed);
  let max_ticks = env_u64("MAX_TICKS", 3000);

  let config = RoundConfig {
    canvas_width,
    canvas_height,
  };
  let start = Point {
    x: canvas_width / 2.0,
    y: canvas_height / 2.0,
  };
  let mut round = Round::new(config, start, StdRng::seed_from_u64(seed))?;

  let mut pointer = start;
  let mut interval = tokio::time::interval(Duration::from_millis(TICK_MS));
  for _ in 0..max_ticks {
    interval.tick().await;
    pointer = steer_toward_pickup(pointer, &round);
    let report = round.tick(pointer);
    if let Some(kind) = report.collision {
      tracing::info!(?kind, code = kind.code(), score = report.score, "round over");
      break;
    }
    if report.captured {
      tracing::info!(score = report.score, "captured pickup");
    }
  }

  tracing::info!(score = round.score(), "driver finished");
  if env_flag("DUMP_SNAPSHOT") {
    println!("{}", serde_json::to_string_pretty(&round.snapshot())?);
  }
  Ok(())
}
