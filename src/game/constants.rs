pub const NODE_RADIUS: f64 = 15.0;
pub const SEGMENT_SPACING: f64 = 2.1 * NODE_RADIUS;
pub const CAPTURE_DIST: f64 = SEGMENT_SPACING;
pub const SMOOTHING_COEF: f64 = 0.9;
pub const STANDOFF_DIST: f64 = 0.0;
pub const KP: f64 = 0.1;
pub const KD: f64 = KP / 3.0;
pub const DIST_EPSILON: f64 = 1e-6;
pub const CANVAS_WIDTH: f64 = 500.0;
pub const CANVAS_HEIGHT: f64 = 500.0;
pub const TICK_MS: u64 = 33;
pub const OBSTACLE_COUNT: usize = 3;
pub const OBSTACLE_MIN_SIZE: f64 = 20.0;
pub const OBSTACLE_MAX_SIZE: f64 = 60.0;
pub const SPAWN_MARGIN: f64 = NODE_RADIUS * 3.0;
pub const MAX_SPAWN_ATTEMPTS: usize = 32;
