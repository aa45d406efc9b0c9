use super::collision::{rects_overlap, segment_bounds, CollisionKind};
use super::constants::{
    CAPTURE_DIST, DIST_EPSILON, KD, KP, NODE_RADIUS, SEGMENT_SPACING, SMOOTHING_COEF,
    STANDOFF_DIST,
};
use super::math::distance;
use super::trajectory::Trajectory;
use super::types::{Point, Rect, Segment, SegmentState};

// The snake: an owned forward list of segments. The head is driven by a PD
// controller toward the smoothed pointer target; body segments are placed by
// arclength interpolation over the head's recorded trajectory.
#[derive(Debug)]
pub struct Chain {
    head: Box<Segment>,
    segment_count: usize,
    spacing: f64,
    capture_dist: f64,
    canvas_width: f64,
    canvas_height: f64,
    trajectory: Trajectory,
}

pub struct SegmentIter<'a> {
    next: Option<&'a Segment>,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.next.as_deref();
        Some(current)
    }
}

fn smooth_target(previous: Option<Point>, raw: Point) -> Point {
    match previous {
        None => raw,
        Some(prev) => Point {
            x: SMOOTHING_COEF * prev.x + (1.0 - SMOOTHING_COEF) * raw.x,
            y: SMOOTHING_COEF * prev.y + (1.0 - SMOOTHING_COEF) * raw.y,
        },
    }
}

impl Chain {
    pub fn new(head: Segment, canvas_width: f64, canvas_height: f64) -> Self {
        let trajectory = Trajectory::new(head.center);
        Self {
            head: Box::new(head),
            segment_count: 1,
            spacing: SEGMENT_SPACING,
            capture_dist: CAPTURE_DIST,
            canvas_width,
            canvas_height,
            trajectory,
        }
    }

    pub fn head(&self) -> &Segment {
        &self.head
    }

    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    // Non-owning traversal in head-to-tail order, for enumeration only.
    pub fn segments(&self) -> SegmentIter<'_> {
        SegmentIter {
            next: Some(&self.head),
        }
    }

    pub fn segment_centers(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments().map(|segment| segment.center)
    }

    pub fn update(&mut self, raw_target: Point) {
        self.advance_head(raw_target);
        let max_length = self.spacing * (self.segment_count + 1) as f64;
        self.trajectory.record(self.head.center, max_length);
        self.place_body();
    }

    // PD control of the head's distance to the smoothed target. The epsilon
    // keeps the division safe when the head sits exactly on the target.
    fn advance_head(&mut self, raw_target: Point) {
        let smoothed = smooth_target(self.head.smoothed_target, raw_target);
        self.head.smoothed_target = Some(smoothed);

        let center = self.head.center;
        let d = distance(center, smoothed) + DIST_EPSILON;
        let error = (d - STANDOFF_DIST).abs();
        let delta = error - self.head.past_error;
        self.head.past_error = error;
        let control = KP * error + KD * delta;
        self.head.center.x += (smoothed.x - center.x) / d * control;
        self.head.center.y += (smoothed.y - center.y) / d * control;
    }

    // Walk the body in order; each segment wants to sit index * spacing units
    // behind the head along the recorded trajectory. Arclengths grow with the
    // index, so each search resumes from the previous segment's bracket. A
    // missing sample means the trajectory is still too short: stop there and
    // let the remaining segments keep their positions.
    fn place_body(&mut self) {
        let mut search_from = 0;
        let mut index = 1usize;
        let mut cursor = self.head.next.as_deref_mut();
        while let Some(segment) = cursor {
            let arclength = index as f64 * self.spacing;
            let Some((position, k)) = self.trajectory.sample(arclength, search_from) else {
                break;
            };
            segment.center = position;
            search_from = k;
            index += 1;
            cursor = segment.next.as_deref_mut();
        }
    }

    // Promote the candidate to new head when it is within capture range. The
    // candidate arrives with fresh controller state, so every growth event
    // also restarts the smoother and the PD error history. The trajectory
    // keeps recording across the promotion; its retention window follows the
    // incremented segment count.
    pub fn capture(&mut self, mut candidate: Segment) -> Result<(), Segment> {
        if distance(self.head.center, candidate.center) >= self.capture_dist {
            return Err(candidate);
        }
        candidate.state = SegmentState::Captured;
        let old_head = std::mem::replace(&mut self.head, Box::new(candidate));
        self.head.next = Some(old_head);
        self.segment_count += 1;
        Ok(())
    }

    pub fn check_collision(&mut self, obstacles: &[Rect]) -> Option<CollisionKind> {
        if self.check_self_collision() {
            return Some(CollisionKind::SelfHit);
        }
        if self.check_wall_collision() {
            return Some(CollisionKind::Wall);
        }
        if self.check_obstacle_collision(obstacles) {
            return Some(CollisionKind::Obstacle);
        }
        None
    }

    fn check_self_collision(&mut self) -> bool {
        let head_center = self.head.center;
        let mut hit = false;
        let mut cursor = self.head.next.as_deref_mut();
        while let Some(segment) = cursor {
            if distance(head_center, segment.center) < NODE_RADIUS {
                segment.state = SegmentState::Collided;
                hit = true;
                break;
            }
            cursor = segment.next.as_deref_mut();
        }
        if hit {
            self.head.state = SegmentState::Collided;
        }
        hit
    }

    fn check_wall_collision(&mut self) -> bool {
        let Point { x, y } = self.head.center;
        let outside = x < 0.0 || x > self.canvas_width || y < 0.0 || y > self.canvas_height;
        if outside {
            self.head.state = SegmentState::Collided;
        }
        outside
    }

    fn check_obstacle_collision(&mut self, obstacles: &[Rect]) -> bool {
        let extent = segment_bounds(self.head.center);
        let hit = obstacles.iter().any(|rect| rects_overlap(extent, *rect));
        if hit {
            self.head.state = SegmentState::Collided;
        }
        hit
    }
}
