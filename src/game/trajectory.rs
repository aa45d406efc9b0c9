use super::math::{distance, lerp};
use super::types::Point;
use std::collections::VecDeque;

// Historical head positions, newest first, paired index-for-index with the
// cumulative arclength measured backward from the current head. The front
// entry is always 0.0 and the sequence is non-decreasing toward the back.
#[derive(Debug, Clone)]
pub struct Trajectory {
    positions: VecDeque<Point>,
    cum_lengths: VecDeque<f64>,
}

impl Trajectory {
    pub fn new(initial: Point) -> Self {
        let mut positions = VecDeque::new();
        let mut cum_lengths = VecDeque::new();
        positions.push_front(initial);
        cum_lengths.push_front(0.0);
        Self {
            positions,
            cum_lengths,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn back_length(&self) -> f64 {
        self.cum_lengths.back().copied().unwrap_or(0.0)
    }

    // Once per tick, after the head has moved: push the new head position,
    // shift every stored length by the incremental distance, then drop
    // entries beyond the retention window. The rescan is O(n) in the buffer
    // length, which stays small because the window is bounded by max_length.
    pub fn record(&mut self, head: Point, max_length: f64) {
        let previous = self.positions.front().copied().unwrap_or(head);
        let step = distance(head, previous);
        self.positions.push_front(head);
        for length in self.cum_lengths.iter_mut() {
            *length += step;
        }
        self.cum_lengths.push_front(0.0);

        while self.cum_lengths.len() > 1 {
            match self.cum_lengths.back() {
                Some(back) if *back > max_length => {
                    self.cum_lengths.pop_back();
                    self.positions.pop_back();
                }
                _ => break,
            }
        }
    }

    // Interpolated position at the given arclength behind the head, plus the
    // bracketing index so the caller can resume the next search from there.
    // None means the recorded trajectory is not yet long enough.
    pub fn sample(&self, arclength: f64, search_from: usize) -> Option<(Point, usize)> {
        let k = self.lower_bound(arclength, search_from);
        if k == 0 || k >= self.cum_lengths.len() {
            return None;
        }
        let span = self.cum_lengths[k] - self.cum_lengths[k - 1];
        let rho = if span > 0.0 {
            (arclength - self.cum_lengths[k - 1]) / span
        } else {
            0.0
        };
        Some((lerp(self.positions[k - 1], self.positions[k], rho), k))
    }

    // Smallest index k in [search_from, len) with cum_lengths[k] >= target,
    // or len when no such entry exists.
    fn lower_bound(&self, target: f64, search_from: usize) -> usize {
        let mut lo = search_from;
        let mut hi = self.cum_lengths.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.cum_lengths[mid] < target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn record_path(trajectory: &mut Trajectory, points: &[Point], max_length: f64) {
        for point in points {
            trajectory.record(*point, max_length);
        }
    }

    #[test]
    fn front_is_zero_and_lengths_non_decreasing() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        let mut head = Point { x: 0.0, y: 0.0 };
        for _ in 0..200 {
            head.x += rng.gen_range(-6.0..6.0);
            head.y += rng.gen_range(-6.0..6.0);
            trajectory.record(head, 400.0);

            assert_eq!(trajectory.cum_lengths[0], 0.0);
            for k in 1..trajectory.cum_lengths.len() {
                assert!(trajectory.cum_lengths[k] >= trajectory.cum_lengths[k - 1]);
            }
            assert_eq!(trajectory.positions.len(), trajectory.cum_lengths.len());
        }
    }

    #[test]
    fn trimming_respects_window_and_never_empties() {
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        for i in 1..100 {
            trajectory.record(
                Point {
                    x: i as f64 * 50.0,
                    y: 0.0,
                },
                // window far smaller than one step
                10.0,
            );
            assert!(trajectory.len() >= 1);
            assert!(trajectory.back_length() <= 10.0);
        }
    }

    #[test]
    fn lower_bound_matches_linear_reference() {
        let mut rng = StdRng::seed_from_u64(29);
        let mut cum = vec![0.0f64];
        for _ in 0..63 {
            // zero steps produce duplicate entries on purpose
            let step = if rng.gen_bool(0.2) {
                0.0
            } else {
                rng.gen_range(0.0..3.0)
            };
            let next = cum.last().unwrap() + step;
            cum.push(next);
        }

        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        trajectory.cum_lengths = cum.iter().copied().collect();
        trajectory.positions = cum.iter().map(|c| Point { x: *c, y: 0.0 }).collect();

        for _ in 0..500 {
            let target = rng.gen_range(-1.0..cum.last().unwrap() + 2.0);
            let expected = cum
                .iter()
                .position(|value| *value >= target)
                .unwrap_or(cum.len());
            assert_eq!(trajectory.lower_bound(target, 0), expected);
        }
    }

    #[test]
    fn lower_bound_honors_start_index() {
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        trajectory.cum_lengths = [0.0, 1.0, 2.0, 3.0, 4.0].into_iter().collect();
        trajectory.positions = (0..5).map(|i| Point { x: i as f64, y: 0.0 }).collect();

        assert_eq!(trajectory.lower_bound(2.0, 0), 2);
        assert_eq!(trajectory.lower_bound(2.0, 3), 3);
        assert_eq!(trajectory.lower_bound(10.0, 0), 5);
    }

    #[test]
    fn sample_at_stored_length_returns_stored_position() {
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        let path: Vec<Point> = (1..=20)
            .map(|i| Point {
                x: i as f64 * 4.0,
                y: 7.0,
            })
            .collect();
        record_path(&mut trajectory, &path, 1000.0);

        // entry k=3 sits exactly 12 units behind the head
        let stored = trajectory.positions[3];
        let (sampled, k) = trajectory.sample(12.0, 0).expect("enough history");
        assert_eq!(k, 3);
        assert_eq!(sampled, stored);
    }

    #[test]
    fn sample_interpolates_between_entries() {
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        let path: Vec<Point> = (1..=10)
            .map(|i| Point {
                x: i as f64 * 10.0,
                y: 0.0,
            })
            .collect();
        record_path(&mut trajectory, &path, 1000.0);

        let (sampled, _) = trajectory.sample(15.0, 0).expect("enough history");
        assert_abs_diff_eq!(sampled.x, 100.0 - 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(sampled.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn sample_reports_missing_history() {
        let trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        assert!(trajectory.sample(31.5, 0).is_none());

        let mut short = Trajectory::new(Point { x: 0.0, y: 0.0 });
        short.record(Point { x: 5.0, y: 0.0 }, 1000.0);
        // only 5 units of history, segment wants 31.5
        assert!(short.sample(31.5, 0).is_none());
    }

    #[test]
    fn sample_guards_zero_length_interval() {
        let mut trajectory = Trajectory::new(Point { x: 0.0, y: 0.0 });
        trajectory.cum_lengths = [0.0, 2.0, 2.0, 5.0].into_iter().collect();
        trajectory.positions = (0..4).map(|i| Point { x: i as f64, y: 0.0 }).collect();

        // searching from the far side of the duplicate lands on a
        // zero-length interval; rho must fall back to 0
        let (sampled, k) = trajectory.sample(2.0, 2).expect("enough history");
        assert_eq!(k, 2);
        assert_eq!(sampled.x, 1.0);

        let (sampled, k) = trajectory.sample(2.0, 0).expect("enough history");
        assert_eq!(k, 1);
        assert_eq!(sampled.x, 1.0);
    }
}
