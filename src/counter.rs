use crate::exercise::{Direction, ExercisePolicy};

/// Emitted once per completed cycle, on the Up -> Down transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedRep {
    /// Peak completion percentage reached during the cycle.
    pub depth: f64,
}

/// Hysteresis-based rep state machine.
///
/// Completion must reach the policy's high threshold to enter the Up phase
/// and fall back to the low threshold to return to Down; oscillation around
/// a single boundary can therefore never double-count. The count only ever
/// changes on a phase transition, at most once per transition.
#[derive(Debug, Clone)]
pub struct RepCounter {
    policy: ExercisePolicy,
    direction: Direction,
    count: f64,
    peak_percentage: f64,
}

impl RepCounter {
    pub fn new(policy: ExercisePolicy) -> Self {
        Self {
            direction: policy.initial_direction,
            policy,
            count: 0.0,
            peak_percentage: 0.0,
        }
    }

    /// Feeds one frame's completion percentage through the state machine.
    ///
    /// Returns a `CompletedRep` only on the Up -> Down transition. Callers
    /// must not invoke this for frames that failed visibility or angle
    /// derivation; skipping a frame leaves all state untouched.
    pub fn advance(&mut self, percentage: f64) -> Option<CompletedRep> {
        self.peak_percentage = self.peak_percentage.max(percentage);

        if percentage >= self.policy.high_threshold && self.direction == Direction::Down {
            self.direction = Direction::Up;
            self.count += self.policy.step_on_rise;
        }

        let mut completed = None;
        if percentage <= self.policy.low_threshold && self.direction == Direction::Up {
            self.direction = Direction::Down;
            self.count += self.policy.step_on_fall;
            completed = Some(CompletedRep {
                depth: self.peak_percentage,
            });
            self.peak_percentage = 0.0;
        }

        completed
    }

    pub fn count(&self) -> f64 {
        self.count
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::{pushup, squat};

    #[test]
    fn squat_counts_once_per_full_cycle() {
        let mut counter = RepCounter::new(squat());
        let mut completed = Vec::new();
        for per in [0.0, 30.0, 60.0, 85.0, 95.0, 70.0, 40.0, 15.0, 5.0] {
            if let Some(rep) = counter.advance(per) {
                completed.push(rep);
            }
        }
        assert_eq!(counter.count(), 1.0);
        assert_eq!(counter.direction(), Direction::Down);
        assert_eq!(completed, vec![CompletedRep { depth: 95.0 }]);
    }

    #[test]
    fn squat_does_not_count_on_descent() {
        let mut counter = RepCounter::new(squat());
        counter.advance(50.0);
        counter.advance(85.0);
        // Entered the Up phase, but the squat convention counts only on the
        // return to standing.
        assert_eq!(counter.direction(), Direction::Up);
        assert_eq!(counter.count(), 0.0);
    }

    #[test]
    fn oscillation_around_one_threshold_never_double_counts() {
        let mut counter = RepCounter::new(squat());
        counter.advance(85.0); // Down -> Up
        for per in [79.0, 81.0, 79.0, 81.0, 79.0, 81.0] {
            counter.advance(per);
        }
        assert_eq!(counter.count(), 0.0);
        counter.advance(10.0); // Up -> Down, the single qualifying completion
        assert_eq!(counter.count(), 1.0);
        // Oscillation around the low threshold after completion.
        for per in [21.0, 19.0, 21.0, 19.0] {
            counter.advance(per);
        }
        assert_eq!(counter.count(), 1.0);
    }

    #[test]
    fn count_is_monotonic() {
        let mut counter = RepCounter::new(squat());
        let mut last = 0.0;
        let noisy = [0.0, 90.0, 10.0, 50.0, 95.0, 3.0, 81.0, 79.0, 12.0, 88.0, 2.0];
        for per in noisy {
            counter.advance(per);
            assert!(counter.count() >= last);
            last = counter.count();
        }
    }

    #[test]
    fn pushup_counts_half_reps_on_both_transitions() {
        let mut counter = RepCounter::new(pushup());
        counter.advance(50.0);
        assert_eq!(counter.count(), 0.0);
        counter.advance(96.0);
        assert_eq!(counter.count(), 0.5);
        assert_eq!(counter.direction(), Direction::Up);
        counter.advance(50.0);
        assert_eq!(counter.count(), 0.5);
        let rep = counter.advance(4.0).expect("cycle completes on fall");
        assert_eq!(counter.count(), 1.0);
        assert_eq!(rep.depth, 96.0);
    }

    #[test]
    fn depth_resets_between_cycles() {
        let mut counter = RepCounter::new(squat());
        counter.advance(98.0);
        let first = counter.advance(5.0).unwrap();
        assert_eq!(first.depth, 98.0);
        counter.advance(86.0);
        let second = counter.advance(5.0).unwrap();
        assert_eq!(second.depth, 86.0);
    }
}
