use serde::{Deserialize, Serialize};

use crate::form::FormCheckKind;
use crate::models::landmark::ids;

/// Coarse phase of the rep cycle.
///
/// Phase names track completion percentage, not body height: `Up` means the
/// movement is in its high-completion half (deep squat, lowered push-up),
/// `Down` means at or returning to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Down,
    Up,
}

/// Everything that varies between exercises: which joints drive the rep,
/// how the joint angle maps to completion, and how transitions count.
///
/// The squat and push-up presets deliberately keep their divergent counting
/// conventions (one whole rep per cycle at 80/20 vs. half reps at 95/5);
/// unifying them is a product decision, not an implementation one.
#[derive(Debug, Clone)]
pub struct ExercisePolicy {
    pub name: &'static str,

    /// Primary joint triplets (a, vertex, c) for the left and right side;
    /// the driving angle is the average of both.
    pub left_triplet: (usize, usize, usize),
    pub right_triplet: (usize, usize, usize),
    /// Label for the driving joint, used in measurement-failure feedback.
    pub joint_label: &'static str,

    /// Angle (degrees) at full completion, mapped to 100%.
    pub angle_at_full: f64,
    /// Angle (degrees) at rest, mapped to 0%.
    pub angle_at_rest: f64,

    /// Completion at or above this flips Down -> Up.
    pub high_threshold: f64,
    /// Completion at or below this flips Up -> Down.
    pub low_threshold: f64,

    /// Count increment applied on the Down -> Up transition.
    pub step_on_rise: f64,
    /// Count increment applied on the Up -> Down transition. The completed-rep
    /// record is appended only on this transition.
    pub step_on_fall: f64,

    pub initial_direction: Direction,

    /// Landmarks the visibility gate requires, in feedback order.
    pub required_landmarks: Vec<usize>,

    /// Form checks evaluated every frame for this exercise.
    pub form_checks: Vec<FormCheckKind>,
}

impl ExercisePolicy {
    /// Maps a joint angle to a completion percentage in [0, 100] via linear
    /// interpolation between the calibrated rest and full angles.
    pub fn completion(&self, angle: f64) -> f64 {
        let span = self.angle_at_rest - self.angle_at_full;
        ((self.angle_at_rest - angle) / span * 100.0).clamp(0.0, 100.0)
    }
}

/// Squat: hip-knee-ankle angle, 90 deg -> 100%, 180 deg -> 0%.
/// One rep counted per full cycle, on the return to standing.
pub fn squat() -> ExercisePolicy {
    ExercisePolicy {
        name: "squat",
        left_triplet: (ids::LEFT_HIP, ids::LEFT_KNEE, ids::LEFT_ANKLE),
        right_triplet: (ids::RIGHT_HIP, ids::RIGHT_KNEE, ids::RIGHT_ANKLE),
        joint_label: "knee",
        angle_at_full: 90.0,
        angle_at_rest: 180.0,
        high_threshold: 80.0,
        low_threshold: 20.0,
        step_on_rise: 0.0,
        step_on_fall: 1.0,
        initial_direction: Direction::Down,
        required_landmarks: vec![
            ids::LEFT_SHOULDER,
            ids::RIGHT_SHOULDER,
            ids::LEFT_HIP,
            ids::RIGHT_HIP,
            ids::LEFT_KNEE,
            ids::RIGHT_KNEE,
            ids::LEFT_ANKLE,
            ids::RIGHT_ANKLE,
            ids::LEFT_WRIST,
            ids::RIGHT_WRIST,
        ],
        form_checks: vec![FormCheckKind::BackStraight, FormCheckKind::KneeAlignment],
    }
}

/// Push-up: shoulder-elbow-wrist angle, 90 deg -> 100%, 170 deg -> 0%.
/// Half a rep counted at each of the symmetric 95/5 transitions.
pub fn pushup() -> ExercisePolicy {
    ExercisePolicy {
        name: "pushup",
        left_triplet: (ids::LEFT_SHOULDER, ids::LEFT_ELBOW, ids::LEFT_WRIST),
        right_triplet: (ids::RIGHT_SHOULDER, ids::RIGHT_ELBOW, ids::RIGHT_WRIST),
        joint_label: "elbow",
        angle_at_full: 90.0,
        angle_at_rest: 170.0,
        high_threshold: 95.0,
        low_threshold: 5.0,
        step_on_rise: 0.5,
        step_on_fall: 0.5,
        initial_direction: Direction::Down,
        required_landmarks: vec![
            ids::LEFT_SHOULDER,
            ids::RIGHT_SHOULDER,
            ids::LEFT_ELBOW,
            ids::RIGHT_ELBOW,
            ids::LEFT_WRIST,
            ids::RIGHT_WRIST,
        ],
        form_checks: Vec::new(),
    }
}

/// Looks up a policy preset by exercise name.
pub fn policy_for(name: &str) -> Option<ExercisePolicy> {
    match name {
        "squat" => Some(squat()),
        "pushup" => Some(pushup()),
        _ => None,
    }
}
