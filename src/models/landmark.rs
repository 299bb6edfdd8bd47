use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Pose landmark indices used by this crate (BlazePose/MediaPipe numbering).
pub mod ids {
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
}

/// One tracked body joint as emitted by the pose estimator for a single frame.
///
/// Coordinates are image pixels; `visibility` is the estimator's confidence
/// in [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub visibility: f64,
}

impl Landmark {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Snapshot of all landmarks detected in one frame, ordered by landmark id.
///
/// Not retained between frames; the pipeline receives a fresh snapshot per
/// frame and must not assume positions persist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseFrame(pub Vec<Landmark>);

impl PoseFrame {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, id: usize) -> Option<&Landmark> {
        self.0.get(id)
    }

    /// Position of a landmark, if present in this frame.
    pub fn point(&self, id: usize) -> Option<Point> {
        self.get(id).map(Landmark::point)
    }

    /// Whether a landmark is present with confidence at or above `threshold`.
    pub fn is_visible(&self, id: usize, threshold: f64) -> bool {
        self.get(id).is_some_and(|lm| lm.visibility >= threshold)
    }
}

/// Human-readable name for a landmark id, for visibility feedback.
pub fn landmark_name(id: usize) -> String {
    match id {
        ids::LEFT_SHOULDER => "left shoulder".to_string(),
        ids::RIGHT_SHOULDER => "right shoulder".to_string(),
        ids::LEFT_ELBOW => "left elbow".to_string(),
        ids::RIGHT_ELBOW => "right elbow".to_string(),
        ids::LEFT_WRIST => "left wrist".to_string(),
        ids::RIGHT_WRIST => "right wrist".to_string(),
        ids::LEFT_HIP => "left hip".to_string(),
        ids::RIGHT_HIP => "right hip".to_string(),
        ids::LEFT_KNEE => "left knee".to_string(),
        ids::RIGHT_KNEE => "right knee".to_string(),
        ids::LEFT_ANKLE => "left ankle".to_string(),
        ids::RIGHT_ANKLE => "right ankle".to_string(),
        other => format!("body part {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_threshold_is_inclusive() {
        let frame = PoseFrame(vec![Landmark {
            id: 0,
            x: 1.0,
            y: 2.0,
            visibility: 0.3,
        }]);
        assert!(frame.is_visible(0, 0.3));
        assert!(!frame.is_visible(0, 0.31));
        assert!(!frame.is_visible(1, 0.0));
    }

    #[test]
    fn names_known_and_unknown_parts() {
        assert_eq!(landmark_name(ids::LEFT_KNEE), "left knee");
        assert_eq!(landmark_name(7), "body part 7");
    }
}
