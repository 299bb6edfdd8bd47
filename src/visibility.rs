use crate::error::FrameError;
use crate::models::{landmark_name, PoseFrame};

/// Default confidence below which a landmark counts as not visible.
pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.3;

/// Gates the per-frame pipeline on enough of the body being trackable.
///
/// If the gate fails, the frame is skipped for rep and form purposes and the
/// returned error carries actionable feedback naming the missing parts.
#[derive(Debug, Clone)]
pub struct VisibilityGate {
    required: Vec<usize>,
    /// Frames with fewer landmarks than this fail outright; derived from the
    /// highest required landmark id.
    min_landmarks: usize,
    threshold: f64,
}

impl VisibilityGate {
    pub fn new(required: Vec<usize>, threshold: f64) -> Self {
        let min_landmarks = required.iter().max().map_or(0, |max| max + 1);
        Self {
            required,
            min_landmarks,
            threshold,
        }
    }

    /// Checks that every required landmark is present and confident enough.
    ///
    /// Missing parts are reported in the order of the required list, so the
    /// feedback string is stable across frames with the same gaps.
    pub fn check(&self, frame: &PoseFrame) -> Result<(), FrameError> {
        if frame.is_empty() {
            return Err(FrameError::NoPersonDetected);
        }
        if frame.len() < self.min_landmarks {
            return Err(FrameError::InsufficientVisibility(
                "Please ensure full body is visible".to_string(),
            ));
        }

        let missing: Vec<String> = self
            .required
            .iter()
            .filter(|&&id| !frame.is_visible(id, self.threshold))
            .map(|&id| landmark_name(id))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(FrameError::InsufficientVisibility(format!(
                "Adjust position to show: {}",
                missing.join(", ")
            )))
        }
    }
}
