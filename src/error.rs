/// Per-frame, non-fatal failures.
///
/// None of these propagate past the frame boundary: the pipeline converts
/// each into a neutral frame result with user-facing feedback and leaves the
/// rep state untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// The pose source returned an empty landmark set.
    #[error("No person detected")]
    NoPersonDetected,

    /// Required landmarks are missing or below the confidence threshold.
    /// The message names the affected body parts for on-screen feedback.
    #[error("{0}")]
    InsufficientVisibility(String),

    /// Degenerate or invalid geometry while deriving a joint angle.
    #[error("Could not measure {joint} angle")]
    Measurement { joint: &'static str },
}

impl FrameError {
    /// The user-facing feedback string for this frame.
    pub fn feedback(&self) -> String {
        self.to_string()
    }
}
