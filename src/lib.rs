pub mod analytics;
pub mod audio;
pub mod counter;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod form;
pub mod geometry;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod visibility;

pub use analytics::SessionAnalytics;
pub use counter::RepCounter;
pub use error::FrameError;
pub use exercise::{policy_for, pushup, squat, Direction, ExercisePolicy};
pub use feedback::{Alerter, FeedbackBoard, NullAlerter};
pub use form::{FormEvaluator, FormVerdict};
pub use models::{Landmark, PoseFrame, RepSample, SessionStats};
pub use pipeline::{bar_value, ExercisePipeline, FrameResult};
pub use source::{PoseSource, ReplaySource};
pub use visibility::VisibilityGate;
