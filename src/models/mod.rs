pub mod landmark;
pub mod rep;

pub use landmark::{landmark_name, Landmark, PoseFrame};
pub use rep::{RepSample, SessionStats};
