use crate::geometry::{angle_from_vertical, joint_angle, midpoint};
use crate::models::landmark::ids;
use crate::models::PoseFrame;

pub const MSG_KEEP_BACK_STRAIGHT: &str = "Keep back straight";
pub const MSG_ALIGN_KNEES: &str = "Align knees with feet";

/// The independent biomechanical checks this crate knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCheckKind {
    /// Shoulder-midpoint to hip-midpoint segment must stay near vertical.
    BackStraight,
    /// Knees must neither travel past the toes nor collapse inward.
    KneeAlignment,
}

/// Tunable thresholds for the form checks.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Maximum back lean from vertical, degrees.
    pub max_back_lean_deg: f64,
    /// Horizontal knee-over-ankle displacement tolerated, pixels.
    pub knee_margin_px: f64,
    /// Hip-knee-ankle angle below this signals inward knee collapse (valgus).
    pub min_knee_angle_deg: f64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_back_lean_deg: 15.0,
            knee_margin_px: 20.0,
            min_knee_angle_deg: 160.0,
        }
    }
}

/// Pass/fail outcome of all form checks for one frame.
///
/// Recomputed every frame; analytics records the verdict current at the
/// moment a rep completes.
#[derive(Debug, Clone)]
pub struct FormVerdict {
    pub form_ok: bool,
    /// Failure messages in check order; empty when everything passes.
    pub messages: Vec<&'static str>,
}

impl FormVerdict {
    pub fn all_clear() -> Self {
        Self {
            form_ok: true,
            messages: Vec::new(),
        }
    }
}

/// Runs a configured set of side-effect-free checks against the current
/// landmarks. Overall `form_ok` is the AND of every check.
#[derive(Debug, Clone)]
pub struct FormEvaluator {
    checks: Vec<FormCheckKind>,
    config: FormConfig,
}

impl FormEvaluator {
    pub fn new(checks: Vec<FormCheckKind>, config: FormConfig) -> Self {
        Self { checks, config }
    }

    pub fn evaluate(&self, frame: &PoseFrame) -> FormVerdict {
        let mut verdict = FormVerdict::all_clear();
        for check in &self.checks {
            let (pass, message) = match check {
                FormCheckKind::BackStraight => {
                    (self.back_straight(frame), MSG_KEEP_BACK_STRAIGHT)
                }
                FormCheckKind::KneeAlignment => (self.knees_aligned(frame), MSG_ALIGN_KNEES),
            };
            if !pass {
                verdict.form_ok = false;
                verdict.messages.push(message);
            }
        }
        verdict
    }

    /// Angle of the shoulder-center to hip-center segment from vertical must
    /// stay within the configured lean. Missing landmarks pass neutrally; the
    /// visibility gate is responsible for rejecting such frames.
    fn back_straight(&self, frame: &PoseFrame) -> bool {
        let points = (
            frame.point(ids::LEFT_SHOULDER),
            frame.point(ids::RIGHT_SHOULDER),
            frame.point(ids::LEFT_HIP),
            frame.point(ids::RIGHT_HIP),
        );
        let (Some(ls), Some(rs), Some(lh), Some(rh)) = points else {
            return true;
        };
        let shoulder_center = midpoint(ls, rs);
        let hip_center = midpoint(lh, rh);
        angle_from_vertical(shoulder_center, hip_center) < self.config.max_back_lean_deg
    }

    /// Two sub-checks per leg, combined with OR: horizontal knee-over-ankle
    /// displacement beyond the pixel margin (in the leg's direction of
    /// travel), and knee valgus (hip-knee-ankle angle collapsing inward).
    fn knees_aligned(&self, frame: &PoseFrame) -> bool {
        let points = (
            frame.point(ids::LEFT_HIP),
            frame.point(ids::RIGHT_HIP),
            frame.point(ids::LEFT_KNEE),
            frame.point(ids::RIGHT_KNEE),
            frame.point(ids::LEFT_ANKLE),
            frame.point(ids::RIGHT_ANKLE),
        );
        let (Some(lh), Some(rh), Some(lk), Some(rk), Some(la), Some(ra)) = points else {
            return true;
        };

        let margin = self.config.knee_margin_px;
        // Mirrored image: the left leg travels toward +x, the right toward -x.
        let left_over_toes = lk.x > la.x + margin;
        let right_over_toes = rk.x < ra.x - margin;

        let left_valgus = joint_angle(lh, lk, la) < self.config.min_knee_angle_deg;
        let right_valgus = joint_angle(rh, rk, ra) < self.config.min_knee_angle_deg;

        !(left_over_toes || right_over_toes || left_valgus || right_valgus)
    }
}
