use log::debug;
use serde::{Deserialize, Serialize};

use crate::analytics::SessionAnalytics;
use crate::counter::RepCounter;
use crate::error::FrameError;
use crate::exercise::{Direction, ExercisePolicy};
use crate::feedback::{Alerter, FeedbackBoard, DEFAULT_ALERT_COOLDOWN};
use crate::form::{FormConfig, FormEvaluator};
use crate::geometry::joint_angle;
use crate::models::PoseFrame;
use crate::visibility::{VisibilityGate, DEFAULT_VISIBILITY_THRESHOLD};

pub const GOOD_FORM_FEEDBACK: &str = "Good form!";

/// The per-frame output contract: everything a UI needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameResult {
    /// Completion percentage in [0, 100]; 0 on skipped frames.
    pub percentage: f64,
    pub form_ok: bool,
    /// Never empty when form is not OK or the frame was skipped.
    pub feedback: String,
    /// Running rep count; fractional for half-rep conventions.
    pub count: f64,
}

/// Remaps a completion percentage into a caller-supplied display range,
/// e.g. progress-bar pixel coordinates.
pub fn bar_value(percentage: f64, range_at_zero: f64, range_at_full: f64) -> f64 {
    range_at_zero + (range_at_full - range_at_zero) * (percentage / 100.0)
}

/// Frame-by-frame exercise pipeline: visibility gate, form checks, rep
/// state machine, and session analytics behind one synchronous call.
///
/// A frame that fails the gate or angle derivation produces a neutral
/// result and mutates neither the rep count nor the direction.
pub struct ExercisePipeline {
    policy: ExercisePolicy,
    gate: VisibilityGate,
    evaluator: FormEvaluator,
    counter: RepCounter,
    feedback: FeedbackBoard,
    analytics: SessionAnalytics,
    alerter: Box<dyn Alerter>,
}

impl ExercisePipeline {
    pub fn new(policy: ExercisePolicy, alerter: Box<dyn Alerter>) -> Self {
        let gate = VisibilityGate::new(
            policy.required_landmarks.clone(),
            DEFAULT_VISIBILITY_THRESHOLD,
        );
        let evaluator = FormEvaluator::new(policy.form_checks.clone(), FormConfig::default());
        let counter = RepCounter::new(policy.clone());
        Self {
            policy,
            gate,
            evaluator,
            counter,
            feedback: FeedbackBoard::new(DEFAULT_ALERT_COOLDOWN),
            analytics: SessionAnalytics::new(),
            alerter,
        }
    }

    /// Processes one frame's landmark snapshot and returns the frame result.
    /// Never fails: every per-frame error is folded into a neutral result.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameResult {
        match self.evaluate_frame(frame) {
            Ok(result) => result,
            Err(err) => {
                debug!("frame skipped: {err}");
                let feedback = err.feedback();
                self.feedback.push(&feedback, self.alerter.as_ref());
                FrameResult {
                    percentage: 0.0,
                    form_ok: false,
                    feedback,
                    count: self.counter.count(),
                }
            }
        }
    }

    fn evaluate_frame(&mut self, frame: &PoseFrame) -> Result<FrameResult, FrameError> {
        self.gate.check(frame)?;
        // Visible again: drop messages accumulated while parts were missing
        // so stale feedback does not linger. Form messages for the current
        // frame are re-added below.
        self.feedback.clear();

        let angle = self.primary_angle(frame)?;
        let percentage = self.policy.completion(angle);

        // Form checks run every frame, independent of rep phase.
        let verdict = self.evaluator.evaluate(frame);
        for message in &verdict.messages {
            self.feedback.push(message, self.alerter.as_ref());
        }

        if let Some(rep) = self.counter.advance(percentage) {
            self.analytics.record_rep(rep.depth, verdict.form_ok);
            debug!(
                "{} rep completed: count={} depth={:.1}",
                self.policy.name,
                self.counter.count(),
                rep.depth
            );
        }

        let feedback = self
            .feedback
            .latest()
            .unwrap_or(GOOD_FORM_FEEDBACK)
            .to_string();

        Ok(FrameResult {
            percentage,
            form_ok: verdict.form_ok,
            feedback,
            count: self.counter.count(),
        })
    }

    /// Average of the left and right driving-joint angles for symmetry.
    fn primary_angle(&self, frame: &PoseFrame) -> Result<f64, FrameError> {
        let angle_of = |(a, b, c): (usize, usize, usize)| -> Option<f64> {
            Some(joint_angle(
                frame.point(a)?,
                frame.point(b)?,
                frame.point(c)?,
            ))
        };
        let err = FrameError::Measurement {
            joint: self.policy.joint_label,
        };
        let left = angle_of(self.policy.left_triplet).ok_or_else(|| err.clone())?;
        let right = angle_of(self.policy.right_triplet).ok_or_else(|| err.clone())?;
        let angle = (left + right) / 2.0;
        if angle.is_finite() {
            Ok(angle)
        } else {
            Err(err)
        }
    }

    pub fn count(&self) -> f64 {
        self.counter.count()
    }

    pub fn direction(&self) -> Direction {
        self.counter.direction()
    }

    pub fn analytics(&self) -> &SessionAnalytics {
        &self.analytics
    }

    pub fn analytics_mut(&mut self) -> &mut SessionAnalytics {
        &mut self.analytics
    }

    pub fn policy(&self) -> &ExercisePolicy {
        &self.policy
    }
}
