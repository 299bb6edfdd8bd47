use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{RepSample, SessionStats};

/// Per-session rep history and derived workout statistics.
///
/// The history is append-only for the lifetime of the session; every
/// aggregate is computed on demand from it, never cached.
#[derive(Debug, Clone)]
pub struct SessionAnalytics {
    session_id: String,
    session_start: DateTime<Utc>,
    reps: Vec<RepSample>,
}

impl SessionAnalytics {
    /// Starts a new session at `now`.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    pub fn started_at(start: DateTime<Utc>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            session_start: start,
            reps: Vec::new(),
        }
    }

    /// Clears history and begins a fresh session.
    pub fn start_session(&mut self) {
        *self = Self::new();
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Appends one completed rep. Never fails.
    pub fn record_rep(&mut self, depth: f64, form_ok: bool) {
        self.record_rep_at(Utc::now(), depth, form_ok);
    }

    pub fn record_rep_at(&mut self, timestamp: DateTime<Utc>, depth: f64, form_ok: bool) {
        self.reps.push(RepSample {
            timestamp,
            depth,
            form_ok,
        });
    }

    pub fn rep_history(&self) -> &[RepSample] {
        &self.reps
    }

    /// Computes session statistics, or `None` when no reps have been
    /// recorded yet -- callers can tell "no data" from "all zeros".
    pub fn stats(&self) -> Option<SessionStats> {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> Option<SessionStats> {
        if self.reps.is_empty() {
            return None;
        }

        let total_reps = self.reps.len();
        let avg_depth = self.reps.iter().map(|r| r.depth).sum::<f64>() / total_reps as f64;
        let form_errors = self.reps.iter().filter(|r| !r.form_ok).count();
        let good_form_percentage = 100.0 * (1.0 - form_errors as f64 / total_reps as f64);

        // Pace needs at least two reps for a meaningful interval.
        let reps_per_min = if total_reps > 1 {
            let first = self.reps[0].timestamp;
            let last = self.reps[total_reps - 1].timestamp;
            let elapsed_min = (last - first).num_milliseconds() as f64 / 60_000.0;
            if elapsed_min > 0.0 {
                (total_reps - 1) as f64 / elapsed_min
            } else {
                0.0
            }
        } else {
            0.0
        };

        let session_duration_min =
            (now - self.session_start).num_milliseconds() as f64 / 60_000.0;

        Some(SessionStats {
            timestamp: now,
            total_reps,
            avg_depth,
            good_form_percentage,
            reps_per_min,
            session_duration_min,
        })
    }
}

impl Default for SessionAnalytics {
    fn default() -> Self {
        Self::new()
    }
}
