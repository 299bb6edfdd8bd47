use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed repetition as recorded by session analytics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepSample {
    pub timestamp: DateTime<Utc>,
    /// Peak completion percentage reached during the rep cycle.
    pub depth: f64,
    pub form_ok: bool,
}

/// Aggregate workout statistics, derived on demand from the rep history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub timestamp: DateTime<Utc>,
    pub total_reps: usize,
    pub avg_depth: f64,
    pub good_form_percentage: f64,
    pub reps_per_min: f64,
    pub session_duration_min: f64,
}
