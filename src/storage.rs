use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::SessionStats;

pub const DEFAULT_WORKOUT_DIR: &str = "workout_data";

const CSV_HEADER: &str =
    "timestamp,total_reps,avg_depth,good_form_percentage,reps_per_min,session_duration_min";

/// Writes one workout's statistics to a timestamped CSV file under `dir`,
/// creating the directory if needed. Returns the path written.
pub fn save_session_stats(stats: &SessionStats, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create workout directory {}", dir.display()))?;

    let filename = format!("workout_{}.csv", stats.timestamp.format("%Y%m%d_%H%M%S"));
    let path = dir.join(filename);

    let row = format!(
        "{}\n{},{},{:.2},{:.2},{:.2},{:.2}\n",
        CSV_HEADER,
        stats.timestamp.to_rfc3339(),
        stats.total_reps,
        stats.avg_depth,
        stats.good_form_percentage,
        stats.reps_per_min,
        stats.session_duration_min,
    );
    fs::write(&path, row)
        .with_context(|| format!("Failed to write workout data to {}", path.display()))?;

    Ok(path)
}

/// Loads the statistics row from a workout CSV file.
pub fn load_session_stats(path: &Path) -> Result<SessionStats> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workout data from {}", path.display()))?;
    let row = contents
        .lines()
        .nth(1)
        .ok_or_else(|| anyhow!("Workout file {} has no data row", path.display()))?;

    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != 6 {
        return Err(anyhow!(
            "Workout file {} has {} columns, expected 6",
            path.display(),
            fields.len()
        ));
    }

    let timestamp: DateTime<Utc> = fields[0]
        .parse()
        .with_context(|| format!("Bad timestamp in {}", path.display()))?;
    Ok(SessionStats {
        timestamp,
        total_reps: fields[1].parse().context("Bad total_reps")?,
        avg_depth: fields[2].parse().context("Bad avg_depth")?,
        good_form_percentage: fields[3].parse().context("Bad good_form_percentage")?,
        reps_per_min: fields[4].parse().context("Bad reps_per_min")?,
        session_duration_min: fields[5].parse().context("Bad session_duration_min")?,
    })
}

/// Finds and loads the most recently modified workout file in `dir`, if any.
pub fn load_latest_session_stats(dir: &Path) -> Result<Option<SessionStats>> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to list workout directory {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map_or(true, |(ts, _)| modified > *ts) {
            newest = Some((modified, path));
        }
    }

    match newest {
        Some((_, path)) => load_session_stats(&path).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_stats() -> SessionStats {
        SessionStats {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            total_reps: 12,
            avg_depth: 91.25,
            good_form_percentage: 75.0,
            reps_per_min: 8.5,
            session_duration_min: 4.2,
        }
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("repwise-storage-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn saves_and_reloads_stats_row() {
        let dir = temp_dir();
        let stats = sample_stats();
        let path = save_session_stats(&stats, &dir).unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("workout_20240501_123000"));

        let loaded = load_session_stats(&path).unwrap();
        assert_eq!(loaded.total_reps, 12);
        assert_eq!(loaded.avg_depth, 91.25);
        assert_eq!(loaded.good_form_percentage, 75.0);
        assert_eq!(loaded.reps_per_min, 8.5);
        assert_eq!(loaded.timestamp, stats.timestamp);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn latest_returns_none_for_missing_dir() {
        let dir = temp_dir();
        assert!(load_latest_session_stats(&dir).unwrap().is_none());
    }

    #[test]
    fn latest_picks_a_saved_workout() {
        let dir = temp_dir();
        save_session_stats(&sample_stats(), &dir).unwrap();
        let latest = load_latest_session_stats(&dir).unwrap().unwrap();
        assert_eq!(latest.total_reps, 12);
        fs::remove_dir_all(&dir).ok();
    }
}
