use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::models::{Landmark, PoseFrame};

/// The pose-estimation seam: anything that yields one landmark snapshot per
/// frame. The real estimator (a camera plus a pose model) lives behind this
/// trait; so does the recorded-session replay used by the demo binary.
pub trait PoseSource {
    /// Next frame's landmarks, `Ok(None)` when the stream ends. An empty
    /// snapshot is valid and means no person was detected.
    fn next_frame(&mut self) -> Result<Option<PoseFrame>>;
}

/// Replays landmark frames recorded as JSON lines, one array of landmarks
/// per line. Blank lines are skipped.
pub struct ReplaySource {
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl ReplaySource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open landmark recording {}", path.display()))?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }
}

impl PoseSource for ReplaySource {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line.context("Failed to read landmark recording")?;
            if line.trim().is_empty() {
                continue;
            }
            let landmarks: Vec<Landmark> = serde_json::from_str(&line)
                .with_context(|| format!("Malformed landmark frame on line {}", self.line_no))?;
            return Ok(Some(PoseFrame(landmarks)));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("repwise-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn replays_frames_and_skips_blank_lines() {
        let path = temp_path("frames.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"[{{"id":0,"x":1.0,"y":2.0,"visibility":0.9}}]"#
        )
        .unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[]").unwrap();

        let mut source = ReplaySource::open(&path).unwrap();
        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first.0[0].x, 1.0);
        let second = source.next_frame().unwrap().unwrap();
        assert!(second.is_empty());
        assert!(source.next_frame().unwrap().is_none());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_line_is_an_error() {
        let path = temp_path("bad.jsonl");
        std::fs::write(&path, "not json\n").unwrap();
        let mut source = ReplaySource::open(&path).unwrap();
        assert!(source.next_frame().is_err());
        std::fs::remove_file(&path).ok();
    }
}
