use log::warn;
use rodio::{OutputStream, Sink, Source};
use std::f32::consts::PI;
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;
use std::time::Duration;

use crate::feedback::Alerter;

struct BeepCommand {
    frequency_hz: f32,
    duration_ms: u64,
}

/// Finite sine tone used for form-alert beeps.
struct BeepTone {
    frequency_hz: f32,
    sample_rate: u32,
    num_sample: usize,
    total_samples: usize,
}

impl BeepTone {
    fn new(frequency_hz: f32, duration_ms: u64) -> Self {
        let sample_rate = 44100;
        Self {
            frequency_hz,
            sample_rate,
            num_sample: 0,
            total_samples: (sample_rate as u64 * duration_ms / 1000) as usize,
        }
    }
}

impl Iterator for BeepTone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        self.num_sample += 1;
        let t = self.num_sample as f32 / self.sample_rate as f32;
        let sample = (2.0 * PI * self.frequency_hz * t).sin();
        Some(sample * 0.15) // Lower amplitude to prevent clipping
    }
}

impl Source for BeepTone {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples - self.num_sample)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(
            self.total_samples as u64 * 1000 / self.sample_rate as u64,
        ))
    }
}

/// Plays alert beeps on a dedicated audio thread.
///
/// `alert` only posts to a channel and never blocks the frame pipeline;
/// audio setup or playback failures are logged and swallowed, they never
/// surface as pipeline errors.
pub struct Beeper {
    tx: Arc<Mutex<Option<Sender<BeepCommand>>>>,
}

impl Beeper {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<BeepCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<BeepCommand>();

        // Dedicated thread holding the non-Send audio objects.
        thread::Builder::new()
            .name("beep-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                        warn!("could not play beep: {err}");
                        continue;
                    }
                    if let Some(ref s) = sink {
                        s.append(BeepTone::new(cmd.frequency_hz, cmd.duration_ms));
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }
}

impl Default for Beeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Alerter for Beeper {
    fn alert(&self, frequency_hz: f32, duration_ms: u64) {
        match self.ensure_thread() {
            Ok(tx) => {
                if tx
                    .send(BeepCommand {
                        frequency_hz,
                        duration_ms,
                    })
                    .is_err()
                {
                    warn!("beep engine thread is gone; alert dropped");
                }
            }
            Err(err) => warn!("could not start beep engine: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beep_tone_is_finite() {
        let tone = BeepTone::new(1000.0, 200);
        let samples: Vec<f32> = tone.collect();
        assert_eq!(samples.len(), 8820); // 44100 * 0.2
        assert!(samples.iter().all(|s| s.abs() <= 0.15 + f32::EPSILON));
    }

    #[test]
    fn beep_tone_duration() {
        let tone = BeepTone::new(440.0, 200);
        assert_eq!(tone.total_duration(), Some(Duration::from_millis(200)));
    }
}
