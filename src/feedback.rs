use std::time::{Duration, Instant};

/// Best-effort audible alert. Implementations must never block the frame
/// pipeline; failures are swallowed (and logged) on the implementor's side.
pub trait Alerter {
    fn alert(&self, frequency_hz: f32, duration_ms: u64);
}

/// Alerter that does nothing, for headless runs and tests.
pub struct NullAlerter;

impl Alerter for NullAlerter {
    fn alert(&self, _frequency_hz: f32, _duration_ms: u64) {}
}

pub const ALERT_FREQUENCY_HZ: f32 = 1000.0;
pub const ALERT_DURATION_MS: u64 = 200;
pub const DEFAULT_ALERT_COOLDOWN: Duration = Duration::from_secs(1);

/// Accumulates user-facing feedback messages across a frame.
///
/// Duplicate messages are suppressed, and the first *new* message outside the
/// cooldown window triggers a single audible alert; further new messages
/// within the window are recorded for display but stay silent.
#[derive(Debug)]
pub struct FeedbackBoard {
    messages: Vec<String>,
    cooldown: Duration,
    last_alert: Option<Instant>,
}

impl FeedbackBoard {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            messages: Vec::new(),
            cooldown,
            last_alert: None,
        }
    }

    pub fn push(&mut self, message: &str, alerter: &dyn Alerter) {
        self.push_at(message, Instant::now(), alerter);
    }

    /// Same as `push` with an explicit clock, so tests can script time.
    pub fn push_at(&mut self, message: &str, now: Instant, alerter: &dyn Alerter) {
        if message.is_empty() || self.messages.iter().any(|m| m == message) {
            return;
        }
        self.messages.push(message.to_string());

        let cooled_down = self
            .last_alert
            .map_or(true, |last| now.duration_since(last) > self.cooldown);
        if cooled_down {
            alerter.alert(ALERT_FREQUENCY_HZ, ALERT_DURATION_MS);
            self.last_alert = Some(now);
        }
    }

    /// Drops pending messages. The alert cooldown deliberately survives a
    /// clear so a message flickering in and out cannot beep every frame.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The most recently added message, if any.
    pub fn latest(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingAlerter {
        calls: Cell<usize>,
    }

    impl CountingAlerter {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
            }
        }
    }

    impl Alerter for CountingAlerter {
        fn alert(&self, _frequency_hz: f32, _duration_ms: u64) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn duplicates_are_suppressed() {
        let alerter = CountingAlerter::new();
        let mut board = FeedbackBoard::new(DEFAULT_ALERT_COOLDOWN);
        let now = Instant::now();
        board.push_at("Keep back straight", now, &alerter);
        board.push_at("Keep back straight", now, &alerter);
        assert_eq!(board.latest(), Some("Keep back straight"));
        assert_eq!(alerter.calls.get(), 1);
    }

    #[test]
    fn two_messages_in_cooldown_alert_once() {
        let alerter = CountingAlerter::new();
        let mut board = FeedbackBoard::new(DEFAULT_ALERT_COOLDOWN);
        let t0 = Instant::now();
        board.push_at("Keep back straight", t0, &alerter);
        board.push_at("Align knees with feet", t0 + Duration::from_millis(300), &alerter);
        assert_eq!(alerter.calls.get(), 1);
        // Both are still recorded for display.
        assert_eq!(board.latest(), Some("Align knees with feet"));

        // A third message after the cooldown expires alerts again.
        board.push_at("Adjust position", t0 + Duration::from_millis(1500), &alerter);
        assert_eq!(alerter.calls.get(), 2);
    }

    #[test]
    fn cooldown_survives_clear() {
        let alerter = CountingAlerter::new();
        let mut board = FeedbackBoard::new(DEFAULT_ALERT_COOLDOWN);
        let t0 = Instant::now();
        board.push_at("Keep back straight", t0, &alerter);
        board.clear();
        assert_eq!(board.latest(), None);
        board.push_at("Keep back straight", t0 + Duration::from_millis(100), &alerter);
        assert_eq!(alerter.calls.get(), 1);
    }

    #[test]
    fn empty_messages_are_ignored() {
        let alerter = CountingAlerter::new();
        let mut board = FeedbackBoard::new(DEFAULT_ALERT_COOLDOWN);
        board.push_at("", Instant::now(), &alerter);
        assert_eq!(board.latest(), None);
        assert_eq!(alerter.calls.get(), 0);
    }
}
