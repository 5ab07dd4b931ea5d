//! Ticker and countdown formatting.

use std::time::{Duration, Instant};

/// A cancellable repeating deadline polled from the event loop.
///
/// There is at most one pending deadline: arming replaces it, so the ticker
/// can never be scheduled twice.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// A disarmed ticker firing once per second.
    #[must_use]
    pub const fn every_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    /// Start ticking, first tick one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stop ticking. Pending ticks are discarded.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Check if the ticker is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of ticks that fell due up to `now`, consuming them.
    pub fn take_due(&mut self, now: Instant) -> u32 {
        let Some(mut next) = self.next_due else {
            return 0;
        };

        let mut due = 0;
        while next <= now {
            due += 1;
            next += self.period;
        }
        self.next_due = Some(next);
        due
    }

    /// Time until the next tick, if armed.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|next| next.saturating_duration_since(now))
    }
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_disarmed() {
        let mut ticker = Ticker::every_second();
        assert!(!ticker.is_armed());
        assert_eq!(ticker.take_due(Instant::now() + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_ticker_counts_elapsed_periods() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second();
        ticker.arm(start);

        assert_eq!(ticker.take_due(start + Duration::from_millis(999)), 0);
        assert_eq!(ticker.take_due(start + Duration::from_millis(1000)), 1);
        assert_eq!(ticker.take_due(start + Duration::from_millis(3500)), 2);
        assert_eq!(ticker.take_due(start + Duration::from_millis(3900)), 0);
    }

    #[test]
    fn test_ticker_rearm_replaces_deadline() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second();
        ticker.arm(start);
        ticker.arm(start + Duration::from_secs(5));

        assert_eq!(ticker.take_due(start + Duration::from_secs(5)), 0);
        assert_eq!(ticker.take_due(start + Duration::from_secs(6)), 1);
    }

    #[test]
    fn test_ticker_cancel() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second();
        ticker.arm(start);
        ticker.cancel();

        assert!(!ticker.is_armed());
        assert_eq!(ticker.take_due(start + Duration::from_secs(3)), 0);
        assert_eq!(ticker.time_until_next(start), None);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
    }
}
