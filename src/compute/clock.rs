//! Fixed-period step timer.
//!
//! Time is passed in as a [`Duration`] since an arbitrary epoch so the same
//! clock serves native callers (`Instant::elapsed`) and browsers
//! (`performance.now()`). Ticks that are missed because a step or the caller
//! ran late are dropped, never queued.

use std::time::Duration;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Decides when the next generation is due.
#[derive(Debug, Clone)]
pub struct StepClock {
    period: Duration,
    next_due: Duration,
    skipped: u64,
}

impl StepClock {
    /// Clock whose first tick is due one period after `now`.
    pub fn new(period: Duration, now: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: now.saturating_add(period),
            skipped: 0,
        }
    }

    /// Clock for a period in milliseconds.
    pub fn from_millis(period_ms: u64, now: Duration) -> Self {
        Self::new(Duration::from_millis(period_ms), now)
    }

    /// Returns true if a step is due at `now`.
    ///
    /// At most one step is reported per call; if more than one period has
    /// passed the backlog is discarded and the next tick is aligned to the
    /// original schedule.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }

        let period_ns = self.period.as_nanos();
        let behind_ns = (now - self.next_due).as_nanos();
        let missed = behind_ns / period_ns;
        let advance_ns = (missed + 1) * period_ns;
        let advance = u64::try_from(advance_ns).map_or(Duration::MAX, Duration::from_nanos);
        self.next_due = self.next_due.saturating_add(advance);

        if missed > 0 {
            let missed = u64::try_from(missed).unwrap_or(u64::MAX);
            self.skipped = self.skipped.saturating_add(missed);
            log::debug!("Step clock behind schedule, skipped {missed} tick(s)");
        }
        true
    }

    /// Change the period; the next tick is due one new period after `now`.
    pub fn set_period(&mut self, period: Duration, now: Duration) {
        self.period = period.max(MIN_PERIOD);
        self.next_due = now.saturating_add(self.period);
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time at which the next tick becomes due.
    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    /// Total ticks dropped because the caller fell behind.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
