//! Pausable millisecond timer
//!
//! Match countdown, storage action, stun and dialog all share this type.
//! Time is never read from a clock here: every call takes `now` (ms since
//! session start) so the whole simulation replays deterministically.

use serde::{Deserialize, Serialize};

/// Elapsed-time counter that excludes externally paused intervals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PausableTimer {
    /// Effective start. Signed so `shift` can push it past `now`.
    start_ms: i64,
    duration_ms: u64,
    accumulated_pause_ms: u64,
    /// Set while a pause interval is open
    pause_started_at: Option<u64>,
    active: bool,
}

impl PausableTimer {
    /// Create a timer that is already running
    pub fn started(now: u64, duration_ms: u64) -> Self {
        let mut timer = Self::default();
        timer.start(now, duration_ms);
        timer
    }

    /// Begin counting from `now`.
    ///
    /// Returns `false` and changes nothing if the timer is already running.
    pub fn start(&mut self, now: u64, duration_ms: u64) -> bool {
        if self.active {
            return false;
        }
        *self = Self {
            start_ms: as_signed(now),
            duration_ms,
            accumulated_pause_ms: 0,
            pause_started_at: None,
            active: true,
        };
        true
    }

    /// Stop the timer without expiring it
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Open or close a pause interval according to `externally_paused`.
    ///
    /// Must be called every frame; the pause flag is level-triggered.
    pub fn tick(&mut self, now: u64, externally_paused: bool) {
        if !self.active {
            return;
        }
        match (externally_paused, self.pause_started_at) {
            (true, None) => self.pause_started_at = Some(now),
            (false, Some(paused_at)) => {
                self.accumulated_pause_ms += now.saturating_sub(paused_at);
                self.pause_started_at = None;
            }
            _ => {}
        }
    }

    /// Move the effective start; positive `delta_ms` adds remaining time
    pub fn shift(&mut self, delta_ms: i64) {
        self.start_ms = self.start_ms.saturating_add(delta_ms);
    }

    fn raw_elapsed(&self, now: u64) -> i64 {
        let clock = as_signed(self.pause_started_at.unwrap_or(now));
        clock
            .saturating_sub(self.start_ms)
            .saturating_sub(as_signed(self.accumulated_pause_ms))
    }

    /// Unpaused time since start, frozen while a pause is open
    pub fn elapsed(&self, now: u64) -> u64 {
        if !self.active {
            return 0;
        }
        self.raw_elapsed(now).max(0) as u64
    }

    pub fn remaining(&self, now: u64) -> u64 {
        if !self.active {
            return 0;
        }
        as_signed(self.duration_ms).saturating_sub(self.raw_elapsed(now)).max(0) as u64
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.active && self.raw_elapsed(now) >= as_signed(self.duration_ms)
    }

    /// Completion fraction in `[0, 1]`, for progress bars
    pub fn progress(&self, now: u64) -> f32 {
        if !self.active {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed(now) as f32 / self.duration_ms as f32).min(1.0)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_at.is_some()
    }

    pub fn duration(&self) -> u64 {
        self.duration_ms
    }
}

fn as_signed(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_start_is_not_reentrant() {
        let mut timer = PausableTimer::started(100, 1000);
        assert!(!timer.start(600, 5000));
        assert_eq!(timer.duration(), 1000);
        assert_eq!(timer.elapsed(600), 500);
    }

    #[test]
    fn test_expiry_and_remaining() {
        let timer = PausableTimer::started(0, 1000);
        assert!(!timer.is_expired(999));
        assert_eq!(timer.remaining(999), 1);
        assert!(timer.is_expired(1000));
        assert_eq!(timer.remaining(5000), 0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut timer = PausableTimer::started(0, 10_000);
        timer.tick(2000, true);
        assert!(timer.is_paused());
        assert_eq!(timer.elapsed(2000), 2000);
        assert_eq!(timer.elapsed(9000), 2000);

        timer.tick(9000, true);
        timer.tick(9500, false);
        assert!(!timer.is_paused());
        assert_eq!(timer.elapsed(9500), 2000);
        assert_eq!(timer.elapsed(10_500), 3000);
    }

    #[test]
    fn test_shift_changes_remaining_immediately() {
        let mut timer = PausableTimer::started(0, 120_000);
        assert_eq!(timer.remaining(90_000), 30_000);
        timer.shift(10_000);
        assert_eq!(timer.remaining(90_000), 40_000);

        // Beyond the original duration is fine too
        let mut fresh = PausableTimer::started(0, 120_000);
        fresh.shift(10_000);
        assert_eq!(fresh.remaining(0), 130_000);
        assert_eq!(fresh.elapsed(0), 0);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let mut timer = PausableTimer::started(1000, u64::MAX);
        assert!(!timer.is_expired(5000));
        timer.shift(i64::MAX);
        assert_eq!(timer.elapsed(5000), 0);
        assert_eq!(timer.remaining(5000), i64::MAX as u64);

        let mut short = PausableTimer::started(1000, 500);
        short.shift(i64::MIN);
        assert!(short.is_expired(1000));
        assert_eq!(short.remaining(1000), 0);
    }

    #[test]
    fn test_shift_while_paused() {
        let mut timer = PausableTimer::started(0, 60_000);
        timer.tick(30_000, true);
        timer.shift(5_000);
        assert_eq!(timer.remaining(45_000), 35_000);
        timer.tick(50_000, false);
        assert_eq!(timer.remaining(50_000), 35_000);
    }

    #[test]
    fn test_cancel_and_inactive_reads() {
        let mut timer = PausableTimer::started(0, 1000);
        timer.cancel();
        assert!(!timer.is_active());
        assert!(!timer.is_expired(5000));
        assert_eq!(timer.remaining(5000), 0);
        assert_eq!(timer.progress(5000), 0.0);
        // Ticking an inactive timer never opens a pause
        timer.tick(6000, true);
        assert!(!timer.is_paused());
        assert!(timer.start(7000, 200));
    }

    #[test]
    fn test_progress() {
        let timer = PausableTimer::started(1000, 2000);
        assert_eq!(timer.progress(1000), 0.0);
        assert!((timer.progress(2000) - 0.5).abs() < 1e-6);
        assert_eq!(timer.progress(9000), 1.0);
        assert_eq!(PausableTimer::started(0, 0).progress(0), 1.0);
    }

    proptest! {
        /// Elapsed never goes backwards and never moves while paused
        #[test]
        fn prop_elapsed_monotone_and_frozen(
            steps in prop::collection::vec((1u64..500, any::<bool>()), 1..64)
        ) {
            let mut timer = PausableTimer::started(0, u64::MAX / 4);
            let mut now = 0;
            let mut last = timer.elapsed(now);
            for (dt, paused) in steps {
                now += dt;
                let was_paused = timer.is_paused();
                timer.tick(now, paused);
                let elapsed = timer.elapsed(now);
                prop_assert!(elapsed >= last);
                if was_paused && paused {
                    prop_assert_eq!(elapsed, last);
                }
                last = elapsed;
            }
        }

        /// Pausing for any length and resuming loses no time
        #[test]
        fn prop_pause_is_lossless(
            run in 0u64..60_000,
            pause in 0u64..600_000,
            duration in 60_000u64..120_000,
        ) {
            let mut timer = PausableTimer::started(0, duration);
            let before = timer.remaining(run);
            timer.tick(run, true);
            timer.tick(run + pause, false);
            prop_assert_eq!(timer.remaining(run + pause), before);
        }
    }
}
