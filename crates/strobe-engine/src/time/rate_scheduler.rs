/// Fraction of one interval tolerated as floating-point residue when draining.
///
/// `2.3 s` at `10 Hz` must produce 23 advances even though `2.3 / 0.1` evaluates
/// to `22.999…` in binary floating point.
const DRAIN_TOLERANCE: f64 = 1e-9;

/// Wall time that must elapse before the achieved frequency is recomputed.
pub const MEASUREMENT_WINDOW_SECS: f64 = 1.0;

/// Point-in-time copy of the scheduler outputs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SchedulerSnapshot {
    pub running: bool,
    pub target_frequency: f64,
    pub frame_counter: u64,
    pub achieved_frequency: f64,
}

impl Default for SchedulerSnapshot {
    fn default() -> Self {
        Self {
            running: false,
            target_frequency: 0.0,
            frame_counter: 0,
            achieved_frequency: 0.0,
        }
    }
}

/// Fixed-rate tick scheduler.
///
/// Converts irregular poll timestamps into a whole number of logical frame
/// advances at `target_frequency`, and measures the rate actually achieved over
/// non-overlapping windows of at least one second.
///
/// The scheduler owns no timer. Time samples are pushed in through
/// [`on_poll`](Self::on_poll), which keeps it deterministic under synthetic
/// timestamps. Subscription management lives in [`crate::core::Player`].
#[derive(Debug, Clone, Default)]
pub struct RateScheduler {
    target_frequency: f64,
    running: bool,
    accumulated_time: f64,
    last_poll: Option<f64>,
    frame_counter: u64,
    window_start: f64,
    window_advances: u64,
    achieved_frequency: f64,
}

impl RateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all state and starts counting at `target_hz`.
    ///
    /// Non-positive or non-finite frequencies leave the scheduler stopped with an
    /// achieved frequency of zero. Returns whether the scheduler is now running,
    /// so the caller knows if a poll subscription is needed.
    pub fn start(&mut self, target_hz: f64, now: f64) -> bool {
        *self = Self::default();

        if !target_hz.is_finite() || target_hz <= 0.0 {
            log::debug!("rate scheduler disabled (target {target_hz} Hz)");
            return false;
        }

        self.target_frequency = target_hz;
        self.window_start = now;
        self.last_poll = Some(now);
        self.running = true;

        log::debug!("rate scheduler started at {target_hz} Hz");
        true
    }

    /// Stops counting. Calling this on a stopped scheduler is a no-op.
    ///
    /// `frame_counter` keeps its last value for display until the next `start`.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!(
                "rate scheduler stopped after {} frames",
                self.frame_counter
            );
        }
        self.running = false;
        self.achieved_frequency = 0.0;
        self.last_poll = None;
        self.accumulated_time = 0.0;
        self.window_advances = 0;
    }

    /// Feeds one wall-clock sample, in seconds, and returns the number of frame
    /// advances it produced.
    pub fn on_poll(&mut self, now: f64) -> u64 {
        if !self.running {
            return 0;
        }
        if !now.is_finite() {
            log::debug!("ignoring non-finite poll timestamp {now}");
            return 0;
        }

        // Without a baseline the sample only establishes one.
        let Some(last) = self.last_poll.replace(now) else {
            return 0;
        };

        let mut delta = now - last;
        if !(delta >= 0.0) {
            log::debug!("poll timestamp went backwards by {:.6}s", -delta);
            delta = 0.0;
        }
        if now < self.window_start {
            self.window_start = now;
        }

        if !(self.target_frequency > 0.0) {
            return 0;
        }

        let advanced = self.drain(delta);
        self.measure(now);
        advanced
    }

    fn drain(&mut self, delta: f64) -> u64 {
        let interval = 1.0 / self.target_frequency;
        self.accumulated_time += delta;

        let whole = ((self.accumulated_time / interval) + DRAIN_TOLERANCE).floor();
        if whole < 1.0 {
            return 0;
        }

        // `as` saturates for out-of-range floats.
        let advanced = whole as u64;
        self.accumulated_time = (self.accumulated_time - whole * interval).clamp(0.0, interval);
        if self.accumulated_time >= interval {
            self.accumulated_time = 0.0;
        }

        self.frame_counter = self.frame_counter.saturating_add(advanced);
        self.window_advances = self.window_advances.saturating_add(advanced);

        if advanced > 1 {
            log::trace!("caught up {advanced} frames in one poll");
        }
        advanced
    }

    fn measure(&mut self, now: f64) {
        let elapsed = now - self.window_start;
        if elapsed >= MEASUREMENT_WINDOW_SECS {
            self.achieved_frequency = self.window_advances as f64 / elapsed;
            self.window_advances = 0;
            self.window_start = now;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn target_frequency(&self) -> f64 {
        self.target_frequency
    }

    /// Total frame advances since the last `start`.
    #[inline]
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    /// Rate measured over the last completed window, in Hz.
    #[inline]
    pub fn achieved_frequency(&self) -> f64 {
        self.achieved_frequency
    }

    /// Seconds carried over toward the next advance.
    #[inline]
    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    /// Progress toward the next advance in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        if self.target_frequency > 0.0 {
            (self.accumulated_time * self.target_frequency).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn snapshot(&self) -> SchedulerSnapshot {
        SchedulerSnapshot {
            running: self.running,
            target_frequency: self.target_frequency,
            frame_counter: self.frame_counter,
            achieved_frequency: self.achieved_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn started(hz: f64) -> RateScheduler {
        let mut s = RateScheduler::new();
        s.start(hz, 0.0);
        s
    }

    // ── disabled frequencies ──────────────────────────────────────────────

    #[test]
    fn non_positive_frequency_never_advances() {
        for hz in [0.0, -1.0, -60.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut s = RateScheduler::new();
            assert!(!s.start(hz, 0.0));
            for t in [0.0, 0.5, 1.0, 2.5, 10.0] {
                assert_eq!(s.on_poll(t), 0);
            }
            assert_eq!(s.frame_counter(), 0);
            assert_eq!(s.achieved_frequency(), 0.0);
            assert!(!s.is_running());
        }
    }

    #[test]
    fn polls_ignored_before_start() {
        let mut s = RateScheduler::new();
        s.on_poll(0.0);
        s.on_poll(5.0);
        assert_eq!(s.frame_counter(), 0);
    }

    // ── bootstrap ─────────────────────────────────────────────────────────

    #[test]
    fn first_poll_at_start_time_never_advances() {
        for t0 in [0.0, 0.25, 3.0, 1000.0] {
            let mut s = RateScheduler::new();
            s.start(60.0, t0);
            assert_eq!(s.on_poll(t0), 0);
            assert_eq!(s.frame_counter(), 0);
        }
    }

    #[test]
    fn missing_baseline_is_bootstrapped() {
        let mut s = started(60.0);
        s.last_poll = None;
        assert_eq!(s.on_poll(5.0), 0);
        assert_eq!(s.frame_counter(), 0);
        assert_eq!(s.on_poll(6.0), 60);
    }

    #[test]
    fn start_sets_poll_baseline() {
        let mut s = started(10.0);
        assert_eq!(s.on_poll(2.3), 23);
        assert_eq!(s.frame_counter(), 23);
        assert!(approx_eq(s.accumulated_time(), (2.3_f64 - 23.0 * 0.1).max(0.0)));
    }

    #[test]
    fn first_window_counts_from_start() {
        let mut s = started(10.0);
        s.on_poll(0.5);
        s.on_poll(1.0);
        assert!(approx_eq(s.achieved_frequency(), 10.0));
    }

    // ── non-finite timestamps ─────────────────────────────────────────────

    #[test]
    fn non_finite_timestamps_are_ignored() {
        let mut s = started(10.0);
        s.on_poll(1.0);
        for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(s.on_poll(t), 0);
        }
        assert_eq!(s.frame_counter(), 10);
        assert_eq!(s.on_poll(2.0), 10);
        assert_eq!(s.frame_counter(), 20);
    }

    // ── accumulation ──────────────────────────────────────────────────────

    #[test]
    fn two_hz_over_three_seconds() {
        let mut s = started(2.0);
        for t in [0.0, 1.0, 2.0, 3.0] {
            s.on_poll(t);
        }
        assert_eq!(s.frame_counter(), 6);
    }

    #[test]
    fn partial_intervals_carry_over() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        assert_eq!(s.on_poll(0.06), 0);
        assert_eq!(s.on_poll(0.12), 1);
        assert!(approx_eq(s.accumulated_time(), 0.02));
        assert!(approx_eq(s.phase(), 0.2));
    }

    #[test]
    fn catch_up_after_long_delay() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        let advanced = s.on_poll(2.3);
        assert_eq!(advanced, 23);
        assert_eq!(s.frame_counter(), 23);
        assert!(approx_eq(s.accumulated_time(), (2.3_f64 - 23.0 * 0.1).max(0.0)));
    }

    #[test]
    fn jittered_polls_match_elapsed_time() {
        let mut s = started(60.0);
        let mut t = 0.0;
        s.on_poll(t);
        // 8 ms and 9 ms alternating, 10 seconds total-ish.
        for i in 0..1176 {
            t += if i % 2 == 0 { 0.008 } else { 0.009 };
            s.on_poll(t);
        }
        let expected = (t * 60.0).floor() as u64;
        assert!(s.frame_counter().abs_diff(expected) <= 1, "{} vs {expected}", s.frame_counter());
        assert!(s.accumulated_time() < 1.0 / 60.0);
    }

    #[test]
    fn zero_delta_is_harmless() {
        let mut s = RateScheduler::new();
        s.start(30.0, 1.0);
        for _ in 0..100 {
            assert_eq!(s.on_poll(1.0), 0);
        }
        assert_eq!(s.frame_counter(), 0);
    }

    #[test]
    fn huge_frequency_does_not_spin() {
        let mut s = started(1e300);
        s.on_poll(0.0);
        let advanced = s.on_poll(10.0);
        assert_eq!(advanced, u64::MAX);
        assert_eq!(s.frame_counter(), u64::MAX);
        s.on_poll(20.0);
        assert_eq!(s.frame_counter(), u64::MAX);
    }

    #[test]
    fn residual_stays_below_one_interval() {
        let mut s = started(7.0);
        let mut t = 0.0;
        s.on_poll(t);
        for i in 0..500 {
            t += 0.001 * (i % 37) as f64;
            s.on_poll(t);
            assert!(s.accumulated_time() >= 0.0);
            assert!(s.accumulated_time() < 1.0 / 7.0);
        }
    }

    // ── measurement window ────────────────────────────────────────────────

    #[test]
    fn achieved_frequency_recomputed_after_one_second() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        s.on_poll(0.5);
        assert_eq!(s.achieved_frequency(), 0.0);
        s.on_poll(1.2);
        // 12 advances over 1.2 s of window.
        assert_eq!(s.frame_counter(), 12);
        assert!(approx_eq(s.achieved_frequency(), 12.0 / 1.2));
    }

    #[test]
    fn achieved_frequency_holds_between_windows() {
        let mut s = started(4.0);
        s.on_poll(0.0);
        s.on_poll(1.0);
        let first = s.achieved_frequency();
        assert!(approx_eq(first, 4.0));
        s.on_poll(1.5);
        assert_eq!(s.achieved_frequency(), first);
        s.on_poll(1.9);
        assert_eq!(s.achieved_frequency(), first);
    }

    #[test]
    fn window_law_counts_each_span_once() {
        let mut s = started(20.0);
        s.on_poll(0.0);
        // 1.5 s span with polls every 100 ms: 30 advances.
        let mut t = 0.0;
        while t < 1.45 {
            t += 0.1;
            s.on_poll(t);
        }
        // Window closed at the first poll past 1.0 s.
        let closed = s.achieved_frequency();
        assert!(closed > 19.0 && closed < 21.0, "{closed}");
        assert!(s.window_advances < 20);
    }

    #[test]
    fn window_resets_count_after_measurement() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        s.on_poll(1.0);
        assert_eq!(s.window_advances, 0);
        assert!(approx_eq(s.window_start, 1.0));
        s.on_poll(1.35);
        assert_eq!(s.window_advances, 3);
    }

    // ── stop / restart ────────────────────────────────────────────────────

    #[test]
    fn stop_is_idempotent() {
        let mut once = started(10.0);
        once.on_poll(0.0);
        once.on_poll(1.5);
        let mut twice = once.clone();

        once.stop();
        twice.stop();
        twice.stop();

        assert_eq!(once.snapshot(), twice.snapshot());
        assert!(!twice.is_running());
        assert_eq!(twice.achieved_frequency(), 0.0);
    }

    #[test]
    fn stopped_scheduler_ignores_polls() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        s.on_poll(1.0);
        let frames = s.frame_counter();
        s.stop();
        s.on_poll(5.0);
        assert_eq!(s.frame_counter(), frames);
        assert_eq!(s.achieved_frequency(), 0.0);
    }

    #[test]
    fn start_resets_counter() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        s.on_poll(2.0);
        assert_eq!(s.frame_counter(), 20);
        s.start(5.0, 2.0);
        assert_eq!(s.frame_counter(), 0);
        assert_eq!(s.on_poll(2.0), 0);
        s.on_poll(3.0);
        assert_eq!(s.frame_counter(), 5);
    }

    // ── backwards clock ───────────────────────────────────────────────────

    #[test]
    fn backwards_timestamp_never_decreases_outputs() {
        let mut s = started(10.0);
        s.on_poll(0.0);
        s.on_poll(1.5);
        let frames = s.frame_counter();
        let achieved = s.achieved_frequency();

        assert_eq!(s.on_poll(0.2), 0);
        assert_eq!(s.frame_counter(), frames);
        assert!(s.achieved_frequency() >= achieved);
        assert!(s.accumulated_time() >= 0.0);

        // Counting resumes from the new baseline.
        s.on_poll(0.5);
        assert_eq!(s.frame_counter(), frames + 3);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut s = started(3.0);
        s.on_poll(0.0);
        s.on_poll(1.0);
        let snap = s.snapshot();
        assert!(snap.running);
        assert_eq!(snap.target_frequency, 3.0);
        assert_eq!(snap.frame_counter, 3);
        assert!(approx_eq(snap.achieved_frequency, 3.0));
    }
}
