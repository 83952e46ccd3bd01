use std::time::{Duration, Instant};

/// Outcome of one cooperative animation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The cursor advanced; the host should redraw.
    Changed,
    /// Nothing changed; no repaint is needed.
    Unchanged,
}

/// Repeating linear driver for the animation cursor.
///
/// Walks an integer value from `line_count` down to 0 over one cycle, then
/// starts over, indefinitely. The cycle length is fixed when the driver is
/// created; restarting only rewinds the clock.
#[derive(Debug)]
pub(crate) struct FrameDriver {
    line_count: usize,
    duration: Duration,
    started_at: Instant,
    last_value: Option<usize>,
}

impl FrameDriver {
    pub(crate) fn new(line_count: usize, duration: Duration, now: Instant) -> Self {
        Self {
            line_count: line_count.max(1),
            // Minimum duration to avoid division by zero.
            duration: duration.max(Duration::from_millis(1)),
            started_at: now,
            last_value: None,
        }
    }

    /// Rewind the clock and forget the de-dup state.
    pub(crate) fn restart(&mut self, now: Instant) {
        self.started_at = now;
        self.last_value = None;
    }

    /// Evaluate the driver at `now`.
    ///
    /// Returns the new cursor position when the interpolated value moved
    /// since the last step, `None` otherwise. The underlying clock can
    /// produce the same value across many consecutive steps, so callers
    /// must rely on this de-duplication rather than redrawing per step.
    pub(crate) fn step(&mut self, now: Instant) -> Option<usize> {
        let elapsed = now.saturating_duration_since(self.started_at);
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).fract() as f32;
        let raw = (self.line_count as f32 * (1.0 - progress)).floor() as usize;
        let cursor = raw % self.line_count;
        if self.last_value == Some(cursor) {
            return None;
        }
        self.last_value = Some(cursor);
        Some(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn first_step_lands_on_slot_zero() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, millis(1200), start);
        assert_eq!(driver.step(start), Some(0));
    }

    #[test]
    fn repeated_steps_at_the_same_value_are_suppressed() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, millis(1200), start);
        assert_eq!(driver.step(start), Some(0));
        assert_eq!(driver.step(start), None);
        assert_eq!(driver.step(start + millis(50)), Some(11));
        assert_eq!(driver.step(start + millis(60)), None);
        assert_eq!(driver.step(start + millis(99)), None);
        assert_eq!(driver.step(start + millis(150)), Some(10));
    }

    #[test]
    fn one_cycle_emits_every_slot_exactly_once() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, millis(1200), start);
        driver.step(start);

        let mut emitted = Vec::new();
        for ms in 1..=1200 {
            if let Some(cursor) = driver.step(start + millis(ms)) {
                emitted.push(cursor);
            }
        }
        assert_eq!(emitted, vec![11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn cycle_boundary_does_not_repeat_slot_zero() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, millis(1200), start);
        assert_eq!(driver.step(start + millis(1150)), Some(0));
        // The next cycle starts on the same slot; the guard swallows it.
        assert_eq!(driver.step(start + millis(1200)), None);
        assert_eq!(driver.step(start + millis(1250)), Some(11));
    }

    #[test]
    fn restart_rewinds_the_clock() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, millis(1200), start);
        assert_eq!(driver.step(start + millis(600)), Some(6));

        driver.restart(start + millis(600));
        assert_eq!(driver.step(start + millis(600)), Some(0));
    }

    #[test]
    fn zero_duration_is_clamped() {
        let start = Instant::now();
        let mut driver = FrameDriver::new(12, Duration::ZERO, start);
        assert!(driver.step(start + millis(5)).is_some());
    }
}
