use instant::Instant;

use crate::constants::MAX_FRAME_DELTA;

/// Single time source for the scene.
///
/// `elapsed()` is the exact sum of every delta `tick` has returned. Deltas are
/// sanitised here so nothing downstream ever sees a negative, NaN or
/// stall-sized step.
#[derive(Clone, Debug)]
pub struct FrameClock {
    elapsed_total: f64,
    last_delta: f64,
    max_delta: f64,
    ticks: u64,
    last_instant: Option<Instant>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    /// A non-positive or non-finite `max_delta` disables the stall clamp.
    pub fn new(max_delta: f64) -> Self {
        let max_delta = if max_delta.is_finite() && max_delta > 0.0 {
            max_delta
        } else {
            f64::INFINITY
        };
        Self {
            elapsed_total: 0.0,
            last_delta: 0.0,
            max_delta,
            ticks: 0,
            last_instant: None,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed_total
    }

    pub fn delta(&self) -> f64 {
        self.last_delta
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn sanitize(&self, raw: f64) -> f64 {
        if !raw.is_finite() || raw < 0.0 {
            log::warn!("[clock] rejected frame delta {raw}, using 0");
            return 0.0;
        }
        raw.min(self.max_delta)
    }

    /// Advance by a host-reported delta and return the delta actually applied.
    pub fn tick(&mut self, host_delta: f64) -> f64 {
        let delta = self.sanitize(host_delta);
        self.elapsed_total += delta;
        self.last_delta = delta;
        self.ticks += 1;
        delta
    }

    /// Advance by wall-clock time since the previous call. The first call
    /// after construction or `reset` reports `0`.
    pub fn tick_now(&mut self) -> f64 {
        let now = Instant::now();
        let raw = match self.last_instant.replace(now) {
            Some(prev) => now.duration_since(prev).as_secs_f64(),
            None => 0.0,
        };
        self.tick(raw)
    }

    pub fn reset(&mut self) {
        self.elapsed_total = 0.0;
        self.last_delta = 0.0;
        self.ticks = 0;
        self.last_instant = None;
    }
}
