use web_time::{Duration, Instant};

/// Frame clock producing per-frame delta and elapsed time, with a smoothed
/// FPS readout.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Start of the clock.
    start: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Longest delta handed out; a stalled frame is treated as this long.
    max_delta: Duration,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

/// Default delta clamp (seconds).
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl FrameClock {
    /// Clock starting now. Deltas are clamped to `max_delta` seconds.
    #[must_use]
    pub fn new(max_delta: f32) -> Self {
        let now = Instant::now();
        let max_delta = if max_delta.is_finite() {
            max_delta.max(0.0)
        } else {
            DEFAULT_MAX_DELTA
        };
        Self {
            start: now,
            last_frame: now,
            max_delta: Duration::from_secs_f32(max_delta),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Mark the start of a frame. Returns `(delta, elapsed)` in seconds.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(raw);
        let delta = raw.min(self.max_delta);
        (delta.as_secs_f32(), now.duration_since(self.start).as_secs_f32())
    }

    /// Fold one frame time into the FPS average.
    fn record(&mut self, frame_time: Duration) {
        let secs = frame_time.as_secs_f32();
        if secs > 0.0 {
            let instant_fps = 1.0 / secs;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Clamp an externally supplied delta the same way [`tick`](Self::tick)
    /// does. Negative and non-finite deltas become zero.
    #[must_use]
    pub fn clamp_delta(&self, delta: f32) -> f32 {
        if delta.is_finite() {
            delta.clamp(0.0, self.max_delta.as_secs_f32())
        } else {
            0.0
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_clamped() {
        let clock = FrameClock::new(0.1);
        assert_eq!(clock.clamp_delta(0.5), 0.1);
        assert_eq!(clock.clamp_delta(0.016), 0.016);
        assert_eq!(clock.clamp_delta(-1.0), 0.0);
        assert_eq!(clock.clamp_delta(f32::NAN), 0.0);
    }

    #[test]
    fn tick_never_exceeds_clamp() {
        let mut clock = FrameClock::new(0.05);
        std::thread::sleep(Duration::from_millis(80));
        let (delta, elapsed) = clock.tick();
        assert!(delta <= 0.05 + 1e-6);
        assert!(elapsed >= 0.08);
    }

    #[test]
    fn fps_smooths_toward_frame_rate() {
        let mut clock = FrameClock::default();
        for _ in 0..400 {
            clock.record(Duration::from_millis(20));
        }
        assert!((clock.fps() - 50.0).abs() < 0.5);
    }
}
