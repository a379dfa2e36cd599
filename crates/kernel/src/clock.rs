use std::time::Instant;

/// Timing handed to one frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Frames produced so far, including this one.
    pub frame: u64,
}

/// Frame clock for the host loop.
///
/// `tick` reads the wall clock; `advance` steps by a fixed amount for
/// headless runs. Wall-clock deltas are capped so a stalled frame (window
/// drag, breakpoint) does not fling the animation forward.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    elapsed: f32,
    frame: u64,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub const DEFAULT_MAX_DELTA: f32 = 0.1;

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            elapsed: 0.0,
            frame: 0,
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }

    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Sample the wall clock.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Sample at a caller-provided instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let delta = now
            .saturating_duration_since(self.last)
            .as_secs_f32()
            .min(self.max_delta);
        self.last = now;
        self.elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        self.frame += 1;
        self.frame_time(delta)
    }

    /// Step by exactly `dt` seconds, independent of the wall clock.
    pub fn advance(&mut self, dt: f32) -> FrameTime {
        self.elapsed += dt;
        self.frame += 1;
        self.frame_time(dt)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    fn frame_time(&self, delta: f32) -> FrameTime {
        FrameTime {
            elapsed: self.elapsed,
            delta,
            frame: self.frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn advance_accumulates() {
        let mut clock = FrameClock::new();
        clock.advance(0.5);
        let t = clock.advance(0.25);
        assert_eq!(t.elapsed, 0.75);
        assert_eq!(t.delta, 0.25);
        assert_eq!(t.frame, 2);
    }

    #[test]
    fn wall_clock_delta_is_capped() {
        let mut clock = FrameClock::new();
        let start = clock.start;
        let t = clock.tick_at(start + Duration::from_secs(2));
        assert_eq!(t.delta, FrameClock::DEFAULT_MAX_DELTA);
        assert_eq!(t.elapsed, 2.0);
    }

    #[test]
    fn wall_clock_delta_between_frames() {
        let mut clock = FrameClock::new().with_max_delta(1.0);
        let start = clock.start;
        clock.tick_at(start + Duration::from_millis(100));
        let t = clock.tick_at(start + Duration::from_millis(350));
        assert!((t.delta - 0.25).abs() < 1e-6);
        assert!((t.elapsed - 0.35).abs() < 1e-6);
        assert_eq!(clock.frame(), 2);
    }
}
