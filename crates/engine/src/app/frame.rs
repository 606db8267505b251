use std::thread;
use std::time::{Duration, Instant};

pub const DEFAULT_FRAME_RATE: u32 = 30;
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

pub trait Clock {
    /// Monotonic time since an arbitrary origin.
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Deterministic clock for tests; sleeping simply advances time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
    }
}

/// Caps the frame rate and measures the time each frame should simulate.
#[derive(Debug)]
pub struct FrameLimiter {
    min_interval: Duration,
    max_frame_delta: Duration,
    last_start: Option<Duration>,
    last_frame_time: Duration,
}

impl FrameLimiter {
    pub fn new(frame_rate: u32, max_frame_delta: Duration) -> Self {
        Self {
            min_interval: Duration::from_secs(1) / frame_rate.max(1),
            max_frame_delta,
            last_start: None,
            last_frame_time: Duration::ZERO,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Blocks until the minimum frame interval has passed since the previous
    /// call and returns the elapsed time, clamped to the max frame delta.
    /// The first call reports zero.
    pub fn start_frame(&mut self, clock: &mut impl Clock) -> Duration {
        let Some(previous) = self.last_start else {
            self.last_start = Some(clock.now());
            self.last_frame_time = Duration::ZERO;
            return self.last_frame_time;
        };

        let since = clock.now().saturating_sub(previous);
        if since < self.min_interval {
            clock.sleep(self.min_interval - since);
        }

        let now = clock.now();
        self.last_start = Some(now);
        self.last_frame_time = now.saturating_sub(previous).min(self.max_frame_delta);
        self.last_frame_time
    }

    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }

    pub fn last_frame_micros(&self) -> u64 {
        self.last_frame_time.as_micros() as u64
    }
}

impl Default for FrameLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE, DEFAULT_MAX_FRAME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_reports_zero() {
        let mut clock = ManualClock::default();
        let mut limiter = FrameLimiter::new(30, DEFAULT_MAX_FRAME_DELTA);
        assert_eq!(limiter.start_frame(&mut clock), Duration::ZERO);
    }

    #[test]
    fn fast_frames_sleep_up_to_min_interval() {
        let mut clock = ManualClock::default();
        let mut limiter = FrameLimiter::new(50, DEFAULT_MAX_FRAME_DELTA);
        limiter.start_frame(&mut clock);
        clock.advance(Duration::from_millis(5));
        assert_eq!(limiter.start_frame(&mut clock), Duration::from_millis(20));
        assert_eq!(clock.now(), Duration::from_millis(20));
        assert_eq!(limiter.last_frame_micros(), 20_000);
    }

    #[test]
    fn slow_frames_report_real_elapsed() {
        let mut clock = ManualClock::default();
        let mut limiter = FrameLimiter::new(50, DEFAULT_MAX_FRAME_DELTA);
        limiter.start_frame(&mut clock);
        clock.advance(Duration::from_millis(45));
        assert_eq!(limiter.start_frame(&mut clock), Duration::from_millis(45));
    }

    #[test]
    fn long_stalls_are_clamped() {
        let mut clock = ManualClock::default();
        let mut limiter = FrameLimiter::default();
        limiter.start_frame(&mut clock);
        clock.advance(Duration::from_secs(3));
        assert_eq!(limiter.start_frame(&mut clock), DEFAULT_MAX_FRAME_DELTA);
        assert_eq!(limiter.last_frame_time(), DEFAULT_MAX_FRAME_DELTA);
    }
}
