use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock was created (sum of every `dt`).
    pub elapsed: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    Real { last: Instant, dt_min: Duration, dt_max: Duration },
    Fixed { dt: f32 },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Use one clock per context so multi-window applications do not share
/// delta-time state. A real clock clamps delta time to avoid pathological
/// values after debugger pauses or stalls; a fixed clock always reports the
/// same `dt` and makes the pipeline deterministic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    elapsed: f64,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a real-time clock with default clamps (100µs .. 250ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a real-time clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Real { last: Instant::now(), dt_min, dt_max },
            elapsed: 0.0,
            frame_index: 0,
        }
    }

    /// Creates a deterministic clock that advances by `dt` seconds per tick.
    pub fn fixed(dt: f32) -> Self {
        Self {
            source: Source::Fixed { dt: dt.max(0.0) },
            elapsed: 0.0,
            frame_index: 0,
        }
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        matches!(self.source, Source::Fixed { .. })
    }

    /// Resets the real-time baseline. No effect on a fixed clock.
    ///
    /// Useful when resuming from suspension.
    pub fn reset(&mut self) {
        if let Source::Real { last, .. } = &mut self.source {
            *last = Instant::now();
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Real { last, dt_min, dt_max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).clamp(*dt_min, *dt_max);
                *last = now;
                dt.as_secs_f32()
            }
            Source::Fixed { dt } => *dt,
        };

        self.elapsed += dt as f64;
        let ft = FrameTime { dt, elapsed: self.elapsed, frame_index: self.frame_index };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let mut c = FrameClock::fixed(0.5);
        let a = c.tick();
        let b = c.tick();
        assert_eq!(a.dt, 0.5);
        assert_eq!(b.elapsed, 1.0);
        assert_eq!((a.frame_index, b.frame_index), (0, 1));
    }

    #[test]
    fn real_clock_clamps_to_minimum() {
        let mut c = FrameClock::with_clamps(Duration::from_millis(10), Duration::from_millis(20));
        let t = c.tick();
        assert!(t.dt >= 0.010 && t.dt <= 0.020);
    }
}
