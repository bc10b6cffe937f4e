use std::time::{Duration, Instant};

/// Monotonic stopwatch reporting milliseconds with microsecond precision.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Stopwatch {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        as_ms(self.start.elapsed())
    }
}

/// Milliseconds rounded to three decimals.
pub fn as_ms(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 1_000_000.0).round() / 1000.0
}
