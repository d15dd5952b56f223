//! Millisecond stopwatch.

use std::fmt;
use std::time::Instant;

/// Stopwatch measuring wall time since the last `start_clock`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Clock {
    started: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_clock(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Milliseconds elapsed since the last `start_clock`; `0.0` if never started.
    /// The clock keeps running, so successive calls give increasing values.
    pub fn stop_clock(&self) -> f64 {
        self.started
            .map(|t| t.elapsed().as_secs_f64() * 1e3)
            .unwrap_or(0.0)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.started {
            Some(_) => write!(f, "[Clock] running"),
            None => write!(f, "[Clock] stopped"),
        }
    }
}
