/// Time window of a task, all values in seconds of the scheduler clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timing {
    /// Clock reading when the task was created.
    pub start_time: f64,
    /// Wait after `start_time` before progress begins.
    pub delay: f64,
    /// Length of the animation; `<= 0` completes on the first active tick.
    pub duration: f64,
}

impl Timing {
    /// Seconds since the task became active. Non-positive means not started.
    pub fn elapsed(self, now: f64) -> f64 {
        now - (self.start_time + self.delay)
    }

    /// Normalized progress at `now`, or `None` while the task is still waiting.
    pub fn progress(self, now: f64) -> Option<f64> {
        let elapsed = self.elapsed(now);
        if elapsed <= 0.0 {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some((elapsed / self.duration).clamp(0.0, 1.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
