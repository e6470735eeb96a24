use std::time::{Duration, Instant};

/// Fixed-rate frame deadlines, like a game loop's clock tick.
#[derive(Clone, Debug)]
pub struct FrameClock {
    period: Duration,
    deadline: Instant,
}

impl FrameClock {
    pub fn new(fps: u32, now: Instant) -> Self {
        let period = Duration::from_secs(1) / fps.max(1);
        Self { period, deadline: now + period }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    #[cfg(test)]
    pub fn period(&self) -> Duration {
        self.period
    }

    // step to the next deadline; if we fell behind, restart from now instead of catching up
    pub fn advance(&mut self, now: Instant) {
        self.deadline += self.period;
        if self.deadline < now {
            self.deadline = now + self.period;
        }
    }
}
