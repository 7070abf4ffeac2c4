use std::time::{Duration, Instant};

/// Wall-clock budget for a single solve. Checked cooperatively once per
/// search node; an inactive limit always allows progress.
pub struct TimeLimit {
    is_active: bool,
    start: Instant,
    max_duration: Duration,
}

impl TimeLimit {
    pub fn new(duration: Option<Duration>) -> Self {
        Self {
            is_active: duration.is_some(),
            start: Instant::now(),
            max_duration: duration.unwrap_or_default(),
        }
    }

    pub fn can_progress(&self) -> bool {
        if !self.is_active {
            return true;
        }
        self.start.elapsed() < self.max_duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_limit_always_progresses() {
        let limit = TimeLimit::new(None);
        assert!(limit.can_progress());
    }

    #[test]
    fn zero_limit_expires_immediately() {
        let limit = TimeLimit::new(Some(Duration::ZERO));
        assert!(!limit.can_progress());
    }
}
