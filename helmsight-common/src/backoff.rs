use std::time::Duration;

/// Delay before the first reconnect attempt.
pub const RECONNECT_FLOOR: Duration = Duration::from_secs(1);

/// Ceiling for the reconnect delay.
pub const RECONNECT_CAP: Duration = Duration::from_secs(10);

/// Capped exponential delay between reconnection attempts.
///
/// The delay starts at the floor, doubles after every consumed wait,
/// and never exceeds the cap. Call [`Backoff::reset`] once a
/// connection is established so the next drop retries quickly.
#[derive(Debug, Clone)]
pub struct Backoff {
    delay: Duration,
    floor: Duration,
    cap: Duration,
}

impl Backoff {
    /// Create a backoff with the standard reconnect bounds.
    pub fn new() -> Self {
        Self::with_bounds(RECONNECT_FLOOR, RECONNECT_CAP)
    }

    /// Create a backoff with custom bounds.
    pub fn with_bounds(floor: Duration, cap: Duration) -> Self {
        Self {
            delay: floor,
            floor,
            cap,
        }
    }

    /// The delay to wait before the next attempt. Doubles the stored
    /// delay for the attempt after that, clamped to the cap.
    pub fn next_delay(&mut self) -> Duration {
        let current = self.delay;
        self.delay = (self.delay * 2).min(self.cap);
        current
    }

    /// Return to the floor delay after a successful connection.
    pub fn reset(&mut self) {
        self.delay = self.floor;
    }

    /// The delay the next call to [`Backoff::next_delay`] will return.
    pub fn current(&self) -> Duration {
        self.delay
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_sequence_is_capped() {
        let mut backoff = Backoff::new();
        let delays: Vec<u64> = (0..7).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 10, 10, 10]);
    }

    #[test]
    fn test_backoff_reset_returns_to_floor() {
        let mut backoff = Backoff::new();
        for _ in 0..5 {
            backoff.next_delay();
        }
        assert_eq!(backoff.current(), RECONNECT_CAP);

        backoff.reset();
        assert_eq!(backoff.current(), RECONNECT_FLOOR);
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_backoff_custom_bounds() {
        let mut backoff =
            Backoff::with_bounds(Duration::from_millis(500), Duration::from_secs(3));
        assert_eq!(backoff.next_delay(), Duration::from_millis(500));
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
        assert_eq!(backoff.next_delay(), Duration::from_secs(2));
        assert_eq!(backoff.next_delay(), Duration::from_secs(3));
        assert_eq!(backoff.next_delay(), Duration::from_secs(3));
    }
}
