use std::time::Duration;

use crate::shared::constants::DEFAULT_POLL_INTERVAL_MS;

/// How often and how long to check job status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// `None` polls until the job is done, however long that takes.
    pub max_attempts: Option<u32>,
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: Option<u32>) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// True once `attempts` status checks have used up the budget.
    pub fn is_exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_polls_every_five_seconds_forever() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert!(!policy.is_exhausted(u32::MAX));
    }

    #[rstest]
    #[case::below(3, 2, false)]
    #[case::at_limit(3, 3, true)]
    #[case::beyond(3, 4, true)]
    #[case::single(1, 1, true)]
    fn test_bounded_policy(#[case] max: u32, #[case] attempts: u32, #[case] expected: bool) {
        let policy = PollPolicy::new(Duration::ZERO, Some(max));
        assert_eq!(policy.is_exhausted(attempts), expected);
    }
}
