use std::time::Duration;

use crate::errors::ApiError;

/// Failures after which a read is given up on.
pub const DEFAULT_MAX_FAILURES: u32 = 4;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// When and how long to wait before repeating a failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_failures: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_failures: DEFAULT_MAX_FAILURES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    #[must_use]
    pub fn never() -> Self {
        Self {
            max_failures: 0,
            ..Self::default()
        }
    }

    /// Whether to try again after a failure.
    ///
    /// `failure_count` is the number of failures before this one, so it is 0
    /// when the first attempt fails. Errors the backend reported on purpose
    /// and client-side rejections are final.
    #[must_use]
    pub fn should_retry(&self, failure_count: u32, error: &ApiError) -> bool {
        if failure_count >= self.max_failures {
            return false;
        }
        !error.is_handled() && !matches!(error, ApiError::Cancelled)
    }

    /// Exponential backoff: `base * 2^failure_count`, capped at `max_delay`.
    #[must_use]
    pub fn delay(&self, failure_count: u32) -> Duration {
        let factor = 2u32.checked_pow(failure_count).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
