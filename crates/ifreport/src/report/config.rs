//! Reporter configuration.

use std::time::Duration;

use super::retry::RetryPolicy;

/// Default ceiling for the IPv4 wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause between address polls.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// When to query an interface's addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatherPolicy {
    /// Only gather for link-up interfaces; a down link reports no addresses.
    #[default]
    LinkGated,
    /// Gather for every interface regardless of link state.
    Always,
}

/// Reporter configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ifreport::report::{GatherPolicy, ReportConfig};
///
/// let config = ReportConfig::new()
///     .timeout(Duration::from_secs(5))
///     .gather(GatherPolicy::Always);
/// assert_eq!(config.interval_duration(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    timeout: Duration,
    interval: Duration,
    gather: GatherPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            gather: GatherPolicy::default(),
        }
    }
}

impl ReportConfig {
    /// Create a configuration with the defaults (30s wait, 500ms poll, link-gated).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the IPv4 wait ceiling.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the poll interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the address gathering policy.
    pub fn gather(mut self, gather: GatherPolicy) -> Self {
        self.gather = gather;
        self
    }

    /// Get the IPv4 wait ceiling.
    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Get the poll interval.
    pub fn interval_duration(&self) -> Duration {
        self.interval
    }

    /// Get the address gathering policy.
    pub fn gather_policy(&self) -> GatherPolicy {
        self.gather
    }

    /// Retry policy for an address gather, depending on whether to wait.
    pub(crate) fn retry_policy(&self, wait_for_ipv4: bool) -> RetryPolicy {
        if wait_for_ipv4 {
            RetryPolicy::new(self.interval, self.timeout)
        } else {
            RetryPolicy::once()
        }
    }
}
