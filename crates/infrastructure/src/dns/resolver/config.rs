use dnspipe_domain::ResolverConfig;
use std::time::Duration;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-resolver behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Bound on connect + send + receive for the query at the head of the
    /// queue. `None` waits forever.
    pub timeout: Option<Duration>,

    /// Check the response ID against the head query's. Over TCP a mismatch
    /// fails the head query and drops the stream. Over UDP the datagram is
    /// discarded and the worker keeps waiting for the matching reply.
    pub verify_transaction_id: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_QUERY_TIMEOUT),
            verify_transaction_id: false,
        }
    }
}

impl ResolverOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_transaction_id_check(mut self) -> Self {
        self.verify_transaction_id = true;
        self
    }
}

impl From<&ResolverConfig> for ResolverOptions {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            timeout: config.timeout(),
            verify_transaction_id: config.verify_transaction_id,
        }
    }
}
