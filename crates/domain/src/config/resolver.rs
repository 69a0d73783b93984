use crate::DnsProtocol;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Endpoint in `udp://IP:PORT`, `tcp://IP:PORT` or bare `IP:PORT` form.
    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Per-query timeout in seconds; `0` disables the timer.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Reject responses whose transaction ID differs from the head query's.
    #[serde(default)]
    pub verify_transaction_id: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            upstream: default_upstream(),
            query_timeout: default_query_timeout(),
            verify_transaction_id: false,
        }
    }
}

impl ResolverConfig {
    pub fn protocol(&self) -> Result<DnsProtocol, String> {
        self.upstream.parse()
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.query_timeout > 0).then(|| Duration::from_secs(self.query_timeout))
    }
}

fn default_upstream() -> String {
    "udp://8.8.8.8:53".to_string()
}

fn default_query_timeout() -> u64 {
    5
}
