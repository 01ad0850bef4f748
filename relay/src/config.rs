use std::time::Duration;

/// Settings for one relay instance. Built once in main from CLI/env and
/// passed by reference; tests construct their own with independent values.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Host the monitoring proxy listens on.
    pub proxy_host: String,
    /// Port the monitoring proxy listens on.
    pub proxy_port: u16,
    /// Maximum metric lines per transport send.
    pub chunk_size: usize,
    /// Wait between consecutive chunk sends so the proxy is not overwhelmed.
    pub pacing: Duration,
    /// Source tag stamped on points that do not carry their own.
    pub default_source: String,
    /// Wait between polling cycles.
    pub poll_interval: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            proxy_host: "127.0.0.1".to_string(),
            proxy_port: 2878,
            chunk_size: 100,
            pacing: Duration::from_millis(500),
            default_source: "my_vector".to_string(),
            poll_interval: Duration::from_secs(30),
        }
    }
}
