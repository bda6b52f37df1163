use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Configuration for the HTTP functionality.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct HttpConfig {
    /// Configuration for the HTTP client.
    #[serde(default)]
    pub client: HttpClientConfig,
}

/// Describes the HTTP client configuration.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HttpClientConfig {
    /// Total request timeout applied from when the request starts connecting until the response
    /// body has finished. Ceremony requests aren't limited unless specified.
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    /// Timeout for idle sockets being kept-alive. Default is 5 seconds.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout: Duration,
    /// Defines whether HTTP client connections should emit verbose logs. Default is false.
    #[serde(default)]
    pub verbose: bool,
    /// Cookie (`name=value`) sent with every API request, e.g. the session cookie registration
    /// requires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            pool_idle_timeout: default_pool_idle_timeout(),
            verbose: false,
            session_cookie: None,
        }
    }
}

/// Defines default timeout for idle sockets being kept-alive.
const fn default_pool_idle_timeout() -> Duration {
    Duration::from_secs(5)
}
