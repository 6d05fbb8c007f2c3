use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://127.0.0.1:5001/api/search";
pub const DEFAULT_GENERATE_QUERY_ENDPOINT: &str = "http://127.0.0.1:5001/api/generate_query";
pub const DEFAULT_PREVIEW_ENDPOINT: &str = "http://127.0.0.1:5001/api/preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the client sends its requests and how long it waits for them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub search_endpoint: String,
    pub generate_query_endpoint: String,
    pub preview_endpoint: String,
    #[serde(with = "secs")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            generate_query_endpoint: DEFAULT_GENERATE_QUERY_ENDPOINT.to_string(),
            preview_endpoint: DEFAULT_PREVIEW_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Points every endpoint at the same backend base URL, e.g. `http://localhost:5001`.
    pub fn for_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            search_endpoint: format!("{base}/api/search"),
            generate_query_endpoint: format!("{base}/api/generate_query"),
            preview_endpoint: format!("{base}/api/preview"),
            ..Self::default()
        }
    }
}

/// Bind address for the echo server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
