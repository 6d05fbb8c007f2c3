use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::models::ResultItem;
use crate::search::traits::SearchBackend;
use crate::search::types::{ExampleQueryResponse, ListingsResponse, SearchEnvelope, SearchRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

/// HTTP client for the search backend
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    config: ClientConfig,
}

impl HttpSearchClient {
    /// Create a client against the default local backend
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom endpoints and timeout
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("autobnb/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Ask the backend for an example free-text query
    pub async fn example_query(&self) -> Result<String, SearchError> {
        let url = &self.config.generate_query_endpoint;
        debug!("Requesting example query from {}", url);

        let response = self.client.post(url).send().await?;
        if !response.status().is_success() {
            warn!("Example query endpoint returned status: {}", response.status());
            return Err(SearchError::transport(format!(
                "example query endpoint returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let parsed: ExampleQueryResponse =
            serde_json::from_str(&body).map_err(|_| SearchError::Format)?;

        Ok(strip_quotes(&parsed.example_query).to_string())
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ResultItem>, SearchError> {
        let url = &self.config.search_endpoint;
        info!("Submitting search for {} to {}", request.user_pref.location, url);
        debug!("Provider query: {}", request.query);

        let response = self
            .client
            .post(url)
            .json(&SearchEnvelope { query: request })
            .send()
            .await
            .map_err(|e| {
                warn!("Search request could not be sent: {}", e);
                SearchError::from(e)
            })?;

        if !response.status().is_success() {
            warn!("Search endpoint returned status: {}", response.status());
            return Err(SearchError::transport(format!(
                "search endpoint returned {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        debug!("Received {} bytes from search endpoint", body.len());

        let items = ListingsResponse::parse(&body)
            .map_err(|e| {
                warn!("Unrecognised search response: {}", truncate(&body, 200));
                e
            })?
            .into_items();

        info!("✅ Search returned {} listings", items.len());
        Ok(items)
    }

    fn backend_name(&self) -> &str {
        &self.config.search_endpoint
    }
}

/// Removes one pair of surrounding double quotes, if present.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix('"').unwrap_or(text);
    text.strip_suffix('"').unwrap_or(text)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
