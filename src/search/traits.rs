use crate::error::SearchError;
use crate::models::ResultItem;
use crate::search::types::SearchRequest;
use async_trait::async_trait;

/// Anything that can answer a built search request with a list of listings.
/// The HTTP client is the production implementation; tests substitute their own.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Perform a single request/response exchange for `request`
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ResultItem>, SearchError>;

    /// Human-readable name of the backend, used in logs
    fn backend_name(&self) -> &str;
}
