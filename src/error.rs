use thiserror::Error;

/// Errors surfaced to whoever drives a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A required preference was left empty
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// The request never got a successful response (network failure, timeout or non-2xx)
    #[error("search request failed: {reason}")]
    Transport { reason: String },

    /// The response body matched none of the recognised shapes
    #[error("invalid response format from server")]
    Format,
}

impl SearchError {
    pub fn transport(reason: impl ToString) -> Self {
        SearchError::Transport {
            reason: reason.to_string(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::transport(err)
    }
}
