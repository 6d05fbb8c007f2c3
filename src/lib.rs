pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod server;

pub use config::{ClientConfig, ServerConfig};
pub use error::SearchError;
pub use models::{Amenity, Guests, PreviewState, ResultItem, SearchPreferences};
pub use search::{build, HttpSearchClient, SearchBackend, SearchRequest, SearchSession, SearchState};
