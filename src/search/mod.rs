pub mod builder;
pub mod client;
pub mod preview;
pub mod session;
pub mod traits;
pub mod types;

pub use builder::build;
pub use client::HttpSearchClient;
pub use session::{SearchSession, SearchState};
pub use traits::SearchBackend;
pub use types::SearchRequest;
