use crate::error::SearchError;
use crate::models::{ResultItem, SearchPreferences};
use crate::search::builder::build;
use crate::search::traits::SearchBackend;
use crate::search::types::SearchRequest;
use tracing::{debug, info, warn};

/// Where a search currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    /// Request in flight. Only held while `submit` has the session borrowed, so callers
    /// always get back `Succeeded` or `Failed`.
    Submitting,
    Succeeded(Vec<ResultItem>),
    Failed(SearchError),
}

impl SearchState {
    pub fn results(&self) -> Option<&[ResultItem]> {
        match self {
            SearchState::Succeeded(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SearchError> {
        match self {
            SearchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Owns the state of one search flow and drives it against a backend.
///
/// Submitting borrows the session mutably, so a second submission cannot start
/// while one is still awaiting its response.
pub struct SearchSession<B> {
    backend: B,
    state: SearchState,
}

impl<B: SearchBackend> SearchSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the current results, e.g. to attach previews
    pub fn results_mut(&mut self) -> Option<&mut Vec<ResultItem>> {
        match &mut self.state {
            SearchState::Succeeded(items) => Some(items),
            _ => None,
        }
    }

    /// Build a request from `prefs` and submit it. Validation failures land in
    /// `Failed` without touching the network.
    pub async fn search(&mut self, prefs: &SearchPreferences) -> &SearchState {
        match build(prefs) {
            Ok(request) => self.submit(&request).await,
            Err(e) => {
                warn!("Search rejected: {}", e);
                self.state = SearchState::Failed(e);
                &self.state
            }
        }
    }

    /// Submit an already built request. Any previous results or error are discarded.
    pub async fn submit(&mut self, request: &SearchRequest) -> &SearchState {
        self.state = SearchState::Submitting;
        debug!("Search submitting via {}", self.backend.backend_name());

        self.state = match self.backend.search(request).await {
            Ok(items) => {
                info!("Search succeeded with {} listings", items.len());
                SearchState::Succeeded(items)
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                SearchState::Failed(e)
            }
        };

        &self.state
    }

    /// Back to `Idle`, dropping results and errors
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays canned outcomes in order and counts calls
    struct ScriptedBackend {
        outcomes: Mutex<Vec<Result<Vec<ResultItem>, SearchError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<Result<Vec<ResultItem>, SearchError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into_iter().rev().collect()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for ScriptedBackend {
        async fn search(&self, _request: &SearchRequest) -> Result<Vec<ResultItem>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(SearchError::transport("no scripted outcome")))
        }

        fn backend_name(&self) -> &str {
            "scripted"
        }
    }

    #[tokio::test]
    async fn starts_idle() {
        let session = SearchSession::new(ScriptedBackend::new(vec![]));
        assert_eq!(session.state(), &SearchState::Idle);
    }

    #[tokio::test]
    async fn success_then_failure_replaces_results() {
        let mut session = SearchSession::new(ScriptedBackend::new(vec![
            Ok(vec![ResultItem::new("a"), ResultItem::new("b")]),
            Err(SearchError::Format),
        ]));
        let prefs = SearchPreferences::new("Paris");

        let state = session.search(&prefs).await;
        assert_eq!(state.results().map(|r| r.len()), Some(2));

        let state = session.search(&prefs).await;
        assert_eq!(state.error(), Some(&SearchError::Format));
        assert!(state.results().is_none());
    }

    #[tokio::test]
    async fn empty_location_never_reaches_backend() {
        let mut session = SearchSession::new(ScriptedBackend::new(vec![Ok(vec![])]));

        let state = session.search(&SearchPreferences::default()).await;
        assert_eq!(state.error(), Some(&SearchError::Validation { field: "location" }));
        assert_eq!(session.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_can_be_resubmitted() {
        let mut session = SearchSession::new(ScriptedBackend::new(vec![
            Err(SearchError::transport("connection refused")),
            Ok(vec![ResultItem::new("https://x/rooms/1")]),
        ]));
        let prefs = SearchPreferences::new("Rome");

        assert!(matches!(session.search(&prefs).await, SearchState::Failed(SearchError::Transport { .. })));
        assert!(matches!(session.search(&prefs).await, SearchState::Succeeded(items) if items.len() == 1));
        assert_eq!(session.backend().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn submit_always_returns_a_terminal_state() {
        let mut session = SearchSession::new(ScriptedBackend::new(vec![
            Ok(vec![]),
            Err(SearchError::Format),
        ]));
        let request = build(&SearchPreferences::new("Lima")).unwrap();

        for _ in 0..2 {
            let state = session.submit(&request).await;
            assert!(matches!(state, SearchState::Succeeded(_) | SearchState::Failed(_)));
        }
        assert_ne!(session.state(), &SearchState::Submitting);
    }

    #[tokio::test]
    async fn reset_clears_results() {
        let mut session =
            SearchSession::new(ScriptedBackend::new(vec![Ok(vec![ResultItem::new("a")])]));
        session.search(&SearchPreferences::new("Oslo")).await;
        assert!(session.results_mut().is_some());

        session.reset();
        assert_eq!(session.state(), &SearchState::Idle);
        assert!(session.results_mut().is_none());
    }
}
