use std::future::Future;

use tokio::sync::watch;

use crate::data_models::{RequestState, SearchQuery, SearchResult};
use crate::error::FetchError;
use crate::pagination::Pagination;
use crate::provider::{ProviderPage, SearchProvider};

/// What observers see: the last issued query and the state it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub query: Option<SearchQuery>,
    pub request: RequestState,
    sequence: u64,
}

impl ControllerState {
    pub fn keywords(&self) -> &str {
        self.query.as_ref().map_or("", |q| q.keywords.as_str())
    }

    /// Number of searches issued so far.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.request
            .result()
            .map(|result| Pagination::new(result.page, result.total_pages))
    }
}

/// Owns the search state and drives requests against a [`SearchProvider`].
///
/// Each search is numbered when issued. A completion is applied only while
/// its number is still the latest, so a slow response to an older search can
/// never overwrite the outcome of a newer one.
pub struct SearchController<P> {
    provider: P,
    state: watch::Sender<ControllerState>,
}

impl<P: SearchProvider> SearchController<P> {
    pub fn new(provider: P) -> Self {
        let (state, _) = watch::channel(ControllerState::default());
        SearchController { provider, state }
    }

    /// Starts a search for `keywords` at `page`.
    ///
    /// The state is `Loading` as soon as this returns, before the future is
    /// polled. Awaiting the future performs the request and records its
    /// outcome, unless another search was issued in the meantime.
    ///
    /// The future must be awaited: dropping it unpolled sends no request and
    /// leaves the state `Loading` until the next search is issued.
    #[must_use = "the search only runs when the returned future is awaited"]
    pub fn execute_search(
        &self,
        keywords: impl Into<String>,
        page: u32,
    ) -> impl Future<Output = ()> + Send {
        let query = SearchQuery::new(keywords, page);
        let sequence = self.begin(&query);
        async move {
            let outcome = self.provider.fetch(&query).await;
            self.complete(sequence, &query, outcome);
        }
    }

    /// Repeats the current keywords at another page. Same contract as
    /// [`execute_search`](Self::execute_search).
    #[must_use = "the search only runs when the returned future is awaited"]
    pub fn change_page(&self, page: u32) -> impl Future<Output = ()> + Send {
        let keywords = self.state.borrow().keywords().to_string();
        self.execute_search(keywords, page)
    }

    /// `None` when there is no result to page through or it is the last page.
    pub fn next_page(&self) -> Option<impl Future<Output = ()> + Send> {
        let target = self.pagination()?.next()?;
        Some(self.change_page(target))
    }

    /// `None` when there is no result to page through or it is the first page.
    pub fn previous_page(&self) -> Option<impl Future<Output = ()> + Send> {
        let target = self.pagination()?.previous()?;
        Some(self.change_page(target))
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().request.clone()
    }

    pub fn snapshot(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.state.borrow().pagination()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    fn begin(&self, query: &SearchQuery) -> u64 {
        let mut sequence = 0;
        self.state.send_modify(|state| {
            state.sequence += 1;
            sequence = state.sequence;
            state.query = Some(query.clone());
            state.request = RequestState::Loading;
        });
        log::debug!(
            "search #{sequence} issued: {:?} page {}",
            query.keywords,
            query.page
        );
        sequence
    }

    fn complete(
        &self,
        sequence: u64,
        query: &SearchQuery,
        outcome: Result<ProviderPage, FetchError>,
    ) {
        let next = match outcome {
            Ok(page) => RequestState::Success(SearchResult::new(
                query.page,
                page.total_pages,
                page.items,
            )),
            Err(e) => {
                log::warn!("search #{sequence} failed: {e}");
                RequestState::Failure { reason: e.reason() }
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if state.sequence != sequence {
                return false;
            }
            state.request = next;
            true
        });

        if !applied {
            log::debug!("search #{sequence} superseded, dropping its response");
        }
    }
}
