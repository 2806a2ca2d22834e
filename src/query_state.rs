use crate::data_models::{ClaimPage, PaginationCursor};
use crate::fetcher::{FetchError, PageFetcher};
use crate::renderer::RenderedResults;

/// Where the current query is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Displayed,
    EmptyDisplayed,
    LoadingMore,
    Failed,
}

impl Phase {
    pub fn is_in_flight(self) -> bool {
        matches!(self, Phase::Searching | Phase::LoadingMore)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
}

/// Ticket for one outstanding fetch. Completing it against a state whose
/// generation has moved on is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    generation: u64,
    pub query: String,
    pub cursor: Option<PaginationCursor>,
    pub kind: FetchKind,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// The single mutable session: query, cursor, page number and what has
/// been rendered for them so far.
#[derive(Debug)]
pub struct QueryState {
    query: String,
    page: u32,
    cursor: Option<PaginationCursor>,
    phase: Phase,
    generation: u64,
    results: RenderedResults,
    error: Option<String>,
    no_results: bool,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            cursor: None,
            phase: Phase::Idle,
            generation: 0,
            results: RenderedResults::new(),
            error: None,
            no_results: false,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn cursor(&self) -> Option<&PaginationCursor> {
        self.cursor.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn results(&self) -> &RenderedResults {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn shows_no_results(&self) -> bool {
        self.no_results
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// Load more is offered only after a page was shown and the API said
    /// another one exists.
    pub fn can_load_more(&self) -> bool {
        self.phase == Phase::Displayed && self.cursor.is_some()
    }

    /// The page indicator appears once a page with results was shown.
    pub fn shows_page_number(&self) -> bool {
        !self.results.is_empty()
    }

    /// Starts a new query. Returns `None` for a blank query or while another
    /// fetch is outstanding.
    pub fn submit(&mut self, query: &str) -> Option<PendingFetch> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty query");
            return None;
        }
        if self.is_in_flight() {
            tracing::debug!(query, "ignoring submit while a fetch is in flight");
            return None;
        }

        self.reset();
        self.query = query.to_string();
        self.phase = Phase::Searching;
        tracing::info!(query, generation = self.generation, "submitting query");

        Some(PendingFetch {
            generation: self.generation,
            query: self.query.clone(),
            cursor: None,
            kind: FetchKind::FirstPage,
        })
    }

    /// Requests the page after the last one shown, if any.
    pub fn load_more(&mut self) -> Option<PendingFetch> {
        if !self.can_load_more() {
            tracing::debug!(phase = ?self.phase, "load more not available");
            return None;
        }
        let cursor = self.cursor.clone();
        self.phase = Phase::LoadingMore;
        self.error = None;
        tracing::info!(query = %self.query, page = self.page + 1, "loading more");

        Some(PendingFetch {
            generation: self.generation,
            query: self.query.clone(),
            cursor,
            kind: FetchKind::NextPage,
        })
    }

    /// Back to the initial state. Anything still in flight becomes stale.
    pub fn clear(&mut self) {
        self.reset();
        tracing::info!(generation = self.generation, "cleared query state");
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.query.clear();
        self.page = 1;
        self.cursor = None;
        self.phase = Phase::Idle;
        self.results.clear();
        self.error = None;
        self.no_results = false;
    }

    /// Applies the outcome of `pending` unless a submit or clear happened
    /// since it was issued.
    pub fn complete(
        &mut self,
        pending: &PendingFetch,
        result: Result<ClaimPage, FetchError>,
    ) -> Completion {
        if pending.generation != self.generation || !self.is_in_flight() {
            tracing::debug!(
                issued = pending.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return Completion::Stale;
        }

        match result {
            Ok(page) => self.apply_page(pending.kind, page),
            Err(e) => {
                tracing::warn!(query = %self.query, "fetch failed: {}", e);
                self.error = Some(e.to_string());
                self.cursor = None;
                self.phase = Phase::Failed;
            }
        }
        Completion::Applied
    }

    fn apply_page(&mut self, kind: FetchKind, page: ClaimPage) {
        self.cursor = page.next_cursor;
        self.phase = Phase::Displayed;

        // an empty page ends pagination whatever token came with it
        if page.items.is_empty() {
            self.cursor = None;
        }

        match (kind, page.items.is_empty()) {
            (FetchKind::FirstPage, true) => {
                self.no_results = true;
                self.phase = Phase::EmptyDisplayed;
            }
            (FetchKind::FirstPage, false) => {
                self.page = 1;
                self.results.replace(&page.items);
            }
            (FetchKind::NextPage, true) => {}
            (FetchKind::NextPage, false) => {
                self.page += 1;
                self.results.append(&page.items);
            }
        }
    }

    /// Submits `query` and waits for its first page.
    pub async fn run_submit<F: PageFetcher>(
        &mut self,
        fetcher: &F,
        query: &str,
    ) -> Option<Completion> {
        let pending = self.submit(query)?;
        let result = fetcher.fetch(&pending.query, None).await;
        Some(self.complete(&pending, result))
    }

    /// Fetches and appends the next page.
    pub async fn run_load_more<F: PageFetcher>(&mut self, fetcher: &F) -> Option<Completion> {
        let pending = self.load_more()?;
        let result = fetcher.fetch(&pending.query, pending.cursor.as_ref()).await;
        Some(self.complete(&pending, result))
    }
}
