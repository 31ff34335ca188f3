//! Search results page: event handling for the restaurant search view.
//!
//! [`SearchPage`] combines the user's [`SearchState`], the locality taken from the
//! route, and the [`RestaurantQueryExecutor`] that owns the displayed results. Every
//! event that changes either input re-plans the query; the handler emits
//! [`Action::FetchSearch`] only when the plan says a fetch is due.
//!
//! ```text
//! SearchEvent ──► SearchState transition ──► executor.plan ──► Action::FetchSearch
//!                                                                   │
//!        SearchEvent::SearchCompleted ◄── runtime performs fetch ◄──┘
//! ```

use super::actions::Action;
use crate::domain::{MenuhubError, Result, SearchResponse};
use crate::query::{FetchDecision, QueryStatus, RestaurantQueryExecutor, SearchRequest};
use crate::search::{SearchState, SortOption};

/// Inputs to [`handle_search_event`].
///
/// Filter events ([`QuerySubmitted`](Self::QuerySubmitted) through
/// [`SortChanged`](Self::SortChanged)) return to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The page became visible.
    Mounted,
    /// The search bar was submitted.
    QuerySubmitted(String),
    /// The search bar was cleared.
    QueryReset,
    /// The cuisine filter was replaced wholesale.
    CuisinesChanged(Vec<String>),
    /// One cuisine checkbox was clicked.
    CuisineToggled(String),
    /// A different ordering was picked.
    SortChanged(SortOption),
    /// The pager moved to this page; `0` is treated as page 1.
    PageChanged(u32),
    /// The routed city changed or disappeared.
    LocalityChanged(Option<String>),
    /// The user asked to re-run the current search.
    Retry,
    /// The page was left.
    Unmounted,
    /// A fetch issued by [`Action::FetchSearch`] finished.
    SearchCompleted {
        request: SearchRequest,
        outcome: std::result::Result<SearchResponse, MenuhubError>,
    },
}

impl SearchEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::QuerySubmitted(_) => "query_submitted",
            Self::QueryReset => "query_reset",
            Self::CuisinesChanged(_) => "cuisines_changed",
            Self::CuisineToggled(_) => "cuisine_toggled",
            Self::SortChanged(_) => "sort_changed",
            Self::PageChanged(_) => "page_changed",
            Self::LocalityChanged(_) => "locality_changed",
            Self::Retry => "retry",
            Self::Unmounted => "unmounted",
            Self::SearchCompleted { .. } => "search_completed",
        }
    }
}

/// State of one search page instance.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    state: SearchState,
    locality: Option<String>,
    executor: RestaurantQueryExecutor,
}

impl SearchPage {
    /// A page routed to `locality`, with the mount-time search state.
    #[must_use]
    pub fn new(locality: Option<String>) -> Self {
        Self {
            locality,
            ..Self::default()
        }
    }

    /// Current filter, sort and page.
    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Routed city, if any.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    /// Status of the latest planned search.
    #[must_use]
    pub const fn status(&self) -> &QueryStatus {
        self.executor.status()
    }

    /// Results currently on display, if the latest search succeeded.
    #[must_use]
    pub fn results(&self) -> Option<&SearchResponse> {
        match self.executor.status() {
            QueryStatus::Ready(response) => Some(response),
            _ => None,
        }
    }

    fn replan(&mut self) -> (bool, Vec<Action>) {
        let was_pending = self.executor.is_pending();
        match self.executor.plan(&self.state, self.locality.as_deref()) {
            FetchDecision::Fetch(request) => (true, vec![Action::FetchSearch(request)]),
            FetchDecision::Unchanged => (true, vec![]),
            FetchDecision::NotEligible if was_pending => (true, vec![Action::CancelSearch]),
            FetchDecision::NotEligible => (true, vec![]),
        }
    }
}

/// Applies `event` to `page`, returning whether to re-render and the actions to run.
///
/// # Errors
///
/// Currently infallible; the `Result` matches the management page handler so a
/// runtime can drive both uniformly.
pub fn handle_search_event(page: &mut SearchPage, event: &SearchEvent) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_search_event", event = event.name()).entered();

    let outcome = match event {
        SearchEvent::Mounted => page.replan(),
        SearchEvent::QuerySubmitted(query) => {
            page.state = page.state.set_search_query(query.as_str());
            page.replan()
        }
        SearchEvent::QueryReset => {
            page.state = page.state.reset_query();
            page.replan()
        }
        SearchEvent::CuisinesChanged(cuisines) => {
            page.state = page.state.set_selected_cuisines(cuisines.iter().map(String::as_str));
            page.replan()
        }
        SearchEvent::CuisineToggled(cuisine) => {
            page.state = page.state.toggle_cuisine(cuisine);
            page.replan()
        }
        SearchEvent::SortChanged(option) => {
            page.state = page.state.set_sort_option(option.clone());
            page.replan()
        }
        SearchEvent::PageChanged(number) => {
            page.state = page.state.set_page(*number);
            page.replan()
        }
        SearchEvent::LocalityChanged(locality) => {
            page.locality = locality.clone();
            page.replan()
        }
        SearchEvent::Retry => {
            page.executor.invalidate();
            page.replan()
        }
        SearchEvent::Unmounted => {
            let was_pending = page.executor.is_pending();
            page.executor.abandon();
            (false, if was_pending { vec![Action::CancelSearch] } else { vec![] })
        }
        SearchEvent::SearchCompleted { request, outcome } => {
            let applied = page.executor.receive(request, outcome.clone());
            (applied, vec![])
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Pagination;

    fn fetched(actions: &[Action]) -> SearchRequest {
        match actions {
            [Action::FetchSearch(request)] => request.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn empty_response() -> SearchResponse {
        SearchResponse {
            data: vec![],
            pagination: Pagination { page: 1, pages: 0, total: 0 },
        }
    }

    #[test]
    fn mount_without_city_fetches_nothing() {
        let mut page = SearchPage::new(None);
        let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
        assert!(actions.is_empty());
        assert_eq!(page.status(), &QueryStatus::NotExecuted);
    }

    #[test]
    fn mount_with_city_fetches_defaults() {
        let mut page = SearchPage::new(Some("austin".into()));
        let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
        let request = fetched(&actions);
        assert_eq!(request.param("page"), Some("1"));
        assert_eq!(request.param("sortOption"), Some("bestMatch"));
    }

    #[test]
    fn filter_change_resets_page_and_refetches() {
        let mut page = SearchPage::new(Some("austin".into()));
        handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
        handle_search_event(&mut page, &SearchEvent::PageChanged(3)).unwrap();

        let (_, actions) =
            handle_search_event(&mut page, &SearchEvent::CuisineToggled("Thai".into())).unwrap();
        let request = fetched(&actions);
        assert_eq!(request.param("page"), Some("1"));
        assert_eq!(request.param("selectedCuisines"), Some("Thai"));
    }

    #[test]
    fn identical_state_does_not_refetch() {
        let mut page = SearchPage::new(Some("austin".into()));
        handle_search_event(&mut page, &SearchEvent::SortChanged(SortOption::DeliveryPrice)).unwrap();
        let (_, actions) =
            handle_search_event(&mut page, &SearchEvent::SortChanged(SortOption::DeliveryPrice)).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn retry_refetches_identical_state() {
        let mut page = SearchPage::new(Some("austin".into()));
        let (_, first) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
        let request = fetched(&first);
        handle_search_event(
            &mut page,
            &SearchEvent::SearchCompleted {
                request: request.clone(),
                outcome: Err(MenuhubError::transport(Some(503), "unavailable")),
            },
        )
        .unwrap();
        assert!(matches!(page.status(), QueryStatus::Failed(_)));

        let (_, retried) = handle_search_event(&mut page, &SearchEvent::Retry).unwrap();
        assert_eq!(fetched(&retried), request);
    }

    #[test]
    fn losing_the_city_cancels_pending_search() {
        let mut page = SearchPage::new(Some("austin".into()));
        handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();

        let (_, actions) =
            handle_search_event(&mut page, &SearchEvent::LocalityChanged(None)).unwrap();
        assert_eq!(actions, vec![Action::CancelSearch]);
        assert_eq!(page.status(), &QueryStatus::NotExecuted);
    }

    #[test]
    fn completion_for_abandoned_request_is_ignored() {
        let mut page = SearchPage::new(Some("austin".into()));
        let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted).unwrap();
        let request = fetched(&actions);

        let (_, actions) = handle_search_event(&mut page, &SearchEvent::Unmounted).unwrap();
        assert_eq!(actions, vec![Action::CancelSearch]);

        let (render, _) = handle_search_event(
            &mut page,
            &SearchEvent::SearchCompleted { request, outcome: Ok(empty_response()) },
        )
        .unwrap();
        assert!(!render);
        assert!(page.results().is_none());
    }
}
