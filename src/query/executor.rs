//! Search query planning and result bookkeeping.
//!
//! [`RestaurantQueryExecutor`] decides, for a `(SearchState, locality)` pair, whether a
//! fetch is eligible and whether it is due, and it owns the displayed result. It never
//! performs I/O: callers act on the returned [`FetchDecision`] and hand the outcome
//! back through [`RestaurantQueryExecutor::receive`].
//!
//! # Re-fetch policy
//!
//! A fetch is due exactly when the derived [`SearchRequest`] differs from the most
//! recently issued one. Responses are keyed by the request that produced them; a
//! response whose request is no longer the latest is dropped, so a slow answer for an
//! older state can never overwrite the answer for a newer one.
//!
//! # Example
//!
//! ```rust
//! use menuhub::query::{FetchDecision, QueryStatus, RestaurantQueryExecutor};
//! use menuhub::search::SearchState;
//!
//! let mut executor = RestaurantQueryExecutor::new();
//! let state = SearchState::default();
//!
//! let FetchDecision::Fetch(request) = executor.plan(&state, Some("austin")) else {
//!     unreachable!();
//! };
//! assert!(matches!(executor.status(), QueryStatus::Pending));
//! assert!(matches!(executor.plan(&state, Some("austin")), FetchDecision::Unchanged));
//! # let _ = request;
//! ```

use super::request::SearchRequest;
use crate::domain::{MenuhubError, SearchResponse};
use crate::search::SearchState;

/// Outcome of planning a search for a state snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchDecision {
    /// No locality; nothing may be sent.
    NotEligible,
    /// The latest issued request already covers this state.
    Unchanged,
    /// A new request should be sent.
    Fetch(SearchRequest),
}

/// What the search view should currently display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// No search has been issued (no locality, or abandoned).
    #[default]
    NotExecuted,
    /// A request is outstanding.
    Pending,
    /// Results for the latest request. May hold zero restaurants.
    Ready(SearchResponse),
    /// The latest request failed.
    Failed(MenuhubError),
}

/// Plans search fetches and tracks the result of the latest one.
#[derive(Debug, Clone, Default)]
pub struct RestaurantQueryExecutor {
    latest: Option<SearchRequest>,
    status: QueryStatus,
}

impl RestaurantQueryExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether `state` in `locality` needs a fetch.
    ///
    /// With no locality, any in-flight request is abandoned and the status returns to
    /// [`QueryStatus::NotExecuted`]. Otherwise a [`FetchDecision::Fetch`] is returned
    /// only when the derived request differs from the latest issued one, and the status
    /// moves to [`QueryStatus::Pending`].
    pub fn plan(&mut self, state: &SearchState, locality: Option<&str>) -> FetchDecision {
        let _span = tracing::debug_span!("plan_search",
            locality = ?locality,
            page = state.page()
        )
        .entered();

        let Some(request) = SearchRequest::derive(state, locality) else {
            tracing::debug!("no locality, search not eligible");
            self.abandon();
            return FetchDecision::NotEligible;
        };

        if self.latest.as_ref() == Some(&request) {
            tracing::trace!("request unchanged, skipping fetch");
            return FetchDecision::Unchanged;
        }

        tracing::debug!(request = %request.cache_key(), "issuing search");
        self.latest = Some(request.clone());
        self.status = QueryStatus::Pending;
        FetchDecision::Fetch(request)
    }

    /// Applies the outcome of `request`.
    ///
    /// Returns `false`, leaving the displayed result untouched, when `request` is not
    /// the latest issued request or its result was already applied.
    pub fn receive(
        &mut self,
        request: &SearchRequest,
        outcome: Result<SearchResponse, MenuhubError>,
    ) -> bool {
        if self.latest.as_ref() != Some(request) {
            tracing::debug!(request = %request.cache_key(), "discarding stale search response");
            return false;
        }

        if !matches!(self.status, QueryStatus::Pending) {
            tracing::debug!(request = %request.cache_key(), "search response already applied");
            return false;
        }

        self.status = match outcome {
            Ok(response) => {
                tracing::debug!(
                    results = response.data.len(),
                    total = response.pagination.total,
                    "search results received"
                );
                QueryStatus::Ready(response)
            }
            Err(error) => {
                tracing::warn!(error = %error, "search failed");
                QueryStatus::Failed(error)
            }
        };
        true
    }

    /// Forgets the in-flight request so its response is ignored.
    ///
    /// Used when the view unmounts or the locality disappears.
    pub fn abandon(&mut self) {
        if self.latest.take().is_some() {
            tracing::debug!("abandoning search");
        }
        self.status = QueryStatus::NotExecuted;
    }

    /// Forgets the latest request without touching the displayed result.
    ///
    /// The next [`RestaurantQueryExecutor::plan`] then re-fetches even for an
    /// identical state; this is how an explicit user retry is expressed.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    /// Latest issued request, if any.
    #[must_use]
    pub const fn latest(&self) -> Option<&SearchRequest> {
        self.latest.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> &QueryStatus {
        &self.status
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, QueryStatus::Pending)
    }
}
