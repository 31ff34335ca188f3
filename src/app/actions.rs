//! Side effects requested by the page handlers.
//!
//! Handlers never perform I/O. They mutate page state and return a `Vec<Action>`
//! that the runtime executes in order, feeding results back as events.

use super::notify::Notification;
use crate::api::SubmitMode;
use crate::form::TransferPayload;
use crate::query::SearchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a restaurant search and report it back as `SearchEvent::SearchCompleted`.
    FetchSearch(SearchRequest),

    /// Drop any outstanding search; its response would be ignored anyway.
    CancelSearch,

    /// Fetch the caller's restaurant and report it back as
    /// `ManageEvent::RestaurantLoaded`.
    LoadMyRestaurant,

    /// Send an encoded form and report it back as `ManageEvent::SubmitCompleted`.
    SubmitRestaurant {
        mode: SubmitMode,
        payload: TransferPayload,
    },

    /// Show a transient message to the user.
    Notify(Notification),
}
