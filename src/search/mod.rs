//! Search state coordination.
//!
//! Owns the composite search state as a single value and the rules for changing it.
//! The query executor reads snapshots of this state; nothing else mutates it.

pub mod state;

pub use state::{SearchState, SortOption, FIRST_PAGE};
