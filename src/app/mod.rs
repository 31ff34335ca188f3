//! Application layer: page state, events and the actions they produce.
//!
//! Both pages follow the same unidirectional flow:
//!
//! ```text
//! User input / completions → Event → handler → state mutation → Vec<Action>
//!                                ↑                                  │
//!                                └──── runtime executes actions ◄───┘
//! ```
//!
//! Handlers are synchronous and perform no I/O, which keeps every transition
//! testable without a network.
//!
//! # Modules
//!
//! - [`actions`]: side effect commands returned by the handlers
//! - [`notify`]: user-facing notifications and the [`Notifier`] seam
//! - [`search_page`]: restaurant search view
//! - [`manage`]: create/edit "my restaurant" view
//!
//! # Example
//!
//! ```rust
//! use menuhub::app::{handle_search_event, Action, SearchEvent, SearchPage};
//!
//! let mut page = SearchPage::new(Some("austin".to_string()));
//! let (_, actions) = handle_search_event(&mut page, &SearchEvent::Mounted)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchSearch(_)]));
//! # Ok::<(), menuhub::MenuhubError>(())
//! ```

pub mod actions;
pub mod manage;
pub mod notify;
pub mod search_page;

pub use actions::Action;
pub use manage::{handle_manage_event, ManageEvent, ManagePhase, ManageRestaurantPage};
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use search_page::{handle_search_event, SearchEvent, SearchPage};
