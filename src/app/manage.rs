//! "Manage my restaurant" page.
//!
//! The page starts in [`ManagePhase::Unknown`] and asks the runtime to load the
//! caller's restaurant. The load result selects the mode: no restaurant means
//! [`ManagePhase::Creating`] with an empty form, an existing one means
//! [`ManagePhase::Editing`] with the form pre-filled through the codec.
//!
//! Submitting validates and encodes the form locally. Invalid forms never reach the
//! network. At most one submit is outstanding at a time; a second [`ManageEvent::Submit`]
//! is rejected with [`MenuhubError::SubmitInFlight`]. A failed submit leaves the form
//! exactly as the user left it.

use super::actions::Action;
use super::notify::Notification;
use crate::api::SubmitMode;
use crate::domain::{MenuhubError, Restaurant, Result};
use crate::form::{decode, encode, RestaurantForm};

/// Which of the two form modes the page is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagePhase {
    /// The caller's restaurant has not been loaded (yet).
    #[default]
    Unknown,
    /// The caller has no restaurant; submitting creates one (`POST`).
    Creating,
    /// The caller's restaurant exists; submitting updates it (`PUT`).
    Editing,
}

/// Inputs to [`handle_manage_event`].
#[derive(Debug, Clone, PartialEq)]
pub enum ManageEvent {
    /// The page was opened. Starts the restaurant load.
    Mounted,
    /// Result of [`Action::LoadMyRestaurant`]. `Ok(None)` means no restaurant yet.
    ///
    /// Ignored while a submit is outstanding; the submit's own result re-syncs the form.
    RestaurantLoaded(std::result::Result<Option<Restaurant>, MenuhubError>),
    /// The user changed the form; carries the complete new form.
    FormEdited(RestaurantForm),
    /// The user pressed submit.
    Submit,
    /// Result of [`Action::SubmitRestaurant`].
    SubmitCompleted(std::result::Result<Restaurant, MenuhubError>),
}

impl ManageEvent {
    const fn name(&self) -> &'static str {
        match self {
            Self::Mounted => "mounted",
            Self::RestaurantLoaded(_) => "restaurant_loaded",
            Self::FormEdited(_) => "form_edited",
            Self::Submit => "submit",
            Self::SubmitCompleted(_) => "submit_completed",
        }
    }
}

/// State of one "manage my restaurant" page instance.
#[derive(Debug, Clone, Default)]
pub struct ManageRestaurantPage {
    phase: ManagePhase,
    restaurant: Option<Restaurant>,
    form: RestaurantForm,
    in_flight: Option<SubmitMode>,
    last_error: Option<MenuhubError>,
}

impl ManageRestaurantPage {
    /// Creates a page in [`ManagePhase::Unknown`] with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form mode.
    #[must_use]
    pub const fn phase(&self) -> ManagePhase {
        self.phase
    }

    /// Restaurant as last confirmed by the server.
    #[must_use]
    pub const fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    /// Form as the user currently sees it.
    #[must_use]
    pub const fn form(&self) -> &RestaurantForm {
        &self.form
    }

    /// Mode of the outstanding submit, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<SubmitMode> {
        self.in_flight
    }

    /// Most recent load, validation or submit error, cleared by the next edit.
    #[must_use]
    pub const fn last_error(&self) -> Option<&MenuhubError> {
        self.last_error.as_ref()
    }

    fn synced_with(&mut self, restaurant: Option<Restaurant>) {
        self.form = decode(restaurant.as_ref());
        self.phase = if restaurant.is_some() {
            ManagePhase::Editing
        } else {
            ManagePhase::Creating
        };
        self.restaurant = restaurant;
        self.last_error = None;
    }
}

/// Applies `event` to `page`, returning whether to re-render and the actions to run.
///
/// # Errors
///
/// Returns [`MenuhubError::SubmitInFlight`] for a [`ManageEvent::Submit`] while an
/// earlier submit is still outstanding.
pub fn handle_manage_event(
    page: &mut ManageRestaurantPage,
    event: &ManageEvent,
) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_manage_event",
        event = event.name(),
        phase = ?page.phase
    )
    .entered();

    match event {
        ManageEvent::Mounted => {
            page.phase = ManagePhase::Unknown;
            Ok((true, vec![Action::LoadMyRestaurant]))
        }
        ManageEvent::RestaurantLoaded(_) if page.in_flight.is_some() => {
            tracing::debug!("restaurant load landed during submit, ignoring");
            Ok((false, vec![]))
        }
        ManageEvent::RestaurantLoaded(Ok(restaurant)) => {
            tracing::debug!(exists = restaurant.is_some(), "restaurant loaded");
            page.synced_with(restaurant.clone());
            Ok((true, vec![]))
        }
        ManageEvent::RestaurantLoaded(Err(error)) => {
            tracing::warn!(error = %error, "failed to load restaurant");
            page.last_error = Some(error.clone());
            Ok((true, vec![Action::Notify(Notification::error(format!(
                "Unable to load restaurant: {error}"
            )))]))
        }
        ManageEvent::FormEdited(form) => {
            page.form = form.clone();
            page.last_error = None;
            Ok((true, vec![]))
        }
        ManageEvent::Submit => submit(page),
        ManageEvent::SubmitCompleted(outcome) => {
            let Some(mode) = page.in_flight.take() else {
                tracing::debug!("submit completion without outstanding submit, ignoring");
                return Ok((false, vec![]));
            };

            match outcome {
                Ok(restaurant) => {
                    page.synced_with(Some(restaurant.clone()));
                    let message = match mode {
                        SubmitMode::Create => "Restaurant created!",
                        SubmitMode::Update => "Restaurant updated!",
                    };
                    Ok((true, vec![Action::Notify(Notification::success(message))]))
                }
                Err(error) => {
                    tracing::warn!(error = %error, ?mode, "submit failed");
                    page.last_error = Some(error.clone());
                    let message = match mode {
                        SubmitMode::Create => "Unable to create restaurant",
                        SubmitMode::Update => "Unable to update restaurant",
                    };
                    Ok((true, vec![Action::Notify(Notification::error(message))]))
                }
            }
        }
    }
}

fn submit(page: &mut ManageRestaurantPage) -> Result<(bool, Vec<Action>)> {
    if page.in_flight.is_some() {
        tracing::debug!("submit rejected, one already outstanding");
        return Err(MenuhubError::SubmitInFlight);
    }

    let mode = match page.phase {
        ManagePhase::Unknown => {
            return Ok((false, vec![Action::Notify(Notification::warning(
                "Restaurant details have not loaded yet",
            ))]));
        }
        ManagePhase::Creating => SubmitMode::Create,
        ManagePhase::Editing => SubmitMode::Update,
    };

    match encode(&page.form) {
        Ok(payload) => {
            page.in_flight = Some(mode);
            page.last_error = None;
            Ok((true, vec![Action::SubmitRestaurant { mode, payload }]))
        }
        Err(error) => {
            tracing::debug!(error = %error, "form invalid, not submitting");
            page.last_error = Some(error.clone());
            Ok((true, vec![Action::Notify(Notification::error(error.to_string()))]))
        }
    }
}
