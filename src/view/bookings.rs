//! Presentation state for the bookings list

use chrono::{DateTime, Utc};

use crate::auth::AccountUser;
use crate::booking::{Booking, BookingId, BookingsClient};
use crate::error::Error;
use crate::view::banner::Banner;
use crate::view::messages::classify_cancel_error;

/// Which partition of the fetched set is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Upcoming,
    Past,
}

/// Steps of the per-booking cancellation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelFlow {
    #[default]
    Idle,
    CheckingExistence,
    Cancelling,
}

/// Split bookings into (upcoming, past) at `now`.
///
/// Cancelled bookings are always past regardless of their date.
pub fn partition(bookings: &[Booking], now: DateTime<Utc>) -> (Vec<&Booking>, Vec<&Booking>) {
    bookings.iter().partition(|b| b.is_upcoming(now))
}

/// State machine behind the bookings screen
#[derive(Default)]
pub struct BookingsView {
    tab: Tab,
    bookings: Vec<Booking>,
    selected: Option<Booking>,
    processing: bool,
    cancelling: bool,
    flow: CancelFlow,
    banner: Option<Banner>,
}

impl BookingsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Bookings visible on the current tab at `now`.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Booking> {
        let (upcoming, past) = partition(&self.bookings, now);
        match self.tab {
            Tab::Upcoming => upcoming,
            Tab::Past => past,
        }
    }

    /// The confirmation modal is shown iff a booking is selected.
    pub fn modal_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<&Booking> {
        self.selected.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn is_cancelling(&self) -> bool {
        self.cancelling
    }

    pub fn flow(&self) -> CancelFlow {
        self.flow
    }

    /// The active banner, if it has not expired.
    pub fn banner(&self, now: DateTime<Utc>) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| !b.is_expired(now))
    }

    /// Select a booking from the fetched set, opening the modal.
    pub fn select(&mut self, id: &BookingId) {
        self.selected = self.bookings.iter().find(|b| &b.id == id).cloned();
    }

    pub fn close_modal(&mut self) {
        self.selected = None;
    }

    /// Reload the user's bookings. Re-entrant calls while a load is in
    /// flight are no-ops.
    pub async fn refresh(&mut self, client: &BookingsClient, email: &str, now: DateTime<Utc>) {
        if self.processing {
            return;
        }
        self.processing = true;

        match client.fetch_for_user(email).await {
            Ok(bookings) => {
                self.bookings = bookings;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load bookings");
                self.banner = Some(Banner::error(load_error_message(&e), now));
            }
        }

        self.processing = false;
    }

    /// Run the cancellation flow for the selected booking.
    ///
    /// `idle -> checking-existence -> {not found: purge, found: cancelling}
    /// -> {success: purge, failure: error banner} -> idle`. Repeated calls
    /// while the flow is running are no-ops, so duplicate clicks cannot
    /// issue duplicate requests.
    pub async fn confirm_cancel(&mut self, client: &BookingsClient, now: DateTime<Utc>) {
        if self.cancelling {
            return;
        }
        let Some(booking) = self.selected.clone() else {
            return;
        };

        self.cancelling = true;
        self.flow = CancelFlow::CheckingExistence;

        let probe = client.existence_check(&booking.id).await;
        let banner = if !probe.exists {
            self.purge(&booking.id);
            Banner::info("This booking had already been removed.", now)
        } else {
            self.flow = CancelFlow::Cancelling;
            match client.cancel(&booking.id).await {
                Ok(_) => {
                    self.purge(&booking.id);
                    Banner::info("Your booking has been cancelled.", now)
                }
                Err(e) => Banner::error(classify_cancel_error(&e), now),
            }
        };

        self.banner = Some(banner);
        self.selected = None;
        self.cancelling = false;
        self.flow = CancelFlow::Idle;
    }

    /// Drop a booking from local state once the store confirms (or is
    /// inferred to confirm) its removal.
    fn purge(&mut self, id: &BookingId) {
        self.bookings.retain(|b| &b.id != id);
    }

    /// Session changes reset everything held locally.
    pub fn handle_session_change(&mut self, user: Option<&AccountUser>) {
        tracing::debug!(signed_in = user.is_some(), "session changed, resetting bookings view");
        *self = Self {
            tab: self.tab,
            ..Self::default()
        };
    }
}

fn load_error_message(_error: &Error) -> &'static str {
    "Your bookings could not be loaded. Please try again."
}
