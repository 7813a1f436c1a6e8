//! Presentation state for the booking-creation (schedule) screen

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::auth::AccountUser;
use crate::booking::{Booking, BookingDraft, BookingStatus, BookingsClient, Service};
use crate::error::Error;
use crate::schedule::{month_grid, scheduled_instant, shift_month, CalendarCell, TIME_SLOTS};
use crate::view::banner::Banner;
use crate::view::messages::classify_booking_error;

/// State machine behind the schedule screen: month navigation, date and
/// slot selection, and booking submission.
pub struct ScheduleView {
    viewed_month: NaiveDate,
    today: NaiveDate,
    selected_date: Option<NaiveDate>,
    selected_slot: Option<&'static str>,
    service: Option<Service>,
    user_email: Option<String>,
    processing: bool,
    banner: Option<Banner>,
}

impl ScheduleView {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            viewed_month: shift_month(today, 0),
            today,
            selected_date: None,
            selected_slot: None,
            service: None,
            user_email: None,
            processing: false,
            banner: None,
        }
    }

    /// The 42-cell grid for the viewed month, regenerated on every call.
    pub fn grid(&self) -> Vec<CalendarCell> {
        month_grid(self.viewed_month, self.today, self.selected_date)
    }

    pub fn viewed_month(&self) -> NaiveDate {
        self.viewed_month
    }

    pub fn next_month(&mut self) {
        self.viewed_month = shift_month(self.viewed_month, 1);
    }

    pub fn prev_month(&mut self) {
        self.viewed_month = shift_month(self.viewed_month, -1);
    }

    /// Select a date. Disabled cells (past dates, dates outside the viewed
    /// month) are no-ops.
    pub fn select_date(&mut self, date: NaiveDate) {
        let selectable = date >= self.today
            && date.year() == self.viewed_month.year()
            && date.month() == self.viewed_month.month();
        if selectable {
            self.selected_date = Some(date);
        }
    }

    /// Select a slot from the catalog. Unknown labels are no-ops.
    pub fn select_slot(&mut self, label: &str) {
        if let Some(slot) = TIME_SLOTS.iter().copied().find(|s| *s == label) {
            self.selected_slot = Some(slot);
        }
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_slot(&self) -> Option<&'static str> {
        self.selected_slot
    }

    pub fn set_service(&mut self, service: Service) {
        self.service = Some(service);
    }

    pub fn service(&self) -> Option<&Service> {
        self.service.as_ref()
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn banner(&self, now: DateTime<Utc>) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| !b.is_expired(now))
    }

    /// Rescheduling is a navigation to this screen with the service
    /// pre-filled; the user picks a fresh date and slot.
    pub fn prefill_from(&mut self, booking: &Booking) {
        self.service = Some(booking.service.clone());
        self.selected_date = None;
        self.selected_slot = None;
    }

    /// Session changes reset selections and adopt the new user's email.
    pub fn handle_session_change(&mut self, user: Option<&AccountUser>) {
        *self = Self {
            user_email: user.map(|u| u.email.clone()),
            ..Self::new(self.today)
        };
    }

    /// Assemble the create payload from the current selections.
    pub fn draft(&self) -> Result<BookingDraft, Error> {
        let email = self
            .user_email
            .as_deref()
            .filter(|e| e.contains('@'))
            .ok_or_else(|| Error::validation("a valid email address is required"))?;
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| Error::validation("a service must be selected"))?;
        let date = self
            .selected_date
            .ok_or_else(|| Error::validation("a date must be selected"))?;
        let slot = self
            .selected_slot
            .ok_or_else(|| Error::validation("a time slot must be selected"))?;
        let scheduled_at = scheduled_instant(date, slot)
            .ok_or_else(|| Error::validation("the selected slot could not be scheduled"))?;

        Ok(BookingDraft {
            service: service.id.clone(),
            user_email: email.to_string(),
            scheduled_at,
            status: BookingStatus::Confirmed,
        })
    }

    /// Submit the booking. Re-entrant calls while a request is in flight
    /// are no-ops. Returns the created booking on success.
    pub async fn submit(
        &mut self,
        client: &BookingsClient,
        now: DateTime<Utc>,
    ) -> Option<Booking> {
        if self.processing {
            return None;
        }

        let draft = match self.draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.banner = Some(Banner::error(classify_booking_error(&e), now));
                return None;
            }
        };

        self.processing = true;
        let result = client.create(&draft).await;
        self.processing = false;

        match result {
            Ok(booking) => {
                self.selected_date = None;
                self.selected_slot = None;
                self.banner = Some(Banner::info("Your booking is confirmed.", now));
                Some(booking)
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking creation failed");
                self.banner = Some(Banner::error(classify_booking_error(&e), now));
                None
            }
        }
    }
}
