//! Types for bookings and the services they reference

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel used when a text field is missing from a remote record.
pub const UNKNOWN_FIELD: &str = "N/A";

/// Canonical identifier of a booking.
///
/// The store exposes two identifier schemes (a document-style identifier and
/// a legacy numeric row id). A `BookingId` is produced only by the
/// normalizer, which applies the preference order once; every subsequent API
/// call for that record uses the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identifier as sent on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    /// Map a remote status string to a status, defaulting to `Confirmed`
    /// for absent or unrecognized values.
    pub fn from_remote(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("cancelled") | Some("canceled") => BookingStatus::Cancelled,
            Some("pending") => BookingStatus::Pending,
            _ => BookingStatus::Confirmed,
        }
    }

    /// The wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable service, owned by the remote store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    /// Canonical store identifier
    pub id: String,

    /// Legacy numeric row id, kept for diagnostics
    pub legacy_id: Option<i64>,

    pub title: String,

    pub duration_minutes: i64,

    pub price: f64,

    /// Always resolvable: a placeholder stands in when the record has none
    pub image_url: String,
}

/// A canonical booking record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Booking {
    /// Canonical identifier used for all API calls derived from this record
    pub id: BookingId,

    /// Legacy numeric row id, kept for diagnostics
    pub legacy_id: Option<i64>,

    pub user_email: String,

    /// Absolute scheduled instant; absent when the remote record carried
    /// none that parsed
    pub scheduled_at: Option<DateTime<Utc>>,

    pub status: BookingStatus,

    pub service: Service,
}

impl Booking {
    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }

    /// Whether this booking belongs on the "upcoming" tab at `now`.
    ///
    /// Cancelled bookings are never upcoming regardless of date; records
    /// without a scheduled instant cannot be acted on and sort as past.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        !self.is_cancelled() && self.scheduled_at.map(|at| at > now).unwrap_or(false)
    }
}

/// The minimal field set sent when creating a booking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDraft {
    /// Store identifier of the booked service
    pub service: String,

    pub user_email: String,

    pub scheduled_at: DateTime<Utc>,

    pub status: BookingStatus,
}
