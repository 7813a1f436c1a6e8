//! Booking lifecycle operations against the remote store

mod normalize;
mod types;

use reqwest::Client;
use serde_json::{json, Value};

use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};

pub use normalize::{normalize_booking, normalize_service, resolve_image_url, PLACEHOLDER_IMAGE_URL};
pub use types::*;

/// Result of the two-phase existence probe
#[derive(Debug, Clone)]
pub struct Existence {
    /// Whether the booking should be treated as present on the store.
    ///
    /// `false` only when both probe phases produced clean negatives; an
    /// uncertain probe (network-level failure rather than a 404) reports
    /// `true` so callers attempt cancellation instead of silently dropping
    /// a possibly-real booking.
    pub exists: bool,

    /// The resolved record, when a phase located one
    pub record: Option<Booking>,
}

/// How a cancellation was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancellation {
    /// The record was deleted outright
    Deleted,

    /// The record survived but its status was updated to `cancelled`
    StatusUpdated,

    /// The record was already gone by the time a strategy reached it
    AlreadyGone,
}

/// Client for booking operations
pub struct BookingsClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl BookingsClient {
    pub(crate) fn new(base_url: &str, api_token: Option<&str>, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.map(str::to_string),
            client,
        }
    }

    fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}/api/bookings{}", self.base_url, path_and_query)
    }

    fn authorize<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        match &self.api_token {
            Some(token) => fetch.bearer_auth(token),
            None => fetch,
        }
    }

    /// Create a booking with the minimal required field set.
    ///
    /// Store-side validation failures surface as
    /// [`Error::Remote`] carrying the HTTP status; callers map those to
    /// user-facing messages.
    pub async fn create(&self, draft: &BookingDraft) -> Result<Booking, Error> {
        let url = self.endpoint("");
        let payload = json!({
            "data": {
                "service": draft.service,
                "userEmail": draft.user_email,
                "scheduleTime": draft.scheduled_at.to_rfc3339(),
                "bookingStatus": draft.status,
            }
        });

        let value = self
            .authorize(Fetch::post(&self.client, &url))
            .json(&payload)?
            .execute_value()
            .await?;

        tracing::debug!(email = %draft.user_email, service = %draft.service, "booking created");
        Ok(normalize_booking(single_record(&value), &self.base_url))
    }

    /// Fetch every booking for a requester email, newest schedule first.
    ///
    /// Returns an empty vector (never an error) when nothing matches.
    pub async fn fetch_for_user(&self, email: &str) -> Result<Vec<Booking>, Error> {
        let url = self.endpoint(&format!(
            "?filters[userEmail][$eq]={}&populate=service.image&sort=scheduleTime:desc",
            email
        ));

        let value = self
            .authorize(Fetch::get(&self.client, &url))
            .execute_value()
            .await?;

        let bookings = value
            .get("data")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .map(|record| normalize_booking(record, &self.base_url))
                    .collect()
            })
            .unwrap_or_default();

        Ok(bookings)
    }

    /// Direct fetch by identifier. `Ok(None)` is a clean 404.
    async fn fetch_direct(&self, id: &BookingId) -> Result<Option<Booking>, Error> {
        let url = self.endpoint(&format!("/{}?populate=*", id));

        match self
            .authorize(Fetch::get(&self.client, &url))
            .execute_value()
            .await
        {
            Ok(value) => Ok(Some(normalize_booking(single_record(&value), &self.base_url))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Filtered lookup matching the identifier against the document id
    /// field. `Ok(None)` is a clean empty result.
    async fn fetch_by_document_id(&self, id: &BookingId) -> Result<Option<Booking>, Error> {
        let url = self.endpoint(&format!("?filters[documentId][$eq]={}&populate=*", id));

        let value = self
            .authorize(Fetch::get(&self.client, &url))
            .execute_value()
            .await?;

        Ok(value
            .get("data")
            .and_then(Value::as_array)
            .and_then(|records| records.first())
            .map(|record| normalize_booking(record, &self.base_url)))
    }

    /// Two-phase existence probe: direct fetch, then filtered lookup.
    pub async fn existence_check(&self, id: &BookingId) -> Existence {
        let direct_clean_miss = match self.fetch_direct(id).await {
            Ok(Some(record)) => {
                return Existence {
                    exists: true,
                    record: Some(record),
                }
            }
            Ok(None) => true,
            Err(e) => {
                tracing::debug!(booking = %id, error = %e, "direct fetch failed, trying filtered lookup");
                false
            }
        };

        match self.fetch_by_document_id(id).await {
            Ok(Some(record)) => Existence {
                exists: true,
                record: Some(record),
            },
            Ok(None) if direct_clean_miss => Existence {
                exists: false,
                record: None,
            },
            Ok(None) => Existence {
                exists: true,
                record: None,
            },
            Err(e) => {
                tracing::warn!(booking = %id, error = %e, "existence probe inconclusive, assuming the booking exists");
                Existence {
                    exists: true,
                    record: None,
                }
            }
        }
    }

    /// Cancel a booking.
    ///
    /// The identifier is first resolved through the two-phase probe;
    /// [`Error::BookingNotFound`] when both phases produce clean negatives.
    /// Strategies then run in order: delete the record outright, and on a
    /// non-404 failure update its status to `cancelled`. A 404 from the
    /// status update after a failed delete means the delete landed
    /// server-side and the observed failure was a stale read; that counts
    /// as success, as does any "already deleted" failure message.
    pub async fn cancel(&self, id: &BookingId) -> Result<Cancellation, Error> {
        let resolved = self.resolve(id).await?;
        let target = resolved.map(|record| record.id).unwrap_or_else(|| id.clone());

        let delete_err = match self.delete_record(&target).await {
            Ok(()) => {
                tracing::debug!(booking = %target, "booking deleted");
                return Ok(Cancellation::Deleted);
            }
            Err(e) if e.is_not_found() || mentions_already_deleted(&e) => {
                return Ok(Cancellation::AlreadyGone);
            }
            Err(e) => {
                tracing::warn!(booking = %target, error = %e, "delete failed, falling back to status update");
                e
            }
        };

        match self.mark_cancelled(&target).await {
            Ok(()) => Ok(Cancellation::StatusUpdated),
            Err(e) if e.is_not_found() => {
                tracing::debug!(booking = %target, "status update hit 404 after failed delete, record is gone");
                Ok(Cancellation::AlreadyGone)
            }
            Err(e) if mentions_already_deleted(&e) => Ok(Cancellation::AlreadyGone),
            Err(e) => Err(Error::CancellationFailed(format!(
                "delete failed ({}); status update failed ({})",
                delete_err, e
            ))),
        }
    }

    /// Probe like [`existence_check`](Self::existence_check) but fail hard
    /// when the booking is verifiably absent. `Ok(None)` means the probe was
    /// inconclusive and cancellation should proceed with the given id.
    async fn resolve(&self, id: &BookingId) -> Result<Option<Booking>, Error> {
        let probe = self.existence_check(id).await;
        if !probe.exists {
            return Err(Error::BookingNotFound(id.to_string()));
        }
        Ok(probe.record)
    }

    async fn delete_record(&self, id: &BookingId) -> Result<(), Error> {
        let url = self.endpoint(&format!("/{}", id));
        self.authorize(Fetch::delete(&self.client, &url))
            .execute_value()
            .await?;
        Ok(())
    }

    async fn mark_cancelled(&self, id: &BookingId) -> Result<(), Error> {
        let url = self.endpoint(&format!("/{}", id));
        let payload = json!({"data": {"bookingStatus": BookingStatus::Cancelled}});
        self.authorize(Fetch::put(&self.client, &url))
            .json(&payload)?
            .execute_value()
            .await?;
        Ok(())
    }
}

/// Unwrap the store's `{"data": {...}}` envelope around a single record.
fn single_record(value: &Value) -> &Value {
    match value.get("data") {
        Some(inner) if !inner.is_null() => inner,
        _ => value,
    }
}

fn mentions_already_deleted(error: &Error) -> bool {
    error.to_string().to_ascii_lowercase().contains("already deleted")
}
