//! Normalization of heterogeneous store records into canonical types
//!
//! The store has shipped several record shapes over time: flat fields,
//! payloads wrapped in an `attributes` object, relations wrapped in `data`,
//! and two identifier schemes. All of that is absorbed here, once, by
//! ordered field-priority lists; view code only ever sees canonical values.
//! Normalization never fails; missing fields yield sentinels.

use crate::booking::types::{Booking, BookingId, BookingStatus, Service, UNKNOWN_FIELD};
use serde_json::Value;

/// Image shown when a service record has no resolvable image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=Service";

/// Field names holding the scheduled instant, most specific first.
const SCHEDULE_FIELDS: &[&str] = &["scheduleTime", "date"];

/// Field names holding the booking status, most specific first.
const STATUS_FIELDS: &[&str] = &["bookingStatus", "status"];

/// Field names holding the requester email, most specific first.
const EMAIL_FIELDS: &[&str] = &["userEmail", "email"];

/// Look up `key` on the record, falling through to a legacy `attributes`
/// wrapper. Explicit nulls count as absent.
fn field<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record
        .get(key)
        .filter(|v| !v.is_null())
        .or_else(|| {
            record
                .get("attributes")
                .and_then(|attrs| attrs.get(key))
                .filter(|v| !v.is_null())
        })
}

fn first_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| field(record, key))
}

fn str_field(record: &Value, keys: &[&str]) -> Option<String> {
    first_field(record, keys).and_then(|v| match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Canonical id: document-style identifier preferred, legacy numeric id as
/// fallback. The legacy id is returned separately for diagnostics.
fn split_ids(record: &Value) -> (String, Option<i64>) {
    let legacy = field(record, "id").and_then(Value::as_i64);
    let canonical = str_field(record, &["documentId"])
        .or_else(|| legacy.map(|id| id.to_string()))
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string());
    (canonical, legacy)
}

/// Unwrap a relation that may arrive as `{"data": {...}}` or as the bare
/// object.
fn unwrap_relation<'a>(value: &'a Value) -> &'a Value {
    match value.get("data") {
        Some(inner) if !inner.is_null() => inner,
        _ => value,
    }
}

/// Resolve a service image to a displayable absolute URL.
///
/// Tries, in order: a bare string, an object with a `url` field, the nested
/// `data.attributes.url` path, the nested `attributes.url` path. Anything
/// else resolves to the placeholder. Relative paths are prefixed with the
/// store base URL.
pub fn resolve_image_url(image: Option<&Value>, base_url: &str) -> String {
    let raw = image.and_then(|value| {
        value
            .as_str()
            .map(str::to_string)
            .or_else(|| value.get("url").and_then(Value::as_str).map(str::to_string))
            .or_else(|| {
                value
                    .pointer("/data/attributes/url")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .or_else(|| {
                value
                    .pointer("/attributes/url")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
    });

    match raw {
        None => PLACEHOLDER_IMAGE_URL.to_string(),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url,
        Some(path) => format!("{}{}", base_url.trim_end_matches('/'), path),
    }
}

/// Normalize a raw service record.
pub fn normalize_service(raw: &Value, base_url: &str) -> Service {
    let record = unwrap_relation(raw);
    let (id, legacy_id) = split_ids(record);

    Service {
        id,
        legacy_id,
        title: str_field(record, &["title", "name"]).unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
        duration_minutes: first_field(record, &["duration"])
            .and_then(Value::as_i64)
            .unwrap_or(0),
        price: first_field(record, &["price"])
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        image_url: resolve_image_url(field(record, "image"), base_url),
    }
}

/// Normalize a raw booking record.
pub fn normalize_booking(raw: &Value, base_url: &str) -> Booking {
    let record = unwrap_relation(raw);
    let (id, legacy_id) = split_ids(record);

    let scheduled_at = str_field(record, SCHEDULE_FIELDS).and_then(|text| parse_instant(&text));

    let status = BookingStatus::from_remote(str_field(record, STATUS_FIELDS).as_deref());

    let service = field(record, "service")
        .map(|raw| normalize_service(raw, base_url))
        .unwrap_or_else(|| normalize_service(&Value::Null, base_url));

    Booking {
        id: BookingId::new(id),
        legacy_id,
        user_email: str_field(record, EMAIL_FIELDS).unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
        scheduled_at,
        status,
        service,
    }
}

fn parse_instant(text: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}
