//! The fixed catalog of bookable time slots

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

/// Bookable slots: half-hour steps across business hours, 12-hour labels.
///
/// The catalog is static; no availability check against existing bookings is
/// performed anywhere in this crate.
pub const TIME_SLOTS: [&str; 18] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "12:00 PM", "12:30 PM",
    "1:00 PM", "1:30 PM", "2:00 PM", "2:30 PM", "3:00 PM", "3:30 PM", "4:00 PM", "4:30 PM",
    "5:00 PM", "5:30 PM",
];

/// Parse a slot label into a time of day.
pub fn slot_time(label: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(label.trim(), "%l:%M %p").ok()
}

/// Combine a calendar date with a slot label in the viewer's local timezone
/// and convert the result to an absolute instant.
pub fn scheduled_instant(date: NaiveDate, slot: &str) -> Option<DateTime<Utc>> {
    let time = slot_time(slot)?;
    let local = Local.from_local_datetime(&date.and_time(time)).earliest()?;
    Some(local.with_timezone(&Utc))
}
