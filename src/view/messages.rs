//! Mapping of raw errors to user-facing messages
//!
//! Classification inspects error text for known substrings. The store does
//! not expose structured error codes, so this is a heuristic: callers and
//! tests should expect a classified message to be at least as specific as
//! the generic fallback, never an exact contract.

use crate::error::Error;

/// Fallback shown when no more specific classification applies.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Classify a booking-creation failure.
pub fn classify_booking_error(error: &Error) -> &'static str {
    let text = error.to_string().to_ascii_lowercase();
    if text.contains("email") {
        "Please enter a valid email address and try again."
    } else if text.contains("service") {
        "The selected service could not be booked. Please pick another."
    } else if text.contains("validation") || text.contains("400") {
        "The booking request was rejected. Please check the details and try again."
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

/// Classify a cancellation failure.
pub fn classify_cancel_error(error: &Error) -> &'static str {
    match error {
        Error::BookingNotFound(_) => "This booking no longer exists.",
        Error::CancellationFailed(_) => {
            "The booking could not be cancelled. Please try again in a moment."
        }
        _ => GENERIC_ERROR_MESSAGE,
    }
}

/// Classify an identity-provider failure during profile or password
/// updates.
pub fn classify_profile_error(error: &Error) -> &'static str {
    let text = error.to_string().to_ascii_lowercase();
    if text.contains("recent login") || text.contains("requires-recent-login") {
        "For security, please sign out and sign back in before changing this."
    } else if text.contains("already in use") || text.contains("email-already-in-use") {
        "That email address is already in use by another account."
    } else if text.contains("wrong password") || text.contains("invalid-credential") {
        "The current password you entered is incorrect."
    } else {
        GENERIC_ERROR_MESSAGE
    }
}
