//! Inline message banner with auto-expiry

use chrono::{DateTime, Duration, Utc};

/// How long a banner stays visible.
pub const BANNER_TTL_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

/// A transient inline message
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    message: String,
    kind: BannerKind,
    expires_at: DateTime<Utc>,
}

impl Banner {
    pub fn info(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(message, BannerKind::Info, now)
    }

    pub fn error(message: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(message, BannerKind::Error, now)
    }

    fn new(message: impl Into<String>, kind: BannerKind, now: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            kind,
            expires_at: now + Duration::seconds(BANNER_TTL_SECS),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> BannerKind {
        self.kind
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
