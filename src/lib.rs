//! Slotbook Rust Client Library
//!
//! A Rust client library for a Strapi-backed appointment booking service:
//! scheduling primitives (month grid, slot catalog), record normalization,
//! the booking lifecycle (create, list, existence probe, cancel with
//! fallback), and presentation-state controllers for the booking, schedule,
//! and account screens. Authentication is delegated to an external identity
//! provider behind the [`auth::IdentityProvider`] trait.

pub mod auth;
pub mod booking;
pub mod config;
pub mod error;
pub mod fetch;
pub mod schedule;
pub mod services;
pub mod view;

use reqwest::Client;

use crate::booking::BookingsClient;
use crate::config::ClientOptions;
use crate::services::ServicesClient;

/// The main entry point for the slotbook client
pub struct Slotbook {
    /// The base URL of the remote store
    pub url: String,
    /// HTTP client used for requests
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
}

impl Slotbook {
    /// Create a new client for the store at `url`
    ///
    /// # Example
    ///
    /// ```
    /// use slotbook::Slotbook;
    ///
    /// let slotbook = Slotbook::new("http://localhost:1337");
    /// ```
    pub fn new(url: &str) -> Self {
        Self::new_with_options(ClientOptions::default().with_base_url(url))
    }

    /// Create a new client from full options
    ///
    /// # Example
    ///
    /// ```
    /// use slotbook::{config::ClientOptions, Slotbook};
    ///
    /// let options = ClientOptions::default()
    ///     .with_base_url("https://store.example.com")
    ///     .with_api_token("token");
    /// let slotbook = Slotbook::new_with_options(options);
    /// ```
    pub fn new_with_options(options: ClientOptions) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build().unwrap_or_default();

        Self {
            url: options.base_url.clone(),
            http_client,
            options,
        }
    }

    /// Client for booking lifecycle operations
    pub fn bookings(&self) -> BookingsClient {
        BookingsClient::new(
            &self.url,
            self.options.api_token.as_deref(),
            self.http_client.clone(),
        )
    }

    /// Client for the service catalog
    pub fn services(&self) -> ServicesClient {
        ServicesClient::new(
            &self.url,
            self.options.api_token.as_deref(),
            self.http_client.clone(),
        )
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AccountUser, IdentityProvider, SessionFeed};
    pub use crate::booking::{
        Booking, BookingDraft, BookingId, BookingStatus, Cancellation, Service,
    };
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::Slotbook;
}
