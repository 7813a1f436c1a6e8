//! The identity-provider seam
//!
//! Sign-in, token issuance, and credential storage belong to an external
//! provider. This crate owns only the boundary: a trait the host application
//! implements over its provider SDK, and a watch-channel feed that pushes
//! session changes into the view controllers.

mod types;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Error;

pub use types::*;

/// Operations the external identity provider must supply
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Option<AccountUser>;

    /// Update display name and, when given, the account email
    async fn update_profile(&self, display_name: &str, email: Option<&str>) -> Result<(), Error>;

    /// Re-authenticate with the current password. Required by the provider
    /// before credential mutations.
    async fn reauthenticate(&self, current_password: &str) -> Result<(), Error>;

    /// Replace the account password. Call only after a successful
    /// [`reauthenticate`](Self::reauthenticate).
    async fn update_password(&self, new_password: &str) -> Result<(), Error>;
}

/// Publisher for session-change events.
///
/// The host application forwards its provider's session callbacks into
/// [`publish`](Self::publish); controllers hold a receiver and reset local
/// state whenever the value changes. Events may arrive at any time.
pub struct SessionFeed {
    sender: watch::Sender<Option<AccountUser>>,
}

impl SessionFeed {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Push a session change. `None` means signed out.
    pub fn publish(&self, user: Option<AccountUser>) {
        if self.sender.send(user).is_err() {
            tracing::debug!("session change published with no live subscribers");
        }
    }

    /// Subscribe to session changes
    pub fn subscribe(&self) -> watch::Receiver<Option<AccountUser>> {
        self.sender.subscribe()
    }
}

impl Default for SessionFeed {
    fn default() -> Self {
        Self::new()
    }
}
