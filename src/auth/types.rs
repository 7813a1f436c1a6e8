//! Types describing the externally-owned user session

use serde::{Deserialize, Serialize};

/// Provider id reported for Google-authenticated accounts.
pub const GOOGLE_PROVIDER: &str = "google.com";

/// The signed-in user, as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    /// Provider-assigned user id
    pub uid: String,

    pub email: String,

    /// Display name, when the provider holds one
    pub display_name: Option<String>,

    /// Authentication providers linked to the account
    pub providers: Vec<String>,
}

impl AccountUser {
    /// Whether the account is Google-authenticated. Such accounts get no
    /// password controls and an immutable email: the identity provider owns
    /// those fields.
    pub fn is_google(&self) -> bool {
        self.providers.iter().any(|p| p == GOOGLE_PROVIDER)
    }

    /// Split the display name into (first, last) for the profile form.
    /// Everything after the first space counts as the last name.
    pub fn split_name(&self) -> (String, String) {
        match &self.display_name {
            None => (String::new(), String::new()),
            Some(name) => match name.split_once(' ') {
                Some((first, last)) => (first.to_string(), last.to_string()),
                None => (name.clone(), String::new()),
            },
        }
    }
}
