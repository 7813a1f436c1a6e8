//! Presentation state for the account profile screen

use chrono::{DateTime, Utc};

use crate::auth::{AccountUser, IdentityProvider};
use crate::view::banner::Banner;
use crate::view::messages::classify_profile_error;

/// Minimum accepted password length, matching the identity provider.
pub const MIN_PASSWORD_LEN: usize = 6;

/// State machine behind the account screen: profile editing and password
/// changes, with all identity mutations delegated to the provider.
pub struct AccountView {
    user: Option<AccountUser>,
    editing: bool,
    first_name: String,
    last_name: String,
    email: String,
    saving: bool,
    changing_password: bool,
    banner: Option<Banner>,
}

impl AccountView {
    pub fn new(user: Option<AccountUser>) -> Self {
        let mut view = Self {
            user: None,
            editing: false,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            saving: false,
            changing_password: false,
            banner: None,
        };
        view.adopt(user);
        view
    }

    fn adopt(&mut self, user: Option<AccountUser>) {
        if let Some(user) = &user {
            let (first, last) = user.split_name();
            self.first_name = first;
            self.last_name = last;
            self.email = user.email.clone();
        } else {
            self.first_name.clear();
            self.last_name.clear();
            self.email.clear();
        }
        self.user = user;
        self.editing = false;
    }

    pub fn user(&self) -> Option<&AccountUser> {
        self.user.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn banner(&self, now: DateTime<Utc>) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| !b.is_expired(now))
    }

    /// Password controls are hidden for Google-authenticated accounts.
    pub fn can_change_password(&self) -> bool {
        self.user.as_ref().map(|u| !u.is_google()).unwrap_or(false)
    }

    /// Email edits are disabled for Google-authenticated accounts.
    pub fn can_edit_email(&self) -> bool {
        self.user.as_ref().map(|u| !u.is_google()).unwrap_or(false)
    }

    pub fn begin_edit(&mut self) {
        if self.user.is_some() {
            self.editing = true;
        }
    }

    /// Discard edits, restoring the provider's values.
    pub fn cancel_edit(&mut self) {
        let user = self.user.take();
        self.adopt(user);
    }

    /// Form field setters; no-ops outside edit mode.
    pub fn set_first_name(&mut self, value: &str) {
        if self.editing {
            self.first_name = value.to_string();
        }
    }

    pub fn set_last_name(&mut self, value: &str) {
        if self.editing {
            self.last_name = value.to_string();
        }
    }

    pub fn set_email(&mut self, value: &str) {
        if self.editing && self.can_edit_email() {
            self.email = value.to_string();
        }
    }

    /// Save the edited profile: first and last name merge into one display
    /// name; the email is sent only when it changed. Re-entrant calls while
    /// a save is in flight are no-ops.
    pub async fn save(&mut self, provider: &dyn IdentityProvider, now: DateTime<Utc>) {
        if self.saving || !self.editing {
            return;
        }
        let Some(user) = self.user.clone() else {
            return;
        };

        let display_name = format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string();
        let email_changed = self.can_edit_email() && self.email != user.email;
        let new_email = email_changed.then_some(self.email.as_str());

        self.saving = true;
        let result = provider.update_profile(&display_name, new_email).await;
        self.saving = false;

        match result {
            Ok(()) => {
                if let Some(user) = &mut self.user {
                    user.display_name = Some(display_name);
                    if email_changed {
                        user.email = self.email.clone();
                    }
                }
                self.editing = false;
                self.banner = Some(Banner::info("Profile updated.", now));
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile update failed");
                self.banner = Some(Banner::error(classify_profile_error(&e), now));
            }
        }
    }

    /// Change the password: validate locally, re-authenticate with the
    /// current password, then submit the new one. Re-entrant calls while a
    /// change is in flight are no-ops.
    pub async fn change_password(
        &mut self,
        provider: &dyn IdentityProvider,
        current: &str,
        new: &str,
        confirm: &str,
        now: DateTime<Utc>,
    ) {
        if self.changing_password || !self.can_change_password() {
            return;
        }

        if let Err(message) = validate_password_change(current, new, confirm) {
            self.banner = Some(Banner::error(message, now));
            return;
        }

        self.changing_password = true;
        let result = match provider.reauthenticate(current).await {
            Ok(()) => provider.update_password(new).await,
            Err(e) => Err(e),
        };
        self.changing_password = false;

        match result {
            Ok(()) => {
                self.banner = Some(Banner::info("Password changed.", now));
            }
            Err(e) => {
                tracing::warn!(error = %e, "password change failed");
                self.banner = Some(Banner::error(classify_profile_error(&e), now));
            }
        }
    }

    /// Session changes reset the whole form.
    pub fn handle_session_change(&mut self, user: Option<&AccountUser>) {
        self.adopt(user.cloned());
        self.banner = None;
    }
}

fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), &'static str> {
    if new != confirm {
        return Err("The new passwords do not match.");
    }
    if new.len() < MIN_PASSWORD_LEN {
        return Err("The new password must be at least 6 characters long.");
    }
    if new == current {
        return Err("The new password must be different from the current one.");
    }
    Ok(())
}
