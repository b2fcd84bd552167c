#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and the header's login
/// round-trip.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    /// Inline error shown next to the login form.
    pub error: Option<String>,
}

impl AuthState {
    /// A login or session restore is in flight.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn signed_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
        self.error = None;
    }

    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    pub fn signed_out(&mut self) {
        *self = Self::default();
    }

    pub fn is_connected(&self) -> bool {
        self.user.is_some()
    }
}
