//! Signed-in user session
//!
//! An explicitly constructed context object owned by the application,
//! not ambient global state. The identity itself comes from an external
//! auth provider (injected via config here); it is a display concern
//! only and never gates search or favorites.

/// Identity supplied by the auth provider.
#[derive(Debug, Clone, PartialEq)]
pub struct UserIdentity {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// Holds the optional signed-in identity for one application run.
#[derive(Debug, Default)]
pub struct SessionContext {
    user: Option<UserIdentity>,
}

impl SessionContext {
    /// A signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, identity: UserIdentity) {
        self.user = Some(identity);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }
}
