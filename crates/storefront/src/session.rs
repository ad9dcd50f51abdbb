use std::sync::Arc;

use shared::domain::{Session, User};
use storage::StoreAdapter;
use tracing::{debug, info};

use crate::{
    credential::CredentialIssuer,
    error::StorefrontError,
    forms::{LoginForm, SignupForm},
};

pub const AUTH_KEY: &str = "auth";
pub const DEFAULT_DISPLAY_NAME: &str = "student";

/// Name shown for a user who logged in with `email`: the part before the
/// first `@`, or [`DEFAULT_DISPLAY_NAME`] when that part is empty.
pub fn display_name_for(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() {
        DEFAULT_DISPLAY_NAME.to_string()
    } else {
        local.to_string()
    }
}

/// Holds at most one session. `Anonymous -> login|signup -> Authenticated
/// -> logout -> Anonymous`; a login while authenticated replaces the
/// session.
pub struct SessionService {
    store: StoreAdapter,
    issuer: Arc<dyn CredentialIssuer>,
    session: Option<Session>,
}

impl SessionService {
    pub async fn restore(store: StoreAdapter, issuer: Arc<dyn CredentialIssuer>) -> Self {
        let session: Option<Session> = store.get(AUTH_KEY, None).await;
        debug!("session: restored authenticated={}", session.is_some());
        Self {
            store,
            issuer,
            session,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Any well-formed email with a non-empty password is accepted.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&Session, StorefrontError> {
        LoginForm { email, password }.validate()?;
        let email = email.trim();
        let user = User {
            email: email.to_string(),
            name: display_name_for(email),
        };
        self.begin(user).await
    }

    pub async fn signup(&mut self, email: &str, name: &str) -> Result<&Session, StorefrontError> {
        SignupForm { email, name }.validate()?;
        let user = User {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
        };
        self.begin(user).await
    }

    /// Returns whether a session was active. The persisted record is removed
    /// either way.
    pub async fn logout(&mut self) -> Result<bool, StorefrontError> {
        self.store.del(AUTH_KEY).await?;
        let previous = self.session.take();
        if let Some(previous) = &previous {
            info!("session: logged out name={}", previous.user.name);
        }
        Ok(previous.is_some())
    }

    async fn begin(&mut self, user: User) -> Result<&Session, StorefrontError> {
        let token = self.issuer.issue(&user)?;
        let session = Session { token, user };
        self.store.set(AUTH_KEY, &session).await?;
        info!(
            "session: authenticated name={} replaced={}",
            session.user.name,
            self.session.is_some()
        );
        Ok(&*self.session.insert(session))
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
