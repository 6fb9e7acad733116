//! Authentication and session lifecycle.
//!
//! A successful login returns the session context that later mutations are
//! attributed to. The context is mirrored to the session marker key so a new
//! process can pick it up with [`AuthService::current_session`].

use std::sync::Arc;

use tracing::{info, warn};

use auditdesk_core::{AppResult, SessionContext};
use auditdesk_domain::{ActivityAction, User};

use crate::{ActivityLogService, Clock, Collections, PasswordHasher};

mod bootstrap;
mod login;

pub use bootstrap::{BOOTSTRAP_ADMIN_ID, BOOTSTRAP_ADMIN_USERNAME};

/// Generic failure message for rejected logins.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Authentication succeeded.
    Authenticated {
        /// The signed-in user record.
        user: User,
        /// Context to pass to subsequent mutations.
        session: SessionContext,
    },
    /// Authentication failed. Unknown users and wrong passwords look the same.
    Failed,
}

impl LoginOutcome {
    /// Returns whether the login succeeded.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the failure message, if the login failed.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        match self {
            Self::Authenticated { .. } => None,
            Self::Failed => Some(INVALID_CREDENTIALS),
        }
    }
}

/// Application service for sign-in, sign-out and first-run seeding.
#[derive(Clone)]
pub struct AuthService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
    password_hasher: Arc<dyn PasswordHasher>,
    activity: ActivityLogService,
}

impl AuthService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        collections: Arc<Collections>,
        clock: Arc<dyn Clock>,
        password_hasher: Arc<dyn PasswordHasher>,
        activity: ActivityLogService,
    ) -> Self {
        Self {
            collections,
            clock,
            password_hasher,
            activity,
        }
    }

    /// Ends the session: logs `LOGOUT` when a user was signed in, then clears
    /// the context and the persisted marker.
    pub async fn logout(&self, session: &mut SessionContext) -> AppResult<()> {
        let _guard = self.collections.write_gate().await;

        if let Some(identity) = session.identity() {
            self.activity
                .append(
                    identity.user_id(),
                    ActivityAction::Logout,
                    Some(format!("User {} logged out", identity.username())),
                )
                .await?;
            info!(user_id = %identity.user_id(), "user logged out");
        }

        session.clear();
        self.collections.clear_session_identity().await
    }

    /// Restores the session from the persisted marker.
    ///
    /// The identity is rebuilt from the stored user, so renames show up. Falls
    /// back to an anonymous context when no marker exists or the user it names
    /// is gone or deactivated.
    pub async fn current_session(&self) -> AppResult<SessionContext> {
        let Some(identity) = self.collections.session_identity().await? else {
            return Ok(SessionContext::anonymous());
        };

        let users = self.collections.users().await?;
        let Some(user) = users
            .iter()
            .find(|user| user.id() == identity.user_id() && user.is_active())
        else {
            warn!(user_id = %identity.user_id(), "session marker names an unavailable user");
            return Ok(SessionContext::anonymous());
        };

        Ok(SessionContext::authenticated(user.identity()))
    }
}
