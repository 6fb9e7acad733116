use serde::{Deserialize, Serialize};

/// User information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    user_id: String,
    username: String,
}

impl UserIdentity {
    /// Creates a user identity from a stored user record.
    #[must_use]
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    /// Returns the identifier of the authenticated user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the login name of the authenticated user.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// Acting context for store mutations.
///
/// Set on login success and cleared on logout. An anonymous context attributes
/// activity to the empty user reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<UserIdentity>,
}

impl SessionContext {
    /// Returns a context with no signed-in user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { identity: None }
    }

    /// Returns a context acting as the given user.
    #[must_use]
    pub fn authenticated(identity: UserIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Returns the signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    /// Returns the user reference recorded in activity logs.
    #[must_use]
    pub fn actor_id(&self) -> &str {
        self.identity
            .as_ref()
            .map(UserIdentity::user_id)
            .unwrap_or_default()
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Drops the signed-in identity and returns it.
    pub fn clear(&mut self) -> Option<UserIdentity> {
        self.identity.take()
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionContext, UserIdentity};

    #[test]
    fn anonymous_context_has_empty_actor() {
        assert_eq!(SessionContext::anonymous().actor_id(), "");
    }

    #[test]
    fn clear_drops_identity() {
        let mut session = SessionContext::authenticated(UserIdentity::new("admin-1", "admin"));
        assert_eq!(session.actor_id(), "admin-1");

        let cleared = session.clear();
        assert_eq!(cleared.map(|identity| identity.username().to_owned()), Some("admin".to_owned()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn identity_uses_camel_case_keys() {
        let encoded = serde_json::to_string(&UserIdentity::new("user-1", "ana")).unwrap_or_default();
        assert_eq!(encoded, r#"{"userId":"user-1","username":"ana"}"#);
    }
}
