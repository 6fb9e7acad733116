//! User domain types.

use std::str::FromStr;

use auditdesk_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Configures websites, modules and users.
    Admin,
    /// Records daily module status.
    Auditor,
}

impl UserRole {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Auditor => "auditor",
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "auditor" => Ok(Self::Auditor),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

/// Stored user account.
///
/// Usernames are expected to be unique but the store does not enforce it;
/// lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: String,
    username: NonEmptyString,
    password_hash: String,
    role: UserRole,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user record. The password must already be hashed.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        role: UserRole,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: id.into(),
            username: NonEmptyString::for_field("username", username)?,
            password_hash: password_hash.into(),
            role,
            is_active,
            created_at,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Returns the stored password hash (PHC string).
    #[must_use]
    pub fn password_hash(&self) -> &str {
        self.password_hash.as_str()
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }

    /// Returns whether the account may sign in.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the session identity for this user.
    #[must_use]
    pub fn identity(&self) -> UserIdentity {
        UserIdentity::new(self.id.as_str(), self.username.as_str())
    }

    /// Merges the provided fields. Nothing changes when validation fails.
    pub fn apply(&mut self, patch: UserPatch) -> AppResult<()> {
        let username = patch
            .username
            .map(|username| NonEmptyString::for_field("username", username))
            .transpose()?;

        if let Some(username) = username {
            self.username = username;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }

        Ok(())
    }
}

/// Partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New login name.
    pub username: Option<String>,
    /// Replacement password hash.
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// Enables or disables sign-in.
    pub is_active: Option<bool>,
}
