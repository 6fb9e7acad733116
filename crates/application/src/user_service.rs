//! User account management.
//!
//! Plaintext passwords only pass through this service on their way to the
//! hasher. User changes are not written to the activity log.

use std::sync::Arc;

use tracing::info;

use auditdesk_core::{AppError, AppResult};
use auditdesk_domain::{User, UserPatch, UserRole};

use crate::identifiers::next_identifier;
use crate::{Clock, Collections, PasswordHasher};

/// Fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Login name. Uniqueness is not enforced.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Role.
    pub role: UserRole,
    /// Whether the account may sign in.
    pub is_active: bool,
}

/// Partial update for a user. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// New login name.
    pub username: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// Enables or disables sign-in.
    pub is_active: Option<bool>,
}

/// Application service for user accounts.
#[derive(Clone)]
pub struct UserService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        collections: Arc<Collections>,
        clock: Arc<dyn Clock>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            collections,
            clock,
            password_hasher,
        }
    }

    /// Returns all users in insertion order.
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.collections.users().await
    }

    /// Returns one user by identifier.
    pub async fn find_user(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .collections
            .users()
            .await?
            .into_iter()
            .find(|user| user.id() == user_id))
    }

    /// Returns the first user with the given login name, active or not.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .collections
            .users()
            .await?
            .into_iter()
            .find(|user| user.username() == username))
    }

    /// Creates a user with a hashed password.
    pub async fn create_user(&self, input: CreateUserInput) -> AppResult<User> {
        let password_hash = self.hash_new_password(&input.password)?;

        let _guard = self.collections.write_gate().await;
        let mut users = self.collections.users().await?;

        let now = self.clock.now();
        let id = next_identifier("user", now, |candidate| {
            users.iter().any(|user| user.id() == candidate)
        });
        let user = User::new(
            id,
            input.username,
            password_hash,
            input.role,
            input.is_active,
            now,
        )?;

        users.push(user.clone());
        self.collections.save_users(&users).await?;

        info!(user_id = %user.id(), role = user.role().as_str(), "user created");
        Ok(user)
    }

    /// Merges the update into the user, rehashing a new password.
    ///
    /// Returns `None` without writing anything when the user does not exist.
    pub async fn update_user(
        &self,
        user_id: &str,
        input: UpdateUserInput,
    ) -> AppResult<Option<User>> {
        let password_hash = input
            .password
            .as_deref()
            .map(|password| self.hash_new_password(password))
            .transpose()?;

        let _guard = self.collections.write_gate().await;
        let mut users = self.collections.users().await?;

        let Some(user) = users.iter_mut().find(|user| user.id() == user_id) else {
            return Ok(None);
        };
        user.apply(UserPatch {
            username: input.username,
            password_hash,
            role: input.role,
            is_active: input.is_active,
        })?;
        let updated = user.clone();

        self.collections.save_users(&users).await?;
        Ok(Some(updated))
    }

    /// Deletes the user. Audits and activity entries that reference it stay.
    ///
    /// Returns `None` without writing anything when the user does not exist.
    pub async fn delete_user(&self, user_id: &str) -> AppResult<Option<User>> {
        let _guard = self.collections.write_gate().await;
        let mut users = self.collections.users().await?;

        let Some(position) = users.iter().position(|user| user.id() == user_id) else {
            return Ok(None);
        };
        let removed = users.remove(position);
        self.collections.save_users(&users).await?;

        info!(user_id = %user_id, "user deleted");
        Ok(Some(removed))
    }

    fn hash_new_password(&self, password: &str) -> AppResult<String> {
        if password.is_empty() {
            return Err(AppError::Validation("password must not be empty".to_owned()));
        }

        self.password_hasher.hash_password(password)
    }
}

#[cfg(test)]
mod tests {
    use auditdesk_core::{AppError, SessionContext};
    use auditdesk_domain::UserRole;

    use crate::test_support::{bootstrapped, harness};
    use crate::{CollectionKey, CreateUserInput, LoginOutcome, UpdateUserInput};

    fn auditor(username: &str) -> CreateUserInput {
        CreateUserInput {
            username: username.to_owned(),
            password: "s3cret".to_owned(),
            role: UserRole::Auditor,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn create_stores_hash_not_plaintext() {
        let harness = harness();

        let user = harness
            .store
            .users()
            .create_user(auditor("ana"))
            .await
            .unwrap_or_else(|_| unreachable!());

        assert!(user.id().starts_with("user-"));
        assert_ne!(user.password_hash(), "s3cret");
        let raw = harness
            .kv
            .raw(CollectionKey::Users.as_str())
            .await
            .unwrap_or_default();
        assert!(!raw.contains("\"s3cret\""));
        assert!(raw.contains("\"passwordHash\""));
    }

    #[tokio::test]
    async fn blank_username_or_empty_password_is_rejected() {
        let harness = harness();
        let users = harness.store.users();

        let blank_name = users.create_user(auditor("  ")).await;
        let empty_password = users
            .create_user(CreateUserInput {
                password: String::new(),
                ..auditor("ana")
            })
            .await;

        assert!(matches!(blank_name, Err(AppError::Validation(_))));
        assert!(matches!(empty_password, Err(AppError::Validation(_))));
        assert_eq!(harness.kv.raw(CollectionKey::Users.as_str()).await, None);
    }

    #[tokio::test]
    async fn user_changes_are_not_logged() {
        let harness = harness();
        let users = harness.store.users();
        let user = users
            .create_user(auditor("ana"))
            .await
            .unwrap_or_else(|_| unreachable!());
        let updated = users
            .update_user(
                user.id(),
                UpdateUserInput {
                    role: Some(UserRole::Admin),
                    ..UpdateUserInput::default()
                },
            )
            .await;
        assert!(matches!(updated, Ok(Some(ref user)) if user.role() == UserRole::Admin));
        assert!(matches!(users.delete_user(user.id()).await, Ok(Some(_))));

        assert!(harness.store.activity().list().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn password_change_takes_effect_on_next_login() {
        let harness = bootstrapped().await;
        let updated = harness
            .store
            .users()
            .update_user(
                "admin-1",
                UpdateUserInput {
                    password: Some("changed".to_owned()),
                    ..UpdateUserInput::default()
                },
            )
            .await;
        assert!(matches!(updated, Ok(Some(_))));

        let auth = harness.store.auth();
        assert!(matches!(
            auth.login("admin", "admin123").await,
            Ok(LoginOutcome::Failed)
        ));
        assert!(
            auth.login("admin", "changed")
                .await
                .is_ok_and(|outcome| outcome.is_authenticated())
        );
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_user_are_no_ops() {
        let harness = bootstrapped().await;
        let users = harness.store.users();
        let raw_before = harness.kv.raw(CollectionKey::Users.as_str()).await;

        let updated = users
            .update_user(
                "user-missing",
                UpdateUserInput {
                    is_active: Some(false),
                    ..UpdateUserInput::default()
                },
            )
            .await;
        let deleted = users.delete_user("user-missing").await;

        assert!(matches!(updated, Ok(None)));
        assert!(matches!(deleted, Ok(None)));
        assert_eq!(harness.kv.raw(CollectionKey::Users.as_str()).await, raw_before);
    }

    #[tokio::test]
    async fn deleting_a_user_keeps_their_history() {
        let harness = bootstrapped().await;
        let Ok(LoginOutcome::Authenticated { mut session, .. }) =
            harness.store.auth().login("admin", "admin123").await
        else {
            panic!("expected login to succeed");
        };
        assert!(harness.store.auth().logout(&mut session).await.is_ok());
        assert_eq!(session, SessionContext::anonymous());

        assert!(matches!(
            harness.store.users().delete_user("admin-1").await,
            Ok(Some(_))
        ));

        let logs = harness.store.activity().list().await.unwrap_or_default();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|log| log.user_id() == "admin-1"));
    }

    #[tokio::test]
    async fn find_by_username_returns_first_match() {
        let harness = harness();
        let users = harness.store.users();
        let first = users
            .create_user(CreateUserInput {
                is_active: false,
                ..auditor("ana")
            })
            .await
            .unwrap_or_else(|_| unreachable!());
        assert!(users.create_user(auditor("ana")).await.is_ok());

        let found = users.find_by_username("ana").await.ok().flatten();
        assert_eq!(found.map(|user| user.id().to_owned()), Some(first.id().to_owned()));
        assert!(matches!(users.find_by_username("bob").await, Ok(None)));
    }
}
