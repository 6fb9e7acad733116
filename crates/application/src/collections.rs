//! Typed collection accessors over the key-value substrate.
//!
//! Every read goes back to the substrate; nothing is cached. Absent or
//! unreadable values load as empty collections.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use auditdesk_core::{AppError, AppResult, UserIdentity};
use auditdesk_domain::{ActivityLog, AuditEntry, Module, User, Website};

use crate::KeyValueStore;

/// Fixed storage keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// User accounts.
    Users,
    /// Websites.
    Websites,
    /// Website modules.
    Modules,
    /// Audit entries.
    Audits,
    /// Activity log.
    ActivityLogs,
    /// Session marker holding the signed-in identity.
    CurrentUser,
}

impl CollectionKey {
    /// Returns the storage key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "audit_users",
            Self::Websites => "audit_websites",
            Self::Modules => "audit_modules",
            Self::Audits => "audit_audits",
            Self::ActivityLogs => "audit_activity_logs",
            Self::CurrentUser => "audit_current_user",
        }
    }
}

/// Load/save pairs for each persisted collection.
pub struct Collections {
    store: Arc<dyn KeyValueStore>,
    write_gate: Mutex<()>,
}

impl Collections {
    /// Creates accessors over a substrate.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Serializes read-modify-write cycles. Hold the guard for the whole mutation.
    pub async fn write_gate(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }

    /// Loads all users.
    pub async fn users(&self) -> AppResult<Vec<User>> {
        self.load(CollectionKey::Users).await
    }

    /// Replaces all users.
    pub async fn save_users(&self, users: &[User]) -> AppResult<()> {
        self.save(CollectionKey::Users, users).await
    }

    /// Loads all websites.
    pub async fn websites(&self) -> AppResult<Vec<Website>> {
        self.load(CollectionKey::Websites).await
    }

    /// Replaces all websites.
    pub async fn save_websites(&self, websites: &[Website]) -> AppResult<()> {
        self.save(CollectionKey::Websites, websites).await
    }

    /// Loads all modules.
    pub async fn modules(&self) -> AppResult<Vec<Module>> {
        self.load(CollectionKey::Modules).await
    }

    /// Replaces all modules.
    pub async fn save_modules(&self, modules: &[Module]) -> AppResult<()> {
        self.save(CollectionKey::Modules, modules).await
    }

    /// Loads all audit entries.
    pub async fn audits(&self) -> AppResult<Vec<AuditEntry>> {
        self.load(CollectionKey::Audits).await
    }

    /// Replaces all audit entries.
    pub async fn save_audits(&self, audits: &[AuditEntry]) -> AppResult<()> {
        self.save(CollectionKey::Audits, audits).await
    }

    /// Loads the activity log.
    pub async fn activity_logs(&self) -> AppResult<Vec<ActivityLog>> {
        self.load(CollectionKey::ActivityLogs).await
    }

    /// Replaces the activity log.
    pub async fn save_activity_logs(&self, logs: &[ActivityLog]) -> AppResult<()> {
        self.save(CollectionKey::ActivityLogs, logs).await
    }

    /// Loads the persisted session identity.
    pub async fn session_identity(&self) -> AppResult<Option<UserIdentity>> {
        let key = CollectionKey::CurrentUser;
        let Some(raw) = self.store.get(key.as_str()).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(error) => {
                warn!(key = key.as_str(), error = %error, "ignoring unreadable session marker");
                Ok(None)
            }
        }
    }

    /// Persists the session identity.
    pub async fn save_session_identity(&self, identity: &UserIdentity) -> AppResult<()> {
        let raw = serde_json::to_string(identity).map_err(|error| {
            AppError::Internal(format!("failed to encode session marker: {error}"))
        })?;
        self.store
            .set(CollectionKey::CurrentUser.as_str(), raw)
            .await
    }

    /// Removes the session marker.
    pub async fn clear_session_identity(&self) -> AppResult<()> {
        self.store.remove(CollectionKey::CurrentUser.as_str()).await
    }

    async fn load<T: DeserializeOwned>(&self, key: CollectionKey) -> AppResult<Vec<T>> {
        let Some(raw) = self.store.get(key.as_str()).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => Ok(records),
            Err(error) => {
                warn!(
                    key = key.as_str(),
                    error = %error,
                    "stored collection is unreadable, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(records).map_err(|error| {
            AppError::Internal(format!(
                "failed to encode collection '{}': {error}",
                key.as_str()
            ))
        })?;

        debug!(key = key.as_str(), records = records.len(), "persisting collection");
        self.store.set(key.as_str(), raw).await
    }
}
