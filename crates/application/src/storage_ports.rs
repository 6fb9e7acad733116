//! Ports implemented by infrastructure adapters.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use auditdesk_core::AppResult;

/// Raw persistence substrate: string values addressed by fixed keys.
///
/// No transactional guarantees across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replaces the value stored under `key`.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Removes the value stored under `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current calendar day (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password with a fresh salt.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}
