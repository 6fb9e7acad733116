//! Port fakes shared by service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Mutex;

use auditdesk_core::{AppError, AppResult};

use crate::{Clock, DomainStore, KeyValueStore, PasswordHasher};

#[derive(Default)]
pub(crate) struct FakeKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl FakeKeyValueStore {
    pub(crate) async fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    pub(crate) async fn put_raw(&self, key: &str, value: &str) {
        self.values
            .lock()
            .await
            .insert(key.to_owned(), value.to_owned());
    }
}

#[async_trait]
impl KeyValueStore for FakeKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.raw(key).await)
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.values.lock().await.insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

/// Clock that only moves when told to.
pub(crate) struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .unwrap_or_default();
        Self {
            now: StdMutex::new(now),
        }
    }

    pub(crate) fn advance(&self, duration: Duration) {
        if let Ok(mut now) = self.now.lock() {
            *now += duration;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

/// Reversible "hash" so tests stay fast; never used outside tests.
pub(crate) struct ReversedPasswordHasher;

impl PasswordHasher for ReversedPasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("rev${}", password.chars().rev().collect::<String>()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let Some(stored) = hash.strip_prefix("rev$") else {
            return Err(AppError::Internal("unsupported hash format".to_owned()));
        };
        Ok(stored.chars().rev().collect::<String>() == password)
    }
}

pub(crate) struct Harness {
    pub(crate) kv: Arc<FakeKeyValueStore>,
    pub(crate) clock: Arc<ManualClock>,
    pub(crate) store: DomainStore,
}

pub(crate) fn harness() -> Harness {
    let kv = Arc::new(FakeKeyValueStore::default());
    let clock = Arc::new(ManualClock::at(2026, 10, 19, 9));
    let store = DomainStore::new(kv.clone(), clock.clone(), Arc::new(ReversedPasswordHasher));

    Harness { kv, clock, store }
}

/// Like [`harness`] but with the built-in administrator seeded.
pub(crate) async fn bootstrapped() -> Harness {
    let harness = harness();
    let seeded = harness.store.auth().bootstrap().await;
    assert!(matches!(seeded, Ok(true)));
    harness
}
