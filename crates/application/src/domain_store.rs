//! Entry point wiring every service over one substrate.

use std::sync::Arc;

use auditdesk_core::AppResult;

use crate::{
    ActivityLogService, AuditService, AuthService, Clock, Collections, KeyValueStore,
    ModuleService, PasswordHasher, ReportService, UserService, WebsiteService,
};

/// The local domain store: all services sharing one set of collections.
///
/// Cloning is cheap and clones share the write gate.
#[derive(Clone)]
pub struct DomainStore {
    auth: AuthService,
    users: UserService,
    websites: WebsiteService,
    modules: ModuleService,
    audits: AuditService,
    activity: ActivityLogService,
    reports: ReportService,
}

impl DomainStore {
    /// Wires the services without touching the substrate.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        let collections = Arc::new(Collections::new(store));
        let activity = ActivityLogService::new(collections.clone(), clock.clone());

        Self {
            auth: AuthService::new(
                collections.clone(),
                clock.clone(),
                password_hasher.clone(),
                activity.clone(),
            ),
            users: UserService::new(collections.clone(), clock.clone(), password_hasher),
            websites: WebsiteService::new(collections.clone(), clock.clone(), activity.clone()),
            modules: ModuleService::new(collections.clone(), clock.clone(), activity.clone()),
            audits: AuditService::new(collections.clone(), clock, activity.clone()),
            reports: ReportService::new(collections),
            activity,
        }
    }

    /// Wires the services and seeds the built-in administrator if needed.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> AppResult<Self> {
        let domain_store = Self::new(store, clock, password_hasher);
        domain_store.auth.bootstrap().await?;
        Ok(domain_store)
    }

    /// Sign-in, sign-out and seeding.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// User accounts.
    #[must_use]
    pub fn users(&self) -> &UserService {
        &self.users
    }

    /// Websites.
    #[must_use]
    pub fn websites(&self) -> &WebsiteService {
        &self.websites
    }

    /// Website modules.
    #[must_use]
    pub fn modules(&self) -> &ModuleService {
        &self.modules
    }

    /// Audit entries.
    #[must_use]
    pub fn audits(&self) -> &AuditService {
        &self.audits
    }

    /// Activity log.
    #[must_use]
    pub fn activity(&self) -> &ActivityLogService {
        &self.activity
    }

    /// Reports.
    #[must_use]
    pub fn reports(&self) -> &ReportService {
        &self.reports
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::DomainStore;
    use crate::test_support::{FakeKeyValueStore, ManualClock, ReversedPasswordHasher};

    #[tokio::test]
    async fn open_seeds_once_across_reopen() {
        let kv = Arc::new(FakeKeyValueStore::default());
        let clock = Arc::new(ManualClock::at(2026, 10, 19, 9));

        let first = DomainStore::open(kv.clone(), clock.clone(), Arc::new(ReversedPasswordHasher)).await;
        assert!(first.is_ok());
        let second = DomainStore::open(kv.clone(), clock, Arc::new(ReversedPasswordHasher)).await;

        let users = match second {
            Ok(store) => store.users().list_users().await.unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        assert_eq!(users.len(), 1);
    }
}
