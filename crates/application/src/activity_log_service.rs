use std::sync::Arc;

use auditdesk_core::AppResult;
use auditdesk_domain::{ActivityAction, ActivityLog};

use crate::identifiers::next_identifier;
use crate::{Clock, Collections};

/// Application service for the append-only activity log.
#[derive(Clone)]
pub struct ActivityLogService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
}

impl ActivityLogService {
    /// Creates the service.
    #[must_use]
    pub fn new(collections: Arc<Collections>, clock: Arc<dyn Clock>) -> Self {
        Self { collections, clock }
    }

    /// Appends one activity entry. `actor_id` may be empty.
    pub async fn record(
        &self,
        actor_id: &str,
        action: ActivityAction,
        details: Option<String>,
    ) -> AppResult<ActivityLog> {
        let _guard = self.collections.write_gate().await;
        self.append(actor_id, action, details).await
    }

    /// Returns all entries in insertion order.
    pub async fn list(&self) -> AppResult<Vec<ActivityLog>> {
        self.collections.activity_logs().await
    }

    /// Returns all entries, newest first.
    pub async fn list_recent(&self) -> AppResult<Vec<ActivityLog>> {
        let mut logs = self.collections.activity_logs().await?;
        logs.sort_by_key(|log| std::cmp::Reverse(log.timestamp()));
        Ok(logs)
    }

    /// Appends without taking the write gate; the caller must already hold it.
    pub(crate) async fn append(
        &self,
        actor_id: &str,
        action: ActivityAction,
        details: Option<String>,
    ) -> AppResult<ActivityLog> {
        let mut logs = self.collections.activity_logs().await?;
        let now = self.clock.now();
        let id = next_identifier("log", now, |candidate| {
            logs.iter().any(|log| log.id() == candidate)
        });

        let log = ActivityLog::new(id, actor_id, action, details, now);
        logs.push(log.clone());
        self.collections.save_activity_logs(&logs).await?;

        Ok(log)
    }
}
