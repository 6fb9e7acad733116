//! Audit entry recording and queries.

use std::sync::Arc;

use auditdesk_core::{AppResult, SessionContext};
use auditdesk_domain::{ActivityAction, AuditEntry, AuditPatch, AuditStatus, NewAuditEntry};

use crate::identifiers::audit_identifier;
use crate::{ActivityLogService, Clock, Collections};

mod queries;
mod submission;

/// Status recorded for one module when a whole website is audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAuditSubmission {
    /// Audited module.
    pub module_id: String,
    /// Recorded status.
    pub status: AuditStatus,
    /// Optional remarks.
    pub remarks: Option<String>,
}

/// Application service for audit entries.
#[derive(Clone)]
pub struct AuditService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
    activity: ActivityLogService,
}

impl AuditService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        collections: Arc<Collections>,
        clock: Arc<dyn Clock>,
        activity: ActivityLogService,
    ) -> Self {
        Self {
            collections,
            clock,
            activity,
        }
    }

    /// Records an audit entry written now and logs `SUBMIT_AUDIT`.
    ///
    /// Same-day duplicates for a module are allowed here; use
    /// [`AuditService::submit_website_audit`] to update instead.
    pub async fn create_audit(
        &self,
        session: &SessionContext,
        input: NewAuditEntry,
    ) -> AppResult<AuditEntry> {
        let _guard = self.collections.write_gate().await;
        let mut audits = self.collections.audits().await?;

        let audit = self.new_entry(&audits, input)?;
        audits.push(audit.clone());
        self.collections.save_audits(&audits).await?;
        self.log_submitted(session, &audit).await?;

        Ok(audit)
    }

    /// Merges `patch` into the entry and logs `UPDATE_AUDIT`.
    ///
    /// Returns `None` without writing anything when the entry does not exist.
    pub async fn update_audit(
        &self,
        session: &SessionContext,
        audit_id: &str,
        patch: AuditPatch,
    ) -> AppResult<Option<AuditEntry>> {
        let _guard = self.collections.write_gate().await;
        let mut audits = self.collections.audits().await?;

        let Some(audit) = audits.iter_mut().find(|audit| audit.id() == audit_id) else {
            return Ok(None);
        };
        audit.apply(patch)?;
        let updated = audit.clone();

        self.collections.save_audits(&audits).await?;
        self.log_updated(session, audit_id).await?;

        Ok(Some(updated))
    }

    /// Deletes the entry and logs `DELETE_AUDIT`.
    pub async fn delete_audit(
        &self,
        session: &SessionContext,
        audit_id: &str,
    ) -> AppResult<Option<AuditEntry>> {
        let _guard = self.collections.write_gate().await;
        let mut audits = self.collections.audits().await?;

        let Some(position) = audits.iter().position(|audit| audit.id() == audit_id) else {
            return Ok(None);
        };
        let removed = audits.remove(position);
        self.collections.save_audits(&audits).await?;
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::DeleteAudit,
                Some(format!("Deleted audit ID: {audit_id}")),
            )
            .await?;

        Ok(Some(removed))
    }

    fn new_entry(&self, existing: &[AuditEntry], input: NewAuditEntry) -> AppResult<AuditEntry> {
        let now = self.clock.now();
        let id = audit_identifier(now, |candidate| {
            existing.iter().any(|audit| audit.id() == candidate)
        })?;
        AuditEntry::new(id, input, now)
    }

    async fn log_submitted(&self, session: &SessionContext, audit: &AuditEntry) -> AppResult<()> {
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::SubmitAudit,
                Some(format!(
                    "Submitted audit for module ID: {}",
                    audit.module_id()
                )),
            )
            .await
            .map(|_| ())
    }

    async fn log_updated(&self, session: &SessionContext, audit_id: &str) -> AppResult<()> {
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::UpdateAudit,
                Some(format!("Updated audit ID: {audit_id}")),
            )
            .await
            .map(|_| ())
    }
}
