use chrono::NaiveDate;

use super::*;

impl AuditService {
    /// Returns all entries in insertion order.
    pub async fn list_audits(&self) -> AppResult<Vec<AuditEntry>> {
        self.collections.audits().await
    }

    /// Returns all entries, most recently written first.
    pub async fn list_recent_audits(&self) -> AppResult<Vec<AuditEntry>> {
        let mut audits = self.collections.audits().await?;
        audits.sort_by_key(|audit| std::cmp::Reverse(audit.timestamp()));
        Ok(audits)
    }

    /// Returns the entries of one calendar day.
    pub async fn audits_by_date(&self, audit_date: NaiveDate) -> AppResult<Vec<AuditEntry>> {
        self.filtered(|audit| audit.audit_date() == audit_date)
            .await
    }

    /// Returns the entries recorded against one website.
    pub async fn audits_by_website(&self, website_id: &str) -> AppResult<Vec<AuditEntry>> {
        self.filtered(|audit| audit.website_id() == website_id)
            .await
    }

    /// Returns today's entries for one website.
    pub async fn today_audits_by_website(&self, website_id: &str) -> AppResult<Vec<AuditEntry>> {
        let today = self.clock.today();
        self.filtered(|audit| audit.website_id() == website_id && audit.audit_date() == today)
            .await
    }

    async fn filtered(
        &self,
        predicate: impl Fn(&AuditEntry) -> bool,
    ) -> AppResult<Vec<AuditEntry>> {
        let mut audits = self.collections.audits().await?;
        audits.retain(|audit| predicate(audit));
        Ok(audits)
    }
}
