//! Read-only audit reports.

use std::sync::Arc;

use chrono::NaiveDate;

use auditdesk_core::AppResult;
use auditdesk_domain::{AuditEntry, AuditScore, Website};

use crate::Collections;

/// Report selection. Set fields are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Only entries of this day.
    pub date: Option<NaiveDate>,
    /// Only entries recorded against this website.
    pub website_id: Option<String>,
}

impl ReportFilter {
    fn matches(&self, entry: &AuditEntry) -> bool {
        self.date.is_none_or(|date| entry.audit_date() == date)
            && self
                .website_id
                .as_deref()
                .is_none_or(|website_id| entry.website_id() == website_id)
    }
}

/// Entries selected by a [`ReportFilter`] and their score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditReport {
    /// Matching entries, newest write first.
    pub entries: Vec<AuditEntry>,
    /// Working share of `entries`.
    pub score: AuditScore,
}

/// Score of one website for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebsiteScore {
    /// The scored website.
    pub website: Website,
    /// Working share of that day's entries.
    pub score: AuditScore,
}

/// Application service for reports.
#[derive(Clone)]
pub struct ReportService {
    collections: Arc<Collections>,
}

impl ReportService {
    /// Creates the service.
    #[must_use]
    pub fn new(collections: Arc<Collections>) -> Self {
        Self { collections }
    }

    /// Selects entries and scores them.
    pub async fn report(&self, filter: &ReportFilter) -> AppResult<AuditReport> {
        let mut entries = self.collections.audits().await?;
        entries.retain(|entry| filter.matches(entry));
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.timestamp()));

        let score = AuditScore::from_entries(&entries);
        Ok(AuditReport { entries, score })
    }

    /// Scores every website for one day, in website insertion order.
    ///
    /// Websites without entries that day get an empty score.
    pub async fn website_scores(&self, date: NaiveDate) -> AppResult<Vec<WebsiteScore>> {
        let websites = self.collections.websites().await?;
        let audits = self.collections.audits().await?;

        Ok(websites
            .into_iter()
            .map(|website| {
                let score = AuditScore::from_entries(audits.iter().filter(|entry| {
                    entry.audit_date() == date && entry.website_id() == website.id()
                }));
                WebsiteScore { website, score }
            })
            .collect())
    }
}
