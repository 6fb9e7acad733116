use std::str::FromStr;

use auditdesk_core::{AppError, AppResult, NonEmptyString};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize_optional_text;

/// Outcome recorded for a module on an audit day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The module behaved as expected.
    Working,
    /// The module was broken or unavailable.
    NotWorking,
}

impl AuditStatus {
    /// Returns the storage string for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::NotWorking => "not_working",
        }
    }
}

impl FromStr for AuditStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "working" => Ok(Self::Working),
            "not_working" => Ok(Self::NotWorking),
            _ => Err(AppError::Validation(format!(
                "unknown audit status '{value}'"
            ))),
        }
    }
}

/// Fields supplied when recording a new audit entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    /// Website the module belongs to.
    pub website_id: String,
    /// Audited module.
    pub module_id: String,
    /// Author of the entry.
    pub user_id: String,
    /// Recorded status.
    pub status: AuditStatus,
    /// Optional free-text remarks.
    pub remarks: Option<String>,
    /// Calendar day the entry belongs to.
    pub audit_date: NaiveDate,
}

/// One recorded module status for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    id: String,
    website_id: String,
    module_id: String,
    user_id: String,
    status: AuditStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remarks: Option<String>,
    timestamp: DateTime<Utc>,
    audit_date: NaiveDate,
}

impl AuditEntry {
    /// Creates an audit entry written at `timestamp`.
    pub fn new(
        id: impl Into<String>,
        input: NewAuditEntry,
        timestamp: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: id.into(),
            website_id: NonEmptyString::for_field("audit website", input.website_id)?.into(),
            module_id: NonEmptyString::for_field("audit module", input.module_id)?.into(),
            user_id: input.user_id,
            status: input.status,
            remarks: normalize_optional_text(input.remarks),
            timestamp,
            audit_date: input.audit_date,
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the website identifier.
    #[must_use]
    pub fn website_id(&self) -> &str {
        self.website_id.as_str()
    }

    /// Returns the module identifier.
    #[must_use]
    pub fn module_id(&self) -> &str {
        self.module_id.as_str()
    }

    /// Returns the authoring user identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the recorded status.
    #[must_use]
    pub fn status(&self) -> AuditStatus {
        self.status
    }

    /// Returns the optional remarks.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Returns the exact write time.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the calendar day of the entry.
    #[must_use]
    pub fn audit_date(&self) -> NaiveDate {
        self.audit_date
    }

    /// Returns whether the entry is working.
    #[must_use]
    pub fn is_working(&self) -> bool {
        self.status == AuditStatus::Working
    }

    /// Merges the provided fields. Nothing changes when validation fails.
    pub fn apply(&mut self, patch: AuditPatch) -> AppResult<()> {
        let website_id = patch
            .website_id
            .map(|website_id| NonEmptyString::for_field("audit website", website_id))
            .transpose()?;
        let module_id = patch
            .module_id
            .map(|module_id| NonEmptyString::for_field("audit module", module_id))
            .transpose()?;

        if let Some(website_id) = website_id {
            self.website_id = website_id.into();
        }
        if let Some(module_id) = module_id {
            self.module_id = module_id.into();
        }
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(remarks) = patch.remarks {
            self.remarks = normalize_optional_text(remarks);
        }
        if let Some(timestamp) = patch.timestamp {
            self.timestamp = timestamp;
        }
        if let Some(audit_date) = patch.audit_date {
            self.audit_date = audit_date;
        }

        Ok(())
    }
}

/// Partial update for an audit entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditPatch {
    /// Reassigns the website.
    pub website_id: Option<String>,
    /// Reassigns the module.
    pub module_id: Option<String>,
    /// Reassigns the author.
    pub user_id: Option<String>,
    /// New status.
    pub status: Option<AuditStatus>,
    /// `Some(None)` clears the remarks.
    pub remarks: Option<Option<String>>,
    /// New write time.
    pub timestamp: Option<DateTime<Utc>>,
    /// Moves the entry to another calendar day.
    pub audit_date: Option<NaiveDate>,
}
