use std::fmt::{Display, Formatter};
use std::str::FromStr;

use auditdesk_core::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable activity tags emitted by store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityAction {
    /// Successful sign-in.
    LoginSuccess,
    /// Rejected sign-in.
    LoginFail,
    /// Sign-out of an authenticated session.
    Logout,
    /// Website created.
    CreateWebsite,
    /// Website updated.
    UpdateWebsite,
    /// Website deleted together with its modules and audits.
    DeleteWebsite,
    /// Module created.
    CreateModule,
    /// Module updated.
    UpdateModule,
    /// Module deleted together with its audits.
    DeleteModule,
    /// Audit entry recorded.
    SubmitAudit,
    /// Audit entry updated.
    UpdateAudit,
    /// Audit entry deleted.
    DeleteAudit,
}

impl ActivityAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginSuccess => "LOGIN_SUCCESS",
            Self::LoginFail => "LOGIN_FAIL",
            Self::Logout => "LOGOUT",
            Self::CreateWebsite => "CREATE_WEBSITE",
            Self::UpdateWebsite => "UPDATE_WEBSITE",
            Self::DeleteWebsite => "DELETE_WEBSITE",
            Self::CreateModule => "CREATE_MODULE",
            Self::UpdateModule => "UPDATE_MODULE",
            Self::DeleteModule => "DELETE_MODULE",
            Self::SubmitAudit => "SUBMIT_AUDIT",
            Self::UpdateAudit => "UPDATE_AUDIT",
            Self::DeleteAudit => "DELETE_AUDIT",
        }
    }
}

impl Display for ActivityAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "LOGIN_SUCCESS" => Ok(Self::LoginSuccess),
            "LOGIN_FAIL" => Ok(Self::LoginFail),
            "LOGOUT" => Ok(Self::Logout),
            "CREATE_WEBSITE" => Ok(Self::CreateWebsite),
            "UPDATE_WEBSITE" => Ok(Self::UpdateWebsite),
            "DELETE_WEBSITE" => Ok(Self::DeleteWebsite),
            "CREATE_MODULE" => Ok(Self::CreateModule),
            "UPDATE_MODULE" => Ok(Self::UpdateModule),
            "DELETE_MODULE" => Ok(Self::DeleteModule),
            "SUBMIT_AUDIT" => Ok(Self::SubmitAudit),
            "UPDATE_AUDIT" => Ok(Self::UpdateAudit),
            "DELETE_AUDIT" => Ok(Self::DeleteAudit),
            _ => Err(AppError::Validation(format!(
                "unknown activity action '{value}'"
            ))),
        }
    }
}

/// Append-only activity record.
///
/// `action` stays free text in storage so older or foreign tags still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    id: String,
    user_id: String,
    action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ActivityLog {
    /// Creates an activity record. An empty `user_id` means system or unauthenticated.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        action: ActivityAction,
        details: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            action: action.as_str().to_owned(),
            details,
            timestamp,
        }
    }

    /// Returns the log identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the acting user reference, empty for anonymous activity.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.user_id.as_str()
    }

    /// Returns the raw action tag.
    #[must_use]
    pub fn action(&self) -> &str {
        self.action.as_str()
    }

    /// Returns the parsed action tag when it is a known one.
    #[must_use]
    pub fn known_action(&self) -> Option<ActivityAction> {
        ActivityAction::from_str(self.action.as_str()).ok()
    }

    /// Returns the optional details string.
    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns when the activity happened.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{ActivityAction, ActivityLog};

    #[test]
    fn foreign_action_tags_still_load() {
        let log: Result<ActivityLog, _> = serde_json::from_str(
            r#"{"id":"log-1","userId":"","action":"EXPORT_CSV","timestamp":"2026-01-01T00:00:00Z"}"#,
        );
        let log = log.unwrap_or_else(|_| unreachable!());

        assert_eq!(log.action(), "EXPORT_CSV");
        assert_eq!(log.known_action(), None);
        assert_eq!(log.details(), None);
    }

    #[test]
    fn stores_action_tag_text() {
        let log = ActivityLog::new("log-1", "", ActivityAction::LoginFail, None, Utc::now());
        assert_eq!(log.known_action(), Some(ActivityAction::LoginFail));

        let encoded = serde_json::to_value(&log).unwrap_or_default();
        assert_eq!(encoded["action"], "LOGIN_FAIL");
        assert_eq!(encoded["userId"], "");
    }
}
