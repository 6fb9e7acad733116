use serde::{Deserialize, Serialize};

use crate::AuditEntry;

/// Share of working modules among a set of audit entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditScore {
    /// Entries with status `working`.
    pub working: usize,
    /// All entries considered.
    pub total: usize,
}

impl AuditScore {
    /// Counts working entries.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a AuditEntry>) -> Self {
        entries
            .into_iter()
            .fold(Self::default(), |score, entry| Self {
                working: score.working + usize::from(entry.is_working()),
                total: score.total + 1,
            })
    }

    /// Returns the working share in percent, `0.0` when nothing was audited.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        // Counts stay far below 2^52, the cast is exact.
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.working as f64 / self.total as f64;
        ratio * 100.0
    }

    /// Classifies the percentage into a health band.
    #[must_use]
    pub fn health(&self) -> HealthBand {
        HealthBand::for_percentage(self.percentage())
    }
}

/// Health classification of an audit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    /// 90 percent or more working.
    Healthy,
    /// 70 percent or more working.
    Degraded,
    /// Below 70 percent working.
    Critical,
}

impl HealthBand {
    /// Classifies a percentage value.
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Healthy
        } else if percentage >= 70.0 {
            Self::Degraded
        } else {
            Self::Critical
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Critical => "critical",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::{AuditScore, HealthBand};
    use crate::{AuditEntry, AuditStatus, NewAuditEntry};

    fn entry(id: &str, status: AuditStatus) -> AuditEntry {
        AuditEntry::new(
            id,
            NewAuditEntry {
                website_id: "website-1".to_owned(),
                module_id: format!("module-{id}"),
                user_id: "admin-1".to_owned(),
                status,
                remarks: None,
                audit_date: NaiveDate::default(),
            },
            Utc::now(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn empty_score_is_zero_percent_and_critical() {
        let none: [AuditEntry; 0] = [];
        let score = AuditScore::from_entries(&none);
        assert_eq!(score, AuditScore { working: 0, total: 0 });
        assert!(score.percentage().abs() < f64::EPSILON);
        assert_eq!(score.health(), HealthBand::Critical);
    }

    #[test]
    fn counts_working_entries() {
        let entries = [
            entry("a", AuditStatus::Working),
            entry("b", AuditStatus::NotWorking),
            entry("c", AuditStatus::Working),
            entry("d", AuditStatus::Working),
        ];
        let score = AuditScore::from_entries(&entries);

        assert_eq!(score, AuditScore { working: 3, total: 4 });
        assert!((score.percentage() - 75.0).abs() < f64::EPSILON);
        assert_eq!(score.health(), HealthBand::Degraded);
    }

    #[test]
    fn band_thresholds_are_inclusive() {
        assert_eq!(HealthBand::for_percentage(90.0), HealthBand::Healthy);
        assert_eq!(HealthBand::for_percentage(89.9), HealthBand::Degraded);
        assert_eq!(HealthBand::for_percentage(70.0), HealthBand::Degraded);
        assert_eq!(HealthBand::for_percentage(69.9), HealthBand::Critical);
    }
}
