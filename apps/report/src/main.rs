//! Auditdesk daily report runner.
//!
//! Opens the local store, seeds the built-in administrator on first run and
//! logs one score line per website for the report day.

#![forbid(unsafe_code)]

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use auditdesk_application::{Clock, DomainStore, ReportFilter};
use auditdesk_core::{AppError, AppResult};
use auditdesk_infrastructure::{Argon2PasswordHasher, FileKeyValueStore, SystemClock};
use chrono::NaiveDate;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct ReportConfig {
    data_dir: PathBuf,
    report_date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ReportConfig::load()?;
    let kv = FileKeyValueStore::open(config.data_dir.clone()).await?;
    let clock = Arc::new(SystemClock);
    let report_date = config.report_date.unwrap_or_else(|| clock.today());

    info!(
        data_dir = %kv.root().display(),
        report_date = %report_date,
        "auditdesk-report started"
    );

    let store = DomainStore::open(
        Arc::new(kv),
        clock,
        Arc::new(Argon2PasswordHasher::new()),
    )
    .await?;

    let scores = store.reports().website_scores(report_date).await?;
    if scores.is_empty() {
        warn!("no websites registered");
    }

    for website_score in &scores {
        let score = website_score.score;
        if score.total == 0 {
            warn!(
                website = %website_score.website.name(),
                "website not audited on report day"
            );
            continue;
        }

        info!(
            website = %website_score.website.name(),
            working = score.working,
            total = score.total,
            percentage = format_args!("{:.1}", score.percentage()),
            health = score.health().as_str(),
            "website score"
        );
    }

    let overall = store
        .reports()
        .report(&ReportFilter {
            date: Some(report_date),
            website_id: None,
        })
        .await?
        .score;
    info!(
        websites = scores.len(),
        working = overall.working,
        total = overall.total,
        health = overall.health().as_str(),
        "daily report complete"
    );

    Ok(())
}

impl ReportConfig {
    fn load() -> AppResult<Self> {
        let data_dir =
            optional_env("AUDITDESK_DATA_DIR").unwrap_or_else(|| ".auditdesk".to_owned());
        let report_date = optional_env("AUDITDESK_REPORT_DATE")
            .map(|value| parse_report_date(&value))
            .transpose()?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            report_date,
        })
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_report_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|error| {
        AppError::Validation(format!(
            "invalid AUDITDESK_REPORT_DATE value '{value}': {error}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_date_uses_calendar_format() {
        assert_eq!(
            parse_report_date("2026-10-19").ok(),
            NaiveDate::from_ymd_opt(2026, 10, 19)
        );
    }

    #[test]
    fn malformed_report_date_is_a_validation_error() {
        assert!(matches!(
            parse_report_date("19/10/2026"),
            Err(AppError::Validation(_))
        ));
    }
}
