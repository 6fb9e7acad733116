use std::collections::HashSet;

use auditdesk_core::AppError;
use tracing::info;

use super::*;

impl AuditService {
    /// Records today's status for every module of a website.
    ///
    /// Every module of the website needs exactly one submission. A module already
    /// audited today gets its entry updated (`UPDATE_AUDIT`); other modules
    /// get a new entry authored by the session user (`SUBMIT_AUDIT`).
    pub async fn submit_website_audit(
        &self,
        session: &SessionContext,
        website_id: &str,
        submissions: Vec<ModuleAuditSubmission>,
    ) -> AppResult<Vec<AuditEntry>> {
        let Some(identity) = session.identity() else {
            return Err(AppError::Unauthorized(
                "sign in to submit audits".to_owned(),
            ));
        };

        let _guard = self.collections.write_gate().await;
        let modules = self.collections.modules().await?;
        let website_modules: HashSet<&str> = modules
            .iter()
            .filter(|module| module.website_id() == website_id)
            .map(|module| module.id())
            .collect();

        if let Some(foreign) = submissions
            .iter()
            .find(|submission| !website_modules.contains(submission.module_id.as_str()))
        {
            return Err(AppError::Validation(format!(
                "module '{}' does not belong to website '{website_id}'",
                foreign.module_id
            )));
        }

        let mut submitted: HashSet<&str> = HashSet::with_capacity(submissions.len());
        if let Some(repeated) = submissions
            .iter()
            .find(|submission| !submitted.insert(submission.module_id.as_str()))
        {
            return Err(AppError::Validation(format!(
                "module '{}' is submitted more than once",
                repeated.module_id
            )));
        }
        let remaining = website_modules.difference(&submitted).count();
        if remaining > 0 {
            return Err(AppError::Validation(format!(
                "please audit all modules. {remaining} module(s) remaining"
            )));
        }

        let today = self.clock.today();
        let now = self.clock.now();
        let mut audits = self.collections.audits().await?;
        let mut results = Vec::with_capacity(submissions.len());
        let mut created = Vec::new();

        for submission in submissions {
            let existing = audits.iter_mut().find(|audit| {
                audit.website_id() == website_id
                    && audit.module_id() == submission.module_id
                    && audit.audit_date() == today
            });

            match existing {
                Some(audit) => {
                    audit.apply(AuditPatch {
                        status: Some(submission.status),
                        remarks: Some(submission.remarks),
                        timestamp: Some(now),
                        ..AuditPatch::default()
                    })?;
                    created.push(false);
                    results.push(audit.clone());
                }
                None => {
                    let audit = self.new_entry(
                        &audits,
                        NewAuditEntry {
                            website_id: website_id.to_owned(),
                            module_id: submission.module_id,
                            user_id: identity.user_id().to_owned(),
                            status: submission.status,
                            remarks: submission.remarks,
                            audit_date: today,
                        },
                    )?;
                    audits.push(audit.clone());
                    created.push(true);
                    results.push(audit);
                }
            }
        }

        self.collections.save_audits(&audits).await?;
        for (audit, is_new) in results.iter().zip(&created) {
            if *is_new {
                self.log_submitted(session, audit).await?;
            } else {
                self.log_updated(session, audit.id()).await?;
            }
        }

        info!(
            website_id = %website_id,
            created = created.iter().filter(|is_new| **is_new).count(),
            updated = created.iter().filter(|is_new| !**is_new).count(),
            "website audit submitted"
        );
        Ok(results)
    }
}
