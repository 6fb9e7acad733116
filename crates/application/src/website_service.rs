//! Website management.
//!
//! Deleting a website removes its modules and every audit recorded against it.

use std::sync::Arc;

use tracing::info;

use auditdesk_core::{AppResult, SessionContext};
use auditdesk_domain::{ActivityAction, Website, WebsitePatch};

use crate::identifiers::next_identifier;
use crate::{ActivityLogService, Clock, Collections};

/// Fields supplied when creating a website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWebsiteInput {
    /// Display name.
    pub name: String,
    /// Website URL.
    pub url: String,
}

/// Application service for websites.
#[derive(Clone)]
pub struct WebsiteService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
    activity: ActivityLogService,
}

impl WebsiteService {
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

    /// Returns all websites in insertion order.
    pub async fn list_websites(&self) -> AppResult<Vec<Website>> {
        self.collections.websites().await
    }

    /// Returns one website by identifier.
    pub async fn find_website(&self, website_id: &str) -> AppResult<Option<Website>> {
        Ok(self
            .collections
            .websites()
            .await?
            .into_iter()
            .find(|website| website.id() == website_id))
    }

    /// Creates a website and logs `CREATE_WEBSITE`.
    pub async fn create_website(
        &self,
        session: &SessionContext,
        input: CreateWebsiteInput,
    ) -> AppResult<Website> {
        let _guard = self.collections.write_gate().await;
        let mut websites = self.collections.websites().await?;

        let now = self.clock.now();
        let id = next_identifier("website", now, |candidate| {
            websites.iter().any(|website| website.id() == candidate)
        });
        let website = Website::new(id, input.name, input.url, now)?;

        websites.push(website.clone());
        self.collections.save_websites(&websites).await?;
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::CreateWebsite,
                Some(format!("Created website: {}", website.name())),
            )
            .await?;

        info!(website_id = %website.id(), "website created");
        Ok(website)
    }

    /// Merges `patch` into the website and logs `UPDATE_WEBSITE`.
    ///
    /// Returns `None` without writing anything when the website does not exist.
    pub async fn update_website(
        &self,
        session: &SessionContext,
        website_id: &str,
        patch: WebsitePatch,
    ) -> AppResult<Option<Website>> {
        let _guard = self.collections.write_gate().await;
        let mut websites = self.collections.websites().await?;

        let Some(website) = websites
            .iter_mut()
            .find(|website| website.id() == website_id)
        else {
            return Ok(None);
        };
        website.apply(patch)?;
        let updated = website.clone();

        self.collections.save_websites(&websites).await?;
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::UpdateWebsite,
                Some(format!("Updated website: {}", updated.name())),
            )
            .await?;

        Ok(Some(updated))
    }

    /// Deletes the website with its modules and audits, and logs `DELETE_WEBSITE`.
    ///
    /// Returns the removed website, or `None` without writing anything when it
    /// does not exist.
    pub async fn delete_website(
        &self,
        session: &SessionContext,
        website_id: &str,
    ) -> AppResult<Option<Website>> {
        let _guard = self.collections.write_gate().await;
        let mut websites = self.collections.websites().await?;

        let Some(position) = websites
            .iter()
            .position(|website| website.id() == website_id)
        else {
            return Ok(None);
        };
        let removed = websites.remove(position);
        self.collections.save_websites(&websites).await?;

        let mut modules = self.collections.modules().await?;
        let module_count = modules.len();
        modules.retain(|module| module.website_id() != website_id);
        self.collections.save_modules(&modules).await?;

        let mut audits = self.collections.audits().await?;
        let audit_count = audits.len();
        audits.retain(|audit| audit.website_id() != website_id);
        self.collections.save_audits(&audits).await?;

        self.activity
            .append(
                session.actor_id(),
                ActivityAction::DeleteWebsite,
                Some(format!("Deleted website: {}", removed.name())),
            )
            .await?;

        info!(
            website_id = %website_id,
            removed_modules = module_count - modules.len(),
            removed_audits = audit_count - audits.len(),
            "website deleted"
        );
        Ok(Some(removed))
    }
}
