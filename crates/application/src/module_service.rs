use std::sync::Arc;

use tracing::info;

use auditdesk_core::{AppResult, SessionContext};
use auditdesk_domain::{ActivityAction, Module, ModulePatch};

use crate::identifiers::next_identifier;
use crate::{ActivityLogService, Clock, Collections};

/// Fields supplied when creating a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateModuleInput {
    /// Owning website.
    pub website_id: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Application service for website modules.
#[derive(Clone)]
pub struct ModuleService {
    collections: Arc<Collections>,
    clock: Arc<dyn Clock>,
    activity: ActivityLogService,
}

impl ModuleService {
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

    /// Returns all modules in insertion order.
    pub async fn list_modules(&self) -> AppResult<Vec<Module>> {
        self.collections.modules().await
    }

    /// Returns the modules of one website.
    pub async fn modules_by_website(&self, website_id: &str) -> AppResult<Vec<Module>> {
        let mut modules = self.collections.modules().await?;
        modules.retain(|module| module.website_id() == website_id);
        Ok(modules)
    }

    /// Creates a module and logs `CREATE_MODULE`.
    ///
    /// The website reference is stored as given.
    pub async fn create_module(
        &self,
        session: &SessionContext,
        input: CreateModuleInput,
    ) -> AppResult<Module> {
        let _guard = self.collections.write_gate().await;
        let mut modules = self.collections.modules().await?;

        let now = self.clock.now();
        let id = next_identifier("module", now, |candidate| {
            modules.iter().any(|module| module.id() == candidate)
        });
        let module = Module::new(id, input.website_id, input.name, input.description, now)?;

        modules.push(module.clone());
        self.collections.save_modules(&modules).await?;
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::CreateModule,
                Some(format!("Created module: {}", module.name())),
            )
            .await?;

        info!(module_id = %module.id(), website_id = %module.website_id(), "module created");
        Ok(module)
    }

    /// Merges `patch` into the module and logs `UPDATE_MODULE`.
    ///
    /// Returns `None` without writing anything when the module does not exist.
    pub async fn update_module(
        &self,
        session: &SessionContext,
        module_id: &str,
        patch: ModulePatch,
    ) -> AppResult<Option<Module>> {
        let _guard = self.collections.write_gate().await;
        let mut modules = self.collections.modules().await?;

        let Some(module) = modules.iter_mut().find(|module| module.id() == module_id) else {
            return Ok(None);
        };
        module.apply(patch)?;
        let updated = module.clone();

        self.collections.save_modules(&modules).await?;
        self.activity
            .append(
                session.actor_id(),
                ActivityAction::UpdateModule,
                Some(format!("Updated module: {}", updated.name())),
            )
            .await?;

        Ok(Some(updated))
    }

    /// Deletes the module with its audits and logs `DELETE_MODULE`.
    pub async fn delete_module(
        &self,
        session: &SessionContext,
        module_id: &str,
    ) -> AppResult<Option<Module>> {
        let _guard = self.collections.write_gate().await;
        let mut modules = self.collections.modules().await?;

        let Some(position) = modules.iter().position(|module| module.id() == module_id) else {
            return Ok(None);
        };
        let removed = modules.remove(position);
        self.collections.save_modules(&modules).await?;

        let mut audits = self.collections.audits().await?;
        audits.retain(|audit| audit.module_id() != module_id);
        self.collections.save_audits(&audits).await?;

        self.activity
            .append(
                session.actor_id(),
                ActivityAction::DeleteModule,
                Some(format!("Deleted module: {}", removed.name())),
            )
            .await?;

        Ok(Some(removed))
    }
}
