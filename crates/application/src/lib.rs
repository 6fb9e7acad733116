//! Application services and ports.

#![forbid(unsafe_code)]

mod activity_log_service;
mod audit_service;
mod auth_service;
mod collections;
mod domain_store;
mod identifiers;
mod module_service;
mod report_service;
mod storage_ports;
mod user_service;
mod website_service;

#[cfg(test)]
mod test_support;

pub use activity_log_service::ActivityLogService;
pub use audit_service::{AuditService, ModuleAuditSubmission};
pub use auth_service::{
    AuthService, BOOTSTRAP_ADMIN_ID, BOOTSTRAP_ADMIN_USERNAME, INVALID_CREDENTIALS, LoginOutcome,
};
pub use collections::{CollectionKey, Collections};
pub use domain_store::DomainStore;
pub use module_service::{CreateModuleInput, ModuleService};
pub use report_service::{AuditReport, ReportFilter, ReportService, WebsiteScore};
pub use storage_ports::{Clock, KeyValueStore, PasswordHasher};
pub use user_service::{CreateUserInput, UpdateUserInput, UserService};
pub use website_service::{CreateWebsiteInput, WebsiteService};
