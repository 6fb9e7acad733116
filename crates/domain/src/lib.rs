//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod activity;
mod audit;
mod module;
mod score;
mod user;
mod website;

pub use activity::{ActivityAction, ActivityLog};
pub use audit::{AuditEntry, AuditPatch, AuditStatus, NewAuditEntry};
pub use module::{Module, ModulePatch};
pub use score::{AuditScore, HealthBand};
pub use user::{User, UserPatch, UserRole};
pub use website::{Website, WebsitePatch};

/// Normalizes optional free text: blank values are stored as absent.
fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
