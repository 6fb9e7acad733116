use auditdesk_core::{AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize_optional_text;

/// An auditable part of a website, such as a checkout flow or a search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    id: String,
    website_id: String,
    name: NonEmptyString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl Module {
    /// Creates a module belonging to the given website.
    ///
    /// The website reference is not checked here; deleting the website
    /// removes its modules.
    pub fn new(
        id: impl Into<String>,
        website_id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: id.into(),
            website_id: NonEmptyString::for_field("module website", website_id)?.into(),
            name: NonEmptyString::for_field("module name", name)?,
            description: normalize_optional_text(description),
            created_at,
        })
    }

    /// Returns the module identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the owning website identifier.
    #[must_use]
    pub fn website_id(&self) -> &str {
        self.website_id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges the provided fields. Nothing changes when validation fails.
    pub fn apply(&mut self, patch: ModulePatch) -> AppResult<()> {
        let website_id = patch
            .website_id
            .map(|website_id| NonEmptyString::for_field("module website", website_id))
            .transpose()?;
        let name = patch
            .name
            .map(|name| NonEmptyString::for_field("module name", name))
            .transpose()?;

        if let Some(website_id) = website_id {
            self.website_id = website_id.into();
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = normalize_optional_text(description);
        }

        Ok(())
    }
}

/// Partial update for a module. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModulePatch {
    /// Moves the module to another website.
    pub website_id: Option<String>,
    /// New display name.
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}
