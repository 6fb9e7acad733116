use auditdesk_core::{AppResult, NonEmptyString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A website under audit. Root of the website → module → audit hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Website {
    id: String,
    name: NonEmptyString,
    url: NonEmptyString,
    created_at: DateTime<Utc>,
}

impl Website {
    /// Creates a website with validated name and URL.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: id.into(),
            name: NonEmptyString::for_field("website name", name)?,
            url: NonEmptyString::for_field("website url", url)?,
            created_at,
        })
    }

    /// Returns the website identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the website URL.
    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merges the provided fields. Nothing changes when validation fails.
    pub fn apply(&mut self, patch: WebsitePatch) -> AppResult<()> {
        let name = patch
            .name
            .map(|name| NonEmptyString::for_field("website name", name))
            .transpose()?;
        let url = patch
            .url
            .map(|url| NonEmptyString::for_field("website url", url))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(url) = url {
            self.url = url;
        }

        Ok(())
    }
}

/// Partial update for a website. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebsitePatch {
    /// New display name.
    pub name: Option<String>,
    /// New URL.
    pub url: Option<String>,
}
