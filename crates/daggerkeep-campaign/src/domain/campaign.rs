//! Campaign metadata.

use chrono::{DateTime, Utc};
use daggerkeep_core::error::DomainError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to a campaign created without one.
pub const DEFAULT_CAMPAIGN_NAME: &str = "My Daggerheart Campaign";

/// Description given to a campaign created without one.
pub const DEFAULT_CAMPAIGN_DESCRIPTION: &str = "A tale of hope and fear...";

/// Key-value store key of a campaign's metadata.
#[must_use]
pub fn campaign_key(campaign_id: Uuid) -> String {
    format!("campaign:{campaign_id}")
}

/// A campaign's name and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign identifier.
    pub campaign_id: Uuid,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// When the campaign was created.
    pub created_at: DateTime<Utc>,
    /// When the metadata last changed.
    pub updated_at: DateTime<Utc>,
}

impl Campaign {
    /// Creates campaign metadata, filling in defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` is provided but blank.
    pub fn new(
        campaign_id: Uuid,
        name: Option<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = match name {
            Some(name) => non_blank_name(name)?,
            None => DEFAULT_CAMPAIGN_NAME.to_owned(),
        };
        Ok(Self {
            campaign_id,
            name,
            description: description.unwrap_or_else(|| DEFAULT_CAMPAIGN_DESCRIPTION.to_owned()),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `name` is provided but blank.
    pub fn apply_changes(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if let Some(name) = name {
            self.name = non_blank_name(name)?;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = now.max(self.created_at);
        Ok(())
    }
}

fn non_blank_name(name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "campaign name must not be empty".to_owned(),
        ));
    }
    Ok(trimmed.to_owned())
}
