//! Stored record shape shared by every campaign collection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Named per-campaign collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Player characters.
    Characters,
    /// Non-player characters.
    Npcs,
    /// Lore entries.
    Lore,
    /// Play sessions.
    Sessions,
    /// Encounters.
    Encounters,
    /// Locations.
    Locations,
    /// Timeline events.
    TimelineEvents,
    /// Uploaded file metadata.
    Files,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 8] = [
        Collection::Characters,
        Collection::Npcs,
        Collection::Lore,
        Collection::Sessions,
        Collection::Encounters,
        Collection::Locations,
        Collection::TimelineEvents,
        Collection::Files,
    ];

    /// Storage name of the collection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Characters => "characters",
            Collection::Npcs => "npcs",
            Collection::Lore => "lore",
            Collection::Sessions => "sessions",
            Collection::Encounters => "encounters",
            Collection::Locations => "locations",
            Collection::TimelineEvents => "timeline_events",
            Collection::Files => "files",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown collection: {s}")))
    }
}

/// Stored representation of a campaign record.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// Campaign that owns this record.
    pub campaign_id: Uuid,
    /// Collection the record belongs to.
    pub collection: Collection,
    /// Domain fields as a JSON object.
    pub fields: serde_json::Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_parses_its_own_storage_name() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), collection);
        }
    }

    #[test]
    fn test_unknown_collection_is_validation_error() {
        match "spells".parse::<Collection>() {
            Err(DomainError::Validation(msg)) => assert!(msg.contains("spells")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
