//! Commands for the Campaign Collections context.

use std::marker::PhantomData;

use daggerkeep_core::command::Command;
use daggerkeep_core::record::Collection;
use uuid::Uuid;

use super::records::CampaignRecord;

/// Command to create a campaign's metadata.
///
/// This is a CREATION command; the caller pre-generates `campaign_id`.
#[derive(Debug, Clone)]
pub struct CreateCampaign {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new campaign identifier.
    pub campaign_id: Uuid,
    /// Display name; defaults when absent.
    pub name: Option<String>,
    /// Description; defaults when absent.
    pub description: Option<String>,
}

impl Command for CreateCampaign {
    fn command_type(&self) -> &'static str {
        "campaign.create_campaign"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to change a campaign's name or description.
#[derive(Debug, Clone)]
pub struct UpdateCampaign {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// New name, if changing.
    pub name: Option<String>,
    /// New description, if changing.
    pub description: Option<String>,
}

impl Command for UpdateCampaign {
    fn command_type(&self) -> &'static str {
        "campaign.update_campaign"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to add a record to the collection of `R`.
#[derive(Debug, Clone)]
pub struct AddRecord<R> {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The record to add.
    pub record: R,
}

impl<R: CampaignRecord> Command for AddRecord<R> {
    fn command_type(&self) -> &'static str {
        "campaign.add_record"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to merge changed fields into a record of type `R`.
#[derive(Debug, Clone)]
pub struct UpdateRecord<R> {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The record to update.
    pub record_id: Uuid,
    /// Changed fields, camelCase keys as in the record's JSON form.
    pub changes: serde_json::Map<String, serde_json::Value>,
    /// Ties the command to its record type.
    pub record_type: PhantomData<R>,
}

impl<R> UpdateRecord<R> {
    /// Creates an update command.
    #[must_use]
    pub fn new(
        correlation_id: Uuid,
        campaign_id: Uuid,
        record_id: Uuid,
        changes: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            correlation_id,
            campaign_id,
            record_id,
            changes,
            record_type: PhantomData,
        }
    }
}

impl<R: CampaignRecord> Command for UpdateRecord<R> {
    fn command_type(&self) -> &'static str {
        "campaign.update_record"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to delete a record from a collection.
#[derive(Debug, Clone)]
pub struct DeleteRecord {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The collection holding the record.
    pub collection: Collection,
    /// The record to delete.
    pub record_id: Uuid,
}

impl Command for DeleteRecord {
    fn command_type(&self) -> &'static str {
        "campaign.delete_record"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to upload a file to a campaign.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// Original file name.
    pub name: String,
    /// MIME type.
    pub content_type: String,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// File content.
    pub bytes: Vec<u8>,
}

impl Command for UploadFile {
    fn command_type(&self) -> &'static str {
        "campaign.upload_file"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to delete an uploaded file and its content.
#[derive(Debug, Clone)]
pub struct DeleteFile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The file record to delete.
    pub file_id: Uuid,
}

impl Command for DeleteFile {
    fn command_type(&self) -> &'static str {
        "campaign.delete_file"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}

/// Command to roll the duality dice.
#[derive(Debug, Clone)]
pub struct RollDuality {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// Modifier added to the higher die.
    pub modifier: i32,
}

impl Command for RollDuality {
    fn command_type(&self) -> &'static str {
        "campaign.roll_duality"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn campaign_id(&self) -> Uuid {
        self.campaign_id
    }
}
