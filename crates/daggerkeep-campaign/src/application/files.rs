//! Campaign file uploads.
//!
//! File content lives in the blob store; a `CampaignFile` record in the
//! `files` collection carries its metadata and blob path.

use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::repository::{BlobStore, RecordRepository};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::command_handlers::add_record_with_id;
use crate::application::query_handlers::{self, RecordView};
use crate::domain::commands::{AddRecord, DeleteFile, UploadFile};
use crate::domain::records::{CampaignFile, CampaignRecord};

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

fn checked_name(name: &str) -> Result<&str, DomainError> {
    let name = name.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(DomainError::Validation(format!("invalid file name: {name:?}")));
    }
    Ok(name)
}

/// Handles the `UploadFile` command: stores the content and records its
/// metadata.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the file is larger than
/// [`MAX_FILE_SIZE`] or its name is empty or path-like, or
/// `DomainError::Infrastructure` if storage fails.
pub async fn handle_upload_file(
    command: &UploadFile,
    clock: &dyn Clock,
    repo: &dyn RecordRepository,
    blobs: &dyn BlobStore,
) -> Result<RecordView<CampaignFile>, DomainError> {
    let name = checked_name(&command.name)?;
    if command.bytes.len() > MAX_FILE_SIZE {
        return Err(DomainError::Validation(format!(
            "file is {} bytes; the limit is {MAX_FILE_SIZE}",
            command.bytes.len()
        )));
    }

    let file_id = Uuid::new_v4();
    let path = format!(
        "campaigns/{}/files/{}_{file_id}_{name}",
        command.campaign_id,
        clock.now().timestamp_millis()
    );
    blobs.put(&path, &command.bytes).await?;

    let metadata = CampaignFile {
        name: name.to_owned(),
        path: path.clone(),
        size: command.bytes.len() as u64,
        content_type: command.content_type.clone(),
        uploaded_by: command.uploaded_by.clone(),
        sha256: format!("{:x}", Sha256::digest(&command.bytes)),
    };
    let add = AddRecord {
        correlation_id: command.correlation_id,
        campaign_id: command.campaign_id,
        record: metadata,
    };
    match add_record_with_id(file_id, &add, clock, repo).await {
        Ok(view) => {
            debug!(campaign_id = %command.campaign_id, path = %path, "file uploaded");
            Ok(view)
        }
        Err(e) => {
            if let Err(cleanup) = blobs.delete(&path).await {
                warn!(path = %path, error = %cleanup, "orphaned blob after failed upload");
            }
            Err(e)
        }
    }
}

/// Lists a campaign's files, newest first.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if loading fails.
pub async fn list_files(
    campaign_id: Uuid,
    repo: &dyn RecordRepository,
) -> Result<Vec<RecordView<CampaignFile>>, DomainError> {
    let mut files = query_handlers::list_records::<CampaignFile>(campaign_id, repo).await?;
    files.reverse();
    files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(files)
}

/// Loads a file's metadata and content.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the file does not exist, or
/// `DomainError::Infrastructure` if its content is missing or unreadable.
pub async fn download_file(
    campaign_id: Uuid,
    file_id: Uuid,
    repo: &dyn RecordRepository,
    blobs: &dyn BlobStore,
) -> Result<(RecordView<CampaignFile>, Vec<u8>), DomainError> {
    let file = query_handlers::get_record::<CampaignFile>(campaign_id, file_id, repo).await?;
    let bytes = blobs.get(&file.record.path).await?.ok_or_else(|| {
        DomainError::Infrastructure(format!("content of file {file_id} is missing"))
    })?;
    Ok((file, bytes))
}

/// Handles the `DeleteFile` command: removes the record, then the content.
/// Once the record is gone the file counts as deleted; a blob that cannot
/// be removed is logged and left behind.
///
/// # Errors
///
/// Returns `DomainError::RecordNotFound` if the file does not exist, or
/// `DomainError::Infrastructure` if the record cannot be deleted.
pub async fn handle_delete_file(
    command: &DeleteFile,
    repo: &dyn RecordRepository,
    blobs: &dyn BlobStore,
) -> Result<(), DomainError> {
    let file =
        query_handlers::get_record::<CampaignFile>(command.campaign_id, command.file_id, repo)
            .await?;
    repo.delete(command.campaign_id, CampaignFile::COLLECTION, command.file_id)
        .await?;
    if let Err(cleanup) = blobs.delete(&file.record.path).await {
        warn!(path = %file.record.path, error = %cleanup, "orphaned blob after file delete");
    }
    Ok(())
}
