//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
///
/// Only a human-readable message travels with each variant; callers that
/// need to branch do so on the variant, never on the text.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A campaign record was not found.
    #[error("record not found: {0}")]
    RecordNotFound(Uuid),

    /// A campaign was not found.
    #[error("campaign not found: {0}")]
    CampaignNotFound(Uuid),

    /// A campaign has no completed frame yet.
    #[error("campaign frame not found for campaign {0}")]
    FrameNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The AI provider failed or returned content that could not be used.
    #[error("content generation error: {0}")]
    Generation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
