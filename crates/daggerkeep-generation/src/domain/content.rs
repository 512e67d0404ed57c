//! Parsing and checking what the AI provider returns.

use daggerkeep_campaign::domain::records::{
    CampaignRecord, Encounter, Location, LoreEntry, Npc, TimelineEvent,
};
use daggerkeep_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Content generated for a new campaign. Every sequence must be present in
/// the provider's response, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Non-player characters.
    pub npcs: Vec<Npc>,
    /// Locations.
    pub locations: Vec<Location>,
    /// Lore entries.
    pub lore: Vec<LoreEntry>,
    /// Encounters.
    pub encounters: Vec<Encounter>,
    /// Timeline events.
    pub timeline_events: Vec<TimelineEvent>,
}

/// Pulls the JSON object out of a model response: a ```json fence, then any
/// fence, then the outermost braces.
#[must_use]
pub fn extract_json(response: &str) -> &str {
    if let Some(start) = response.find("```json") {
        let body = &response[start + 7..];
        if let Some(end) = body.find("```") {
            return body[..end].trim();
        }
    }

    if let Some(start) = response.find("```") {
        let body = &response[start + 3..];
        if let Some(end) = body.find("```") {
            let content = body[..end].trim();
            if let Some(newline) = content.find('\n') {
                if !content[..newline].trim_start().starts_with('{') {
                    return content[newline + 1..].trim();
                }
            }
            return content;
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if start < end {
            return &response[start..=end];
        }
    }

    response.trim()
}

fn check_all<R: CampaignRecord>(label: &str, records: &[R]) -> Result<(), DomainError> {
    for (index, record) in records.iter().enumerate() {
        record.validate().map_err(|e| {
            DomainError::Generation(format!("generated {label}[{index}] is invalid: {e}"))
        })?;
    }
    Ok(())
}

/// Parses a provider response into generated content and validates every
/// entity.
///
/// # Errors
///
/// Returns `DomainError::Generation` if the response is not JSON of the
/// expected shape or any entity fails its record validation.
pub fn parse_generated_content(response: &str) -> Result<GeneratedContent, DomainError> {
    let content: GeneratedContent = serde_json::from_str(extract_json(response))
        .map_err(|e| DomainError::Generation(format!("malformed AI response: {e}")))?;

    check_all("npcs", &content.npcs)?;
    check_all("locations", &content.locations)?;
    check_all("lore", &content.lore)?;
    check_all("encounters", &content.encounters)?;
    check_all("timelineEvents", &content.timeline_events)?;
    Ok(content)
}
