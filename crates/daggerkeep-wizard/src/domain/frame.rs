//! The campaign frame: the fourteen answers the wizard collects.

use std::fmt;
use std::str::FromStr;

use daggerkeep_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A finished or in-progress campaign frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignFrame {
    /// One-paragraph pitch.
    pub pitch: String,
    /// Tone and feel keywords.
    pub tone_and_feel: Vec<String>,
    /// Themes.
    pub themes: Vec<String>,
    /// Touchstone media.
    pub touchstones: Vec<String>,
    /// Setting overview.
    pub overview: String,
    /// Featured communities.
    pub communities: Vec<String>,
    /// Featured ancestries.
    pub ancestries: Vec<String>,
    /// Featured classes.
    pub classes: Vec<String>,
    /// Principles for players.
    pub player_principles: Vec<String>,
    /// Principles for the GM.
    pub gm_principles: Vec<String>,
    /// Setting distinctions.
    pub distinctions: Vec<String>,
    /// The inciting incident.
    pub inciting_incident: String,
    /// Custom campaign mechanics.
    pub campaign_mechanics: String,
    /// Questions for session zero.
    pub session_zero_questions: Vec<String>,
}

/// Whether a field holds free text or a list of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// List of entries.
    List,
}

/// A field of the campaign frame, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrameField {
    Pitch,
    ToneAndFeel,
    Themes,
    Touchstones,
    Overview,
    Communities,
    Ancestries,
    Classes,
    PlayerPrinciples,
    GmPrinciples,
    Distinctions,
    IncitingIncident,
    CampaignMechanics,
    SessionZeroQuestions,
}

impl FrameField {
    /// Every field, indexed by its wizard step.
    pub const ALL: [FrameField; 14] = [
        FrameField::Pitch,
        FrameField::ToneAndFeel,
        FrameField::Themes,
        FrameField::Touchstones,
        FrameField::Overview,
        FrameField::Communities,
        FrameField::Ancestries,
        FrameField::Classes,
        FrameField::PlayerPrinciples,
        FrameField::GmPrinciples,
        FrameField::Distinctions,
        FrameField::IncitingIncident,
        FrameField::CampaignMechanics,
        FrameField::SessionZeroQuestions,
    ];

    /// The field's JSON key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FrameField::Pitch => "pitch",
            FrameField::ToneAndFeel => "toneAndFeel",
            FrameField::Themes => "themes",
            FrameField::Touchstones => "touchstones",
            FrameField::Overview => "overview",
            FrameField::Communities => "communities",
            FrameField::Ancestries => "ancestries",
            FrameField::Classes => "classes",
            FrameField::PlayerPrinciples => "playerPrinciples",
            FrameField::GmPrinciples => "gmPrinciples",
            FrameField::Distinctions => "distinctions",
            FrameField::IncitingIncident => "incitingIncident",
            FrameField::CampaignMechanics => "campaignMechanics",
            FrameField::SessionZeroQuestions => "sessionZeroQuestions",
        }
    }

    /// Whether the field holds text or a list.
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            FrameField::Pitch
            | FrameField::Overview
            | FrameField::IncitingIncident
            | FrameField::CampaignMechanics => FieldKind::Text,
            _ => FieldKind::List,
        }
    }
}

impl fmt::Display for FrameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FrameField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FrameField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown wizard field: {s}")))
    }
}

/// A value for one frame field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// List of entries.
    List(Vec<String>),
}

impl FieldValue {
    fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::List(_) => FieldKind::List,
        }
    }
}

impl CampaignFrame {
    fn text_mut(&mut self, field: FrameField) -> Option<&mut String> {
        match field {
            FrameField::Pitch => Some(&mut self.pitch),
            FrameField::Overview => Some(&mut self.overview),
            FrameField::IncitingIncident => Some(&mut self.inciting_incident),
            FrameField::CampaignMechanics => Some(&mut self.campaign_mechanics),
            _ => None,
        }
    }

    fn list_mut(&mut self, field: FrameField) -> Option<&mut Vec<String>> {
        match field {
            FrameField::ToneAndFeel => Some(&mut self.tone_and_feel),
            FrameField::Themes => Some(&mut self.themes),
            FrameField::Touchstones => Some(&mut self.touchstones),
            FrameField::Communities => Some(&mut self.communities),
            FrameField::Ancestries => Some(&mut self.ancestries),
            FrameField::Classes => Some(&mut self.classes),
            FrameField::PlayerPrinciples => Some(&mut self.player_principles),
            FrameField::GmPrinciples => Some(&mut self.gm_principles),
            FrameField::Distinctions => Some(&mut self.distinctions),
            FrameField::SessionZeroQuestions => Some(&mut self.session_zero_questions),
            _ => None,
        }
    }

    /// Text of a text field; `None` for list fields.
    #[must_use]
    pub fn text(&self, field: FrameField) -> Option<&str> {
        match field {
            FrameField::Pitch => Some(&self.pitch),
            FrameField::Overview => Some(&self.overview),
            FrameField::IncitingIncident => Some(&self.inciting_incident),
            FrameField::CampaignMechanics => Some(&self.campaign_mechanics),
            _ => None,
        }
    }

    /// Entries of a list field; `None` for text fields.
    #[must_use]
    pub fn list(&self, field: FrameField) -> Option<&[String]> {
        match field {
            FrameField::ToneAndFeel => Some(&self.tone_and_feel),
            FrameField::Themes => Some(&self.themes),
            FrameField::Touchstones => Some(&self.touchstones),
            FrameField::Communities => Some(&self.communities),
            FrameField::Ancestries => Some(&self.ancestries),
            FrameField::Classes => Some(&self.classes),
            FrameField::PlayerPrinciples => Some(&self.player_principles),
            FrameField::GmPrinciples => Some(&self.gm_principles),
            FrameField::Distinctions => Some(&self.distinctions),
            FrameField::SessionZeroQuestions => Some(&self.session_zero_questions),
            _ => None,
        }
    }

    /// Replaces one field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `value` is a list for a text field
    /// or text for a list field.
    pub fn set(&mut self, field: FrameField, value: FieldValue) -> Result<(), DomainError> {
        let expected = field.kind();
        let mismatch = || {
            DomainError::Validation(format!(
                "{field} expects {}",
                match expected {
                    FieldKind::Text => "text",
                    FieldKind::List => "a list",
                }
            ))
        };
        if value.kind() != expected {
            return Err(mismatch());
        }
        match value {
            FieldValue::Text(text) => *self.text_mut(field).ok_or_else(mismatch)? = text,
            FieldValue::List(entries) => *self.list_mut(field).ok_or_else(mismatch)? = entries,
        }
        Ok(())
    }
}
