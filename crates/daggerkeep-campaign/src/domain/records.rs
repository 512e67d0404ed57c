//! Typed records for every campaign collection.
//!
//! Records serialize with camelCase field names and tolerate missing fields
//! (each falls back to its form default), so the same types accept input
//! from the API and from AI-generated content.

use std::fmt;

use daggerkeep_core::error::DomainError;
use daggerkeep_core::record::Collection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::daggerheart::{
    ANCESTRIES, COMMUNITIES, LEVEL_RANGE, TRAIT_RANGE, class_domains,
};

/// A record type stored in one campaign collection.
pub trait CampaignRecord:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    /// The collection records of this type live in.
    const COLLECTION: Collection;

    /// Whether the collection numbers its records (1, 2, 3, ...).
    const SEQUENCED: bool = false;

    /// Checks the record's own fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` describing the first invalid field.
    fn validate(&self) -> Result<(), DomainError>;

    /// Sequence number, for sequenced collections.
    fn sequence(&self) -> Option<u32> {
        None
    }

    /// Assigns the sequence number, for sequenced collections.
    fn assign_sequence(&mut self, _number: u32) {}
}

fn require_text(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Accepts a party level written either as a number or as a numeric string
/// (form inputs and language models produce both). Blank strings mean unset.
fn optional_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Level {
        Number(u8),
        Text(String),
    }

    match Option::<Level>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Level::Number(n)) => Ok(Some(n)),
        Some(Level::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Level::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid party level: {s}"))),
    }
}

// ---------------------------------------------------------------------------
// Characters
// ---------------------------------------------------------------------------

/// The six character traits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Traits {
    /// Agility.
    pub agility: i8,
    /// Strength.
    pub strength: i8,
    /// Finesse.
    pub finesse: i8,
    /// Instinct.
    pub instinct: i8,
    /// Presence.
    pub presence: i8,
    /// Knowledge.
    pub knowledge: i8,
}

impl Traits {
    /// Trait names paired with their values.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, i8); 6] {
        [
            ("agility", self.agility),
            ("strength", self.strength),
            ("finesse", self.finesse),
            ("instinct", self.instinct),
            ("presence", self.presence),
            ("knowledge", self.knowledge),
        ]
    }
}

/// A player character sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Character {
    /// Character name.
    pub name: String,
    /// Name of the player.
    pub player_name: String,
    /// Avatar image URL (may be a data URL).
    pub avatar_url: String,
    /// Daggerheart class.
    pub class: String,
    /// Subclass.
    pub subclass: String,
    /// Level, 1 through 10.
    pub level: u8,
    /// Ancestry.
    pub ancestry: String,
    /// Community.
    pub community: String,
    /// Trait modifiers.
    pub traits: Traits,
    /// Hit point slots; `true` is an unmarked slot.
    pub hp_slots: Vec<bool>,
    /// Stress slots; `true` is a marked slot.
    pub stress_slots: Vec<bool>,
    /// Evasion score.
    pub evasion: i32,
    /// Armor score.
    pub armor: i32,
    /// Primary domain.
    pub primary_domain: String,
    /// Experiences.
    pub experiences: Vec<String>,
    /// Link to the Demiplane character sheet.
    pub demiplane_link: String,
    /// Backstory.
    pub backstory: String,
    /// Notes visible to the GM only.
    pub dm_notes: String,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: String::new(),
            player_name: String::new(),
            avatar_url: String::new(),
            class: "Bard".to_owned(),
            subclass: String::new(),
            level: 1,
            ancestry: "Human".to_owned(),
            community: "Wanderborne".to_owned(),
            traits: Traits::default(),
            hp_slots: vec![true; 6],
            stress_slots: vec![false; 6],
            evasion: 10,
            armor: 0,
            primary_domain: "Codex".to_owned(),
            experiences: Vec::new(),
            demiplane_link: String::new(),
            backstory: String::new(),
            dm_notes: String::new(),
        }
    }
}

impl CampaignRecord for Character {
    const COLLECTION: Collection = Collection::Characters;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.name, "character name")?;
        let domains = class_domains(&self.class)
            .ok_or_else(|| DomainError::Validation(format!("unknown class: {}", self.class)))?;
        if !LEVEL_RANGE.contains(&self.level) {
            return Err(DomainError::Validation(format!(
                "level must be between {} and {}, got {}",
                LEVEL_RANGE.start(),
                LEVEL_RANGE.end(),
                self.level
            )));
        }
        if !ANCESTRIES.contains(&self.ancestry.as_str()) {
            return Err(DomainError::Validation(format!(
                "unknown ancestry: {}",
                self.ancestry
            )));
        }
        if !COMMUNITIES.contains(&self.community.as_str()) {
            return Err(DomainError::Validation(format!(
                "unknown community: {}",
                self.community
            )));
        }
        for (name, value) in self.traits.entries() {
            if !TRAIT_RANGE.contains(&value) {
                return Err(DomainError::Validation(format!(
                    "{name} must be between {} and {}, got {value}",
                    TRAIT_RANGE.start(),
                    TRAIT_RANGE.end()
                )));
            }
        }
        if !domains.contains(&self.primary_domain.as_str()) {
            return Err(DomainError::Validation(format!(
                "{} is not a {} domain",
                self.primary_domain, self.class
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NPCs
// ---------------------------------------------------------------------------

/// A non-player character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Npc {
    /// Name.
    pub name: String,
    /// Role in the story (ally, rival, merchant, ...).
    pub role: String,
    /// Appearance and demeanor.
    pub description: String,
    /// What the NPC wants.
    pub motivation: String,
    /// Where the NPC is usually found.
    pub location: String,
    /// Hidden information.
    pub secrets: String,
}

impl CampaignRecord for Npc {
    const COLLECTION: Collection = Collection::Npcs;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.name, "NPC name")
    }
}

// ---------------------------------------------------------------------------
// Lore
// ---------------------------------------------------------------------------

/// Category of a lore entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoreType {
    /// A place.
    Location,
    /// A person.
    Npc,
    /// A faction or organization.
    Faction,
    /// An item or artifact.
    Item,
    /// Historical background.
    History,
    /// A quest hook.
    Quest,
    /// Anything else.
    #[default]
    Other,
}

/// A lore entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoreEntry {
    /// Title.
    pub title: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: LoreType,
    /// Body text.
    pub content: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Hidden from players.
    pub hidden: bool,
}

impl CampaignRecord for LoreEntry {
    const COLLECTION: Collection = Collection::Lore;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.title, "lore title")
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// A play session log. Sessions are numbered in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    /// Session number, assigned on creation.
    pub number: u32,
    /// Title.
    pub title: String,
    /// Play date as entered (`YYYY-MM-DD` from the form).
    pub date: String,
    /// Summary.
    pub summary: String,
    /// Highlights.
    pub highlights: Vec<String>,
    /// GM notes.
    pub dm_notes: String,
}

impl CampaignRecord for Session {
    const COLLECTION: Collection = Collection::Sessions;
    const SEQUENCED: bool = true;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.title, "session title")
    }

    fn sequence(&self) -> Option<u32> {
        Some(self.number)
    }

    fn assign_sequence(&mut self, number: u32) {
        self.number = number;
    }
}

// ---------------------------------------------------------------------------
// Encounters
// ---------------------------------------------------------------------------

/// Encounter difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Medium.
    #[default]
    Medium,
    /// Hard.
    Hard,
    /// Deadly.
    Deadly,
}

/// A prepared encounter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Encounter {
    /// Name.
    pub name: String,
    /// Difficulty.
    pub difficulty: Difficulty,
    /// Intended party level, 1 through 20.
    #[serde(deserialize_with = "optional_level")]
    pub party_level: Option<u8>,
    /// Setup description.
    pub description: String,
    /// Enemies and quantities.
    pub enemies: String,
    /// Environment.
    pub environment: String,
    /// Enemy tactics.
    pub tactics: String,
    /// Rewards.
    pub rewards: String,
    /// Link to the encounter on FreshCutGrass.
    pub freshcutgrass_link: String,
}

impl CampaignRecord for Encounter {
    const COLLECTION: Collection = Collection::Encounters;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.name, "encounter name")?;
        if let Some(level) = self.party_level {
            if !(1..=20).contains(&level) {
                return Err(DomainError::Validation(format!(
                    "party level must be between 1 and 20, got {level}"
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Kind of location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// City.
    City,
    /// Town.
    #[default]
    Town,
    /// Village.
    Village,
    /// Dungeon.
    Dungeon,
    /// Wilderness.
    Wilderness,
    /// Landmark.
    Landmark,
    /// Anything else.
    Other,
}

/// A location in the campaign world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    /// Name.
    pub name: String,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: LocationType,
    /// Region.
    pub region: String,
    /// Description.
    pub description: String,
    /// Notable features.
    pub notable_features: String,
    /// Inhabitants.
    pub inhabitants: String,
    /// Hidden information.
    pub secrets: String,
}

impl CampaignRecord for Location {
    const COLLECTION: Collection = Collection::Locations;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.name, "location name")
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Kind of timeline event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineEventType {
    /// General event.
    #[default]
    Event,
    /// Quest.
    Quest,
    /// Milestone.
    Milestone,
    /// Anything else.
    Other,
}

/// An event on the campaign timeline. Dates are free-form in-world dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEvent {
    /// Title.
    pub title: String,
    /// In-world date, any format.
    pub date: String,
    /// Where it happened.
    pub location: String,
    /// Kind.
    #[serde(rename = "type")]
    pub kind: TimelineEventType,
    /// Description.
    pub description: String,
    /// Who took part.
    pub participants: String,
    /// Outcome.
    pub outcome: String,
}

impl CampaignRecord for TimelineEvent {
    const COLLECTION: Collection = Collection::TimelineEvents;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.title, "timeline event title")
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Metadata of an uploaded campaign file. The bytes live in the blob store
/// at `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignFile {
    /// Original file name.
    pub name: String,
    /// Blob store path.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type.
    pub content_type: String,
    /// Display name of the uploader.
    pub uploaded_by: String,
    /// Hex-encoded SHA-256 of the content.
    pub sha256: String,
}

impl CampaignRecord for CampaignFile {
    const COLLECTION: Collection = Collection::Files;

    fn validate(&self) -> Result<(), DomainError> {
        require_text(&self.name, "file name")?;
        require_text(&self.path, "file path")
    }
}
