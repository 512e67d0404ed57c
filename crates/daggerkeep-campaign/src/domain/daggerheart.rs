//! Daggerheart system reference data.

/// Classes and the domains the character form offers for each.
pub const CLASSES: [(&str, [&str; 4]); 9] = [
    ("Bard", ["Codex", "Grace", "Midnight", "Splendor"]),
    ("Druid", ["Arcana", "Sage", "Blade", "Bone"]),
    ("Guardian", ["Blade", "Bone", "Grace", "Valor"]),
    ("Ranger", ["Sage", "Blade", "Grace", "Midnight"]),
    ("Rogue", ["Midnight", "Blade", "Grace", "Splendor"]),
    ("Seraph", ["Codex", "Grace", "Splendor", "Valor"]),
    ("Sorcerer", ["Arcana", "Midnight", "Bone", "Codex"]),
    ("Warrior", ["Blade", "Bone", "Grace", "Valor"]),
    ("Wizard", ["Arcana", "Codex", "Sage", "Splendor"]),
];

/// Every domain card deck.
pub const DOMAINS: [&str; 9] = [
    "Arcana", "Blade", "Bone", "Codex", "Grace", "Midnight", "Sage", "Splendor", "Valor",
];

/// Playable ancestries.
pub const ANCESTRIES: [&str; 19] = [
    "Clank", "Daemon", "Drakona", "Dwarf", "Elf", "Faerie", "Faun", "Firbolg", "Fungril",
    "Galapa", "Giant", "Goblin", "Halfling", "Human", "Inferis", "Katari", "Orc", "Ribbet",
    "Simiah",
];

/// Playable communities.
pub const COMMUNITIES: [&str; 9] = [
    "Highborne",
    "Loreborne",
    "Orderborne",
    "Ridgeborne",
    "Seaborne",
    "Slyborne",
    "Wanderborne",
    "Wildborne",
    "Underborne",
];

/// Inclusive range of a starting trait modifier.
pub const TRAIT_RANGE: std::ops::RangeInclusive<i8> = -1..=3;

/// Inclusive range of character levels.
pub const LEVEL_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Domains available to `class`, if it is a Daggerheart class.
#[must_use]
pub fn class_domains(class: &str) -> Option<&'static [&'static str; 4]> {
    CLASSES
        .iter()
        .find(|(name, _)| *name == class)
        .map(|(_, domains)| domains)
}
