//! Duality dice: a Hope d12 and a Fear d12 rolled together.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use daggerkeep_core::clock::Clock;
use daggerkeep_core::error::DomainError;
use daggerkeep_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Modifiers the roller accepts.
pub const MODIFIER_RANGE: RangeInclusive<i32> = -5..=10;

/// Number of rolls a campaign remembers.
pub const HISTORY_LIMIT: usize = 10;

const D12: RangeInclusive<u32> = 1..=12;

/// Key-value store key of a campaign's roll history.
#[must_use]
pub fn history_key(campaign_id: Uuid) -> String {
    format!("dice_history:{campaign_id}")
}

/// Which die came up higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DualityOutcome {
    /// The Hope die was higher, or the dice tied.
    Hope,
    /// The Fear die was higher.
    Fear,
}

/// One duality roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualityRoll {
    /// Face of the Hope die.
    pub hope_die: u8,
    /// Face of the Fear die.
    pub fear_die: u8,
    /// Modifier added to the higher die.
    pub modifier: i32,
    /// Higher die plus modifier.
    pub total: i32,
    /// Whether the roll was with Hope or with Fear.
    pub outcome: DualityOutcome,
    /// When the dice were rolled.
    pub rolled_at: DateTime<Utc>,
}

/// Rolls the duality dice: Hope first, then Fear.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `modifier` is outside
/// [`MODIFIER_RANGE`], or `DomainError::Infrastructure` if the RNG produces a
/// face that is not on a d12.
pub fn roll(
    modifier: i32,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<DualityRoll, DomainError> {
    if !MODIFIER_RANGE.contains(&modifier) {
        return Err(DomainError::Validation(format!(
            "modifier must be between {} and {}, got {modifier}",
            MODIFIER_RANGE.start(),
            MODIFIER_RANGE.end()
        )));
    }

    let hope_die = d12(rng)?;
    let fear_die = d12(rng)?;
    let outcome = if hope_die >= fear_die {
        DualityOutcome::Hope
    } else {
        DualityOutcome::Fear
    };

    Ok(DualityRoll {
        hope_die,
        fear_die,
        modifier,
        total: i32::from(hope_die.max(fear_die)) + modifier,
        outcome,
        rolled_at: clock.now(),
    })
}

fn d12(rng: &mut dyn DeterministicRng) -> Result<u8, DomainError> {
    let face = rng.next_u32_range(*D12.start(), *D12.end());
    if !D12.contains(&face) {
        return Err(DomainError::Infrastructure(format!(
            "RNG produced {face}, outside 1..=12"
        )));
    }
    u8::try_from(face).map_err(|e| DomainError::Infrastructure(e.to_string()))
}

/// The most recent rolls of a campaign, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollHistory(VecDeque<DualityRoll>);

impl RollHistory {
    /// Adds a roll at the front, dropping the oldest past [`HISTORY_LIMIT`].
    pub fn push(&mut self, roll: DualityRoll) {
        self.0.push_front(roll);
        self.0.truncate(HISTORY_LIMIT);
    }

    /// Rolls, newest first.
    #[must_use]
    pub fn rolls(&self) -> Vec<DualityRoll> {
        self.0.iter().cloned().collect()
    }

    /// Number of remembered rolls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no roll has been made yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
