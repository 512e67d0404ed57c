//! The wizard's step table.

use serde::Serialize;

use super::frame::{CampaignFrame, FrameField};

/// Number of question steps.
pub const STEP_COUNT: usize = 14;

/// Index of the review step that follows the last question.
pub const REVIEW_STEP: usize = STEP_COUNT;

/// What a step's field must hold before the wizard moves past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepRule {
    /// Non-blank text.
    RequiredText,
    /// At least one entry.
    AtLeastOne,
}

/// One question step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    /// The frame field this step fills in.
    pub field: FrameField,
    /// Heading shown for the step.
    pub title: &'static str,
    /// Gate on moving forward.
    pub rule: StepRule,
}

impl StepDescriptor {
    const fn text(field: FrameField, title: &'static str) -> Self {
        Self {
            field,
            title,
            rule: StepRule::RequiredText,
        }
    }

    const fn list(field: FrameField, title: &'static str) -> Self {
        Self {
            field,
            title,
            rule: StepRule::AtLeastOne,
        }
    }

    /// Whether `frame` satisfies this step's rule.
    #[must_use]
    pub fn is_satisfied(&self, frame: &CampaignFrame) -> bool {
        match self.rule {
            StepRule::RequiredText => frame
                .text(self.field)
                .is_some_and(|text| !text.trim().is_empty()),
            StepRule::AtLeastOne => frame.list(self.field).is_some_and(|list| !list.is_empty()),
        }
    }
}

/// The steps, indexed by step number.
pub static STEPS: [StepDescriptor; STEP_COUNT] = [
    StepDescriptor::text(FrameField::Pitch, "The Pitch"),
    StepDescriptor::list(FrameField::ToneAndFeel, "Tone & Feel"),
    StepDescriptor::list(FrameField::Themes, "Themes"),
    StepDescriptor::list(FrameField::Touchstones, "Touchstones"),
    StepDescriptor::text(FrameField::Overview, "Overview"),
    StepDescriptor::list(FrameField::Communities, "Communities"),
    StepDescriptor::list(FrameField::Ancestries, "Ancestries"),
    StepDescriptor::list(FrameField::Classes, "Classes"),
    StepDescriptor::list(FrameField::PlayerPrinciples, "Player Principles"),
    StepDescriptor::list(FrameField::GmPrinciples, "GM Principles"),
    StepDescriptor::list(FrameField::Distinctions, "Distinctions"),
    StepDescriptor::text(FrameField::IncitingIncident, "Inciting Incident"),
    StepDescriptor::text(FrameField::CampaignMechanics, "Campaign Mechanics"),
    StepDescriptor::list(FrameField::SessionZeroQuestions, "Session Zero Questions"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::frame::FieldKind;

    #[test]
    fn test_steps_follow_frame_field_order() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.field, FrameField::ALL[index]);
        }
    }

    #[test]
    fn test_step_rules_match_field_kinds() {
        for step in &STEPS {
            let expected = match step.field.kind() {
                FieldKind::Text => StepRule::RequiredText,
                FieldKind::List => StepRule::AtLeastOne,
            };
            assert_eq!(step.rule, expected, "{}", step.field);
        }
    }

    #[test]
    fn test_blank_text_does_not_satisfy_required_text() {
        let mut frame = CampaignFrame::default();
        frame.pitch = "   ".to_owned();

        assert!(!STEPS[0].is_satisfied(&frame));

        frame.pitch = "Heist in a sky city".to_owned();
        assert!(STEPS[0].is_satisfied(&frame));
    }
}
