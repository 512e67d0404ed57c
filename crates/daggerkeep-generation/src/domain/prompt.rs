//! Prompt construction.

use daggerkeep_wizard::domain::frame::CampaignFrame;
use daggerkeep_wizard::domain::steps::STEPS;

/// Prompt used to check that an API key works.
pub const CONNECTION_TEST_PROMPT: &str =
    r#"Say "Hello! API connection successful." and nothing else."#;

const RESPONSE_FORMAT: &str = r#"Respond with a single JSON object and nothing else, shaped exactly like this:
{
  "npcs": [{ "name": "", "role": "", "description": "", "motivation": "", "location": "", "secrets": "" }],
  "locations": [{ "name": "", "type": "city|town|village|dungeon|wilderness|landmark|other", "region": "", "description": "", "notableFeatures": "", "inhabitants": "", "secrets": "" }],
  "lore": [{ "title": "", "type": "location|npc|faction|item|history|quest|other", "content": "", "tags": [""], "hidden": false }],
  "encounters": [{ "name": "", "difficulty": "easy|medium|hard|deadly", "partyLevel": 1, "description": "", "enemies": "", "environment": "", "tactics": "", "rewards": "" }],
  "timelineEvents": [{ "title": "", "date": "", "location": "", "type": "event|quest|milestone|other", "description": "", "participants": "", "outcome": "" }]
}
Include 5-8 NPCs, 4-6 locations, 5-8 lore entries, 3-5 encounters for a starting party and 4-6 timeline events leading up to the inciting incident. Every name and title must be non-empty."#;

/// Builds the generation prompt from the campaign's name, description and
/// every answer in its frame.
#[must_use]
pub fn build_generation_prompt(name: &str, description: &str, frame: &CampaignFrame) -> String {
    let mut prompt = format!(
        "You are helping a game master prepare a new Daggerheart campaign.\n\
         Campaign: {name}\n\
         Description: {description}\n\
         \n\
         Campaign frame:\n"
    );

    for step in &STEPS {
        let answer = match (frame.text(step.field), frame.list(step.field)) {
            (Some(text), _) => text.trim().to_owned(),
            (None, Some(entries)) => entries.join("; "),
            (None, None) => String::new(),
        };
        let answer = if answer.is_empty() {
            "(not specified)"
        } else {
            answer.as_str()
        };
        prompt.push_str(&format!("- {}: {answer}\n", step.title));
    }

    prompt.push_str("\nCreate starting content that fits this frame's tone, themes and setting.\n");
    prompt.push_str(RESPONSE_FORMAT);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_metadata_and_every_step() {
        let frame = CampaignFrame {
            pitch: "A heist in the floating city of Vesh".to_owned(),
            themes: vec!["Greed".to_owned(), "Loyalty".to_owned()],
            ..CampaignFrame::default()
        };

        let prompt = build_generation_prompt("Skyfall", "A tale of hope and fear...", &frame);

        assert!(prompt.contains("Campaign: Skyfall"));
        assert!(prompt.contains("A heist in the floating city of Vesh"));
        assert!(prompt.contains("Themes: Greed; Loyalty"));
        assert!(prompt.contains("Overview: (not specified)"));
        for step in &STEPS {
            assert!(prompt.contains(step.title), "missing {}", step.title);
        }
        assert!(prompt.contains("timelineEvents"));
    }

    #[test]
    fn test_prompt_lines_are_in_order() {
        let frame = CampaignFrame {
            pitch: "Storm over the Sablewood".to_owned(),
            ..CampaignFrame::default()
        };

        let prompt = build_generation_prompt("Sablewood", "Dark woods", &frame);

        let lines: Vec<&str> = prompt.lines().collect();
        assert_eq!(
            lines[..6],
            [
                "You are helping a game master prepare a new Daggerheart campaign.",
                "Campaign: Sablewood",
                "Description: Dark woods",
                "",
                "Campaign frame:",
                "- The Pitch: Storm over the Sablewood",
            ]
        );
        assert_eq!(lines[5 + STEPS.len()], "");
        assert_eq!(
            lines[6 + STEPS.len()],
            "Create starting content that fits this frame's tone, themes and setting."
        );
    }
}
