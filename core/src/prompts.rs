//! Prompt templates. Replies are expected (not guaranteed) to follow the
//! `TITLE:` / `BULLETS:` / `NOTES:` / `IMAGE:` marker format that
//! [`crate::parse`] understands.

use clubdeck_common::ClubRecord;

pub fn system_prompt(club_type: &str) -> String {
    format!(
        "You are a helpful assistant that generates educational content for {club_type} presentations. \
         Provide responses in a clear, structured format."
    )
}

pub fn generic_system_prompt() -> String {
    "You are a helpful assistant that generates educational content for club presentations. \
     Provide responses in a clear, structured format."
        .to_string()
}

pub fn title_prompt(club_type: &str, topic: &str, week: u32) -> String {
    format!(
        "Generate a title and subtitle for a {club_type} presentation about {topic} for week {week}.\n\
         Format: TITLE: [title]\nSUBTITLE: [subtitle]"
    )
}

pub fn slide_prompt(slide_topic: &str, club_type: &str) -> String {
    format!(
        "Generate content for a slide about {slide_topic} for a {club_type} presentation.\n\
         Include:\n\
         1. A title\n\
         2. 3-5 concise bullet points (each bullet should be short and fit easily on one line, \
         with NO extra blank lines between bullets)\n\
         3. Speaker notes (Write these in a friendly, conversational, and encouraging tone, as if \
         you are presenting to a high school club. Include practical tips for explaining the slide \
         content and engaging the audience, such as suggesting demos, asking questions, or \
         highlighting key takeaways.)\n\
         4. A relevant, unique, and universal image search term (avoid repeating previous terms)\n\
         Format:\n\
         TITLE: [title]\n\
         BULLETS:\n\
         - [bullet 1]\n\
         - [bullet 2]\n\
         - [bullet 3]\n\
         NOTES: [speaker notes]\n\
         IMAGE: [image search term]"
    )
}

/// Full-context prompt used by the SlidesGPT workflow, built from a stored
/// club record.
pub fn club_prompt(club: &ClubRecord, topic: &str, week: Option<u32>) -> String {
    let week_info = week.map(|w| format!(" (Week {w})")).unwrap_or_default();
    format!(
        "Create a professional presentation for {club_name}{week_info} about: {topic}\n\
         \n\
         Club Information:\n\
         - Club Name: {club_name}\n\
         - Description: {description}\n\
         - Mission Statement: {mission}\n\
         - Goals & Objectives: {goals}\n\
         - User Role: {user_role}\n\
         - User Name: {user_name}\n\
         \n\
         Presentation Requirements:\n\
         - Topic: {topic}\n\
         - Target Audience: Club members and stakeholders\n\
         - Tone: Professional yet engaging\n\
         - Structure: Include introduction, main content sections, and conclusion\n\
         - Visual Style: Modern and clean design\n\
         \n\
         Please create a presentation that:\n\
         1. Aligns with the club's mission and goals\n\
         2. Is appropriate for the user's role in the club\n\
         3. Provides valuable information about the topic\n\
         4. Engages the audience effectively\n\
         5. Includes relevant examples and practical applications\n\
         \n\
         Make sure the content is tailored specifically for {club_name} and its members.",
        club_name = club.club_name,
        description = club.description,
        mission = club.mission,
        goals = club.goals,
        user_role = club.user_role,
        user_name = club.user_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_names_club_topic_and_week() {
        let p = title_prompt("Biology Club", "Photosynthesis", 3);
        assert!(p.contains("Biology Club"));
        assert!(p.contains("Photosynthesis"));
        assert!(p.contains("week 3"));
        assert!(p.contains("TITLE:"));
        assert!(p.contains("SUBTITLE:"));
    }

    #[test]
    fn slide_prompt_demands_all_four_markers() {
        let p = slide_prompt("Key Concepts", "Chess Club");
        for marker in ["TITLE:", "BULLETS:", "NOTES:", "IMAGE:"] {
            assert!(p.contains(marker), "prompt missing {marker}");
        }
    }

    #[test]
    fn club_prompt_embeds_record_fields_and_optional_week() {
        let club = ClubRecord {
            club_name: "Robotics Club".to_string(),
            mission: "Build robots".to_string(),
            user_role: "Captain".to_string(),
            ..Default::default()
        };
        let with_week = club_prompt(&club, "Sensors", Some(2));
        assert!(with_week.contains("Robotics Club (Week 2)"));
        assert!(with_week.contains("Build robots"));
        assert!(with_week.contains("Captain"));
        let without = club_prompt(&club, "Sensors", None);
        assert!(!without.contains("(Week"));
    }
}
