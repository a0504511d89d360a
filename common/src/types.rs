use serde::{Deserialize, Serialize};

/// One parsed content slide: the (title, bullets, notes, image term) tuple
/// extracted from a single model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    pub bullets: Vec<String>,
    pub notes: String,
    pub image_term: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSlide {
    pub title: String,
    pub subtitle: String,
}

/// Full deck outline produced by the generation pipeline, ready to be
/// rendered into a presentation file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckOutline {
    pub title_slide: TitleSlide,
    pub content_slides: Vec<SlideContent>,
}

/// Flat club record as stored by the onboarding flow, one JSON file per
/// club under a per-user directory. Field names are camelCase on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClubRecord {
    pub club_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: String,
    pub club_name: String,
    pub description: String,
    pub mission: String,
    pub goals: String,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_record_reads_camel_case_json() {
        let raw = r#"{
            "clubId": "c1",
            "userId": "u1",
            "userName": "Sam",
            "userRole": "President",
            "clubName": "Python Club",
            "description": "Weekly coding sessions",
            "mission": "Learn by building",
            "goals": "Ship small projects",
            "createdAt": "2024-01-01",
            "updatedAt": "2024-02-01"
        }"#;
        let record: ClubRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.club_name, "Python Club");
        assert_eq!(record.user_role, "President");
    }

    #[test]
    fn club_record_tolerates_missing_fields() {
        let record: ClubRecord = serde_json::from_str(r#"{"clubName": "Chess Club"}"#).unwrap();
        assert_eq!(record.club_name, "Chess Club");
        assert!(record.mission.is_empty());
    }
}
