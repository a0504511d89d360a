//! Club records live as one JSON file per club under a per-user directory:
//! `{data_dir}/{user_id}/{club_file}.json`.

use std::fs;
use std::path::{Path, PathBuf};

use clubdeck_common::ClubRecord;

use crate::error::{CoreError, Result};

pub fn load_club_record(path: &Path) -> Result<ClubRecord> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Scan every user directory for the club with the given name. Files that
/// fail to parse are skipped, matching the tolerant behavior of the
/// onboarding data layout.
pub fn find_club_file(data_dir: &Path, club_name: &str) -> Result<PathBuf> {
    if !data_dir.exists() {
        return Err(CoreError::ClubNotFound {
            club: club_name.to_string(),
            dir: data_dir.to_path_buf(),
        });
    }

    for user_entry in fs::read_dir(data_dir)? {
        let user_dir = user_entry?.path();
        if !user_dir.is_dir() {
            continue;
        }
        for club_entry in fs::read_dir(&user_dir)? {
            let club_path = club_entry?.path();
            if club_path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match load_club_record(&club_path) {
                Ok(record) if record.club_name == club_name => return Ok(club_path),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(path = %club_path.display(), error = %e, "skipping unreadable club file");
                }
            }
        }
    }

    Err(CoreError::ClubNotFound { club: club_name.to_string(), dir: data_dir.to_path_buf() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_club(dir: &Path, user: &str, file: &str, club_name: &str) {
        let user_dir = dir.join(user);
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(
            user_dir.join(file),
            format!(r#"{{"clubName": "{club_name}", "userId": "{user}"}}"#),
        )
        .unwrap();
    }

    #[test]
    fn finds_club_across_user_directories() {
        let dir = tempfile::tempdir().unwrap();
        write_club(dir.path(), "user-a", "chess.json", "Chess Club");
        write_club(dir.path(), "user-b", "robotics.json", "Robotics Club");

        let path = find_club_file(dir.path(), "Robotics Club").unwrap();
        assert!(path.ends_with("user-b/robotics.json"));
        let record = load_club_record(&path).unwrap();
        assert_eq!(record.club_name, "Robotics Club");
    }

    #[test]
    fn malformed_files_are_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let user_dir = dir.path().join("user-a");
        fs::create_dir_all(&user_dir).unwrap();
        fs::write(user_dir.join("broken.json"), "{not json").unwrap();
        write_club(dir.path(), "user-a", "ok.json", "Debate Club");

        let path = find_club_file(dir.path(), "Debate Club").unwrap();
        assert!(path.ends_with("ok.json"));
    }

    #[test]
    fn missing_club_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        write_club(dir.path(), "user-a", "chess.json", "Chess Club");
        let err = find_club_file(dir.path(), "Swim Club").unwrap_err();
        assert!(matches!(err, CoreError::ClubNotFound { .. }));
    }

    #[test]
    fn missing_data_dir_is_a_typed_error() {
        let err = find_club_file(Path::new("/nonexistent/clubdeck-data"), "Any").unwrap_err();
        assert!(matches!(err, CoreError::ClubNotFound { .. }));
    }
}
