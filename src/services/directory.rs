use std::path::Path;
use thiserror::Error;
use crate::models::{DuplicateProfileId, Profile, ProfileDirectory};

/// Errors that can occur while loading the profile directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Duplicate(#[from] DuplicateProfileId),
}

/// Parse a JSON array of profiles
pub fn parse_directory(json: &str) -> Result<ProfileDirectory, DirectoryError> {
    let profiles: Vec<Profile> = serde_json::from_str(json)?;
    Ok(ProfileDirectory::from_profiles(profiles)?)
}

/// Load the directory snapshot from disk
pub fn load_directory<P: AsRef<Path>>(path: P) -> Result<ProfileDirectory, DirectoryError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let directory = parse_directory(&json)?;

    tracing::info!(
        "Loaded {} profiles from {}",
        directory.len(),
        path.display()
    );

    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directory() {
        let json = r#"[
            {"id": "1", "name": "Ama", "age": 26, "distanceInMiles": 4.5},
            {"id": "2", "name": "Kofi", "age": 31, "verified": true}
        ]"#;

        let directory = parse_directory(json).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("1").unwrap().distance_in_miles, Some(4.5));
        assert!(directory.get("2").unwrap().verified);
        assert_eq!(directory.get("2").unwrap().distance_in_miles, None);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"id": "1", "name": "Ama", "age": 26},
            {"id": "1", "name": "Ama again", "age": 27}
        ]"#;

        assert!(matches!(parse_directory(json), Err(DirectoryError::Duplicate(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_directory("does/not/exist.json");
        assert!(matches!(result, Err(DirectoryError::Io(_))));
    }

    #[test]
    fn test_bundled_profiles_parse() {
        let directory = load_directory(concat!(env!("CARGO_MANIFEST_DIR"), "/data/profiles.json")).unwrap();
        assert!(!directory.is_empty());
    }
}
