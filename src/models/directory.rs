use crate::models::domain::Profile;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Duplicate profile id: {0}")]
pub struct DuplicateProfileId(pub String);

/// Read-only, ordered snapshot of every profile the viewer could see
#[derive(Debug, Clone, Default)]
pub struct ProfileDirectory {
    profiles: Vec<Profile>,
    index: HashMap<String, usize>,
}

impl ProfileDirectory {
    pub fn from_profiles(profiles: Vec<Profile>) -> Result<Self, DuplicateProfileId> {
        let mut index = HashMap::with_capacity(profiles.len());
        for (position, profile) in profiles.iter().enumerate() {
            if index.insert(profile.id.clone(), position).is_some() {
                return Err(DuplicateProfileId(profile.id.clone()));
            }
        }

        Ok(Self { profiles, index })
    }

    /// Profiles in directory order
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: &str) -> Option<&Profile> {
        self.index.get(id).map(|&i| &self.profiles[i])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
