use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

/// Free-form profile details a user can edit about themselves.
#[derive(Deserialize, Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct UserDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Profile details keyed by identity id.
#[derive(Debug, Default)]
pub struct ProfileStore {
    details: HashMap<String, UserDetails>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unknown ids have empty details.
    pub fn fetch(&self, identity_id: &str) -> UserDetails {
        self.details.get(identity_id).cloned().unwrap_or_default()
    }

    /// Overwrites only the fields present in `update` and returns the merged details.
    pub fn save(&mut self, identity_id: &str, update: UserDetails) -> UserDetails {
        debug!("Saving profile details of {}", identity_id);
        let details = self.details.entry(identity_id.to_owned()).or_default();
        if update.bio.is_some() {
            details.bio = update.bio;
        }
        if update.picture.is_some() {
            details.picture = update.picture;
        }
        details.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_has_empty_details() {
        assert_eq!(ProfileStore::new().fetch("S1"), UserDetails::default());
    }

    #[test]
    fn save_merges_fields() {
        let mut store = ProfileStore::new();
        store.save(
            "S1",
            UserDetails {
                bio: Some("Pop artist".to_string()),
                picture: Some("soup.png".to_string()),
            },
        );
        let merged = store.save(
            "S1",
            UserDetails {
                bio: Some("Painter and filmmaker".to_string()),
                picture: None,
            },
        );
        assert_eq!(merged.bio.as_deref(), Some("Painter and filmmaker"));
        assert_eq!(merged.picture.as_deref(), Some("soup.png"));
        assert_eq!(store.fetch("S1"), merged);
        assert_eq!(store.fetch("S2"), UserDetails::default());
    }
}
