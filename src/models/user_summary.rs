use serde::{Deserialize, Serialize};

use super::FeedEntry;

/// Minimal user record: the author embedded in posts, or an entry in a
/// search/follow list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Whether the requesting user follows this user.
    /// Absent for anonymous requests.
    #[serde(default)]
    pub is_following: bool,

    #[serde(default)]
    pub followers_count: u32,
}

impl UserSummary {
    /// First and last name joined, or the username when neither is set.
    pub fn display_name(&self) -> String {
        let full: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.join(" ")
        }
    }
}

impl FeedEntry for UserSummary {
    fn entry_id(&self) -> i64 {
        self.id
    }
}
