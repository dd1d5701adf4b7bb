use serde::{Deserialize, Serialize};

use super::user_summary::UserSummary;
use super::FeedEntry;

/// A post in the home feed or a profile's posts tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Whether the requesting user has liked this post.
    /// Absent for anonymous requests.
    #[serde(default)]
    pub liked: bool,

    #[serde(default)]
    pub likes_count: u32,

    #[serde(default)]
    pub comments_count: u32,

    /// Attached photos; the first one is the card image.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<PhotoRef>,

    /// Author of the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,

    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Reference to an uploaded photo, served at `photos/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: i64,
}

impl FeedEntry for Post {
    fn entry_id(&self) -> i64 {
        self.id
    }
}
