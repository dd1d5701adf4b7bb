use serde::{Deserialize, Serialize};

use super::FeedEntry;

/// An event entry in a profile's events tab or the explore list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// RFC 3339 start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Cover image, served at `photos/<id>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_photo_id: Option<i64>,
}

impl FeedEntry for EventSummary {
    fn entry_id(&self) -> i64 {
        self.id
    }
}
