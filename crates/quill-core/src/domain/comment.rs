use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - reader feedback attached to a post, hidden until approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    /// Free-text display name, not tied to a user account.
    pub author: String,
    pub text: String,
    pub create_date: DateTime<Utc>,
    pub approved: bool,
}

impl Comment {
    /// Create a new, unapproved comment on `post_id`.
    pub fn new(post_id: Uuid, author: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author,
            text,
            create_date: now,
            approved: false,
        }
    }

    pub fn approve(&mut self) {
        self.approved = true;
    }
}
