use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry, a draft until it is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new draft post.
    pub fn new(author_id: Uuid, title: String, text: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            text,
            created_date: now,
            published_date: None,
        }
    }

    /// Stamp the post as published at `now`.
    ///
    /// Publishing an already published post moves its timestamp forward.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.published_date = Some(now);
    }

    pub fn is_draft(&self) -> bool {
        self.published_date.is_none()
    }

    /// Whether the post is visible in the published list at `now`.
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_date.is_some_and(|published| published <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn draft(now: DateTime<Utc>) -> Post {
        Post::new(Uuid::new_v4(), "Hello".to_string(), "World".to_string(), now)
    }

    #[test]
    fn test_new_post_is_draft() {
        let now = Utc::now();
        let post = draft(now);

        assert!(post.is_draft());
        assert_eq!(post.created_date, now);
        assert!(!post.is_published_at(now));
    }

    #[test]
    fn test_publish_sets_timestamp() {
        let now = Utc::now();
        let mut post = draft(now);

        post.publish(now);

        assert_eq!(post.published_date, Some(now));
        assert!(post.is_published_at(now));
        assert!(!post.is_draft());
    }

    #[test]
    fn test_republish_moves_timestamp_forward() {
        let first = Utc::now();
        let later = first + TimeDelta::minutes(5);
        let mut post = draft(first);

        post.publish(first);
        post.publish(later);

        assert_eq!(post.published_date, Some(later));
        assert_eq!(post.created_date, first);
    }

    #[test]
    fn test_future_publication_not_visible_yet() {
        let now = Utc::now();
        let mut post = draft(now);

        post.publish(now + TimeDelta::hours(1));

        assert!(!post.is_published_at(now));
        assert!(!post.is_draft());
    }
}
