//! In-memory storage - used when no database is configured, and in tests.
//!
//! All repositories handed out by one [`InMemoryStore`] share its tables, so
//! foreign keys and cascading deletes behave like the PostgreSQL schema.
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn put_user(&mut self, user: User) -> Result<User, RepoError> {
        let taken = self
            .users
            .values()
            .any(|existing| existing.username == user.username && existing.id != user.id);
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn put_post(&mut self, post: Post) -> Result<Post, RepoError> {
        if !self.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(
                "Referenced entity does not exist".to_string(),
            ));
        }

        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    fn put_comment(&mut self, comment: Comment) -> Result<Comment, RepoError> {
        if !self.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(
                "Referenced entity does not exist".to_string(),
            ));
        }

        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    /// Drop a post and everything that references it.
    fn delete_post(&mut self, id: Uuid) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.comments.retain(|_, comment| comment.post_id != id);
        Some(post)
    }
}

type SharedTables = Arc<RwLock<Tables>>;

/// Shared tables behind the in-memory repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: SharedTables,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            tables: self.tables.clone(),
        }
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        InMemoryCommentRepository {
            tables: self.tables.clone(),
        }
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        self.tables.write().await.put_user(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        tables.put_user(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(&id).ok_or(RepoError::NotFound)?;

        let authored: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|post| post.author_id == id)
            .map(|post| post.id)
            .collect();
        for post_id in authored {
            tables.delete_post(post_id);
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    tables: SharedTables,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.tables.write().await.put_post(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        tables.put_post(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.delete_post(id).ok_or(RepoError::NotFound)?;
        tracing::debug!(post_id = %id, "Deleted post and its comments");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.is_published_at(now))
            .cloned()
            .collect();

        posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
        Ok(posts)
    }

    async fn find_drafts(&self) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.is_draft())
            .cloned()
            .collect();

        posts.sort_by_key(|post| post.created_date);
        Ok(posts)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    tables: SharedTables,
}

impl InMemoryCommentRepository {
    async fn comments_on(
        &self,
        post_id: Uuid,
        keep: impl Fn(&Comment) -> bool,
    ) -> Vec<Comment> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id && keep(comment))
            .cloned()
            .collect();

        comments.sort_by_key(|comment| comment.create_date);
        comments
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.tables.write().await.put_comment(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        tables.put_comment(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.comments.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.comments_on(post_id, |_| true).await)
    }

    async fn find_approved_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self.comments_on(post_id, |comment| comment.approved).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    async fn author(store: &InMemoryStore) -> User {
        store
            .users()
            .save(User::new("editor".to_string(), "hash".to_string(), Utc::now()))
            .await
            .unwrap()
    }

    fn post(author: &User, title: &str, now: DateTime<Utc>) -> Post {
        Post::new(author.id, title.to_string(), "body".to_string(), now)
    }

    #[tokio::test]
    async fn test_save_and_find_post() {
        let store = InMemoryStore::new();
        let user = author(&store).await;
        let saved = store
            .posts()
            .save(post(&user, "Hello", Utc::now()))
            .await
            .unwrap();

        let found = store.posts().find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryStore::new();
        let orphan = Post::new(Uuid::new_v4(), "t".into(), "b".into(), Utc::now());

        let result = store.posts().save(orphan).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_comment_requires_existing_post() {
        let store = InMemoryStore::new();
        let comment = Comment::new(Uuid::new_v4(), "Alice".into(), "hi".into(), Utc::now());

        let result = store.comments().save(comment).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_published_and_drafts_are_split_and_ordered() {
        let store = InMemoryStore::new();
        let user = author(&store).await;
        let posts = store.posts();
        let t0 = Utc::now();

        let mut older = post(&user, "older", t0);
        older.publish(t0 + TimeDelta::minutes(1));
        let mut newer = post(&user, "newer", t0);
        newer.publish(t0 + TimeDelta::minutes(2));
        let mut scheduled = post(&user, "scheduled", t0);
        scheduled.publish(t0 + TimeDelta::days(1));
        let first_draft = post(&user, "first draft", t0 + TimeDelta::seconds(1));
        let second_draft = post(&user, "second draft", t0 + TimeDelta::seconds(2));

        for p in [&second_draft, &older, &scheduled, &first_draft, &newer] {
            posts.save(p.clone()).await.unwrap();
        }

        let now = t0 + TimeDelta::hours(1);
        let published: Vec<String> = posts
            .find_published(now)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(published, vec!["newer", "older"]);

        let drafts: Vec<String> = posts
            .find_drafts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(drafts, vec!["first draft", "second draft"]);
    }

    #[tokio::test]
    async fn test_delete_post_cascades_to_comments() {
        let store = InMemoryStore::new();
        let user = author(&store).await;
        let now = Utc::now();
        let doomed = store.posts().save(post(&user, "doomed", now)).await.unwrap();
        let kept = store.posts().save(post(&user, "kept", now)).await.unwrap();

        let gone = store
            .comments()
            .save(Comment::new(doomed.id, "Alice".into(), "a".into(), now))
            .await
            .unwrap();
        let survivor = store
            .comments()
            .save(Comment::new(kept.id, "Bob".into(), "b".into(), now))
            .await
            .unwrap();

        store.posts().delete(doomed.id).await.unwrap();

        assert!(store.comments().find_by_id(gone.id).await.unwrap().is_none());
        assert!(store.comments().find_by_post(doomed.id).await.unwrap().is_empty());
        assert!(
            store
                .comments()
                .find_by_id(survivor.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = InMemoryStore::new();

        let post_result = store.posts().delete(Uuid::new_v4()).await;
        let comment_result = store.comments().delete(Uuid::new_v4()).await;

        assert!(matches!(post_result, Err(RepoError::NotFound)));
        assert!(matches!(comment_result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_does_not_resurrect_deleted_rows() {
        let store = InMemoryStore::new();
        let user = author(&store).await;
        let now = Utc::now();
        let post = store.posts().save(post(&user, "p", now)).await.unwrap();
        let comment = store
            .comments()
            .save(Comment::new(post.id, "Alice".into(), "a".into(), now))
            .await
            .unwrap();

        let mut renamed = post.clone();
        renamed.title = "renamed".to_string();
        let updated = store.posts().update(renamed).await.unwrap();
        assert_eq!(updated.title, "renamed");

        store.posts().delete(post.id).await.unwrap();

        let mut stale_post = post.clone();
        stale_post.publish(now);
        let mut stale_comment = comment.clone();
        stale_comment.approve();
        assert!(matches!(
            store.posts().update(stale_post).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            store.comments().update(stale_comment).await,
            Err(RepoError::NotFound)
        ));
        assert!(store.posts().find_by_id(post.id).await.unwrap().is_none());
        assert!(store.comments().find_by_id(comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_approved_filter() {
        let store = InMemoryStore::new();
        let user = author(&store).await;
        let now = Utc::now();
        let parent = store.posts().save(post(&user, "p", now)).await.unwrap();

        let mut approved = Comment::new(parent.id, "Alice".into(), "yes".into(), now);
        approved.approve();
        let pending = Comment::new(
            parent.id,
            "Bob".into(),
            "maybe".into(),
            now + TimeDelta::seconds(1),
        );
        store.comments().save(approved.clone()).await.unwrap();
        store.comments().save(pending.clone()).await.unwrap();

        let all = store.comments().find_by_post(parent.id).await.unwrap();
        assert_eq!(all, vec![approved.clone(), pending]);

        let visible = store
            .comments()
            .find_approved_by_post(parent.id)
            .await
            .unwrap();
        assert_eq!(visible, vec![approved]);
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let store = InMemoryStore::new();
        author(&store).await;

        let duplicate = User::new("editor".to_string(), "other".to_string(), Utc::now());
        let result = store.users().save(duplicate).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert!(
            store
                .users()
                .find_by_username("editor")
                .await
                .unwrap()
                .is_some()
        );
    }
}
