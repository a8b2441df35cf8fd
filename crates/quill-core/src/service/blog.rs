use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, NewComment, Post, PostDraft};
use crate::error::{DomainError, RepoError};
use crate::ports::{Clock, CommentRepository, PostRepository, Principal};

use super::guard::require_authenticated;

const POST: &str = "Post";
const COMMENT: &str = "Comment";

/// A post together with the comments its viewer may see.
#[derive(Debug, Clone)]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// Post and comment lifecycle over the repository ports.
///
/// Every mutating operation, and the draft list, takes the caller's
/// [`Principal`] and runs [`require_authenticated`] first.
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    clock: Arc<dyn Clock>,
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            comments,
            clock,
        }
    }

    /// Posts whose publication time has passed, most recent first.
    pub async fn list_published(&self) -> Result<Vec<Post>, DomainError> {
        let now = self.clock.now();
        Ok(self.posts.find_published(now).await?)
    }

    /// Every unpublished post, oldest first.
    ///
    /// Drafts of all authors are listed, not only the caller's.
    pub async fn list_drafts(
        &self,
        principal: Option<&Principal>,
    ) -> Result<Vec<Post>, DomainError> {
        require_authenticated(principal)?;
        Ok(self.posts.find_drafts().await?)
    }

    pub async fn detail(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::not_found(POST, post_id))
    }

    /// The post plus its comments: all of them for a signed-in viewer, only
    /// approved ones otherwise.
    pub async fn detail_with_comments(
        &self,
        post_id: Uuid,
        principal: Option<&Principal>,
    ) -> Result<PostWithComments, DomainError> {
        let post = self.detail(post_id).await?;
        let comments = match principal {
            Some(_) => self.comments.find_by_post(post_id).await?,
            None => self.approved_comments(post_id).await?,
        };

        Ok(PostWithComments { post, comments })
    }

    pub async fn approved_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.find_approved_by_post(post_id).await?)
    }

    /// Write a new draft authored by the caller.
    pub async fn create_post(
        &self,
        principal: Option<&Principal>,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let principal = require_authenticated(principal)?;
        let draft = draft.validated()?;

        let post = Post::new(principal.user_id, draft.title, draft.text, self.clock.now());
        Ok(self.posts.save(post).await?)
    }

    /// Replace the title and text of an existing post.
    pub async fn update_post(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        require_authenticated(principal)?;
        let mut post = self.detail(post_id).await?;
        let draft = draft.validated()?;

        post.title = draft.title;
        post.text = draft.text;
        self.posts
            .update(post)
            .await
            .map_err(|e| not_found_as(e, POST, post_id))
    }

    /// Delete a post and, with it, all of its comments.
    pub async fn delete_post(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
    ) -> Result<(), DomainError> {
        require_authenticated(principal)?;
        self.posts
            .delete(post_id)
            .await
            .map_err(|e| not_found_as(e, POST, post_id))
    }

    /// Stamp the post as published now. Re-publishing resets the timestamp.
    pub async fn publish(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
    ) -> Result<Post, DomainError> {
        require_authenticated(principal)?;
        let mut post = self.detail(post_id).await?;

        post.publish(self.clock.now());
        self.posts
            .update(post)
            .await
            .map_err(|e| not_found_as(e, POST, post_id))
    }

    /// Attach an unapproved comment to a post.
    ///
    /// The stored author is the submitted name, not the signed-in user.
    pub async fn add_comment(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
        comment: NewComment,
    ) -> Result<Comment, DomainError> {
        require_authenticated(principal)?;
        let post = self.detail(post_id).await?;
        let comment = comment.validated()?;

        let comment = Comment::new(post.id, comment.author, comment.text, self.clock.now());
        Ok(self.comments.save(comment).await?)
    }

    pub async fn approve_comment(
        &self,
        principal: Option<&Principal>,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        require_authenticated(principal)?;
        let mut comment = self.find_comment(comment_id).await?;

        comment.approve();
        self.comments
            .update(comment)
            .await
            .map_err(|e| not_found_as(e, COMMENT, comment_id))
    }

    /// Delete a comment, returning the id of the post it belonged to.
    pub async fn remove_comment(
        &self,
        principal: Option<&Principal>,
        comment_id: Uuid,
    ) -> Result<Uuid, DomainError> {
        require_authenticated(principal)?;
        let comment = self.find_comment(comment_id).await?;
        let post_id = comment.post_id;

        self.comments
            .delete(comment.id)
            .await
            .map_err(|e| not_found_as(e, COMMENT, comment_id))?;
        Ok(post_id)
    }

    async fn find_comment(&self, comment_id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::not_found(COMMENT, comment_id))
    }
}

fn not_found_as(err: RepoError, entity_type: &'static str, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
