//! Comment submission and moderation.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::NewComment;
use quill_core::service::require_authenticated;
use quill_shared::dto::CommentForm;

use super::views::{form_page, invalid_form, post_url, see_other};
use crate::middleware::auth::Session;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /post/{id}/comment
pub async fn add_comment_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_authenticated(session.principal())?;
    state.blog.detail(path.into_inner()).await?;

    Ok(form_page(CommentForm::default()))
}

/// POST /post/{id}/comment
pub async fn add_comment_to_post(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let form = form.into_inner();
    let comment = NewComment::new(form.author.clone(), form.text.clone());

    match state
        .blog
        .add_comment(session.principal(), post_id, comment)
        .await
    {
        Ok(comment) => {
            tracing::info!(post_id = %post_id, comment_id = %comment.id, "Comment awaiting approval");
            Ok(see_other(post_url(post_id)))
        }
        Err(DomainError::Validation(errors)) => Ok(invalid_form(form, &errors)),
        Err(e) => Err(e.into()),
    }
}

/// POST /comment/{id}/approve
pub async fn comment_approve(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = state
        .blog
        .approve_comment(session.principal(), path.into_inner())
        .await?;

    tracing::info!(comment_id = %comment.id, "Comment approved");
    Ok(see_other(post_url(comment.post_id)))
}

/// POST /comment/{id}/remove
pub async fn comment_remove(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();
    let post_id = state
        .blog
        .remove_comment(session.principal(), comment_id)
        .await?;

    tracing::info!(comment_id = %comment_id, "Comment removed");
    Ok(see_other(post_url(post_id)))
}
