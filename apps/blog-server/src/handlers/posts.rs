//! Post pages: the published list, drafts, detail, and the write operations.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::PostDraft;
use quill_core::service::require_authenticated;
use quill_shared::dto::{PostForm, PostView};

use super::views::{detail_view, form_page, invalid_form, post_url, post_view, see_other};
use crate::middleware::auth::Session;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /
pub async fn post_list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts: Vec<PostView> = state
        .blog
        .list_published()
        .await?
        .into_iter()
        .map(post_view)
        .collect();

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /drafts
pub async fn post_draft_list(
    state: web::Data<AppState>,
    session: Session,
) -> AppResult<HttpResponse> {
    let drafts: Vec<PostView> = state
        .blog
        .list_drafts(session.principal())
        .await?
        .into_iter()
        .map(post_view)
        .collect();

    Ok(HttpResponse::Ok().json(drafts))
}

/// GET /post/{id}
pub async fn post_detail(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state
        .blog
        .detail_with_comments(path.into_inner(), session.principal())
        .await?;

    Ok(HttpResponse::Ok().json(detail_view(detail)))
}

/// GET /post/new
pub async fn post_new_form(session: Session) -> AppResult<HttpResponse> {
    require_authenticated(session.principal())?;
    Ok(form_page(PostForm::default()))
}

/// POST /post/new
pub async fn post_new(
    state: web::Data<AppState>,
    session: Session,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let draft = PostDraft::new(form.title.clone(), form.text.clone());

    match state.blog.create_post(session.principal(), draft).await {
        Ok(post) => {
            tracing::info!(post_id = %post.id, "Post created");
            Ok(see_other(post_url(post.id)))
        }
        Err(DomainError::Validation(errors)) => Ok(invalid_form(form, &errors)),
        Err(e) => Err(e.into()),
    }
}

/// GET /post/{id}/edit
pub async fn post_edit_form(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    require_authenticated(session.principal())?;
    let post = state.blog.detail(path.into_inner()).await?;

    Ok(form_page(PostForm {
        title: post.title,
        text: post.text,
    }))
}

/// POST /post/{id}/edit
pub async fn post_edit(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let draft = PostDraft::new(form.title.clone(), form.text.clone());

    match state
        .blog
        .update_post(session.principal(), path.into_inner(), draft)
        .await
    {
        Ok(post) => Ok(see_other(post_url(post.id))),
        Err(DomainError::Validation(errors)) => Ok(invalid_form(form, &errors)),
        Err(e) => Err(e.into()),
    }
}

/// POST /post/{id}/remove
pub async fn post_remove(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state.blog.delete_post(session.principal(), post_id).await?;

    tracing::info!(post_id = %post_id, "Post removed");
    Ok(see_other("/"))
}

/// POST /post/{id}/publish
pub async fn post_publish(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .publish(session.principal(), path.into_inner())
        .await?;

    tracing::info!(post_id = %post.id, "Post published");
    Ok(see_other(post_url(post.id)))
}

#[derive(Serialize)]
struct AboutView {
    title: &'static str,
    text: &'static str,
}

/// GET /about
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(AboutView {
        title: "About",
        text: "Quill is a small blog: posts start as drafts, get published, and collect moderated comments.",
    })
}
