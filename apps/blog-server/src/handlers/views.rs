//! Conversions from domain types to view models, and the shared responses.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;
use uuid::Uuid;

use quill_core::domain::{Comment, Post};
use quill_core::error::FieldErrors;
use quill_core::service::PostWithComments;
use quill_shared::dto::{CommentView, PostDetailView, PostView};
use quill_shared::{FieldMessage, FormResponse};

pub fn post_view(post: Post) -> PostView {
    PostView {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        text: post.text,
        created_date: post.created_date,
        published_date: post.published_date,
    }
}

pub fn comment_view(comment: Comment) -> CommentView {
    CommentView {
        id: comment.id,
        post_id: comment.post_id,
        author: comment.author,
        text: comment.text,
        create_date: comment.create_date,
        approved: comment.approved,
    }
}

pub fn detail_view(detail: PostWithComments) -> PostDetailView {
    PostDetailView {
        post: post_view(detail.post),
        comments: detail.comments.into_iter().map(comment_view).collect(),
    }
}

pub fn post_url(id: Uuid) -> String {
    format!("/post/{id}")
}

/// `303 See Other` to `location`, the answer to every successful form post.
pub fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// The submitted form handed back with its field errors.
pub fn invalid_form<F: Serialize>(form: F, errors: &FieldErrors) -> HttpResponse {
    let errors = errors
        .iter()
        .map(|e| FieldMessage {
            field: e.field.to_string(),
            message: e.message.clone(),
        })
        .collect();

    HttpResponse::UnprocessableEntity().json(FormResponse::invalid(form, errors))
}

/// A blank or pre-filled form, before anything was submitted.
pub fn form_page<F: Serialize>(form: F) -> HttpResponse {
    HttpResponse::Ok().json(FormResponse::blank(form))
}
