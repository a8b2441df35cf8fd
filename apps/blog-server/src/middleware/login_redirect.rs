//! Turns 401 responses into a redirect to the login page.

use actix_web::{
    HttpMessage, HttpResponse,
    dev::ServiceResponse,
    http::header,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web,
};

use crate::config::{AppConfig, DEFAULT_LOGIN_URL};
use crate::observability::RequestId;

/// Error handlers that send anonymous visitors of gated pages to the login
/// page with the requested path in `next`.
pub fn login_redirect<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(actix_web::http::StatusCode::UNAUTHORIZED, redirect_to_login)
}

fn redirect_to_login<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let login_url = res
        .request()
        .app_data::<web::Data<AppConfig>>()
        .map(|config| config.login_url.clone())
        .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());
    let next = res
        .request()
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| res.request().path().to_string());
    let location = format!("{}?next={}", login_url, urlencoding::encode(&next));

    let request_id = res
        .request()
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    tracing::debug!(next = %next, request_id = %request_id, "Redirecting anonymous visitor to login");

    let (req, _) = res.into_parts();
    let response = HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish();

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
