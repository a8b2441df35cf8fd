//! Session extractor.

use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    http::header,
    web,
};
use std::future::{Ready, ready};
use std::sync::Arc;

use quill_core::ports::{AuthError, Principal, TokenService};

use super::error::AppError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// The visitor's session: the signed-in user, or `None` for anonymous visitors.
///
/// Missing, expired and forged tokens all read as anonymous; gated operations
/// then fail with `Unauthenticated` and the visitor is sent to the login page.
#[derive(Debug, Clone, Default)]
pub struct Session(pub Option<Principal>);

impl Session {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(token_service) = req.app_data::<web::Data<Arc<dyn TokenService>>>() else {
            tracing::error!("TokenService not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let Some(token) = session_token(req) else {
            return ready(Ok(Session(None)));
        };

        match token_service.validate_token(&token) {
            Ok(claims) => ready(Ok(Session(Some(Principal::from(claims))))),
            Err(AuthError::TokenExpired) => {
                tracing::debug!("Session token expired");
                ready(Ok(Session(None)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected session token");
                ready(Ok(Session(None)))
            }
        }
    }
}

/// HTTP-only cookie holding a freshly issued session token.
pub fn session_cookie(token: String, max_age_seconds: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

/// Cookie that makes the browser drop the session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}
