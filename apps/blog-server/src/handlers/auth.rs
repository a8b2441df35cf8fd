//! Account handlers: sign up, sign in, sign out.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::DomainError;
use quill_core::domain::Credentials;
use quill_core::ports::{Principal, TokenService};
use quill_shared::dto::{LoginForm, NextQuery, RegisterForm};

use super::views::{form_page, invalid_form, see_other};
use crate::config::AppConfig;
use crate::middleware::auth::{removal_cookie, session_cookie};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Only same-site paths are followed after signing in. Browsers drop control
/// characters and whitespace from a `Location`, so any of them is refused.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(|c| c.is_control() || c.is_whitespace()) =>
        {
            path
        }
        _ => "/",
    }
}

fn signed_in(
    principal: &Principal,
    location: &str,
    token_service: &dyn TokenService,
    config: &AppConfig,
) -> AppResult<HttpResponse> {
    let token = token_service
        .generate_token(principal.user_id, &principal.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cookie = session_cookie(
        token,
        token_service.expiration_seconds(),
        config.secure_cookies,
    );

    let mut response = see_other(location);
    response
        .add_cookie(&cookie)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// GET /accounts/register
pub async fn register_form() -> HttpResponse {
    form_page(RegisterForm::default())
}

/// POST /accounts/register
///
/// Creates the account and signs it in.
pub async fn register(
    state: web::Data<AppState>,
    config: web::Data<AppConfig>,
    token_service: web::Data<Arc<dyn TokenService>>,
    form: web::Form<RegisterForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = Credentials::new(form.username.clone(), form.password.clone());

    match state.accounts.register(credentials).await {
        Ok(user) => {
            let principal = Principal {
                user_id: user.id,
                username: user.username,
            };
            signed_in(&principal, "/", token_service.get_ref().as_ref(), &config)
        }
        Err(DomainError::Validation(errors)) => Ok(invalid_form(form, &errors)),
        Err(e) => Err(e.into()),
    }
}

/// GET /accounts/login
pub async fn login_form(query: web::Query<NextQuery>) -> HttpResponse {
    form_page(LoginForm {
        next: query.into_inner().next,
        ..LoginForm::default()
    })
}

/// POST /accounts/login
pub async fn login(
    state: web::Data<AppState>,
    config: web::Data<AppConfig>,
    token_service: web::Data<Arc<dyn TokenService>>,
    form: web::Form<LoginForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = Credentials::new(form.username.clone(), form.password.clone());

    match state.accounts.authenticate(credentials).await {
        Ok(principal) => {
            tracing::info!(user_id = %principal.user_id, "User signed in");
            let location = safe_next(form.next.as_deref());
            signed_in(&principal, location, token_service.get_ref().as_ref(), &config)
        }
        Err(DomainError::Validation(errors)) => {
            tracing::debug!(username = %form.username, "Sign-in rejected");
            Ok(invalid_form(form, &errors))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /accounts/logout
pub async fn logout() -> AppResult<HttpResponse> {
    let mut response = see_other("/");
    response
        .add_cookie(&removal_cookie())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next_keeps_local_paths() {
        assert_eq!(safe_next(Some("/drafts")), "/drafts");
        assert_eq!(safe_next(Some("/post/1?x=2")), "/post/1?x=2");
    }

    #[test]
    fn test_safe_next_drops_foreign_targets() {
        assert_eq!(safe_next(None), "/");
        assert_eq!(safe_next(Some("https://evil.example")), "/");
        assert_eq!(safe_next(Some("//evil.example")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(Some("/\t/evil.example")), "/");
        assert_eq!(safe_next(Some("/\n/evil.example")), "/");
        assert_eq!(safe_next(Some("/ /evil.example")), "/");
    }
}
