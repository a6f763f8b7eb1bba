//! Session endpoints
//!
//! `/api/auth/login`, `callback`, `logout`, `me` and `token`. The browser
//! holds only an opaque session cookie; the provider's tokens stay here.

use axum::extract::{Query, State};
use axum::response::{Json, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::provider::LoginOptions;
use super::session::{Session, UserProfile};
use crate::domain::DomainError;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const SESSION_COOKIE: &str = "portal_session";

/// Where the browser lands after a completed login.
const AFTER_LOGIN: &str = "/dashboard";

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub access_token: String,
}

fn session_cookie(id: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

async fn current_session(state: &AppState, jar: &CookieJar) -> Option<Session> {
    let id = jar.get(SESSION_COOKIE)?.value().to_string();
    state.sessions.get(&id).await
}

fn not_authenticated() -> ApiError {
    ApiError::Unauthorized("Not authenticated".to_string())
}

pub async fn login(State(state): State<AppState>, Query(options): Query<LoginOptions>) -> Redirect {
    let csrf = state.sessions.begin_login().await;
    Redirect::to(&state.identity.authorize_url(&csrf, &options))
}

pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> ApiResult<(CookieJar, Redirect)> {
    if let Some(error) = query.error {
        warn!(%error, "identity provider returned an error");
        return Err(ApiError::Unauthorized(query.error_description.unwrap_or(error)));
    }

    let csrf = query.state.unwrap_or_default();
    if !state.sessions.finish_login(&csrf).await {
        return Err(DomainError::InvalidInput("Invalid or expired login state".to_string()).into());
    }
    let code = query
        .code
        .ok_or_else(|| DomainError::InvalidInput("Missing authorization code".to_string()))?;

    let tokens = state.identity.exchange_code(&code).await?;
    let user = state.identity.user_info(&tokens.access_token).await?;
    let session = state.sessions.create(user, tokens.access_token, tokens.id_token).await;
    info!(sub = %session.user.sub, "login completed");

    let secure = state.config.public_url.starts_with("https://");
    Ok((jar.add(session_cookie(session.id, secure)), Redirect::to(AFTER_LOGIN)))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to(&state.identity.logout_url(&state.config.public_url)))
}

pub async fn me(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Json<UserProfile>> {
    let session = current_session(&state, &jar).await.ok_or_else(not_authenticated)?;
    Ok(Json(session.user))
}

pub async fn token(State(state): State<AppState>, jar: CookieJar) -> ApiResult<Json<AccessToken>> {
    let session = current_session(&state, &jar).await.ok_or_else(not_authenticated)?;
    Ok(Json(AccessToken { access_token: session.access_token }))
}
