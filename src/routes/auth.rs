use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::auth::{self, token};
use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/profile", get(profile))
        .route("/logout", post(logout))
}

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// -- Cookie helpers --

fn auth_cookie(name: &str, token: &str, max_age_hours: u64) -> String {
    let max_age_secs = max_age_hours * 3600;
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, token, max_age_secs
    )
}

fn clear_auth_cookie(name: &str) -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", name)
}

// -- Handlers --

/// POST /register — create a user with a bcrypt-hashed password.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Response> {
    let name = req.name.trim();
    let email = req.email.trim();
    if name.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Name, email and password are required".into(),
        ));
    }

    let hash = auth::hash_password(&req.password)?;
    let user = users::create_user(&state.db, name, email, &hash)?;

    Ok(Json(user.profile()).into_response())
}

/// POST /login — verify credentials and set the token cookie.
/// Unknown email is 404, wrong password 401.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = users::find_by_email(&state.db, req.email.trim())?.ok_or(AppError::NotFound)?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::Unauthorized);
    }

    let token = token::issue(
        &user.id,
        &user.email,
        &state.config.auth.token_secret,
        state.config.auth.token_hours,
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

    let cookie = auth_cookie(
        &state.config.auth.cookie_name,
        &token,
        state.config.auth.token_hours,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(user.profile()),
    )
        .into_response())
}

/// GET /profile — identity behind the cookie, re-read from the store.
pub async fn profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> AppResult<Response> {
    let user = users::find_by_id(&state.db, &current.id)?.ok_or(AppError::NotFound)?;
    Ok(Json(user.profile()).into_response())
}

/// POST /logout — clear the cookie. The token itself stays valid until it
/// expires; there is no server-side revocation.
pub async fn logout(State(state): State<AppState>, _current: CurrentUser) -> AppResult<Response> {
    let cookie = clear_auth_cookie(&state.config.auth.cookie_name);
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(true)).into_response())
}
