//! Authentication route handlers.
//!
//! Mock credential flow: register/login return the session user plus a
//! base64 claims token, mirroring what a real token issuer would hand
//! back. The session cookie is what actually authenticates requests.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Register / login payload.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful auth response: the user and their token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUser,
    pub token: String,
}

/// `POST /auth/register` - create an account and log in.
#[instrument(skip(state, session, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Credentials>,
) -> Result<impl IntoResponse> {
    let outcome = AuthService::new(state.store()).register(&payload.email, &payload.password)?;

    set_current_user(&session, &outcome.user, &outcome.token).await?;
    tracing::info!(user_id = %outcome.user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: outcome.user,
            token: outcome.token,
        }),
    ))
}

/// `POST /auth/login` - log in with email and password.
#[instrument(skip(state, session, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<Credentials>,
) -> Result<Json<AuthResponse>> {
    let outcome = AuthService::new(state.store()).login(&payload.email, &payload.password)?;

    set_current_user(&session, &outcome.user, &outcome.token).await?;
    tracing::info!(user_id = %outcome.user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: outcome.user,
        token: outcome.token,
    }))
}

/// `POST /auth/logout` - clear the user and token from the session.
///
/// The cart survives logout.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me` - the logged-in user.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<CurrentUser> {
    Json(user)
}
