//! Registration and login handlers.
//!
//! Passwords are never recorded on spans or in log events.

use axum::{extract::State, http::StatusCode};
use minimart_core::{Credentials, Registration, User};
use tracing::instrument;

use crate::error::{Result, set_sentry_user};
use crate::extract::AppJson;
use crate::state::AppState;

/// Register a new user.
///
/// Responds `201 Created` with the stored user, including its assigned ID.
#[instrument(skip_all, fields(username = %registration.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(registration): AppJson<Registration>,
) -> Result<(StatusCode, AppJson<User>)> {
    let user = state.store().register_user(registration)?;
    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, AppJson(user)))
}

/// Log in with a username and password.
///
/// Responds `200 OK` with the stored user.
#[instrument(skip_all, fields(username = %credentials.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(credentials): AppJson<Credentials>,
) -> Result<AppJson<User>> {
    let user = state.store().authenticate(&credentials)?;
    set_sentry_user(&user.id, user.username.as_str());
    tracing::info!(user_id = %user.id, "User logged in");
    Ok(AppJson(user))
}
