use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::project;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, MeResponse, validate_login_request};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Handle admin and project-owner login.
///
/// The configured admin credentials are checked first; any other username is
/// looked up as a project id and verified against the project's password
/// hash. Both failure modes collapse into the same 401 so the endpoint does
/// not leak which project ids exist.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as administrator or project owner",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();
    let auth = &state.config.auth;

    if username == auth.admin_username {
        if payload.password != auth.admin_password {
            return Err(AppError::InvalidCredentials);
        }
        let token = jwt::sign(username, "admin", &auth.jwt_secret)
            .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;
        return Ok(Json(LoginResponse {
            token,
            username: username.to_string(),
            role: "admin".into(),
        }));
    }

    let proj = project::Entity::find_by_id(username)
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &proj.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(&proj.id, "owner", &auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        username: proj.id,
        role: "owner".into(),
    }))
}

/// Return the current session's identity.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current session identity",
    responses(
        (status = 200, description = "Session info", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(auth_user), fields(username = %auth_user.username))]
pub async fn me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: auth_user.username,
        role: auth_user.role,
    })
}
