use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::property;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::property::{DeployRequest, DeployResponse};
use crate::property::{service, snapshot};
use crate::state::AppState;

/// Freeze a block snapshot as the production document.
///
/// The client sends the block array it is currently showing, serialized to
/// JSON, and that exact payload becomes `fixed_data`. Deploy only makes
/// sense while draft mode is on: the check is repeated here under the
/// transaction because the editor's view of `isDraft` may be stale.
#[utoipa::path(
    post,
    path = "/deploy",
    tag = "Property",
    operation_id = "deployProperty",
    summary = "Freeze the draft as the production snapshot",
    params(("id" = String, Path, description = "Project id")),
    request_body = DeployRequest,
    responses(
        (status = 200, description = "Snapshot frozen", body = DeployResponse),
        (status = 400, description = "Snapshot rejected (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Draft mode is off (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn deploy(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<DeployRequest>,
) -> Result<Json<DeployResponse>, AppError> {
    auth_user.require_project(&id)?;
    snapshot::parse_snapshot(&payload.data)?;

    let txn = state.db.begin().await?;
    let existing = service::ensure_property(&txn, &id).await?;
    if !existing.is_draft {
        return Err(AppError::Conflict(
            "Deploy requires draft mode to be enabled".into(),
        ));
    }

    let fixed_at = chrono::Utc::now();
    let mut active: property::ActiveModel = existing.into();
    active.fixed_data = Set(Some(payload.data));
    active.fixed_at = Set(Some(fixed_at));
    active.updated_at = Set(fixed_at);
    active.update(&txn).await?;
    txn.commit().await?;

    state.cache.invalidate(&id);

    Ok(Json(DeployResponse { fixed_at }))
}
