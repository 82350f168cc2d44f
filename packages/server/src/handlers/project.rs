use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{project, property, property_block};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::project::{
    CreateProjectRequest, MAX_PROJECTS, ProjectResponse, UpdateProjectRequest,
    validate_create_project, validate_update_project,
};
use crate::state::AppState;
use crate::utils::hash;

async fn find_project<C: ConnectionTrait>(db: &C, id: &str) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{id}' not found")))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List all projects",
    responses(
        (status = 200, description = "All projects", body = Vec<ProjectResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_projects(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    auth_user.require_admin()?;

    let projects = project::Entity::find()
        .order_by_asc(project::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(projects.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a new tenant project",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Username already taken (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(username = %payload.username))]
pub async fn create_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;
    validate_create_project(&payload)?;

    // Slugs that collide with routes or the admin session are never valid
    // tenant ids.
    if payload.username == "login" || payload.username == state.config.auth.admin_username {
        return Err(AppError::Validation(format!(
            "Username '{}' is reserved",
            payload.username
        )));
    }

    let total = project::Entity::find().count(&state.db).await?;
    if total >= MAX_PROJECTS {
        return Err(AppError::Conflict(format!(
            "Project limit of {MAX_PROJECTS} reached"
        )));
    }

    let password = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    let new_project = project::ActiveModel {
        id: Set(payload.username.clone()),
        name: Set(payload.name.trim().to_string()),
        password: Set(password),
        avatar: Set(String::new()),
        tags: Set(serde_json::json!(payload.tags)),
        is_public: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_project.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(format!("Project '{}' already exists", payload.username))
        }
        _ => AppError::from(e),
    })?;

    Ok((StatusCode::CREATED, Json(ProjectResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    auth_user.require_project(&id)?;
    let model = find_project(&state.db, &id).await?;
    Ok(Json(ProjectResponse::from(model)))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Update project profile fields",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Updated project", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    auth_user.require_project(&id)?;
    validate_update_project(&payload)?;

    let txn = state.db.begin().await?;
    let existing = find_project(&txn, &id).await?;
    let mut active: project::ActiveModel = existing.into();

    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(tags) = payload.tags {
        active.tags = Set(serde_json::json!(tags));
    }
    if let Some(is_public) = payload.is_public {
        active.is_public = Set(is_public);
    }
    if let Some(avatar) = payload.avatar {
        active.avatar = Set(avatar);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(ProjectResponse::from(model)))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project and everything it owns",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_project(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_admin()?;

    let txn = state.db.begin().await?;
    find_project(&txn, &id).await?;

    property_block::Entity::delete_many()
        .filter(property_block::Column::ProjectId.eq(&id))
        .exec(&txn)
        .await?;
    property::Entity::delete_many()
        .filter(property::Column::ProjectId.eq(&id))
        .exec(&txn)
        .await?;
    project::Entity::delete_by_id(&id).exec(&txn).await?;

    txn.commit().await?;
    state.cache.invalidate(&id);

    Ok(StatusCode::NO_CONTENT)
}
