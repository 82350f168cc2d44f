use std::collections::HashSet;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::property_block;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::block::{
    BlockResponse, ReorderBlocksRequest, SaveBlockRequest, validate_save_block,
};
use crate::models::shared::validate_reorder_ids;
use crate::property::service;
use crate::state::AppState;

async fn find_block<C: ConnectionTrait>(
    db: &C,
    project_id: &str,
    block_id: &str,
) -> Result<property_block::Model, AppError> {
    property_block::Entity::find_by_id(block_id)
        .filter(property_block::Column::ProjectId.eq(project_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Block '{block_id}' not found")))
}

/// Compute the append position for a new block.
async fn next_order<C: ConnectionTrait>(db: &C, project_id: &str) -> Result<i32, AppError> {
    let max_order: Option<i32> = property_block::Entity::find()
        .filter(property_block::Column::ProjectId.eq(project_id))
        .select_only()
        .column_as(property_block::Column::Order.max(), "max_order")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    max_order
        .unwrap_or(-1)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Order overflow".into()))
}

fn table_data_json(
    data: Option<render::PropertyBlockTableData>,
) -> Result<Option<serde_json::Value>, AppError> {
    data.map(|d| serde_json::to_value(d).map_err(|e| AppError::Internal(e.to_string())))
        .transpose()
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Blocks",
    operation_id = "listBlocks",
    summary = "List blocks in render order",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Blocks in ascending order", body = Vec<BlockResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_blocks(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<BlockResponse>>, AppError> {
    auth_user.require_project(&id)?;
    service::ensure_property(&state.db, &id).await?;

    let rows = property_block::Entity::find()
        .filter(property_block::Column::ProjectId.eq(&id))
        .order_by_asc(property_block::Column::Order)
        .all(&state.db)
        .await?;

    let blocks = rows
        .into_iter()
        .map(BlockResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(blocks))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Blocks",
    operation_id = "createBlock",
    summary = "Create a content block",
    description = "A request without `order` appends the block after the current \
        highest position.",
    params(("id" = String, Path, description = "Project id")),
    request_body = SaveBlockRequest,
    responses(
        (status = 201, description = "Block created", body = BlockResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn create_block(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(mut payload): AppJson<SaveBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_project(&id)?;
    validate_save_block(&mut payload)?;

    let txn = state.db.begin().await?;
    service::ensure_property(&txn, &id).await?;

    let order = match payload.order {
        Some(order) => order,
        None => next_order(&txn, &id).await?,
    };

    let now = chrono::Utc::now();
    let new_block = property_block::ActiveModel {
        id: Set(Uuid::new_v4().simple().to_string()),
        project_id: Set(id.clone()),
        block_type: Set(payload.block_type.as_str().to_string()),
        order: Set(order),
        is_public: Set(payload.is_public),
        contents: Set(payload.contents),
        data: Set(table_data_json(payload.data)?),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_block.insert(&txn).await?;
    txn.commit().await?;
    state.cache.invalidate(&id);

    Ok((StatusCode::CREATED, Json(BlockResponse::try_from(model)?)))
}

#[utoipa::path(
    get,
    path = "/{block_id}",
    tag = "Blocks",
    operation_id = "getBlock",
    summary = "Get a single block",
    params(
        ("id" = String, Path, description = "Project id"),
        ("block_id" = String, Path, description = "Block id"),
    ),
    responses(
        (status = 200, description = "Block", body = BlockResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Block not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_block(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, block_id)): Path<(String, String)>,
) -> Result<Json<BlockResponse>, AppError> {
    auth_user.require_project(&id)?;
    let model = find_block(&state.db, &id, &block_id).await?;
    Ok(Json(BlockResponse::try_from(model)?))
}

#[utoipa::path(
    put,
    path = "/{block_id}",
    tag = "Blocks",
    operation_id = "updateBlock",
    summary = "Overwrite a content block",
    params(
        ("id" = String, Path, description = "Project id"),
        ("block_id" = String, Path, description = "Block id"),
    ),
    request_body = SaveBlockRequest,
    responses(
        (status = 200, description = "Updated block", body = BlockResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Block not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_block(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, block_id)): Path<(String, String)>,
    AppJson(mut payload): AppJson<SaveBlockRequest>,
) -> Result<Json<BlockResponse>, AppError> {
    auth_user.require_project(&id)?;
    validate_save_block(&mut payload)?;

    let txn = state.db.begin().await?;
    let existing = find_block(&txn, &id, &block_id).await?;

    let mut active: property_block::ActiveModel = existing.into();
    active.block_type = Set(payload.block_type.as_str().to_string());
    if let Some(order) = payload.order {
        active.order = Set(order);
    }
    active.is_public = Set(payload.is_public);
    active.contents = Set(payload.contents);
    active.data = Set(table_data_json(payload.data)?);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;
    state.cache.invalidate(&id);

    Ok(Json(BlockResponse::try_from(model)?))
}

#[utoipa::path(
    delete,
    path = "/{block_id}",
    tag = "Blocks",
    operation_id = "deleteBlock",
    summary = "Delete a content block",
    description = "Remaining blocks keep their positions; gaps in the order \
        sequence are expected and harmless.",
    params(
        ("id" = String, Path, description = "Project id"),
        ("block_id" = String, Path, description = "Block id"),
    ),
    responses(
        (status = 204, description = "Block deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Block not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_block(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((id, block_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_project(&id)?;

    let existing = find_block(&state.db, &id, &block_id).await?;
    property_block::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    state.cache.invalidate(&id);

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/reorder",
    tag = "Blocks",
    operation_id = "reorderBlocks",
    summary = "Reorder all blocks at once",
    description = "`blockIds` must contain exactly the tenant's current block \
        ids; positions are reassigned 0..n by array index.",
    params(("id" = String, Path, description = "Project id")),
    request_body = ReorderBlocksRequest,
    responses(
        (status = 204, description = "Blocks reordered"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn reorder_blocks(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ReorderBlocksRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_project(&id)?;
    validate_reorder_ids(&payload.block_ids, "block id")?;

    let txn = state.db.begin().await?;
    service::ensure_property(&txn, &id).await?;

    let existing: Vec<String> = property_block::Entity::find()
        .filter(property_block::Column::ProjectId.eq(&id))
        .select_only()
        .column(property_block::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;

    let existing_set: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let payload_set: HashSet<&str> = payload.block_ids.iter().map(String::as_str).collect();
    if existing_set != payload_set {
        return Err(AppError::Validation(
            "blockIds must contain exactly the blocks currently in the property".into(),
        ));
    }

    for (i, block_id) in payload.block_ids.iter().enumerate() {
        property_block::Entity::update_many()
            .filter(property_block::Column::Id.eq(block_id))
            .col_expr(
                property_block::Column::Order,
                Expr::value(i32::try_from(i).map_err(|_| {
                    AppError::Validation("Too many blocks to reorder".into())
                })?),
            )
            .col_expr(
                property_block::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;
    state.cache.invalidate(&id);

    Ok(StatusCode::NO_CONTENT)
}
