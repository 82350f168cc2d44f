use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::property;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::property::{
    EmbedResponse, PreviewQuery, PropertyView, UpdateSettingsRequest, normalize_domains,
    validate_style,
};
use crate::property::{service, snapshot};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Property",
    operation_id = "getProperty",
    summary = "Get the assembled property document",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Property document", body = PropertyView),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_property(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyView>, AppError> {
    auth_user.require_project(&id)?;
    let view = service::get_property_view(&state, &id).await?;
    Ok(Json(PropertyView::clone(&view)))
}

#[utoipa::path(
    patch,
    path = "/settings",
    tag = "Property",
    operation_id = "updatePropertySettings",
    summary = "Update publication settings",
    params(("id" = String, Path, description = "Project id")),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated property document", body = PropertyView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_settings(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateSettingsRequest>,
) -> Result<Json<PropertyView>, AppError> {
    auth_user.require_project(&id)?;
    let domains = normalize_domains(&payload.domains)?;

    let txn = state.db.begin().await?;
    let existing = service::ensure_property(&txn, &id).await?;
    let mut active: property::ActiveModel = existing.into();
    active.domains = Set(serde_json::json!(domains));
    active.is_draft = Set(payload.is_draft);
    active.is_public = Set(payload.is_public);
    active.updated_at = Set(chrono::Utc::now());
    active.update(&txn).await?;
    txn.commit().await?;

    state.cache.invalidate(&id);
    let view = service::get_property_view(&state, &id).await?;
    Ok(Json(PropertyView::clone(&view)))
}

#[utoipa::path(
    put,
    path = "/style",
    tag = "Property",
    operation_id = "updatePropertyStyle",
    summary = "Replace the property style",
    params(("id" = String, Path, description = "Project id")),
    request_body = render::PropertyStyle,
    responses(
        (status = 200, description = "Updated property document", body = PropertyView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_style(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<render::PropertyStyle>,
) -> Result<Json<PropertyView>, AppError> {
    auth_user.require_project(&id)?;
    let style = validate_style(payload)?;

    let txn = state.db.begin().await?;
    let existing = service::ensure_property(&txn, &id).await?;
    let mut active: property::ActiveModel = existing.into();
    active.style =
        Set(serde_json::to_value(&style).map_err(|e| AppError::Internal(e.to_string()))?);
    active.updated_at = Set(chrono::Utc::now());
    active.update(&txn).await?;
    txn.commit().await?;

    state.cache.invalidate(&id);
    let view = service::get_property_view(&state, &id).await?;
    Ok(Json(PropertyView::clone(&view)))
}

#[utoipa::path(
    get,
    path = "/preview",
    tag = "Property",
    operation_id = "previewProperty",
    summary = "Render the property as HTML",
    description = "Renders the same document the public endpoint serves. With \
        `draft=true` the live block list is rendered; otherwise the selection \
        matches production: the live list while draft mode is off, the frozen \
        snapshot (empty until the first deploy) while it is on.",
    params(
        ("id" = String, Path, description = "Project id"),
        ("device" = Option<render::Device>, Query, description = "Viewport override"),
        ("draft" = Option<bool>, Query, description = "Render live blocks instead of the snapshot"),
    ),
    responses(
        (status = 200, description = "Rendered HTML", content_type = "text/html"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn preview(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    auth_user.require_project(&id)?;
    let view = service::get_property_view(&state, &id).await?;

    // Same selection rule as the public endpoint: the snapshot is only
    // servable while draft mode is on and the draft flag is absent.
    let blocks = if query.draft || !view.is_draft {
        view.blocks.clone()
    } else {
        match view.fixed_data.as_deref() {
            Some(data) => snapshot::parse_snapshot(data)?,
            None => vec![],
        }
    };

    Ok(Html(render::render_document(
        &blocks,
        &view.style,
        query.device,
    )))
}

#[utoipa::path(
    get,
    path = "/embed",
    tag = "Property",
    operation_id = "getEmbedSnippets",
    summary = "Embed snippets for the public endpoint",
    params(("id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Embed snippets", body = EmbedResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn embed(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EmbedResponse>, AppError> {
    auth_user.require_project(&id)?;
    let view = service::get_property_view(&state, &id).await?;

    let endpoint = format!("{}/{id}/property", state.config.server.public_url);
    let production = embed_snippet(&endpoint, &view.access_token, false);
    let draft = view
        .is_draft
        .then(|| embed_snippet(&endpoint, &view.access_token, true));

    Ok(Json(EmbedResponse {
        endpoint,
        production,
        draft,
    }))
}

/// Copy-paste snippet that injects the rendered document into the host page.
/// The `#novo` div is the markup contract the style sheet targets.
fn embed_snippet(endpoint: &str, access_token: &str, draft: bool) -> String {
    let url = if draft {
        format!("{endpoint}?draft")
    } else {
        endpoint.to_string()
    };
    format!(
        "<div id=\"novo\"></div>\n\
         <script>\n\
         fetch(\"{url}\", {{ headers: {{ Authorization: \"Bearer {access_token}\" }} }})\n\
         \u{20} .then((res) => res.text())\n\
         \u{20} .then((html) => {{ document.getElementById(\"novo\").innerHTML = html; }});\n\
         </script>"
    )
}
