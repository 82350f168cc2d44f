use std::sync::Arc;

use sea_orm::*;

use crate::entity::{project, property, property_block};
use crate::error::AppError;
use crate::models::block::to_render_block;
use crate::models::property::PropertyView;
use crate::state::AppState;
use crate::utils::token::generate_access_token;

/// Load the tenant's property row, creating it on first access.
///
/// The property document does not exist until somebody opens the property
/// editor, so every read path goes through here. Creation requires the
/// project itself to exist; a missing project is a 404, never an implicit
/// create.
pub async fn ensure_property<C: ConnectionTrait>(
    db: &C,
    project_id: &str,
) -> Result<property::Model, AppError> {
    if project::Entity::find_by_id(project_id).one(db).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Project '{project_id}' not found"
        )));
    }

    if let Some(existing) = property::Entity::find_by_id(project_id).one(db).await? {
        return Ok(existing);
    }

    let now = chrono::Utc::now();
    let fresh = property::ActiveModel {
        project_id: Set(project_id.to_string()),
        access_token: Set(generate_access_token()),
        domains: Set(serde_json::json!([])),
        is_public: Set(false),
        is_draft: Set(false),
        fixed_data: Set(None),
        fixed_at: Set(None),
        style: Set(serde_json::to_value(render::PropertyStyle::default())
            .map_err(|e| AppError::Internal(e.to_string()))?),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(fresh.insert(db).await?)
}

/// Assemble the full property document for a tenant, serving from the
/// tag-invalidated cache when possible. Blocks come back in ascending
/// `order`; mutations call `state.cache.invalidate()` to force a rebuild.
pub async fn get_property_view(
    state: &AppState,
    project_id: &str,
) -> Result<Arc<PropertyView>, AppError> {
    if let Some(cached) = state.cache.get(project_id) {
        return Ok(cached);
    }

    let prop = ensure_property(&state.db, project_id).await?;
    let rows = property_block::Entity::find()
        .filter(property_block::Column::ProjectId.eq(project_id))
        .order_by_asc(property_block::Column::Order)
        .all(&state.db)
        .await?;

    let blocks = rows
        .into_iter()
        .map(to_render_block)
        .collect::<Result<Vec<_>, _>>()?;

    let domains = serde_json::from_value(prop.domains).unwrap_or_default();
    let style = serde_json::from_value(prop.style)
        .map_err(|e| AppError::Internal(format!("Corrupt style for '{project_id}': {e}")))?;

    let view = Arc::new(PropertyView {
        access_token: prop.access_token,
        blocks,
        domains,
        fixed_at: prop.fixed_at,
        fixed_data: prop.fixed_data,
        is_draft: prop.is_draft,
        is_public: prop.is_public,
        style,
    });
    state.cache.insert(project_id, Arc::clone(&view));

    Ok(view)
}
