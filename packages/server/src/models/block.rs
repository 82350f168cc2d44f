use chrono::{DateTime, Utc};
use render::{BlockType, PropertyBlock, PropertyBlockTableData};
use serde::{Deserialize, Serialize};

use crate::entity::property_block;
use crate::error::AppError;

/// Payload for creating or overwriting a block. A create without `order`
/// appends the block at the end of the list.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveBlockRequest {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub order: Option<i32>,
    pub is_public: bool,
    pub contents: Option<String>,
    pub data: Option<PropertyBlockTableData>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderBlocksRequest {
    /// Ordered block ids. Positions assigned 0, 1, 2, ... by array index.
    pub block_ids: Vec<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub order: i32,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PropertyBlockTableData>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<property_block::Model> for BlockResponse {
    type Error = AppError;

    fn try_from(m: property_block::Model) -> Result<Self, AppError> {
        let data = m
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| AppError::Internal(format!("Corrupt block data: {e}")))?;
        Ok(Self {
            id: m.id,
            block_type: m.block_type,
            order: m.order,
            is_public: m.is_public,
            contents: m.contents,
            data,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

/// Convert a stored block row into the render-crate value type.
pub fn to_render_block(m: property_block::Model) -> Result<PropertyBlock, AppError> {
    let block_type: BlockType = m
        .block_type
        .parse()
        .map_err(|e: String| AppError::Internal(format!("Corrupt block row '{}': {e}", m.id)))?;
    let data = m
        .data
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| AppError::Internal(format!("Corrupt block data '{}': {e}", m.id)))?;
    Ok(PropertyBlock {
        id: m.id,
        block_type,
        order: m.order,
        is_public: m.is_public,
        contents: m.contents,
        data,
    })
}

/// Validate a block payload and prune its table rows in place.
///
/// Table rows after the first that have an empty label and an empty value
/// are dropped; the first row always survives so the editor keeps one
/// editable line.
pub fn validate_save_block(req: &mut SaveBlockRequest) -> Result<(), AppError> {
    if let Some(order) = req.order
        && order < 0
    {
        return Err(AppError::Validation("Order must be >= 0".into()));
    }

    if let Some(ref contents) = req.contents
        && contents.len() > 100_000
    {
        return Err(AppError::Validation(
            "Contents must be at most 100000 bytes".into(),
        ));
    }

    if req.block_type == BlockType::Table {
        let Some(data) = req.data.as_mut() else {
            return Err(AppError::Validation(
                "Table blocks require table data".into(),
            ));
        };
        if data.table.is_empty() {
            return Err(AppError::Validation(
                "Table must have at least one row".into(),
            ));
        }
        let mut index = 0usize;
        data.table.retain(|row| {
            let keep = index == 0
                || !(row.label.is_empty() && row.value.as_deref().unwrap_or("").is_empty());
            index += 1;
            keep
        });
        for row in &data.table {
            if row.label.chars().count() > 256
                || row.value.as_deref().is_some_and(|v| v.chars().count() > 1024)
            {
                return Err(AppError::Validation(
                    "Table rows are limited to 256/1024 characters".into(),
                ));
            }
        }
    }

    Ok(())
}
