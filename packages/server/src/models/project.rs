use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_name;

/// Hard cap on the number of tenant projects (original system limit).
pub const MAX_PROJECTS: u64 = 1000;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Tenant slug, becomes the project's immutable id.
    pub username: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
    pub avatar: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::project::Model> for ProjectResponse {
    fn from(m: crate::entity::project::Model) -> Self {
        let tags = serde_json::from_value(m.tags).unwrap_or_default();
        Self {
            id: m.id,
            name: m.name,
            avatar: m.avatar,
            tags,
            is_public: m.is_public,
            created_at: m.created_at,
        }
    }
}

/// Validate a tenant slug: 1-32 chars, lowercase ASCII letters, digits,
/// `-` or `_`. Used in URLs and as the document key, so kept strict.
pub fn validate_username(username: &str) -> Result<(), AppError> {
    let ok = !username.is_empty()
        && username.len() <= 32
        && username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !ok {
        return Err(AppError::Validation(
            "Username must be 1-32 lowercase letters, digits, '-' or '_'".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_project(req: &CreateProjectRequest) -> Result<(), AppError> {
    validate_username(&req.username)?;
    validate_name(&req.name)?;
    if req.password.chars().count() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    validate_tags(&req.tags)?;
    Ok(())
}

pub fn validate_update_project(req: &UpdateProjectRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    if let Some(ref tags) = req.tags {
        validate_tags(tags)?;
    }
    if let Some(ref avatar) = req.avatar
        && avatar.len() > 2048
    {
        return Err(AppError::Validation(
            "Avatar URL must be at most 2048 characters".into(),
        ));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), AppError> {
    if tags.len() > 20 {
        return Err(AppError::Validation("At most 20 tags are allowed".into()));
    }
    if tags.iter().any(|t| t.trim().is_empty() || t.chars().count() > 64) {
        return Err(AppError::Validation(
            "Tags must be 1-64 characters each".into(),
        ));
    }
    Ok(())
}
