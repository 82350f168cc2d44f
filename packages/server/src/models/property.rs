use chrono::{DateTime, Utc};
use render::{Device, PropertyBlock, PropertyStyle};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AppError;
use crate::models::shared::normalize_color;

/// Fully assembled property document: the aggregate served to the admin UI
/// and cached per tenant. Blocks are always in ascending `order`.
#[derive(Clone, Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyView {
    pub access_token: String,
    pub blocks: Vec<PropertyBlock>,
    pub domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_data: Option<String>,
    pub is_draft: bool,
    pub is_public: bool,
    pub style: PropertyStyle,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// Exact-match origin allow-list for the public endpoint.
    pub domains: Vec<String>,
    pub is_draft: bool,
    pub is_public: bool,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeployRequest {
    /// JSON-serialized block array to freeze as the production snapshot.
    pub data: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeployResponse {
    pub fixed_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PreviewQuery {
    pub device: Option<Device>,
    #[serde(default)]
    pub draft: bool,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmbedResponse {
    /// Public endpoint URL for this tenant.
    pub endpoint: String,
    /// Snippet for the production site.
    pub production: String,
    /// Snippet for the staging site; present only when draft mode is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<String>,
}

/// Validate and normalize the domain allow-list: entries are trimmed,
/// lowercased and must parse as absolute http(s) URLs.
pub fn normalize_domains(domains: &[String]) -> Result<Vec<String>, AppError> {
    let mut normalized = Vec::with_capacity(domains.len());
    for raw in domains {
        let domain = raw.trim().to_lowercase();
        let url = Url::parse(&domain)
            .map_err(|_| AppError::Validation(format!("Invalid URL '{raw}'")))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(AppError::Validation(format!(
                "Domain '{raw}' must be an absolute http(s) URL"
            )));
        }
        normalized.push(domain);
    }
    Ok(normalized)
}

/// Validate a style payload, normalizing all colors to a leading `#`.
pub fn validate_style(mut style: PropertyStyle) -> Result<PropertyStyle, AppError> {
    style.caption.color = normalize_color(&style.caption.color)?;
    style.notice.color = normalize_color(&style.notice.color)?;
    style.separator.color = normalize_color(&style.separator.color)?;
    style.table.color = normalize_color(&style.table.color)?;

    for (name, size) in [
        ("caption", style.caption.font_size),
        ("notice", style.notice.font_size),
        ("table", style.table.font_size),
    ] {
        if !(10..=32).contains(&size) {
            return Err(AppError::Validation(format!(
                "{name} font size must be 10-32"
            )));
        }
    }
    if !(1..=10).contains(&style.separator.weight) {
        return Err(AppError::Validation(
            "Separator weight must be 1-10".into(),
        ));
    }

    Ok(style)
}
