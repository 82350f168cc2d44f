use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-tenant property overview document. One row per project, lazily
/// created on first read.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub project_id: String,

    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: HasOne<super::project::Entity>,

    /// Opaque bearer token for the public endpoint. Generated once,
    /// immutable thereafter.
    pub access_token: String,
    pub domains: Json, // array of allowed origins
    pub is_public: bool,
    pub is_draft: bool,

    /// Frozen production snapshot: JSON array of serialized blocks.
    /// Written only by deploy, always together with `fixed_at`.
    #[sea_orm(column_type = "Text", nullable)]
    pub fixed_data: Option<String>,
    pub fixed_at: Option<DateTimeUtc>,

    pub style: Json, // PropertyStyle

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
