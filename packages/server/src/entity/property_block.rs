use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "property_block")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // UUID, simple format

    pub project_id: String,
    #[sea_orm(belongs_to, from = "project_id", to = "id")]
    pub project: HasOne<super::project::Entity>,

    /// caption | notice | separator | table | custom
    pub block_type: String,

    /// Render position. Ascending defines render order; gaps are fine and
    /// deletes never renumber.
    pub order: i32,
    pub is_public: bool,

    #[sea_orm(column_type = "Text", nullable)]
    pub contents: Option<String>,

    /// Table payload (PropertyBlockTableData), only for `table` blocks.
    pub data: Option<Json>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
