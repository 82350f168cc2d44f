use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    /// URL-safe tenant slug. Immutable once created.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    pub password: String, // argon2 hash
    pub avatar: String,   // URL, empty when unset
    pub tags: Json,       // array of strings
    pub is_public: bool,

    #[sea_orm(has_many)]
    pub blocks: HasMany<super::property_block::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
