use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value settings scoped by environment name.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "store_key_environment")]
    pub key: String,
    #[sea_orm(unique_key = "store_key_environment")]
    pub environment: String,

    #[sea_orm(column_type = "JsonBinary")]
    pub value: Json,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
