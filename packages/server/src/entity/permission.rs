use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Grants `action` (`api::{type}.{type}.{handler}`) to a role.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique_key = "action_role")]
    pub action: String,

    #[sea_orm(unique_key = "action_role")]
    pub role_id: i32,
    #[sea_orm(belongs_to, from = "role_id", to = "id")]
    pub role: HasOne<super::role::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

/// Permission action for `handler` on the `api` content API,
/// e.g. `api::article.article.find`.
pub fn action(api: &str, handler: &str) -> String {
    format!("api::{api}.{api}.{handler}")
}
