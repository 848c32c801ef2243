use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role type of unauthenticated requests.
pub const PUBLIC_ROLE: &str = "public";

/// Role type of authenticated end users.
pub const AUTHENTICATED_ROLE: &str = "authenticated";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_name = "type", unique)]
    pub kind: String,

    pub name: String,

    #[sea_orm(has_many)]
    pub permissions: HasMany<super::permission::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
