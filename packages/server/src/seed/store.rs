//! Persistence used by the seeder: the one-time flag, public permissions and
//! content entries.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;
use serde_json::Value;

use crate::entity::entry::{self, ContentType};
use crate::entity::{core_store, permission, role};

/// `core_store` key of the first-run flag.
pub const INIT_FLAG_KEY: &str = "setup.init_has_run";

#[async_trait]
pub trait SeedStore: Send + Sync {
    /// Whether the first-run flag is set for `environment`.
    async fn is_initialized(&self, environment: &str) -> Result<bool, DbErr>;

    /// Set the first-run flag for `environment`. Returns whether it was
    /// already set before this call.
    async fn mark_initialized(&self, environment: &str) -> Result<bool, DbErr>;

    /// Id of the public role, if it exists.
    async fn public_role(&self) -> Result<Option<i32>, DbErr>;

    /// Grant `action` to a role unless an identical grant exists. Returns
    /// whether a grant was created.
    async fn grant_permission(&self, role_id: i32, action: &str) -> Result<bool, DbErr>;

    /// Create and publish an entry, returning its id.
    async fn create_entry(&self, content_type: ContentType, document: Value) -> Result<i32, DbErr>;
}

pub struct DatabaseSeedStore {
    db: DatabaseConnection,
}

impl DatabaseSeedStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn flag(&self, environment: &str) -> Result<Option<core_store::Model>, DbErr> {
        core_store::Entity::find()
            .filter(core_store::Column::Key.eq(INIT_FLAG_KEY))
            .filter(core_store::Column::Environment.eq(environment))
            .one(&self.db)
            .await
    }
}

#[async_trait]
impl SeedStore for DatabaseSeedStore {
    async fn is_initialized(&self, environment: &str) -> Result<bool, DbErr> {
        Ok(self
            .flag(environment)
            .await?
            .is_some_and(|row| row.value.as_bool() == Some(true)))
    }

    async fn mark_initialized(&self, environment: &str) -> Result<bool, DbErr> {
        let existing = self.flag(environment).await?;

        match existing {
            Some(row) if row.value.as_bool() == Some(true) => Ok(true),
            Some(row) => {
                let mut active: core_store::ActiveModel = row.into();
                active.value = Set(Value::Bool(true));
                active.updated_at = Set(Utc::now());
                active.update(&self.db).await?;
                Ok(false)
            }
            None => {
                core_store::ActiveModel {
                    key: Set(INIT_FLAG_KEY.to_string()),
                    environment: Set(environment.to_string()),
                    value: Set(Value::Bool(true)),
                    updated_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                Ok(false)
            }
        }
    }

    async fn public_role(&self) -> Result<Option<i32>, DbErr> {
        Ok(role::Entity::find()
            .filter(role::Column::Kind.eq(role::PUBLIC_ROLE))
            .one(&self.db)
            .await?
            .map(|r| r.id))
    }

    async fn grant_permission(&self, role_id: i32, action: &str) -> Result<bool, DbErr> {
        let exists = permission::Entity::find()
            .filter(permission::Column::Action.eq(action))
            .filter(permission::Column::RoleId.eq(role_id))
            .one(&self.db)
            .await?
            .is_some();
        if exists {
            return Ok(false);
        }

        permission::ActiveModel {
            action: Set(action.to_string()),
            role_id: Set(role_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(true)
    }

    async fn create_entry(&self, content_type: ContentType, document: Value) -> Result<i32, DbErr> {
        let now = Utc::now();
        let saved = entry::ActiveModel {
            content_type: Set(content_type.as_str().to_string()),
            document: Set(document),
            published_at: Set(now),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;
        Ok(saved.id)
    }
}

/// Default roles, as `(type, name)`.
const DEFAULT_ROLES: &[(&str, &str)] = &[
    (role::PUBLIC_ROLE, "Public"),
    (role::AUTHENTICATED_ROLE, "Authenticated"),
];

/// Create the public and authenticated roles if they are missing.
pub async fn ensure_default_roles(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut inserted = 0u32;
    for &(kind, name) in DEFAULT_ROLES {
        let model = role::ActiveModel {
            kind: Set(kind.to_string()),
            name: Set(name.to_string()),
            ..Default::default()
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(role::Column::Kind)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if inserted > 0 {
        tracing::info!("Seeded {} new roles", inserted);
    }
    Ok(())
}
