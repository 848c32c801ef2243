use sea_orm::*;

use crate::entity::{permission, role};
use crate::error::AppError;

/// Fail with `PERMISSION_DENIED` unless the public role holds `action`.
pub async fn require_public_permission(
    db: &DatabaseConnection,
    action: &str,
) -> Result<(), AppError> {
    let Some(public) = role::Entity::find()
        .filter(role::Column::Kind.eq(role::PUBLIC_ROLE))
        .one(db)
        .await?
    else {
        return Err(AppError::PermissionDenied);
    };

    let granted = permission::Entity::find()
        .filter(permission::Column::RoleId.eq(public.id))
        .filter(permission::Column::Action.eq(action))
        .count(db)
        .await?
        > 0;

    if granted {
        Ok(())
    } else {
        tracing::debug!(action, "Public role lacks permission");
        Err(AppError::PermissionDenied)
    }
}
