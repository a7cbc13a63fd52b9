//! User repository: stored role membership and access levels.

use std::collections::HashMap;

use bookwise_core::auth::UserError;
use bookwise_shared::types::UserId;
use bookwise_shared::{AccessLevel, Role};
use sea_orm::prelude::Uuid;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entities::{roles, user_roles, users};
use crate::seed::ensure_role;

/// A user with the access level their roles grant.
#[derive(Debug, Clone)]
pub struct UserAccess {
    /// The user row.
    pub user: users::Model,
    /// Level resolved from the user's roles.
    pub access_level: AccessLevel,
}

/// User repository for access-level lookups and changes.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every user ordered by email, each with their access level.
    pub async fn list(&self) -> Result<Vec<UserAccess>, UserError> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Email)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let links = user_roles::Entity::find()
            .find_also_related(roles::Entity)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let mut roles_by_user: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for (link, role) in links {
            if let Some(role) = role.and_then(|r| Role::parse(&r.name)) {
                roles_by_user.entry(link.user_id).or_default().push(role);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let roles = roles_by_user.remove(&user.id).unwrap_or_default();
                UserAccess {
                    access_level: AccessLevel::from_roles(roles),
                    user,
                }
            })
            .collect())
    }

    /// Resolves one user's access level. `None` when the user does not exist.
    pub async fn access_level(&self, id: UserId) -> Result<Option<AccessLevel>, UserError> {
        let exists = users::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(storage_error)?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let roles = stored_roles(&self.db, id.into_inner())
            .await
            .map_err(storage_error)?;
        Ok(Some(AccessLevel::from_roles(roles)))
    }

    /// Replaces a user's Bookkeeper or ReportViewer role with `level`.
    ///
    /// `Registered` removes both. Missing roles are created on the way.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown user, `AdminLocked` when the user holds the
    /// Admin role. Nothing changes on error.
    pub async fn set_access_level(&self, id: UserId, level: AccessLevel) -> Result<(), UserError> {
        let txn = self.db.begin().await.map_err(storage_error)?;

        let user = users::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await
            .map_err(storage_error)?
            .ok_or(UserError::NotFound(id))?;

        let current = stored_roles(&txn, user.id).await.map_err(storage_error)?;
        if current.contains(&Role::Admin) {
            return Err(UserError::AdminLocked);
        }

        let replaceable: Vec<Uuid> = roles::Entity::find()
            .filter(
                roles::Column::Name
                    .is_in([Role::Bookkeeper.as_str(), Role::ReportViewer.as_str()]),
            )
            .all(&txn)
            .await
            .map_err(storage_error)?
            .into_iter()
            .map(|role| role.id)
            .collect();

        user_roles::Entity::delete_many()
            .filter(user_roles::Column::UserId.eq(user.id))
            .filter(user_roles::Column::RoleId.is_in(replaceable))
            .exec(&txn)
            .await
            .map_err(storage_error)?;

        if let Some(role) = level.role() {
            let role = ensure_role(&txn, role).await.map_err(storage_error)?;
            user_roles::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role.id),
            }
            .insert(&txn)
            .await
            .map_err(storage_error)?;
        }

        txn.commit().await.map_err(storage_error)?;

        tracing::info!(user_id = %id, access_level = level.as_str(), "Access level changed");
        Ok(())
    }
}

/// Roles linked to a user; names that are not known roles are skipped.
async fn stored_roles<C>(db: &C, user_id: Uuid) -> Result<Vec<Role>, DbErr>
where
    C: ConnectionTrait,
{
    let rows = user_roles::Entity::find()
        .filter(user_roles::Column::UserId.eq(user_id))
        .find_also_related(roles::Entity)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(_, role)| role.and_then(|r| Role::parse(&r.name)))
        .collect())
}

fn storage_error(err: DbErr) -> UserError {
    tracing::error!(error = %err, "User query failed");
    UserError::Storage(err.to_string())
}
