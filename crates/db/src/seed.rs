//! Identity bootstrap: roles and the initial administrator.
//!
//! Every step checks before it writes, so running the seed again against a
//! populated database changes nothing.

use bookwise_core::auth::{PasswordError, hash_password};
use bookwise_shared::Role;
use bookwise_shared::config::SeedConfig;
use bookwise_shared::types::{RoleId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set,
};
use thiserror::Error;

use crate::entities::{roles, user_roles, users};

/// Errors raised while seeding identity data.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Database failure.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// The admin password could not be hashed.
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),
}

/// Credentials for the bootstrap administrator.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    /// Login email; stored lowercased.
    pub email: String,
    /// Plain-text password, hashed before it is stored.
    pub password: String,
}

impl From<&SeedConfig> for AdminSeed {
    fn from(config: &SeedConfig) -> Self {
        Self {
            email: config.admin_email.clone(),
            password: config.admin_password.clone(),
        }
    }
}

/// Ensures every role exists, the admin user exists, and the admin holds the
/// Admin role. Returns the admin's id.
///
/// # Errors
///
/// Returns an error if a query fails or the password cannot be hashed.
pub async fn seed_identity(db: &DatabaseConnection, seed: &AdminSeed) -> Result<UserId, SeedError> {
    let mut admin_role = None;
    for role in Role::ALL {
        let model = ensure_role(db, role).await?;
        if role == Role::Admin {
            admin_role = Some(model.id);
        }
    }

    let admin = ensure_user(db, seed).await?;

    if let Some(role_id) = admin_role {
        let linked = user_roles::Entity::find_by_id((admin.id, role_id))
            .one(db)
            .await?;
        if linked.is_none() {
            user_roles::ActiveModel {
                user_id: Set(admin.id),
                role_id: Set(role_id),
            }
            .insert(db)
            .await?;
            tracing::info!(user_id = %admin.id, "Granted Admin role");
        }
    }

    Ok(UserId::from_uuid(admin.id))
}

/// Finds a role by name, creating it when missing.
pub(crate) async fn ensure_role<C>(db: &C, role: Role) -> Result<roles::Model, DbErr>
where
    C: ConnectionTrait,
{
    let existing = roles::Entity::find()
        .filter(roles::Column::Name.eq(role.as_str()))
        .one(db)
        .await?;
    if let Some(model) = existing {
        return Ok(model);
    }

    let model = roles::ActiveModel {
        id: Set(RoleId::new().into_inner()),
        name: Set(role.as_str().to_string()),
    }
    .insert(db)
    .await?;

    tracing::info!(role = role.as_str(), "Created role");
    Ok(model)
}

async fn ensure_user(db: &DatabaseConnection, seed: &AdminSeed) -> Result<users::Model, SeedError> {
    let email = seed.email.trim().to_lowercase();

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;
    if let Some(model) = existing {
        return Ok(model);
    }

    let model = users::ActiveModel {
        id: Set(UserId::new().into_inner()),
        email: Set(email),
        password_hash: Set(hash_password(&seed.password)?),
        created_at: Set(chrono::Utc::now().into()),
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = %model.id, email = %model.email, "Created admin user");
    Ok(model)
}
