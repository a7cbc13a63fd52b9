//! Integration tests for identity seeding.

mod common;

use bookwise_core::auth::verify_password;
use bookwise_db::entities::{roles, user_roles, users};
use bookwise_db::{AdminSeed, seed_identity};
use common::setup_db;
use sea_orm::{EntityTrait, PaginatorTrait};

fn admin() -> AdminSeed {
    AdminSeed {
        email: " Admin@Local.Test ".to_string(),
        password: "Admin!23456".to_string(),
    }
}

#[tokio::test]
async fn test_seed_creates_roles_and_admin() {
    let db = setup_db().await;

    let admin_id = seed_identity(&db, &admin()).await.unwrap();

    let names: Vec<String> = roles::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names.len(), 3);
    for expected in ["Admin", "Bookkeeper", "ReportViewer"] {
        assert!(names.iter().any(|n| n == expected), "missing role {expected}");
    }

    let user = users::Entity::find_by_id(admin_id.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.email, "admin@local.test");
    assert!(verify_password("Admin!23456", &user.password_hash).unwrap());
    assert_eq!(user_roles::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup_db().await;

    let first = seed_identity(&db, &admin()).await.unwrap();
    let second = seed_identity(&db, &admin()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(roles::Entity::find().count(&db).await.unwrap(), 3);
    assert_eq!(users::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(user_roles::Entity::find().count(&db).await.unwrap(), 1);
}
