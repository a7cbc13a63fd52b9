//! End-to-end tests for the HTTP API over an in-memory database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use bookwise_api::{AppState, create_router};
use bookwise_db::entities::users;
use bookwise_db::{AdminSeed, Migrator, UserRepository, seed_identity};
use bookwise_shared::config::JwtConfig;
use bookwise_shared::types::UserId;
use bookwise_shared::{AccessLevel, JwtService};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    db: DatabaseConnection,
    jwt: Arc<JwtService>,
    admin: UserId,
}

impl TestApp {
    async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let admin = seed_identity(
            &db,
            &AdminSeed {
                email: "admin@bookwise.test".to_string(),
                password: "Admin123!".to_string(),
            },
        )
        .await
        .unwrap();

        let jwt = Arc::new(JwtService::new(&JwtConfig {
            secret: "test-secret-with-enough-length-123".to_string(),
            access_token_expiry_secs: 900,
        }));

        let router = create_router(AppState {
            db: Arc::new(db.clone()),
            jwt_service: jwt.clone(),
        });

        Self {
            router,
            db,
            jwt,
            admin,
        }
    }

    /// Inserts a user holding `level` and returns its id.
    async fn user(&self, level: AccessLevel) -> UserId {
        if level == AccessLevel::Admin {
            return self.admin;
        }

        let id = UserId::new();
        users::ActiveModel {
            id: Set(id.into_inner()),
            email: Set(format!("{id}@bookwise.test")),
            password_hash: Set("not-a-real-hash".to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .unwrap();
        UserRepository::new(self.db.clone())
            .set_access_level(id, level)
            .await
            .unwrap();
        id
    }

    fn token_for(&self, user: UserId) -> String {
        self.jwt.generate_access_token(user.into_inner()).unwrap()
    }

    async fn token(&self, level: AccessLevel) -> String {
        let user = self.user(level).await;
        self.token_for(user)
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_account(&self, token: &str, code: &str, account_type: &str) -> i64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/accounts",
                Some(token),
                Some(json!({ "accountCode": code, "name": code, "accountType": account_type })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

fn entry(debit_account: i64, credit_account: i64, debit: &str, credit: &str) -> Value {
    json!({
        "occurredOn": "2026-03-01",
        "description": "Office supplies",
        "lines": [
            { "accountId": debit_account, "debit": debit },
            { "accountId": credit_account, "credit": credit }
        ]
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = TestApp::new().await;

    let (missing, body) = app.send(Method::GET, "/api/accounts", None, None).await;
    let (bad, _) = app
        .send(Method::GET, "/api/accounts", Some("not-a-jwt"), None)
        .await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");
    assert_eq!(bad, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_level_reflects_role() {
    let app = TestApp::new().await;

    let viewer_token = app.token(AccessLevel::ReportViewer).await;
    let guest_token = app.token(AccessLevel::Registered).await;

    let (_, viewer) = app
        .send(Method::GET, "/api/access-level", Some(&viewer_token), None)
        .await;
    let (_, guest) = app
        .send(Method::GET, "/api/access-level", Some(&guest_token), None)
        .await;

    assert_eq!(viewer["accessLevel"], "ReportViewer");
    assert_eq!(guest["accessLevel"], "Registered");
}

#[tokio::test]
async fn test_report_viewer_reads_but_cannot_write() {
    let app = TestApp::new().await;
    let viewer = app.token(AccessLevel::ReportViewer).await;

    let (read, _) = app.send(Method::GET, "/api/accounts", Some(&viewer), None).await;
    let (write, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(&viewer),
            Some(json!({ "accountCode": "1000", "name": "Cash", "accountType": "Asset" })),
        )
        .await;

    assert_eq!(read, StatusCode::OK);
    assert_eq!(write, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_registered_user_cannot_read() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Registered).await;

    let (status, _) = app
        .send(Method::GET, "/api/journal-entries", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_account_lifecycle() {
    let app = TestApp::new().await;
    let admin = app.token(AccessLevel::Admin).await;
    let id = app.create_account(&admin, "1000", "asset").await;

    let (dup, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(&admin),
            Some(json!({ "accountCode": "1000", "name": "Other", "accountType": "Asset" })),
        )
        .await;
    assert_eq!(dup, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (update, _) = app
        .send(
            Method::PUT,
            &format!("/api/accounts/{id}"),
            Some(&admin),
            Some(json!({ "accountCode": "1000", "name": "Cash on hand", "accountType": "Asset" })),
        )
        .await;
    assert_eq!(update, StatusCode::NO_CONTENT);

    let (_, fetched) = app
        .send(Method::GET, &format!("/api/accounts/{id}"), Some(&admin), None)
        .await;
    assert_eq!(fetched["name"], "Cash on hand");
    assert_eq!(fetched["accountType"], "Asset");

    let (deleted, _) = app
        .send(Method::DELETE, &format!("/api/accounts/{id}"), Some(&admin), None)
        .await;
    let (missing, _) = app
        .send(Method::GET, &format!("/api/accounts/{id}"), Some(&admin), None)
        .await;
    assert_eq!(deleted, StatusCode::NO_CONTENT);
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_account_with_bad_type_is_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(&app.token(AccessLevel::Bookkeeper).await),
            Some(json!({ "accountCode": "1000", "name": "Cash", "accountType": "Cash" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_journal_entry_returns_lines() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Bookkeeper).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries",
            Some(&token),
            Some(entry(supplies, cash, "42.50", "42.50")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["lines"].as_array().unwrap().len(), 2);
    assert_eq!(body["lines"][0]["accountId"], supplies);
    assert_eq!(body["totalDebit"], body["totalCredit"]);
    assert!(body["totalDebit"].is_string());
}

#[tokio::test]
async fn test_unbalanced_journal_entry_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Admin).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries",
            Some(&token),
            Some(entry(supplies, cash, "100", "90")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not balanced"));
}

#[tokio::test]
async fn test_journal_entry_with_unknown_account() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Admin).await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries",
            Some(&token),
            Some(entry(cash, 999, "10", "10")),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_reference");
    assert_eq!(body["message"], "One or more account ids are invalid");
}

#[tokio::test]
async fn test_bulk_commits_all_entries() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Admin).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries/bulk",
            Some(&token),
            Some(json!({ "entries": [
                entry(supplies, cash, "10", "10"),
                entry(supplies, cash, "20", "20")
            ]})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["createdCount"], 2);
    assert_eq!(body["createdIds"].as_array().unwrap().len(), 2);

    let (_, listed) = app
        .send(Method::GET, "/api/journal-entries", Some(&token), None)
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_bulk_reports_failing_index_and_writes_nothing() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Admin).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries/bulk",
            Some(&token),
            Some(json!({ "entries": [
                entry(supplies, cash, "10", "10"),
                entry(supplies, cash, "100", "90"),
                entry(supplies, cash, "5", "5")
            ]})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Entry 1:"), "{body}");

    let (_, listed) = app
        .send(Method::GET, "/api/journal-entries", Some(&token), None)
        .await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_bulk_rejects_empty_batch() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries/bulk",
            Some(&app.token(AccessLevel::Admin).await),
            Some(json!({ "entries": [] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("entries"));
}

#[tokio::test]
async fn test_referenced_account_cannot_be_deleted() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Admin).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;
    app.send(
        Method::POST,
        "/api/journal-entries",
        Some(&token),
        Some(entry(supplies, cash, "1", "1")),
    )
    .await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/accounts/{cash}"), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn test_transaction_flow() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Bookkeeper).await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let (bad_type, body) = app
        .send(
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "accountId": cash, "transactionType": "Transfer",
                "occurredOn": "2026-03-02", "description": "x", "amount": "5"
            })),
        )
        .await;
    assert_eq!(bad_type, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "TransactionType must be Income or Expense.");

    let (created, body) = app
        .send(
            Method::POST,
            "/api/transactions",
            Some(&token),
            Some(json!({
                "accountId": cash, "transactionType": "expense",
                "occurredOn": "2026-03-02", "description": "Lunch", "amount": 12.5
            })),
        )
        .await;
    assert_eq!(created, StatusCode::CREATED, "{body}");
    assert_eq!(body["transactionType"], "Expense");
    let signed: Decimal = body["signedAmount"].as_str().unwrap().parse().unwrap();
    assert_eq!(signed, dec!(-12.5));

    let id = body["id"].as_i64().unwrap();
    let (updated, _) = app
        .send(
            Method::PUT,
            &format!("/api/transactions/{id}"),
            Some(&token),
            Some(json!({
                "accountId": cash, "transactionType": "Income",
                "occurredOn": "2026-03-03", "description": "Lunch", "amount": "13"
            })),
        )
        .await;
    assert_eq!(updated, StatusCode::NO_CONTENT);

    let (_, fetched) = app
        .send(Method::GET, &format!("/api/transactions/{id}"), Some(&token), None)
        .await;
    assert_eq!(fetched["transactionType"], "Expense");
    assert_eq!(fetched["occurredOn"], "2026-03-03");
}

#[tokio::test]
async fn test_transaction_with_unknown_account() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/transactions",
            Some(&app.token(AccessLevel::Admin).await),
            Some(json!({
                "accountId": 41, "transactionType": "Income",
                "occurredOn": "2026-03-02", "description": "Gift", "amount": "5"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "AccountId is invalid.");
}

#[tokio::test]
async fn test_text_limits_ignore_padding() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Bookkeeper).await;
    let code = format!("  {}  ", "7".repeat(20));

    let (status, body) = app
        .send(
            Method::POST,
            "/api/accounts",
            Some(&token),
            Some(json!({ "accountCode": code, "name": "Padded", "accountType": "Asset" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["accountCode"], "7".repeat(20));
    let account = body["id"].as_i64().unwrap();
    let cash = app.create_account(&token, "1000", "Asset").await;

    let mut padded = entry(account, cash, "1", "1");
    padded["description"] = json!(format!(" {} ", "d".repeat(200)));
    let (status, body) = app
        .send(Method::POST, "/api/journal-entries", Some(&token), Some(padded))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn test_malformed_body_is_a_json_validation_error() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Bookkeeper).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;

    let mut broken = entry(supplies, cash, "1", "1");
    broken["lines"][0]["debit"] = json!("abc");
    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries/bulk",
            Some(&token),
            Some(json!({ "entries": [entry(supplies, cash, "1", "1"), broken] })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_access_is_checked_before_the_body() {
    let app = TestApp::new().await;
    let viewer = app.token(AccessLevel::ReportViewer).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries",
            Some(&viewer),
            Some(json!({ "lines": "not-a-list" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_oversized_amounts_are_rejected() {
    let app = TestApp::new().await;
    let token = app.token(AccessLevel::Bookkeeper).await;
    let supplies = app.create_account(&token, "6000", "Expense").await;
    let cash = app.create_account(&token, "1000", "Asset").await;
    let huge = "50000000000000000000000000000";

    let (status, body) = app
        .send(
            Method::POST,
            "/api/journal-entries",
            Some(&token),
            Some(json!({
                "occurredOn": "2026-03-01",
                "description": "Too big",
                "lines": [
                    { "accountId": supplies, "debit": huge },
                    { "accountId": supplies, "debit": huge },
                    { "accountId": cash, "credit": "1" }
                ]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["message"].as_str().unwrap().contains("integer digits"), "{body}");
}

#[tokio::test]
async fn test_admin_lists_users_with_levels() {
    let app = TestApp::new().await;
    let admin = app.token(AccessLevel::Admin).await;
    let clerk = app.user(AccessLevel::Bookkeeper).await;

    let (status, body) = app
        .send(Method::GET, "/api/admin/users", Some(&admin), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    let level_of = |email: &str| {
        users
            .iter()
            .find(|u| u["email"] == email)
            .map(|u| u["accessLevel"].clone())
    };
    assert_eq!(level_of("admin@bookwise.test"), Some(json!("Admin")));
    assert_eq!(level_of(&format!("{clerk}@bookwise.test")), Some(json!("Bookkeeper")));
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));

    let emails: Vec<&str> = users.iter().map(|u| u["email"].as_str().unwrap()).collect();
    let mut sorted = emails.clone();
    sorted.sort_unstable();
    assert_eq!(emails, sorted);
}

#[tokio::test]
async fn test_promoted_user_gains_write_access() {
    let app = TestApp::new().await;
    let admin = app.token(AccessLevel::Admin).await;
    let viewer = app.user(AccessLevel::ReportViewer).await;
    let viewer_token = app.token_for(viewer);
    let account = json!({ "accountCode": "1000", "name": "Cash", "accountType": "Asset" });

    let (before, _) = app
        .send(Method::POST, "/api/accounts", Some(&viewer_token), Some(account.clone()))
        .await;
    assert_eq!(before, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/admin/users/{viewer}/access-level"),
            Some(&admin),
            Some(json!({ "accessLevel": " Bookkeeper " })),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (after, body) = app
        .send(Method::POST, "/api/accounts", Some(&viewer_token), Some(account))
        .await;
    assert_eq!(after, StatusCode::CREATED, "{body}");
}

#[tokio::test]
async fn test_only_admin_manages_users() {
    let app = TestApp::new().await;
    let bookkeeper = app.token(AccessLevel::Bookkeeper).await;
    let target = app.user(AccessLevel::Registered).await;

    let (list, _) = app
        .send(Method::GET, "/api/admin/users", Some(&bookkeeper), None)
        .await;
    let (set, _) = app
        .send(
            Method::PUT,
            &format!("/api/admin/users/{target}/access-level"),
            Some(&bookkeeper),
            Some(json!({ "accessLevel": "Bookkeeper" })),
        )
        .await;

    assert_eq!(list, StatusCode::FORBIDDEN);
    assert_eq!(set, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_access_level_change_errors() {
    let app = TestApp::new().await;
    let admin = app.token(AccessLevel::Admin).await;
    let target = app.user(AccessLevel::Registered).await;
    let set = |id: UserId, level: Value| {
        let admin = admin.clone();
        let app = &app;
        async move {
            app.send(
                Method::PUT,
                &format!("/api/admin/users/{id}/access-level"),
                Some(&admin),
                Some(json!({ "accessLevel": level })),
            )
            .await
        }
    };

    let (status, body) = set(app.admin, json!("Registered")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Cannot change the admin account access level.");

    let (status, body) = set(UserId::new(), json!("Bookkeeper")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");

    let (status, body) = set(target, json!("Admin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Invalid AccessLevel. Allowed: Registered, Bookkeeper, ReportViewer"
    );

    let (status, body) = set(target, Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "AccessLevel is required.");
}

#[tokio::test]
async fn test_token_for_unknown_user_is_unauthorized() {
    let app = TestApp::new().await;
    let stranger = app.token_for(UserId::new());

    let (status, body) = app
        .send(Method::GET, "/api/access-level", Some(&stranger), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unknown_user");
}
