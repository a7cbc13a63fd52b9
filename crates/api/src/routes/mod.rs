//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod access_level;
pub mod accounts;
pub mod admin_users;
pub mod health;
pub mod journal_entries;
pub mod transactions;

/// Creates the API router; everything but the health check needs a token.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(access_level::routes())
        .merge(accounts::routes())
        .merge(admin_users::routes())
        .merge(transactions::routes())
        .merge(journal_entries::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}
