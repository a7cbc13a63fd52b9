//! Request middleware and extractors.

pub mod auth;

pub use auth::{AuthUser, auth_middleware, require_admin, require_read, require_write};
