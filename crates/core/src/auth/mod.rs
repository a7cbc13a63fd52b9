//! Identity rules: password hashing for the bootstrap administrator and the
//! access levels administrators hand out.
//!
//! Token issuance lives with the external identity service; passwords are
//! hashed in the same PHC format that service verifies.

mod access;
mod error;
mod password;

pub use access::requested_level;
pub use error::UserError;
pub use password::{PasswordError, hash_password, verify_password};
