//! Authentication types: JWT claims, roles, and access levels.
//!
//! A token only names the user. What the user may do comes from the roles
//! stored for them, resolved through [`AccessLevel::from_roles`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// Roles seeded into the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access.
    Admin,
    /// Records accounts, transactions, and journal entries.
    Bookkeeper,
    /// Read-only access to bookkeeping data.
    ReportViewer,
}

impl Role {
    /// Every role, in seeding order.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Bookkeeper, Self::ReportViewer];

    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Bookkeeper => "Bookkeeper",
            Self::ReportViewer => "ReportViewer",
        }
    }

    /// Parses a role name, ignoring case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an authenticated caller may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessLevel {
    /// Holds the Admin role.
    Admin,
    /// Holds the Bookkeeper role.
    Bookkeeper,
    /// Holds the ReportViewer role.
    ReportViewer,
    /// Signed in without any bookkeeping role.
    Registered,
}

impl AccessLevel {
    /// Levels an administrator may hand out. Admin is seeded, never assigned.
    pub const ASSIGNABLE: [Self; 3] = [Self::Registered, Self::Bookkeeper, Self::ReportViewer];

    /// Resolves the level from a user's stored roles.
    ///
    /// Admin outranks Bookkeeper, which outranks ReportViewer; no role at
    /// all is `Registered`.
    #[must_use]
    pub fn from_roles<I>(roles: I) -> Self
    where
        I: IntoIterator<Item = Role>,
    {
        roles
            .into_iter()
            .map(|role| match role {
                Role::Admin => Self::Admin,
                Role::Bookkeeper => Self::Bookkeeper,
                Role::ReportViewer => Self::ReportViewer,
            })
            .min_by_key(|level| level.rank())
            .unwrap_or(Self::Registered)
    }

    /// Parses a level an administrator may assign. Names are case-sensitive.
    #[must_use]
    pub fn parse_assignable(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ASSIGNABLE
            .into_iter()
            .find(|level| level.as_str() == name)
    }

    /// The stored role backing this level, if any.
    #[must_use]
    pub const fn role(self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            Self::Bookkeeper => Some(Role::Bookkeeper),
            Self::ReportViewer => Some(Role::ReportViewer),
            Self::Registered => None,
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Bookkeeper => 1,
            Self::ReportViewer => 2,
            Self::Registered => 3,
        }
    }

    /// Returns the level's display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Bookkeeper => "Bookkeeper",
            Self::ReportViewer => "ReportViewer",
            Self::Registered => "Registered",
        }
    }

    /// Whether the caller may list and fetch bookkeeping records.
    #[must_use]
    pub const fn can_read(self) -> bool {
        matches!(self, Self::Admin | Self::Bookkeeper | Self::ReportViewer)
    }

    /// Whether the caller may create, change, or delete bookkeeping records.
    #[must_use]
    pub const fn can_write(self) -> bool {
        matches!(self, Self::Admin | Self::Bookkeeper)
    }
}
