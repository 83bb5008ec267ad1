//! User role enum.

use serde::{Deserialize, Serialize};

/// User role with different permission levels.
///
/// Role policy lives in the server's authorization guard; this type only
/// carries the tag. Stored as text in the database and parsed on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular user: owns and manages their own contacts.
    #[default]
    Standard,
    /// Administrator: sees every contact but cannot own any.
    Admin,
}

impl Role {
    /// Whether this role is the administrative one.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
