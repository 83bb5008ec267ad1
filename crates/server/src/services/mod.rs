//! Business services.
//!
//! - [`auth`] - registration, login, and token issuing/verification
//! - [`directory`] - ownership-scoped contact operations and bulk replace

pub mod auth;
pub mod directory;

pub use auth::{AuthError, AuthService, TokenCodec, TokenError};
pub use directory::{ContactDirectory, DirError, Violation};
