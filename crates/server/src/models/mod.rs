//! Domain models.
//!
//! These types represent validated domain objects separate from database
//! row types and from the HTTP request/response shapes.

pub mod contact;
pub mod user;

pub use contact::{Contact, ContactDraft, ContactDto, NewContact};
pub use user::{NewUser, UserRecord};
