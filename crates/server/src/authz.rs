//! Ownership-based authorization.
//!
//! Every role decision in the service goes through the predicates in this
//! module; call sites never branch on [`Role`] directly. The functions are
//! pure: no I/O, no clock, no store access.

use serde::Serialize;

use rolodex_core::Role;

use crate::models::Contact;

/// The resolved identity attempting an operation.
///
/// Threaded explicitly into every service call; there is no ambient
/// "current user" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caller {
    /// Unique login name.
    pub username: String,
    /// The caller's role.
    pub role: Role,
}

impl Caller {
    /// Create a caller identity.
    #[must_use]
    pub const fn new(username: String, role: Role) -> Self {
        Self { username, role }
    }
}

/// Whether the caller may read, update, or delete the given contact.
///
/// True iff the caller owns the contact or is an admin.
#[must_use]
pub fn can_access(caller: &Caller, contact: &Contact) -> bool {
    contact.owner_username == caller.username || caller.role.is_admin()
}

/// Whether the caller sees every contact in the store rather than only
/// their own (list and export visibility).
#[must_use]
pub fn can_view_all(caller: &Caller) -> bool {
    caller.role.is_admin()
}

/// Whether the caller may create contacts.
///
/// Admins cannot: every created contact is owned by its creator, and admin
/// accounts never own contact data.
#[must_use]
pub fn can_create(caller: &Caller) -> bool {
    !caller.role.is_admin()
}

/// Whether the caller may bulk-replace (import) contacts.
///
/// Identical to [`can_create`]: the import path creates and owns records.
#[must_use]
pub fn can_import(caller: &Caller) -> bool {
    can_create(caller)
}
