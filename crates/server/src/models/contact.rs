//! Contact domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rolodex_core::{ContactId, Email, Phone};

/// A persisted contact record (domain type).
///
/// `owner_username` is set by the service from the authenticated caller,
/// never from client input, and is immutable for the life of the record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Contact {
    /// Unique contact ID.
    pub id: ContactId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: Email,
    /// Phone number.
    pub phone: Phone,
    /// Username of the owning user.
    pub owner_username: String,
    /// When the contact was created.
    pub created_at: DateTime<Utc>,
}

/// A validated contact about to be persisted; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewContact {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: Email,
    /// Phone number.
    pub phone: Phone,
    /// Username of the owning user.
    pub owner_username: String,
}

/// Unvalidated contact fields as supplied by a client.
///
/// Used both as the add/update request body and as one record of an import
/// payload. Missing fields default to empty strings so they surface as
/// validation violations rather than deserialization failures; unknown
/// fields (including any client-supplied `id` or `owner_username`) are
/// ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

/// The portable export shape of a contact.
///
/// Carries no id and no owner, so an exported set can be imported into any
/// account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDto {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        Self {
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.as_str().to_owned(),
            phone: contact.phone.as_str().to_owned(),
        }
    }
}

impl From<ContactDto> for ContactDraft {
    fn from(dto: ContactDto) -> Self {
        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
        }
    }
}
