//! Contact directory service.
//!
//! The single owner of the policy coupling user roles to contact
//! ownership: every read checks [`authz::can_access`], the two creation
//! paths check [`authz::can_create`]/[`authz::can_import`], and the owner
//! of a record is always forced to the authenticated caller. Stores below
//! this layer hold no policy at all.

mod error;

pub use error::{DirError, Violation};

use rolodex_core::{ContactId, Email, Phone};

use crate::authz::{self, Caller};
use crate::db::ContactStore;
use crate::models::{Contact, ContactDraft, ContactDto, NewContact};

/// Maximum length of the first/last name fields.
const MAX_NAME_LENGTH: usize = 100;

/// Contact directory service.
pub struct ContactDirectory<'a> {
    contacts: &'a dyn ContactStore,
}

impl<'a> ContactDirectory<'a> {
    /// Create a new directory service.
    #[must_use]
    pub const fn new(contacts: &'a dyn ContactStore) -> Self {
        Self { contacts }
    }

    /// List contacts visible to the caller: admins see every contact,
    /// standard users see their own. Ordering is store-defined.
    ///
    /// # Errors
    ///
    /// Returns `DirError::Store` if the store fails.
    pub async fn list(&self, caller: &Caller) -> Result<Vec<Contact>, DirError> {
        if authz::can_view_all(caller) {
            Ok(self.contacts.find_all().await?)
        } else {
            Ok(self.contacts.find_by_owner(&caller.username).await?)
        }
    }

    /// Fetch a single contact.
    ///
    /// # Errors
    ///
    /// Returns `DirError::NotFound` if the id is absent and
    /// `DirError::Forbidden` if the caller may not read the record.
    pub async fn get(&self, caller: &Caller, id: ContactId) -> Result<Contact, DirError> {
        let contact = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or(DirError::NotFound)?;

        if !authz::can_access(caller, &contact) {
            return Err(DirError::Forbidden);
        }

        Ok(contact)
    }

    /// Create a contact owned by the caller.
    ///
    /// The owner is forced to the caller's username; any ownership
    /// information in the payload is ignored by construction.
    ///
    /// # Errors
    ///
    /// Returns `DirError::Forbidden` for admin callers (admin accounts
    /// never own contacts) and `DirError::Invalid` with the collected
    /// violations when field validation fails.
    pub async fn add(&self, caller: &Caller, draft: &ContactDraft) -> Result<Contact, DirError> {
        if !authz::can_create(caller) {
            return Err(DirError::Forbidden);
        }

        let fields = validate_fields(draft, "").map_err(DirError::Invalid)?;

        let new = NewContact {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            owner_username: caller.username.clone(),
        };

        Ok(self.contacts.insert(new).await?)
    }

    /// Overwrite an existing contact's fields from the payload.
    ///
    /// Only first/last name, email, and phone change; id and owner are
    /// immutable through this path.
    ///
    /// # Errors
    ///
    /// Returns `DirError::NotFound` if the id is absent,
    /// `DirError::Forbidden` if the caller may not touch the record, and
    /// `DirError::Invalid` when re-validation fails.
    pub async fn update(
        &self,
        caller: &Caller,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact, DirError> {
        let existing = self
            .contacts
            .find_by_id(id)
            .await?
            .ok_or(DirError::NotFound)?;

        if !authz::can_access(caller, &existing) {
            return Err(DirError::Forbidden);
        }

        let fields = validate_fields(draft, "").map_err(DirError::Invalid)?;

        let updated = Contact {
            id: existing.id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            owner_username: existing.owner_username,
            created_at: existing.created_at,
        };

        Ok(self.contacts.update(updated).await?)
    }

    /// Delete a contact. Returns `Ok(false)` when the id is absent.
    ///
    /// # Errors
    ///
    /// Returns `DirError::Forbidden` if the caller may not delete the
    /// record.
    pub async fn delete(&self, caller: &Caller, id: ContactId) -> Result<bool, DirError> {
        let Some(existing) = self.contacts.find_by_id(id).await? else {
            return Ok(false);
        };

        if !authz::can_access(caller, &existing) {
            return Err(DirError::Forbidden);
        }

        Ok(self.contacts.delete(id).await?)
    }

    /// Export every contact visible to the caller in the portable shape:
    /// no ids, no owner, so the set can be imported into any account.
    ///
    /// # Errors
    ///
    /// Returns `DirError::Store` if the store fails.
    pub async fn export_all(&self, caller: &Caller) -> Result<Vec<ContactDto>, DirError> {
        let contacts = self.list(caller).await?;
        Ok(contacts.iter().map(ContactDto::from).collect())
    }

    /// Atomically replace the caller's whole contact set with the payload.
    ///
    /// Every incoming record is owned by the caller and gets a fresh id.
    /// All records are validated before anything is touched; a single
    /// violation fails the call with no partial mutation, and the
    /// delete-then-insert itself is one atomic store operation.
    ///
    /// # Errors
    ///
    /// Returns `DirError::Forbidden` for admin callers and
    /// `DirError::Invalid` with index-qualified violations when any record
    /// fails validation.
    pub async fn replace_all(
        &self,
        caller: &Caller,
        drafts: &[ContactDraft],
    ) -> Result<(), DirError> {
        if !authz::can_import(caller) {
            return Err(DirError::Forbidden);
        }

        let mut violations = Vec::new();
        let mut validated = Vec::with_capacity(drafts.len());

        for (index, draft) in drafts.iter().enumerate() {
            match validate_fields(draft, &format!("contacts[{index}].")) {
                Ok(fields) => validated.push(NewContact {
                    first_name: fields.first_name,
                    last_name: fields.last_name,
                    email: fields.email,
                    phone: fields.phone,
                    owner_username: caller.username.clone(),
                }),
                Err(mut errs) => violations.append(&mut errs),
            }
        }

        if !violations.is_empty() {
            return Err(DirError::Invalid(violations));
        }

        self.contacts
            .replace_by_owner(&caller.username, validated)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Field validation
// =============================================================================

struct ValidatedFields {
    first_name: String,
    last_name: String,
    email: Email,
    phone: Phone,
}

/// Validate a draft's fields, collecting every violation rather than
/// stopping at the first. Field names in the violations are prefixed with
/// `prefix` so bulk payloads can qualify them by index.
fn validate_fields(draft: &ContactDraft, prefix: &str) -> Result<ValidatedFields, Vec<Violation>> {
    let mut violations = Vec::new();

    validate_name(&draft.first_name, prefix, "first_name", &mut violations);
    validate_name(&draft.last_name, prefix, "last_name", &mut violations);

    let email = match Email::parse(&draft.email) {
        Ok(email) => Some(email),
        Err(e) => {
            violations.push(Violation::new(format!("{prefix}email"), e.to_string()));
            None
        }
    };

    let phone = match Phone::parse(&draft.phone) {
        Ok(phone) => Some(phone),
        Err(e) => {
            violations.push(Violation::new(format!("{prefix}phone"), e.to_string()));
            None
        }
    };

    match (email, phone) {
        (Some(email), Some(phone)) if violations.is_empty() => Ok(ValidatedFields {
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            email,
            phone,
        }),
        _ => Err(violations),
    }
}

fn validate_name(value: &str, prefix: &str, field: &str, violations: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        violations.push(Violation::new(
            format!("{prefix}{field}"),
            "must not be blank",
        ));
    } else if value.chars().count() > MAX_NAME_LENGTH {
        violations.push(Violation::new(
            format!("{prefix}{field}"),
            format!("must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
}
