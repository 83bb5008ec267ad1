//! Export/import route handlers.
//!
//! Export returns the portable contact shape (no ids, no owner). Import is
//! a bulk replace: the caller's whole set is atomically substituted by the
//! payload. The payload is accepted in two shapes for the same record
//! list — wrapped under a `contacts` key or as a bare sequence — so sets
//! produced by other tools round-trip without rewriting. The directory
//! service never sees the wire shape.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{ContactDraft, ContactDto};
use crate::services::directory::ContactDirectory;
use crate::state::AppState;

/// Import payload: a record list either wrapped under a named container
/// key or bare. Untagged deserialization tries the wrapped form first and
/// falls back to the bare form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImportPayload {
    /// `{"contacts": [...]}`
    Wrapped { contacts: Vec<ContactDraft> },
    /// `[...]`
    Bare(Vec<ContactDraft>),
}

impl ImportPayload {
    /// Unwrap into the record list.
    #[must_use]
    pub fn into_contacts(self) -> Vec<ContactDraft> {
        match self {
            Self::Wrapped { contacts } | Self::Bare(contacts) => contacts,
        }
    }
}

/// Export every contact visible to the caller as a bare sequence of
/// portable records.
pub async fn export(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<Vec<ContactDto>>> {
    let directory = ContactDirectory::new(state.contacts());
    Ok(Json(directory.export_all(&caller).await?))
}

/// Atomically replace the caller's contact set with the payload.
pub async fn import(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(payload): Json<ImportPayload>,
) -> Result<StatusCode> {
    let contacts = payload.into_contacts();

    let directory = ContactDirectory::new(state.contacts());
    directory.replace_all(&caller, &contacts).await?;

    tracing::info!(
        owner = %caller.username,
        count = contacts.len(),
        "contact set replaced via import"
    );
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_form_parses() {
        let payload: ImportPayload = serde_json::from_str(
            r#"{"contacts":[{"first_name":"Jan","last_name":"Kowalski","email":"jan@example.com","phone":"123456789"}]}"#,
        )
        .unwrap();

        assert!(matches!(payload, ImportPayload::Wrapped { .. }));
        assert_eq!(payload.into_contacts().len(), 1);
    }

    #[test]
    fn test_bare_form_parses() {
        let payload: ImportPayload = serde_json::from_str(
            r#"[{"first_name":"Jan","last_name":"Kowalski","email":"jan@example.com","phone":"123456789"}]"#,
        )
        .unwrap();

        assert!(matches!(payload, ImportPayload::Bare(_)));
        assert_eq!(payload.into_contacts().len(), 1);
    }

    #[test]
    fn test_both_forms_yield_identical_records() {
        let record =
            r#"{"first_name":"Jan","last_name":"Kowalski","email":"jan@example.com","phone":"123456789"}"#;
        let wrapped: ImportPayload =
            serde_json::from_str(&format!(r#"{{"contacts":[{record}]}}"#)).unwrap();
        let bare: ImportPayload = serde_json::from_str(&format!("[{record}]")).unwrap();

        let wrapped = wrapped.into_contacts();
        let bare = bare.into_contacts();
        assert_eq!(wrapped.len(), bare.len());
        assert_eq!(wrapped[0].first_name, bare[0].first_name);
        assert_eq!(wrapped[0].phone, bare[0].phone);
    }

    #[test]
    fn test_empty_sequences_parse() {
        assert!(matches!(
            serde_json::from_str::<ImportPayload>("[]").unwrap(),
            ImportPayload::Bare(_)
        ));
        assert!(matches!(
            serde_json::from_str::<ImportPayload>(r#"{"contacts":[]}"#).unwrap(),
            ImportPayload::Wrapped { .. }
        ));
    }

    #[test]
    fn test_object_without_container_key_is_rejected() {
        assert!(serde_json::from_str::<ImportPayload>(r#"{"items":[]}"#).is_err());
    }
}
