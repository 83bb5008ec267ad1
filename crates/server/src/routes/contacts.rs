//! Contact CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use rolodex_core::ContactId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::{Contact, ContactDraft};
use crate::services::directory::ContactDirectory;
use crate::state::AppState;

/// List contacts visible to the caller.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<Json<Vec<Contact>>> {
    let directory = ContactDirectory::new(state.contacts());
    Ok(Json(directory.list(&caller).await?))
}

/// Create a contact owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Json(draft): Json<ContactDraft>,
) -> Result<Json<Contact>> {
    let directory = ContactDirectory::new(state.contacts());
    let stored = directory.add(&caller, &draft).await?;

    tracing::info!(contact_id = %stored.id, owner = %caller.username, "contact created");
    Ok(Json(stored))
}

/// Fetch a single contact.
pub async fn get_one(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<Contact>> {
    let directory = ContactDirectory::new(state.contacts());
    Ok(Json(directory.get(&caller, ContactId::new(id)).await?))
}

/// Overwrite a contact's fields.
pub async fn update_one(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<i32>,
    Json(draft): Json<ContactDraft>,
) -> Result<Json<Contact>> {
    let directory = ContactDirectory::new(state.contacts());
    Ok(Json(
        directory.update(&caller, ContactId::new(id), &draft).await?,
    ))
}

/// Delete a contact.
pub async fn delete_one(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let directory = ContactDirectory::new(state.contacts());
    let deleted = directory.delete(&caller, ContactId::new(id)).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}
