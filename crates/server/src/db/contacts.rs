//! Contact store: the persistence contract for contact records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use rolodex_core::{ContactId, Email, Phone};

use super::StoreError;
use crate::models::{Contact, NewContact};

/// Persistence contract for contact records.
///
/// Stores own no policy; ownership and validation are enforced by the
/// directory service before anything reaches this layer.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Look up a contact by id.
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, StoreError>;

    /// All contacts, in store order.
    async fn find_all(&self) -> Result<Vec<Contact>, StoreError>;

    /// All contacts owned by the given username, in store order.
    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError>;

    /// Persist a new contact, assigning its id.
    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError>;

    /// Overwrite an existing contact in place (matched by id).
    async fn update(&self, contact: Contact) -> Result<Contact, StoreError>;

    /// Delete a contact. Returns `false` if the id was absent.
    async fn delete(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Atomically replace every contact owned by `owner` with `contacts`.
    ///
    /// Delete-all-then-insert-all is a single unit: concurrent readers
    /// never observe the empty intermediate state, and a failure leaves
    /// the previous set intact.
    async fn replace_by_owner(
        &self,
        owner: &str,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, StoreError>;
}

// =============================================================================
// PostgreSQL implementation
// =============================================================================

/// Internal row type for `PostgreSQL` contact queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    owner_username: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = StoreError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| StoreError::DataCorruption(format!("invalid email in database: {e}")))?;
        let phone = Phone::parse(&row.phone)
            .map_err(|e| StoreError::DataCorruption(format!("invalid phone in database: {e}")))?;

        Ok(Self {
            id: ContactId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email,
            phone,
            owner_username: row.owner_username,
            created_at: row.created_at,
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, first_name, last_name, email, phone, owner_username, created_at";

/// `PostgreSQL`-backed contact store.
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    /// Create a new contact store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<ContactRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM contact ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<ContactRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact WHERE owner_username = $1 ORDER BY id"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let row: ContactRow = sqlx::query_as(&format!(
            "INSERT INTO contact (first_name, last_name, email, phone, owner_username) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .bind(&contact.owner_username)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn update(&self, contact: Contact) -> Result<Contact, StoreError> {
        let row: ContactRow = sqlx::query_as(&format!(
            "UPDATE contact \
             SET first_name = $2, last_name = $3, email = $4, phone = $5 \
             WHERE id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(contact.id.as_i32())
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(contact.email.as_str())
        .bind(contact.phone.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contact WHERE id = $1")
            .bind(id.as_i32())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn replace_by_owner(
        &self,
        owner: &str,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM contact WHERE owner_username = $1")
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        let mut stored = Vec::with_capacity(contacts.len());
        for contact in contacts {
            let row: ContactRow = sqlx::query_as(&format!(
                "INSERT INTO contact (first_name, last_name, email, phone, owner_username) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING {SELECT_COLUMNS}"
            ))
            .bind(&contact.first_name)
            .bind(&contact.last_name)
            .bind(contact.email.as_str())
            .bind(contact.phone.as_str())
            .bind(&contact.owner_username)
            .fetch_one(&mut *tx)
            .await?;

            stored.push(row.try_into()?);
        }

        tx.commit().await?;

        Ok(stored)
    }
}
