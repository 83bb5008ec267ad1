//! In-memory store backend.
//!
//! Used by the test suite so service behavior can be exercised without a
//! database. Semantics match the `PostgreSQL` backend: ids are assigned in
//! insertion order, username uniqueness is enforced, and `replace_by_owner`
//! swaps the owner's set inside a single write-lock critical section so no
//! reader observes the intermediate empty state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use rolodex_core::{ContactId, UserId};

use super::{ContactStore, StoreError, UserStore};
use crate::models::{Contact, NewContact, NewUser, UserRecord};

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
struct UserState {
    next_id: i32,
    by_username: BTreeMap<String, UserRecord>,
}

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserStore {
    state: RwLock<UserState>,
}

impl MemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(state.by_username.get(username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.by_username.contains_key(&user.username) {
            return Err(StoreError::Conflict("username already exists".to_owned()));
        }

        state.next_id += 1;
        let record = UserRecord {
            id: UserId::new(state.next_id),
            username: user.username.clone(),
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        state.by_username.insert(user.username, record.clone());

        Ok(record)
    }
}

// =============================================================================
// Contacts
// =============================================================================

#[derive(Default)]
struct ContactState {
    next_id: i32,
    by_id: BTreeMap<ContactId, Contact>,
}

impl ContactState {
    fn insert(&mut self, contact: NewContact) -> Contact {
        self.next_id += 1;
        let stored = Contact {
            id: ContactId::new(self.next_id),
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            owner_username: contact.owner_username,
            created_at: Utc::now(),
        };
        self.by_id.insert(stored.id, stored.clone());
        stored
    }
}

/// In-memory contact store.
#[derive(Default)]
pub struct MemoryContactStore {
    state: RwLock<ContactState>,
}

impl MemoryContactStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        let state = self.state.read().await;
        Ok(state.by_id.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Contact>, StoreError> {
        let state = self.state.read().await;
        Ok(state.by_id.values().cloned().collect())
    }

    async fn find_by_owner(&self, owner: &str) -> Result<Vec<Contact>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .by_id
            .values()
            .filter(|c| c.owner_username == owner)
            .cloned()
            .collect())
    }

    async fn insert(&self, contact: NewContact) -> Result<Contact, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.insert(contact))
    }

    async fn update(&self, contact: Contact) -> Result<Contact, StoreError> {
        let mut state = self.state.write().await;
        state.by_id.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.by_id.remove(&id).is_some())
    }

    async fn replace_by_owner(
        &self,
        owner: &str,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, StoreError> {
        let mut state = self.state.write().await;

        state.by_id.retain(|_, c| c.owner_username != owner);

        let stored = contacts
            .into_iter()
            .map(|contact| state.insert(contact))
            .collect();

        Ok(stored)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rolodex_core::{Email, Phone, Role};

    fn draft(owner: &str, n: u32) -> NewContact {
        NewContact {
            first_name: format!("First{n}"),
            last_name: format!("Last{n}"),
            email: Email::parse(&format!("c{n}@example.com")).unwrap(),
            phone: Phone::parse("123456789").unwrap(),
            owner_username: owner.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = MemoryContactStore::new();
        let a = store.insert(draft("alice", 1)).await.unwrap();
        let b = store.insert(draft("alice", 2)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_user_insert_conflict() {
        let store = MemoryUserStore::new();
        let user = NewUser {
            username: "alice".to_owned(),
            password_hash: "hash".to_owned(),
            role: Role::Standard,
        };
        store.insert(user.clone()).await.unwrap();
        let err = store.insert(user).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_replace_by_owner_only_touches_owner() {
        let store = MemoryContactStore::new();
        store.insert(draft("alice", 1)).await.unwrap();
        store.insert(draft("bob", 2)).await.unwrap();

        let stored = store
            .replace_by_owner("alice", vec![draft("alice", 3), draft("alice", 4)])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);

        let bobs = store.find_by_owner("bob").await.unwrap();
        assert_eq!(bobs.len(), 1);

        let alices = store.find_by_owner("alice").await.unwrap();
        assert_eq!(alices.len(), 2);
        assert!(alices.iter().all(|c| c.first_name != "First1"));
    }

    #[tokio::test]
    async fn test_delete_absent_returns_false() {
        let store = MemoryContactStore::new();
        assert!(!store.delete(ContactId::new(99)).await.unwrap());
    }
}
