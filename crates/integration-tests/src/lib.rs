//! Integration tests for Rolodex.
//!
//! # Running Tests
//!
//! ```bash
//! # With PostgreSQL running, apply migrations
//! cargo run -p rolodex-cli -- migrate
//!
//! # Start the server
//! cargo run -p rolodex-server
//!
//! # Run integration tests
//! cargo test -p rolodex-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login, and identity resolution
//! - `contacts_api` - Ownership-scoped CRUD and the export/import surface
//!
//! Tests register throwaway users with random suffixes so repeated runs
//! against the same database do not collide.
