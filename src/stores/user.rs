//! Defines the user model and the store trait for user profile documents.

use std::fmt::Display;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::StoreError;

/// A newtype wrapper for the opaque user IDs issued by the credential
/// service.
///
/// This helps disambiguate user IDs from other strings, leading to better
/// compile time errors, and more flexible generics that can have distinct
/// implementations for multiple ID types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserId(String);

impl UserId {
    /// Create a new user ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the user ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// The ID comes from the credential service; the username and email are the
/// profile fields the user chose at registration.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID, issued by the credential service.
    pub id: UserId,
    /// The display name shown on the user's pages. Unique across the app.
    pub username: String,
    /// The email address the user signs in with.
    pub email: String,
}

/// Handles the creation and retrieval of [User] profiles.
#[async_trait]
pub trait UserStore {
    /// Store the profile for a newly registered user, keyed by their ID.
    async fn create(&self, user: User) -> Result<(), StoreError>;

    /// Get a user by their ID, or `None` if no profile exists for that ID.
    async fn get(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Check whether any user has claimed `username`.
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;
}
