//! The user store backed by the `users` collection in Firestore.

use async_trait::async_trait;
use serde_json::json;

use crate::stores::{StoreError, User, UserId, UserStore};

use super::firestore::{Document, FirestoreClient, string_value};

const COLLECTION: &str = "users";

/// Handles the creation and retrieval of [User] profiles in Firestore.
///
/// Profiles are keyed by the ID the credential service issued, so one account
/// maps to at most one profile document.
#[derive(Debug, Clone)]
pub struct FirestoreUserStore {
    firestore: FirestoreClient,
}

impl FirestoreUserStore {
    /// Create a new user store backed by `firestore`.
    pub fn new(firestore: FirestoreClient) -> Self {
        Self { firestore }
    }
}

#[async_trait]
impl UserStore for FirestoreUserStore {
    async fn create(&self, user: User) -> Result<(), StoreError> {
        let fields = json!({
            "username": string_value(&user.username),
            "email": string_value(&user.email),
        });

        self.firestore.set(COLLECTION, user.id.as_str(), fields).await
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let Some(document) = self.firestore.get(COLLECTION, id.as_str()).await? else {
            return Ok(None);
        };

        map_user(&document).map(Some)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let documents = self
            .firestore
            .query_equal(COLLECTION, "username", username)
            .await?;

        Ok(!documents.is_empty())
    }
}

/// Map a `users` document onto the [User] model. The document ID doubles as
/// the user ID.
fn map_user(document: &Document) -> Result<User, StoreError> {
    match (
        document.string_field("username"),
        document.string_field("email"),
    ) {
        (Some(username), Some(email)) => Ok(User {
            id: UserId::new(document.id()),
            username: username.to_owned(),
            email: email.to_owned(),
        }),
        _ => Err(StoreError::Malformed(format!(
            "user document {} is missing username or email",
            document.id()
        ))),
    }
}
