//! Implements a struct that holds the state of the web server.

use std::marker::{Send, Sync};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::stores::{
    CredentialStore, ExpenseStore, UserStore,
    firebase::{FirebaseAuth, FirestoreExpenseStore, FirestoreUserStore},
};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState<C, U, E>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The store that verifies emails and passwords.
    pub credential_store: C,
    /// The store for user profiles.
    pub user_store: U,
    /// The store for user [expenses](crate::stores::Expense).
    pub expense_store: E,
}

impl<C, U, E> AppState<C, U, E>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(cookie_secret: &str, credential_store: C, user_store: U, expense_store: E) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            credential_store,
            user_store,
            expense_store,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<C, U, E> FromRef<AppState<C, U, E>> for Key
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    fn from_ref(state: &AppState<C, U, E>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

/// The [AppState] backed by the Firebase services.
pub type FirebaseAppState = AppState<FirebaseAuth, FirestoreUserStore, FirestoreExpenseStore>;
