//! Contains traits for the external services that hold the application's
//! users, expenses and credentials, and the Firebase implementations of those
//! traits.

use thiserror::Error;

mod credential;
mod expense;
mod user;

pub mod firebase;

pub use credential::{CredentialError, CredentialStore};
pub use expense::{DATE_FORMAT, Expense, ExpenseId, ExpenseStore, NewExpense};
pub use firebase::{
    FirebaseAuth, FirestoreClient, FirestoreExpenseStore, FirestoreUserStore, build_http_client,
};
pub use user::{User, UserId, UserStore};

/// Errors that can occur while reading from or writing to a document store.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// The requested document does not exist in the store.
    #[error("the requested document could not be found")]
    NotFound,

    /// The store did not respond within the time limit. The operation may be
    /// retried.
    #[error("the document store timed out")]
    Timeout,

    /// A stored document is missing a required field or holds a field of the
    /// wrong type, so it cannot be mapped onto a domain model.
    #[error("a stored document could not be read: {0}")]
    Malformed(String),

    /// A domain model could not be encoded for the wire.
    #[error("could not serialize a document: {0}")]
    Serialization(String),

    /// An unhandled/unexpected error from the document store.
    #[error("an unexpected document store error occurred: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Backend(error.to_string())
        }
    }
}
