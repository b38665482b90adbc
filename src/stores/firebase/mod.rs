//! Firebase implementations of the store traits.
//!
//! Two REST services are involved: the Identity Toolkit API for credentials
//! ([FirebaseAuth]) and Cloud Firestore for documents ([FirestoreClient] plus
//! the domain stores built on top of it).

use std::time::Duration;

mod auth;
mod expense;
mod firestore;
mod user;

pub use auth::FirebaseAuth;
pub use expense::FirestoreExpenseStore;
pub use firestore::FirestoreClient;
pub use user::FirestoreUserStore;

/// The time limit on every request to the Firebase REST APIs.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by the Firebase stores.
///
/// Every request made through this client is cut off after
/// [REQUEST_TIMEOUT], which the stores report as their retryable timeout
/// error.
///
/// # Errors
///
/// Returns the underlying builder error if the TLS backend cannot be
/// initialised.
pub fn build_http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}
