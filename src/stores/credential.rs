//! Defines the trait for the external service that manages user credentials.

use async_trait::async_trait;
use thiserror::Error;

use super::UserId;

/// Handles account creation and password sign-in.
///
/// Passwords are forwarded to the credential service and never stored by the
/// application.
#[async_trait]
pub trait CredentialStore {
    /// Create an account for `email` secured with `password` and return the
    /// ID the service issued for it.
    async fn create_account(&self, email: &str, password: &str) -> Result<UserId, CredentialError>;

    /// Check `email` and `password` against the service and return the ID of
    /// the matching account.
    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, CredentialError>;
}

/// Errors that can occur while talking to the credential service.
#[derive(Debug, Error, PartialEq)]
pub enum CredentialError {
    /// An account already exists for the email address.
    #[error("the email is already registered")]
    EmailExists,

    /// The email address is not a well-formed address.
    #[error("the email address is invalid")]
    InvalidEmail,

    /// The email and password do not match an enabled account.
    ///
    /// The service reports separate codes for unknown emails, wrong passwords
    /// and disabled accounts; they are collapsed into this variant so that
    /// callers cannot leak which part was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The service did not respond within the time limit. The operation may
    /// be retried.
    #[error("the credential service timed out")]
    Timeout,

    /// An unhandled/unexpected error from the credential service.
    #[error("an unexpected credential service error occurred: {0}")]
    Backend(String),
}

impl From<reqwest::Error> for CredentialError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            CredentialError::Timeout
        } else {
            CredentialError::Backend(error.to_string())
        }
    }
}
