//! The credential store backed by the Firebase Identity Toolkit REST API.

use async_trait::async_trait;
use reqwest::Client;

use crate::stores::{CredentialError, CredentialStore, UserId};

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

const SIGN_UP: &str = "accounts:signUp";
const SIGN_IN: &str = "accounts:signInWithPassword";

/// Manages accounts through the Firebase Identity Toolkit API.
///
/// Passwords pass straight through to the API; the application never stores
/// or hashes them itself.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    client: Client,
    api_key: String,
}

impl FirebaseAuth {
    /// Create a new credential store that authenticates with `api_key`.
    ///
    /// `client` should have a request timeout set, e.g. via
    /// [build_http_client](super::build_http_client), so that sign-in
    /// attempts cannot hang indefinitely.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Post `email` and `password` to the Identity Toolkit `method` and
    /// return the account ID from the response.
    async fn request(
        &self,
        method: &str,
        email: &str,
        password: &str,
    ) -> Result<UserId, CredentialError> {
        let url = format!("{IDENTITY_TOOLKIT_URL}/{method}?key={}", self.api_key);
        let body = wire::CredentialsRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        if response.status().is_success() {
            let account: wire::AccountResponse = response.json().await?;
            return Ok(UserId::new(account.local_id));
        }

        let status = response.status();

        match response.json::<wire::ErrorResponse>().await {
            Ok(body) => Err(classify_error_code(&body.error.message)),
            Err(_) => Err(CredentialError::Backend(format!(
                "HTTP {}",
                status.as_u16()
            ))),
        }
    }
}

#[async_trait]
impl CredentialStore for FirebaseAuth {
    async fn create_account(&self, email: &str, password: &str) -> Result<UserId, CredentialError> {
        self.request(SIGN_UP, email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, CredentialError> {
        self.request(SIGN_IN, email, password).await
    }
}

/// Map an Identity Toolkit error code onto a [CredentialError].
///
/// Some codes carry a detail suffix, e.g. "WEAK_PASSWORD : Password should be
/// at least 6 characters", so codes are matched by prefix.
fn classify_error_code(code: &str) -> CredentialError {
    if code.starts_with("EMAIL_EXISTS") {
        CredentialError::EmailExists
    } else if code.starts_with("INVALID_EMAIL") || code.starts_with("MISSING_EMAIL") {
        CredentialError::InvalidEmail
    } else if code.starts_with("EMAIL_NOT_FOUND")
        || code.starts_with("INVALID_PASSWORD")
        || code.starts_with("INVALID_LOGIN_CREDENTIALS")
        || code.starts_with("USER_DISABLED")
    {
        CredentialError::InvalidCredentials
    } else {
        CredentialError::Backend(code.to_owned())
    }
}

// Wire types for the Identity Toolkit API.
mod wire {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize)]
    pub struct CredentialsRequest<'a> {
        pub email: &'a str,
        pub password: &'a str,
        #[serde(rename = "returnSecureToken")]
        pub return_secure_token: bool,
    }

    #[derive(Deserialize)]
    pub struct AccountResponse {
        #[serde(rename = "localId")]
        pub local_id: String,
    }

    #[derive(Deserialize)]
    pub struct ErrorResponse {
        pub error: ErrorBody,
    }

    #[derive(Deserialize)]
    pub struct ErrorBody {
        pub message: String,
    }
}

#[cfg(test)]
mod firebase_auth_tests {
    use crate::stores::CredentialError;

    use super::{classify_error_code, wire};

    #[test]
    fn classifies_email_exists() {
        assert_eq!(
            classify_error_code("EMAIL_EXISTS"),
            CredentialError::EmailExists
        );
    }

    #[test]
    fn classifies_invalid_email() {
        assert_eq!(
            classify_error_code("INVALID_EMAIL"),
            CredentialError::InvalidEmail
        );
    }

    #[test]
    fn collapses_sign_in_failures_into_invalid_credentials() {
        let codes = [
            "EMAIL_NOT_FOUND",
            "INVALID_PASSWORD",
            "INVALID_LOGIN_CREDENTIALS",
            "USER_DISABLED",
        ];

        for code in codes {
            assert_eq!(
                classify_error_code(code),
                CredentialError::InvalidCredentials,
                "code {code} should map to InvalidCredentials"
            );
        }
    }

    #[test]
    fn classifies_codes_with_detail_suffix() {
        assert_eq!(
            classify_error_code(
                "INVALID_LOGIN_CREDENTIALS : The supplied auth credential is incorrect."
            ),
            CredentialError::InvalidCredentials
        );
    }

    #[test]
    fn unknown_code_is_a_backend_error() {
        assert_eq!(
            classify_error_code("TOO_MANY_ATTEMPTS_TRY_LATER"),
            CredentialError::Backend("TOO_MANY_ATTEMPTS_TRY_LATER".to_owned())
        );
    }

    #[test]
    fn deserialises_account_response() {
        let json = r#"{"kind":"identitytoolkit#SignupNewUserResponse","idToken":"token","email":"hello@world.com","refreshToken":"refresh","expiresIn":"3600","localId":"u1b2c3"}"#;

        let account: wire::AccountResponse = serde_json::from_str(json).unwrap();

        assert_eq!(account.local_id, "u1b2c3");
    }

    #[test]
    fn deserialises_error_response() {
        let json = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[{"message":"EMAIL_EXISTS","domain":"global","reason":"invalid"}]}}"#;

        let body: wire::ErrorResponse = serde_json::from_str(json).unwrap();

        assert_eq!(body.error.message, "EMAIL_EXISTS");
    }
}
