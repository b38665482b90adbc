//! Loads the app's configuration from the environment.

use std::env;

use crate::Error;

/// The environment variable holding the cookie signing secret.
pub const SECRET_VAR: &str = "SECRET";

/// The environment variable holding the Firebase web API key.
pub const FIREBASE_API_KEY_VAR: &str = "FIREBASE_API_KEY";

/// The environment variable holding the Firebase project ID.
pub const FIREBASE_PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";

/// The configuration the server needs before it can start.
#[derive(Debug, Clone)]
pub struct Config {
    /// The secret the cookie signing key is derived from.
    pub secret: String,
    /// The web API key for the credential service.
    pub firebase_api_key: String,
    /// The ID of the Firebase project holding the app's documents.
    pub firebase_project_id: String,
}

impl Config {
    /// Load the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an [Error::MissingConfig] naming the first environment
    /// variable that is not set.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            secret: require_var(SECRET_VAR)?,
            firebase_api_key: require_var(FIREBASE_API_KEY_VAR)?,
            firebase_project_id: require_var(FIREBASE_PROJECT_ID_VAR)?,
        })
    }
}

fn require_var(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingConfig(name.to_owned()))
}
