//! Outlay is a web app for recording day-to-day expenses and seeing how your
//! spending trends over time.
//!
//! This library provides an HTTP server that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod add_expense;
mod alert;
mod app_state;
mod auth_middleware;
mod config;
mod delete_expense;
mod endpoints;
mod expense_chart;
mod expenses;
mod home;
mod html;
mod internal_server_error;
mod log_in;
mod log_out;
mod logging;
mod not_found;
mod register;
mod routing;
mod session;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::{AppState, FirebaseAppState};
pub use config::Config;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
    stores::{CredentialError, StoreError},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The username requested during registration is already in use.
    #[error("the username is already taken")]
    UsernameTaken,

    /// The password provided during registration is shorter than the minimum
    /// length.
    #[error("the password is too short")]
    PasswordTooShort,

    /// The amount submitted for an expense could not be parsed as a number.
    #[error("could not parse \"{0}\" as an amount")]
    InvalidAmount(String),

    /// The date submitted for an expense could not be parsed.
    ///
    /// Dates are expected in the format YYYY-MM-DD.
    #[error("could not parse \"{0}\" as a date")]
    InvalidDate(String),

    /// The session cookie is missing from the cookie jar in the request.
    #[error("no session cookie in the cookie jar")]
    SessionMissing,

    /// The session cookie contents could not be serialised or parsed.
    #[error("could not read the session cookie: {0}")]
    SessionInvalid(String),

    /// The session cookie is valid but its expiry is in the past.
    #[error("the session has expired")]
    SessionExpired,

    /// The credential service rejected a sign-up or sign-in request.
    #[error("credential service error: {0}")]
    Credential(#[from] CredentialError),

    /// A request to the document store failed.
    #[error("document store error: {0}")]
    Store(#[from] StoreError),

    /// A required environment variable is not set.
    #[error("the environment variable '{0}' must be set")]
    MissingConfig(String),

    /// The expense chart could not be rendered as an image.
    #[error("could not render the expense chart: {0}")]
    ChartRender(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Store(StoreError::NotFound) => get_404_not_found_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
