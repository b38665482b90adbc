//! Defines the route handler for the 404 Not Found page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// Route handler for the 404 Not Found page.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Render the 404 Not Found page as a response.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(
            error_view(
                "Not Found",
                "404",
                "Something's missing.",
                "Sorry, we can't find that page. \
                You'll find lots to explore on the home page.",
            )
            .into_string(),
        ),
    )
        .into_response()
}
