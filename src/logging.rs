//! Middleware for logging requests and responses.

use axum::{
    body::Bytes,
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// The maximum number of body bytes logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is truncated
/// and the full body is logged at the `debug` level instead.
///
/// Password fields in form submissions are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = extract_parts_and_body_from_request(request).await;
    let body_text = String::from_utf8_lossy(&body).to_string();

    if parts.method == Method::POST
        && parts.headers.get(CONTENT_TYPE)
            == Some(&"application/x-www-form-urlencoded".parse().unwrap())
    {
        let display_text = redact_password(&body_text, "password");
        log_request(&parts, &display_text);
    } else {
        log_request(&parts, &body_text);
    }

    let request = Request::from_parts(parts, body.into());
    let response = next.run(request).await;

    // The body is kept as raw bytes so that binary responses, such as the
    // expense chart PNG, survive the trip through the logger.
    let (parts, body) = extract_parts_and_body_from_response(response).await;
    log_response(&parts, &String::from_utf8_lossy(&body));

    Response::from_parts(parts, body.into())
}

fn redact_password(form_text: &str, field_name: &str) -> String {
    let password_start = form_text.find(&format!("{}=", field_name));

    let start = match password_start {
        Some(password_pos) => password_pos,
        None => return form_text.to_string(),
    };

    let password_end = form_text[start..].find('&');
    let end = match password_end {
        Some(end) => start + end,
        None => form_text.len(),
    };
    let password = &form_text[start..end];

    form_text.replace(password, &format!("{}=********", field_name))
}

async fn extract_parts_and_body_from_request(
    request: Request,
) -> (axum::http::request::Parts, Bytes) {
    let (parts, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, body_bytes)
}

async fn extract_parts_and_body_from_response(
    response: Response,
) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (parts, body_bytes)
}

/// Truncate `text` to at most `limit` bytes without splitting a character.
///
/// Lossily decoded binary bodies contain multi-byte replacement characters,
/// so `limit` is not guaranteed to fall on a character boundary.
fn truncate_to_char_boundary(text: &str, limit: usize) -> &str {
    let mut end = limit;

    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(parts: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {}...",
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {}...",
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redact_password_tests {
    use super::redact_password;

    #[test]
    fn redacts_password_at_end_of_form() {
        let got = redact_password("email=alice%40example.com&password=hunter2", "password");

        assert_eq!(got, "email=alice%40example.com&password=********");
    }

    #[test]
    fn redacts_password_in_middle_of_form() {
        let got = redact_password(
            "username=alice&password=hunter2&email=alice%40example.com",
            "password",
        );

        assert_eq!(
            got,
            "username=alice&password=********&email=alice%40example.com"
        );
    }

    #[test]
    fn leaves_forms_without_a_password_unchanged() {
        let got = redact_password("title=Lunch&amount=12.50&date=2025-03-01", "password");

        assert_eq!(got, "title=Lunch&amount=12.50&date=2025-03-01");
    }
}
