use axum::{body::Body, response::Response};
use scraper::Html;

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = response.into_body();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Could not get response body");
    let text = String::from_utf8_lossy(&body).to_string();

    Html::parse_document(&text)
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

/// Assert that the response body shows `message` as a form error.
pub(crate) async fn assert_body_contains_message(response: Response<Body>, message: &str) {
    let html = parse_html_document(response).await;
    let error_selector = scraper::Selector::parse("p.text-red-500.text-base").unwrap();
    let error = html
        .select(&error_selector)
        .next()
        .expect("expected error message paragraph");
    let error_text = error.text().collect::<String>();

    assert_eq!(
        error_text.trim(),
        message,
        "response body should include error message \"{message}\", got \"{error_text}\""
    );
}

/// Assert that the response body shows `message` in an alert banner.
pub(crate) async fn assert_body_contains_alert(response: Response<Body>, message: &str) {
    let html = parse_html_document(response).await;
    let alert_selector = scraper::Selector::parse("div[role=alert] p.font-medium").unwrap();
    let alert = html
        .select(&alert_selector)
        .next()
        .expect("expected alert banner");
    let alert_text = alert.text().collect::<String>();

    assert_eq!(
        alert_text.trim(),
        message,
        "response body should include alert \"{message}\", got \"{alert_text}\""
    );
}
