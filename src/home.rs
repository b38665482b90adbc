//! Defines the home page shown after logging in.

use axum::{
    Extension,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    session::Session,
};

/// Display the home page for the logged-in user.
pub async fn get_home_page(Extension(session): Extension<Session>) -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Welcome, " (session.username) "!" }

            ul class="space-y-2"
            {
                li { a href=(endpoints::ADD_EXPENSE_VIEW) class=(LINK_STYLE) { "Add an expense" } }
                li { a href=(endpoints::EXPENSES_VIEW) class=(LINK_STYLE) { "View your expenses" } }
                li { a href=(endpoints::LOG_OUT) class=(LINK_STYLE) { "Log out" } }
            }
        }
    };

    base("Home", &content).into_response()
}

#[cfg(test)]
mod home_page_tests {
    use axum::{Extension, http::StatusCode};

    use crate::{
        endpoints,
        session::Session,
        test_utils::{assert_valid_html, get_test_user, parse_html_document},
    };

    use super::get_home_page;

    #[tokio::test]
    async fn home_page_greets_user_and_links_to_expense_pages() {
        let session = Session::new(get_test_user());

        let response = get_home_page(Extension(session)).await;

        assert_eq!(response.status(), StatusCode::OK);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let h1_selector = scraper::Selector::parse("h1").unwrap();
        let headings = document.select(&h1_selector).collect::<Vec<_>>();
        assert_eq!(headings.len(), 1, "want 1 h1, got {}", headings.len());
        let heading_text = headings.first().unwrap().text().collect::<String>();
        assert!(
            heading_text.contains("alice"),
            "want greeting with username, got {heading_text:?}"
        );

        let link_selector = scraper::Selector::parse("a[href]").unwrap();
        let hrefs = document
            .select(&link_selector)
            .filter_map(|link| link.value().attr("href"))
            .collect::<Vec<_>>();

        for endpoint in [
            endpoints::ADD_EXPENSE_VIEW,
            endpoints::EXPENSES_VIEW,
            endpoints::LOG_OUT,
        ] {
            assert!(
                hrefs.contains(&endpoint),
                "want link to {endpoint}, got {hrefs:?}"
            );
        }
    }
}
