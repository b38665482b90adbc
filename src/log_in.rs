//! This file defines the routes for displaying the log-in page and handling
//! log-in requests.

use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, endpoints,
    alert::error_alert,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base, log_in_register, password_input},
    internal_server_error::InternalServerError,
    session::{Session, invalidate_session_cookie, set_session_cookie},
    stores::{CredentialError, CredentialStore, ExpenseStore, UserStore},
};

pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Login Failed: Invalid email or password";
pub const LOG_IN_FAILED_ERROR_MSG: &str =
    "Login Failed: Something went wrong. Please try again later.";

fn log_in_form(email: &str, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::LOG_IN_VIEW)
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }

                input
                    type="email"
                    name="email"
                    id="email"
                    value=(email)
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            (password_input("", 0, error_message))

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE) { "Log in" }

            p class="text-sm font-light text-gray-500"
            {
                "Don't have an account? "

                a href=(endpoints::REGISTER_VIEW) tabindex="0" class=(LINK_STYLE) { "Register here" }
            }
        }
    }
}

fn log_in_page(email: &str, notice: Option<&str>, error_message: Option<&str>) -> Response {
    let log_in_form = log_in_form(email, error_message);
    let content = html! {
        @if let Some(notice) = notice {
            (error_alert(notice, ""))
        }

        (log_in_form)
    };
    let content = log_in_register("Log in to your account", &content);

    base("Log In", &content).into_response()
}

/// The query parameters accepted by the log-in page.
#[derive(Deserialize)]
pub struct NoticeQuery {
    /// A notice to display above the log-in form, e.g. after a redirect from
    /// a protected page.
    pub notice: Option<String>,
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<NoticeQuery>) -> Response {
    log_in_page("", query.notice.as_deref(), None)
}

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation
/// here since the credential service compares it against the stored password.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client
/// is redirected to the home page. Otherwise, the log-in page is returned
/// with an error message explaining the problem.
///
/// A sign-in that succeeds with the credential service but has no stored
/// profile is refused, since pages after log-in need the profile.
pub async fn post_log_in<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let user_id = match state
        .credential_store
        .sign_in(&user_data.email, &user_data.password)
        .await
    {
        Ok(user_id) => user_id,
        Err(CredentialError::InvalidCredentials) => {
            return log_in_page(&user_data.email, None, Some(INVALID_CREDENTIALS_ERROR_MSG));
        }
        Err(error) => {
            tracing::error!("Unhandled error while signing in: {error}");
            return log_in_page(&user_data.email, None, Some(LOG_IN_FAILED_ERROR_MSG));
        }
    };

    let user = match state.user_store.get(&user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::error!(
                "User {user_id} has an account but no stored profile. Refusing to log in."
            );
            return log_in_page(&user_data.email, None, Some(LOG_IN_FAILED_ERROR_MSG));
        }
        Err(error) => {
            tracing::error!("Unhandled error while fetching a user profile: {error}");
            return log_in_page(&user_data.email, None, Some(LOG_IN_FAILED_ERROR_MSG));
        }
    };

    match set_session_cookie(jar.clone(), &Session::new(user)) {
        Ok(updated_jar) => (updated_jar, Redirect::to(endpoints::HOME_VIEW)).into_response(),
        Err(error) => {
            tracing::error!("Error setting session cookie: {error}");
            (
                invalidate_session_cookie(jar),
                InternalServerError::default(),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod log_in_page_tests {
    use axum::{
        extract::Query,
        http::{StatusCode, header::CONTENT_TYPE},
    };

    use crate::{
        endpoints,
        test_utils::{assert_valid_html, parse_html_document},
    };

    use super::{NoticeQuery, get_log_in_page};

    #[tokio::test]
    async fn log_in_page_displays_form() {
        let response = get_log_in_page(Query(NoticeQuery { notice: None })).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form_selector = scraper::Selector::parse("form").unwrap();
        let forms = document.select(&form_selector).collect::<Vec<_>>();
        assert_eq!(forms.len(), 1, "want 1 form, got {}", forms.len());
        let form = forms.first().unwrap();
        assert_eq!(
            form.value().attr("action"),
            Some(endpoints::LOG_IN_VIEW),
            "want form with attribute action=\"{}\", got {:?}",
            endpoints::LOG_IN_VIEW,
            form.value().attr("action")
        );

        for selector_string in ["input[type=email]#email", "input[type=password]#password"] {
            let input_selector = scraper::Selector::parse(selector_string).unwrap();
            let inputs = form.select(&input_selector).collect::<Vec<_>>();
            assert_eq!(
                inputs.len(),
                1,
                "want 1 input matching {selector_string}, got {}",
                inputs.len()
            );
        }

        let register_link_selector = scraper::Selector::parse("a[href]").unwrap();
        let links = form.select(&register_link_selector).collect::<Vec<_>>();
        assert_eq!(links.len(), 1, "want 1 link, got {}", links.len());
        let link = links.first().unwrap();
        assert_eq!(
            link.value().attr("href"),
            Some(endpoints::REGISTER_VIEW),
            "want link to {}, got {:?}",
            endpoints::REGISTER_VIEW,
            link.value().attr("href")
        );
    }

    #[tokio::test]
    async fn log_in_page_displays_notice() {
        let notice = "Please log in to access this page.";

        let response = get_log_in_page(Query(NoticeQuery {
            notice: Some(notice.to_owned()),
        }))
        .await;

        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let alert_selector = scraper::Selector::parse("div[role=alert] p.font-medium").unwrap();
        let alerts = document.select(&alert_selector).collect::<Vec<_>>();
        assert_eq!(alerts.len(), 1, "want 1 alert, got {}", alerts.len());
        let alert_text = alerts.first().unwrap().text().collect::<String>();
        assert_eq!(alert_text.trim(), notice);
    }
}
