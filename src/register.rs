//! This file defines the routes for displaying the registration page and
//! handling registration requests.

use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
        log_in_register, password_input,
    },
    stores::{CredentialError, CredentialStore, ExpenseStore, User, UserStore},
};

/// The minimum number of characters a password must have.
const PASSWORD_MIN_LENGTH: u8 = 6;

pub const PASSWORD_TOO_SHORT_ERROR_MSG: &str = "Password should be at least 6 characters long.";
pub const USERNAME_TAKEN_ERROR_MSG: &str = "Username already taken";
pub const EMAIL_TAKEN_ERROR_MSG: &str = "Email is already registered.";
pub const INVALID_EMAIL_ERROR_MSG: &str = "Invalid email address.";

fn registration_form(
    username: &str,
    email: &str,
    password_error_message: Option<&str>,
    form_error_message: Option<&str>,
) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::REGISTER_VIEW)
            class="space-y-4 md:space-y-6"
        {
            @if let Some(form_error_message) = form_error_message {
                p class="text-red-500 text-base" { (form_error_message) }
            }

            div
            {
                label for="username" class=(FORM_LABEL_STYLE) { "Username" }

                input
                    type="text"
                    name="username"
                    id="username"
                    value=(username)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

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

            (password_input("", PASSWORD_MIN_LENGTH, password_error_message))

            button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE) { "Register" }

            p class="text-sm font-light text-gray-500"
            {
                "Already have an account? "

                a href=(endpoints::LOG_IN_VIEW) tabindex="0" class=(LINK_STYLE) { "Log in here" }
            }
        }
    }
}

fn registration_page(
    user_data: &RegisterForm,
    password_error_message: Option<&str>,
    form_error_message: Option<&str>,
) -> Response {
    let registration_form = registration_form(
        &user_data.username,
        &user_data.email,
        password_error_message,
        form_error_message,
    );
    let content = log_in_register("Create an account", &registration_form);

    base("Register", &content).into_response()
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    registration_page(&RegisterForm::default(), None, None)
}

/// The raw data entered by the user in the registration form.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    /// The display name for the new account.
    pub username: String,
    /// The email address to sign in with.
    pub email: String,
    /// The password entered during registration.
    pub password: String,
}

/// Handler for registration requests via the POST method.
///
/// On success the account is created with the credential service, the user's
/// profile is stored, and the client is redirected to the log-in page.
/// Otherwise, the registration page is returned with an error message
/// explaining the problem.
pub async fn post_register<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    Form(user_data): Form<RegisterForm>,
) -> Response
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    match register_user(&state.credential_store, &state.user_store, &user_data).await {
        Ok(()) => Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
        Err(Error::PasswordTooShort) => {
            registration_page(&user_data, Some(PASSWORD_TOO_SHORT_ERROR_MSG), None)
        }
        Err(Error::UsernameTaken) => {
            registration_page(&user_data, None, Some(USERNAME_TAKEN_ERROR_MSG))
        }
        Err(Error::Credential(CredentialError::EmailExists)) => {
            registration_page(&user_data, None, Some(EMAIL_TAKEN_ERROR_MSG))
        }
        Err(Error::Credential(CredentialError::InvalidEmail)) => {
            registration_page(&user_data, None, Some(INVALID_EMAIL_ERROR_MSG))
        }
        Err(error) => {
            tracing::error!("Unhandled error while registering a user: {error}");
            registration_page(
                &user_data,
                None,
                Some(&format!("Registration failed: {error}")),
            )
        }
    }
}

/// Create the account and the user's profile.
///
/// The password length is checked before the username so that a user fixing
/// one problem at a time is told about the password first.
async fn register_user<C, U>(
    credential_store: &C,
    user_store: &U,
    user_data: &RegisterForm,
) -> Result<(), Error>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
{
    if user_data.password.chars().count() < PASSWORD_MIN_LENGTH as usize {
        return Err(Error::PasswordTooShort);
    }

    if user_store.username_exists(&user_data.username).await? {
        return Err(Error::UsernameTaken);
    }

    let user_id = credential_store
        .create_account(&user_data.email, &user_data.password)
        .await?;

    user_store
        .create(User {
            id: user_id,
            username: user_data.username.clone(),
            email: user_data.email.clone(),
        })
        .await?;

    Ok(())
}
