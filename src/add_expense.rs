//! This file defines the routes for displaying the add expense page and
//! handling new expense submissions.

use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    alert::success_alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base,
    },
    session::Session,
    stores::{CredentialStore, DATE_FORMAT, ExpenseStore, NewExpense, UserStore},
};

pub const EXPENSE_ADDED_MSG: &str = "Expense added successfully!";
pub const INVALID_AMOUNT_ERROR_MSG: &str = "Please enter a valid amount.";
pub const INVALID_DATE_ERROR_MSG: &str = "Please enter a valid date in the format YYYY-MM-DD.";

fn add_expense_page(
    session: &Session,
    expense_data: &AddExpenseForm,
    success_message: Option<&str>,
    error_message: Option<&str>,
) -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold" { "Add an expense" }

            p class="text-sm text-gray-500 mb-4" { "Logged in as " (session.username) }

            @if let Some(success_message) = success_message {
                (success_alert(success_message))
            }

            form
                method="post"
                action=(endpoints::ADD_EXPENSE_VIEW)
                class="w-full max-w-md space-y-4"
            {
                @if let Some(error_message) = error_message {
                    p class="text-red-500 text-base" { (error_message) }
                }

                div
                {
                    label for="title" class=(FORM_LABEL_STYLE) { "Title" }

                    input
                        type="text"
                        name="title"
                        id="title"
                        value=(expense_data.title)
                        placeholder="Groceries"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    input
                        type="number"
                        name="amount"
                        id="amount"
                        value=(expense_data.amount)
                        step="0.01"
                        placeholder="0.00"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        type="date"
                        name="date"
                        id="date"
                        value=(expense_data.date)
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                button type="submit" tabindex="0" class=(BUTTON_PRIMARY_STYLE) { "Add expense" }
            }

            p class="mt-4"
            {
                a href=(endpoints::EXPENSES_VIEW) class=(LINK_STYLE) { "View your expenses" }
            }
        }
    };

    base("Add Expense", &content).into_response()
}

/// Display the page for adding an expense.
pub async fn get_add_expense_page(Extension(session): Extension<Session>) -> Response {
    add_expense_page(&session, &AddExpenseForm::default(), None, None)
}

/// The raw data entered by the user in the add expense form.
///
/// The amount and date are taken as strings and parsed by the handler so that
/// bad input can be reported on the form instead of failing extraction.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AddExpenseForm {
    /// A short description of the expense, e.g. "Groceries".
    pub title: String,
    /// The amount spent, e.g. "42.50".
    pub amount: String,
    /// The date of the expense in the format YYYY-MM-DD.
    pub date: String,
}

fn parse_amount(amount: &str) -> Result<f64, Error> {
    let parsed = amount
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidAmount(amount.to_owned()))?;

    // f64 parsing accepts "NaN", "inf" and negative numbers, none of which
    // is a valid amount to have spent.
    if !parsed.is_finite() || parsed < 0.0 {
        return Err(Error::InvalidAmount(amount.to_owned()));
    }

    Ok(parsed)
}

fn parse_date(date: &str) -> Result<Date, Error> {
    Date::parse(date.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(date.to_owned()))
}

/// Handler for new expenses submitted via the POST method.
///
/// On success the expense is stored and the page is displayed again with a
/// success message and an empty form. If the amount or date cannot be parsed,
/// the form is returned with the entered values and an error message.
pub async fn post_add_expense<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    Extension(session): Extension<Session>,
    Form(expense_data): Form<AddExpenseForm>,
) -> Result<Response, Error>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let amount = match parse_amount(&expense_data.amount) {
        Ok(amount) => amount,
        Err(_) => {
            return Ok(add_expense_page(
                &session,
                &expense_data,
                None,
                Some(INVALID_AMOUNT_ERROR_MSG),
            ));
        }
    };

    let date = match parse_date(&expense_data.date) {
        Ok(date) => date,
        Err(_) => {
            return Ok(add_expense_page(
                &session,
                &expense_data,
                None,
                Some(INVALID_DATE_ERROR_MSG),
            ));
        }
    };

    state
        .expense_store
        .create(NewExpense {
            user_id: session.user_id.clone(),
            title: expense_data.title.clone(),
            amount,
            date,
        })
        .await?;

    Ok(add_expense_page(
        &session,
        &AddExpenseForm::default(),
        Some(EXPENSE_ADDED_MSG),
        None,
    ))
}
