//! Defines the page that lists the logged-in user's expenses.
//!
//! Each row includes a form for deleting that expense, and the page embeds
//! the spending chart rendered by the chart endpoint.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    session::Session,
    stores::{CredentialStore, Expense, ExpenseStore, UserStore},
};

fn expense_row(expense: &Expense) -> Markup {
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, expense.id.as_str());

    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (expense.title) }
            td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
            td class=(TABLE_CELL_STYLE) { (expense.date) }
            td class=(TABLE_CELL_STYLE)
            {
                form method="post" action=(delete_url)
                {
                    button type="submit" class=(BUTTON_DELETE_STYLE) { "Delete" }
                }
            }
        }
    }
}

/// Render the expenses page, optionally with an alert banner above the table.
///
/// Expenses are listed in the order they appear in `expenses`.
pub fn expenses_page(expenses: &[Expense], alert: Option<Markup>) -> Response {
    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Your expenses" }

            @if let Some(alert) = alert
            {
                (alert)
            }

            table class="w-full max-w-2xl text-sm text-left text-gray-500"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for expense in expenses
                    {
                        (expense_row(expense))
                    }

                    @if expenses.is_empty()
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="4" class="px-6 py-4 text-center"
                            {
                                "No expenses recorded yet. "
                                a href=(endpoints::ADD_EXPENSE_VIEW) class=(LINK_STYLE)
                                {
                                    "Add your first expense"
                                }
                            }
                        }
                    }
                }
            }

            img
                class="mt-6"
                src=(endpoints::EXPENSE_CHART)
                alt="A line chart of spending over time"
                width="600"
                height="400";

            p class="mt-4"
            {
                a href=(endpoints::ADD_EXPENSE_VIEW) class=(LINK_STYLE) { "Add an expense" }
            }
        }
    };

    base("Expenses", &content).into_response()
}

/// Display the logged-in user's expenses.
///
/// # Errors
///
/// Returns an [Error::Store] if the expenses could not be fetched from the
/// document store.
pub async fn get_expenses_page<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let expenses = state.expense_store.for_user(&session.user_id).await?;

    Ok(expenses_page(&expenses, None))
}


#[cfg(test)]
mod get_expenses_page_tests {
    use axum::{Extension, extract::State};
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        AppState,
        session::Session,
        stores::{Expense, ExpenseId, UserId},
        test_utils::{
            FakeCredentialStore, FakeExpenseStore, FakeUserStore, assert_valid_html, get_test_user,
            parse_html_document,
        },
    };

    use super::get_expenses_page;

    type TestState = AppState<FakeCredentialStore, FakeUserStore, FakeExpenseStore>;

    fn get_test_state() -> TestState {
        AppState::new(
            "42",
            FakeCredentialStore::new(),
            FakeUserStore::new(),
            FakeExpenseStore::new(),
        )
    }

    #[tokio::test]
    async fn expenses_page_only_lists_the_sessions_expenses() {
        let state = get_test_state();
        let user = get_test_user();
        state.expense_store.add_expense(Expense {
            id: ExpenseId::new("expense-1"),
            user_id: user.id.clone(),
            title: "Groceries".to_owned(),
            amount: 42.5,
            date: date!(2025 - 03 - 05),
        });
        state.expense_store.add_expense(Expense {
            id: ExpenseId::new("expense-2"),
            user_id: UserId::new("someone-else"),
            title: "Cinema".to_owned(),
            amount: 25.0,
            date: date!(2025 - 03 - 06),
        });

        let response = get_expenses_page(State(state), Extension(Session::new(user)))
            .await
            .expect("the expenses page should render");

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let row_selector = Selector::parse("tbody tr").unwrap();
        let rows: Vec<String> = html
            .select(&row_selector)
            .map(|row| row.text().collect::<String>())
            .collect();

        assert_eq!(rows.len(), 1, "want 1 table row, got {}", rows.len());
        assert!(
            rows[0].contains("Groceries"),
            "want the user's own expense, got {:?}",
            rows[0]
        );
        assert!(
            !rows[0].contains("Cinema"),
            "another user's expense should not be listed"
        );
    }

    #[tokio::test]
    async fn expenses_page_preserves_store_order() {
        let state = get_test_state();
        let user = get_test_user();

        // Deliberately out of date order. The page must not re-sort.
        for (id, title, date) in [
            ("expense-1", "Dinner", date!(2025 - 03 - 09)),
            ("expense-2", "Breakfast", date!(2025 - 03 - 02)),
            ("expense-3", "Lunch", date!(2025 - 03 - 05)),
        ] {
            state.expense_store.add_expense(Expense {
                id: ExpenseId::new(id),
                user_id: user.id.clone(),
                title: title.to_owned(),
                amount: 10.0,
                date,
            });
        }

        let response = get_expenses_page(State(state), Extension(Session::new(user)))
            .await
            .expect("the expenses page should render");

        let html = parse_html_document(response).await;

        let cell_selector = Selector::parse("tbody td:first-child").unwrap();
        let titles: Vec<String> = html
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();

        assert_eq!(titles, vec!["Dinner", "Breakfast", "Lunch"]);
    }
}
