//! Renders the logged-in user's spending over time as a PNG line chart.

use axum::{
    Extension,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use charming::{
    Chart, ImageFormat, ImageRenderer,
    component::{Axis, Grid, Title},
    element::{AxisType, SplitLine, Symbol},
    series::Line,
};

use crate::{
    AppState, Error,
    session::Session,
    stores::{CredentialStore, DATE_FORMAT, Expense, ExpenseStore, UserStore},
};

const CHART_TITLE: &str = "Expense Trends Over Time";
const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 400;

/// Sort expenses by date, oldest first.
///
/// Expenses on the same date keep the order they were given in, so the line
/// passes through same-day expenses in the order they were stored.
fn sort_by_date(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Format the expense dates as chart axis labels.
fn date_labels(expenses: &[Expense]) -> Result<Vec<String>, Error> {
    expenses
        .iter()
        .map(|expense| {
            expense
                .date
                .format(DATE_FORMAT)
                .map_err(|error| Error::ChartRender(error.to_string()))
        })
        .collect()
}

fn build_chart(labels: Vec<String>, amounts: Vec<f64>) -> Chart {
    Chart::new()
        .title(Title::new().text(CHART_TITLE))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name("Date")
                .data(labels)
                .split_line(SplitLine::new().show(true)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("Amount ($)")
                .split_line(SplitLine::new().show(true)),
        )
        .series(
            Line::new()
                .name("Expenses")
                .symbol(Symbol::Circle)
                .show_symbol(true)
                .data(amounts),
        )
}

/// Render the logged-in user's expenses as a PNG line chart.
///
/// A user with no expenses gets a chart with an empty line rather than an
/// error.
///
/// # Errors
///
/// Returns an [Error::Store] if the expenses could not be fetched from the
/// document store, or an [Error::ChartRender] if the chart could not be
/// rendered as a PNG.
pub async fn get_expense_chart<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let mut expenses = state.expense_store.for_user(&session.user_id).await?;
    sort_by_date(&mut expenses);

    let labels = date_labels(&expenses)?;
    let amounts = expenses.iter().map(|expense| expense.amount).collect();
    let chart = build_chart(labels, amounts);

    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    let png = renderer
        .render_format(ImageFormat::Png, &chart)
        .map_err(|error| Error::ChartRender(error.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

#[cfg(test)]
mod sort_tests {
    use time::macros::date;

    use crate::stores::{Expense, ExpenseId, UserId};

    use super::{date_labels, sort_by_date};

    fn get_test_expense(id: &str, title: &str, date: time::Date) -> Expense {
        Expense {
            id: ExpenseId::new(id),
            user_id: UserId::new("abc123"),
            title: title.to_owned(),
            amount: 10.0,
            date,
        }
    }

    #[test]
    fn sorts_expenses_by_date_ascending() {
        let mut expenses = vec![
            get_test_expense("expense-1", "Dinner", date!(2025 - 03 - 09)),
            get_test_expense("expense-2", "Breakfast", date!(2025 - 03 - 02)),
            get_test_expense("expense-3", "Lunch", date!(2025 - 03 - 05)),
        ];

        sort_by_date(&mut expenses);

        let labels = date_labels(&expenses).unwrap();
        assert_eq!(labels, vec!["2025-03-02", "2025-03-05", "2025-03-09"]);
    }

    #[test]
    fn expenses_on_the_same_date_keep_their_stored_order() {
        let mut expenses = vec![
            get_test_expense("expense-1", "Dinner", date!(2025 - 03 - 09)),
            get_test_expense("expense-2", "Breakfast", date!(2025 - 03 - 02)),
            get_test_expense("expense-3", "Lunch", date!(2025 - 03 - 02)),
        ];

        sort_by_date(&mut expenses);

        let titles: Vec<&str> = expenses
            .iter()
            .map(|expense| expense.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Breakfast", "Lunch", "Dinner"]);
    }
}
