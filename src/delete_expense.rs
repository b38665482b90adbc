//! Defines the route for deleting an expense.
//!
//! The delete forms on the expenses page post here. Whatever the outcome,
//! the response is the expenses page again with a banner describing what
//! happened.

use axum::{
    Extension,
    extract::{Path, State},
    response::Response,
};

use crate::{
    AppState, Error,
    alert::{error_alert, success_alert},
    expenses::expenses_page,
    session::Session,
    stores::{CredentialStore, ExpenseId, ExpenseStore, StoreError, UserStore},
};

/// The message displayed after an expense is deleted.
pub const EXPENSE_DELETED_MSG: &str = "Expense deleted successfully!";

/// The message displayed when an expense could not be deleted.
pub const DELETE_EXPENSE_FAILED_ERROR_MSG: &str = "Failed to delete expense";

/// Delete `expense_id` if it exists and belongs to the logged-in user.
///
/// An expense owned by another user is reported as [StoreError::NotFound],
/// the same as an expense that does not exist, so the response does not
/// reveal whether the ID is in use.
async fn delete_expense<E>(
    expense_store: &E,
    session: &Session,
    expense_id: &ExpenseId,
) -> Result<(), Error>
where
    E: ExpenseStore + Send + Sync,
{
    match expense_store.get(expense_id).await? {
        Some(expense) if expense.user_id == session.user_id => {
            expense_store.delete(expense_id).await?;

            Ok(())
        }
        Some(_) => {
            tracing::warn!(
                "User {} tried to delete an expense owned by another user.",
                session.user_id
            );

            Err(Error::Store(StoreError::NotFound))
        }
        None => Err(Error::Store(StoreError::NotFound)),
    }
}

/// Handle the form submission for deleting an expense.
///
/// Responds with the expenses page, topped with a banner saying whether the
/// expense was deleted.
///
/// # Errors
///
/// Returns an [Error::Store] if the remaining expenses could not be fetched
/// for re-rendering the page.
pub async fn post_delete_expense<C, U, E>(
    State(state): State<AppState<C, U, E>>,
    Extension(session): Extension<Session>,
    Path(expense_id): Path<String>,
) -> Result<Response, Error>
where
    C: CredentialStore + Send + Sync,
    U: UserStore + Send + Sync,
    E: ExpenseStore + Send + Sync,
{
    let expense_id = ExpenseId::new(expense_id);

    let alert = match delete_expense(&state.expense_store, &session, &expense_id).await {
        Ok(()) => success_alert(EXPENSE_DELETED_MSG),
        Err(Error::Store(StoreError::NotFound)) => error_alert(DELETE_EXPENSE_FAILED_ERROR_MSG, ""),
        Err(error) => {
            tracing::error!("An error occurred while deleting expense {expense_id}: {error}");

            error_alert(DELETE_EXPENSE_FAILED_ERROR_MSG, "")
        }
    };

    let expenses = state.expense_store.for_user(&session.user_id).await?;

    Ok(expenses_page(&expenses, Some(alert)))
}
