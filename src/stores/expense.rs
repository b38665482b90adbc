//! Defines the expense model and the store trait for expense documents.

use std::fmt::Display;

use async_trait::async_trait;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use super::{StoreError, UserId};

/// The format expense dates use in forms and in stored documents,
/// e.g. "2025-08-25".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A newtype wrapper for the document IDs the store assigns to expenses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create a new expense ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the expense ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An expense recorded by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    /// The ID the store assigned to this expense.
    pub id: ExpenseId,
    /// The ID of the user who recorded this expense.
    pub user_id: UserId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// The amount of money spent.
    pub amount: f64,
    /// The date the expense occurred.
    pub date: Date,
}

/// The data for creating a new expense. The store assigns the ID.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// The ID of the user recording the expense.
    pub user_id: UserId,
    /// A short description of what the money was spent on.
    pub title: String,
    /// The amount of money spent.
    pub amount: f64,
    /// The date the expense occurred.
    pub date: Date,
}

/// Handles the creation and retrieval of [Expense] documents.
#[async_trait]
pub trait ExpenseStore {
    /// Store a new expense and return it with its assigned ID.
    async fn create(&self, expense: NewExpense) -> Result<Expense, StoreError>;

    /// Get all expenses recorded by `user_id`, in the order the store
    /// returns them.
    async fn for_user(&self, user_id: &UserId) -> Result<Vec<Expense>, StoreError>;

    /// Get an expense by its ID, or `None` if no such expense exists.
    async fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError>;

    /// Delete an expense by its ID.
    ///
    /// Returns [StoreError::NotFound] if there is no expense with the
    /// given ID.
    async fn delete(&self, id: &ExpenseId) -> Result<(), StoreError>;
}
