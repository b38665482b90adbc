//! The expense store backed by the `expenses` collection in Firestore.

use async_trait::async_trait;
use serde_json::json;
use time::Date;

use crate::stores::{
    DATE_FORMAT, Expense, ExpenseId, ExpenseStore, NewExpense, StoreError, UserId,
};

use super::firestore::{Document, FirestoreClient, double_value, string_value};

const COLLECTION: &str = "expenses";

/// Handles the creation and retrieval of [Expense] documents in Firestore.
#[derive(Debug, Clone)]
pub struct FirestoreExpenseStore {
    firestore: FirestoreClient,
}

impl FirestoreExpenseStore {
    /// Create a new expense store backed by `firestore`.
    pub fn new(firestore: FirestoreClient) -> Self {
        Self { firestore }
    }
}

#[async_trait]
impl ExpenseStore for FirestoreExpenseStore {
    async fn create(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let date = expense
            .date
            .format(DATE_FORMAT)
            .map_err(|error| StoreError::Serialization(error.to_string()))?;

        let fields = json!({
            "user_id": string_value(expense.user_id.as_str()),
            "title": string_value(&expense.title),
            "amount": double_value(expense.amount),
            "date": string_value(&date),
        });

        let id = self.firestore.create(COLLECTION, fields).await?;

        Ok(Expense {
            id: ExpenseId::new(id),
            user_id: expense.user_id,
            title: expense.title,
            amount: expense.amount,
            date: expense.date,
        })
    }

    async fn for_user(&self, user_id: &UserId) -> Result<Vec<Expense>, StoreError> {
        let documents = self
            .firestore
            .query_equal(COLLECTION, "user_id", user_id.as_str())
            .await?;

        // One broken document should not take the whole list down with it.
        let expenses = documents
            .iter()
            .filter_map(|document| match map_expense(document) {
                Ok(expense) => Some(expense),
                Err(error) => {
                    tracing::warn!("Skipping expense document: {error}");
                    None
                }
            })
            .collect();

        Ok(expenses)
    }

    async fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError> {
        let Some(document) = self.firestore.get(COLLECTION, id.as_str()).await? else {
            return Ok(None);
        };

        map_expense(&document).map(Some)
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), StoreError> {
        self.firestore.delete(COLLECTION, id.as_str()).await
    }
}

/// Map an `expenses` document onto the [Expense] model.
fn map_expense(document: &Document) -> Result<Expense, StoreError> {
    let malformed = |field: &str| {
        StoreError::Malformed(format!(
            "expense document {} has a missing or invalid '{field}' field",
            document.id()
        ))
    };

    let user_id = document
        .string_field("user_id")
        .ok_or_else(|| malformed("user_id"))?;
    let title = document
        .string_field("title")
        .ok_or_else(|| malformed("title"))?;
    let amount = document
        .double_field("amount")
        .ok_or_else(|| malformed("amount"))?;
    let date = document
        .string_field("date")
        .and_then(|text| Date::parse(text, DATE_FORMAT).ok())
        .ok_or_else(|| malformed("date"))?;

    Ok(Expense {
        id: ExpenseId::new(document.id()),
        user_id: UserId::new(user_id),
        title: title.to_owned(),
        amount,
        date,
    })
}
