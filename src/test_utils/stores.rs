//! In-memory fakes for the external credential service and document store.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::stores::{
    CredentialError, CredentialStore, Expense, ExpenseId, ExpenseStore, NewExpense, StoreError,
    User, UserId, UserStore,
};

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    email: String,
    password: String,
}

/// A credential service that keeps accounts in memory.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeCredentialStore {
    accounts: Arc<Mutex<Vec<Account>>>,
}

impl FakeCredentialStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an account directly, bypassing validation.
    pub(crate) fn add_account(&self, email: &str, password: &str) -> UserId {
        let mut accounts = self.accounts.lock().unwrap();
        let user_id = UserId::new(format!("user-{}", accounts.len() + 1));
        accounts.push(Account {
            user_id: user_id.clone(),
            email: email.to_owned(),
            password: password.to_owned(),
        });

        user_id
    }

    /// Get the ID of the account registered for `email`.
    ///
    /// # Panics
    ///
    /// Panics if no account exists for `email`.
    pub(crate) fn user_id_for(&self, email: &str) -> UserId {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|account| account.email == email)
            .map(|account| account.user_id.clone())
            .unwrap_or_else(|| panic!("no account registered for email {email}"))
    }

    pub(crate) fn account_count(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for FakeCredentialStore {
    async fn create_account(&self, email: &str, password: &str) -> Result<UserId, CredentialError> {
        if !email.contains('@') {
            return Err(CredentialError::InvalidEmail);
        }

        {
            let accounts = self.accounts.lock().unwrap();

            if accounts.iter().any(|account| account.email == email) {
                return Err(CredentialError::EmailExists);
            }
        }

        Ok(self.add_account(email, password))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<UserId, CredentialError> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|account| account.email == email && account.password == password)
            .map(|account| account.user_id.clone())
            .ok_or(CredentialError::InvalidCredentials)
    }
}

/// A user profile store that keeps profiles in memory.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl FakeUserStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a profile directly.
    pub(crate) fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserStore for FakeUserStore {
    async fn create(&self, user: User) -> Result<(), StoreError> {
        self.add_user(user);

        Ok(())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| &user.id == id)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|user| user.username == username))
    }
}

#[derive(Debug, Default)]
struct ExpenseData {
    expenses: Vec<Expense>,
    next_id: usize,
}

/// An expense store that keeps expenses in memory, returning them in
/// insertion order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeExpenseStore {
    data: Arc<Mutex<ExpenseData>>,
}

impl FakeExpenseStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an expense directly with a caller-chosen ID.
    pub(crate) fn add_expense(&self, expense: Expense) {
        self.data.lock().unwrap().expenses.push(expense);
    }

    /// Get every stored expense, regardless of owner.
    pub(crate) fn expenses(&self) -> Vec<Expense> {
        self.data.lock().unwrap().expenses.clone()
    }
}

#[async_trait]
impl ExpenseStore for FakeExpenseStore {
    async fn create(&self, expense: NewExpense) -> Result<Expense, StoreError> {
        let mut data = self.data.lock().unwrap();
        data.next_id += 1;

        let expense = Expense {
            id: ExpenseId::new(format!("expense-{}", data.next_id)),
            user_id: expense.user_id,
            title: expense.title,
            amount: expense.amount,
            date: expense.date,
        };
        data.expenses.push(expense.clone());

        Ok(expense)
    }

    async fn for_user(&self, user_id: &UserId) -> Result<Vec<Expense>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .expenses
            .iter()
            .filter(|expense| &expense.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &ExpenseId) -> Result<Option<Expense>, StoreError> {
        Ok(self
            .data
            .lock()
            .unwrap()
            .expenses
            .iter()
            .find(|expense| &expense.id == id)
            .cloned())
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), StoreError> {
        let mut data = self.data.lock().unwrap();
        let index = data
            .expenses
            .iter()
            .position(|expense| &expense.id == id)
            .ok_or(StoreError::NotFound)?;
        data.expenses.remove(index);

        Ok(())
    }
}
