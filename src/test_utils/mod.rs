#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod stores;

pub(crate) use html::{
    assert_body_contains_alert, assert_body_contains_message, assert_valid_html,
    parse_html_document,
};
pub(crate) use stores::{FakeCredentialStore, FakeExpenseStore, FakeUserStore};

use crate::stores::{User, UserId};

/// A user for tests that only need someone to be logged in.
pub(crate) fn get_test_user() -> User {
    User {
        id: UserId::new("abc123"),
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
    }
}
