//! Defines the endpoint for deleting a transaction.
//!
//! Deletion reverses the transaction's effect on the account balances, and
//! only the owner of the transaction may delete it.
use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    ledger::{TransactionID, get_account_by_user},
    user::UserID,
};

use super::{add_expense_endpoint::LedgerState, operations::delete_transaction};

/// A route handler for deleting a transaction owned by the logged-in user.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<LedgerState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionID>,
) -> Response {
    let connection = state
        .db_connection
        .lock()
        .expect("Could not acquire database lock");

    let account = match get_account_by_user(user_id, &connection) {
        Ok(account) => account,
        Err(error) => {
            tracing::error!("Could not load the account for user {user_id}: {error}");
            return Alert::error(
                "Could not delete transaction",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match delete_transaction(account.id, transaction_id, &connection) {
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(()) => StatusCode::OK.into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        ledger::{
            Account, Transaction, apply_addition, apply_expense, count_transactions,
            create_account, get_account_by_user,
        },
        password::PasswordHash,
        user::{UserID, create_user},
    };

    use super::{LedgerState, delete_transaction_endpoint};

    fn get_test_state() -> (LedgerState, Account, Transaction) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();
        let account = create_account(user.id, &connection).unwrap();
        apply_addition(account.id, 500.0, "pay day", &connection).unwrap();
        let expense = apply_expense(account.id, 120.0, "groceries", &connection).unwrap();

        let state = LedgerState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, account, expense)
    }

    fn reload(state: &LedgerState, user_id: UserID) -> Account {
        get_account_by_user(user_id, &state.db_connection.lock().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn deletes_own_transaction_and_restores_balance() {
        let (state, account, expense) = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(account.user_id),
            Path(expense.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let account = reload(&state, account.user_id);
        assert_eq!(account.current_balance, 500.0);
        assert_eq!(
            count_transactions(&state.db_connection.lock().unwrap()).unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn deleting_another_users_transaction_is_forbidden() {
        let (state, _, expense) = get_test_state();
        let other_user_id = {
            let connection = state.db_connection.lock().unwrap();
            let other_user = create_user(
                "bar@baz.qux",
                PasswordHash::new_unchecked("hunter2"),
                &connection,
            )
            .unwrap();
            create_account(other_user.id, &connection).unwrap();
            other_user.id
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(other_user_id),
            Path(expense.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        // The transaction and the owner's balance must be untouched.
        assert_eq!(
            count_transactions(&state.db_connection.lock().unwrap()).unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn deleting_a_missing_transaction_returns_not_found() {
        let (state, account, _) = get_test_state();

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(account.user_id),
            Path(999),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            count_transactions(&state.db_connection.lock().unwrap()).unwrap(),
            2
        );
    }
}
