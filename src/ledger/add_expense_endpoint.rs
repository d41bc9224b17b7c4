//! Defines the endpoint for recording an expense against the user's account.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, alert::Alert, endpoints, ledger::get_account_by_user, user::UserID,
};

use super::operations::apply_expense;

/// The state needed by the ledger endpoints.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The database connection for managing accounts and transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for recording an expense.
#[derive(Debug, Deserialize)]
pub struct AddExpenseForm {
    /// The value of the expense in dollars.
    pub amount: f64,
    /// Text detailing the expense.
    #[serde(default)]
    pub description: Option<String>,
}

/// A route handler for recording an expense, redirects to the dashboard view
/// on success.
///
/// The balance is allowed to go negative, the dashboard flags overspending
/// instead of this endpoint rejecting it.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_expense(
    State(state): State<LedgerState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<AddExpenseForm>,
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
                "Something went wrong",
                "An unexpected error occurred, check the server logs for more details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Err(error) = apply_expense(
        account.id,
        form.amount,
        form.description.as_deref().unwrap_or_default(),
        &connection,
    ) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod post_expense_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        ledger::{
            Account, apply_addition, count_transactions, create_account, get_account_by_user,
        },
        password::PasswordHash,
        user::{UserID, create_user},
    };

    use super::{AddExpenseForm, LedgerState, post_expense};

    fn get_test_state() -> (LedgerState, Account) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();
        let account = create_account(user.id, &connection).unwrap();
        apply_addition(account.id, 500.0, "", &connection).unwrap();

        let state = LedgerState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, account)
    }

    fn reload(state: &LedgerState, user_id: UserID) -> Account {
        get_account_by_user(user_id, &state.db_connection.lock().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn expense_decreases_balance_and_redirects_to_dashboard() {
        let (state, account) = get_test_state();
        let form = AddExpenseForm {
            amount: 120.0,
            description: Some("groceries".to_owned()),
        };

        let response = post_expense(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/dashboard");
        let account = reload(&state, account.user_id);
        assert_eq!(account.current_balance, 380.0);
        assert_eq!(account.total_amount, 500.0);
    }

    #[tokio::test]
    async fn expense_may_overdraw_the_balance() {
        let (state, account) = get_test_state();
        let form = AddExpenseForm {
            amount: 600.0,
            description: None,
        };

        let response = post_expense(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let account = reload(&state, account.user_id);
        assert_eq!(account.current_balance, -100.0);
    }

    #[tokio::test]
    async fn non_positive_amount_returns_unprocessable_entity() {
        let (state, account) = get_test_state();
        let form = AddExpenseForm {
            amount: 0.0,
            description: None,
        };

        let response = post_expense(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 1);
    }
}
