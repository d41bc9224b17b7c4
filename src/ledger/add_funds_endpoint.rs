//! Defines the endpoint for adding funds to the user's account.
use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{alert::Alert, endpoints, ledger::get_account_by_user, user::UserID};

use super::{add_expense_endpoint::LedgerState, operations::apply_addition};

/// The form data for adding funds.
#[derive(Debug, Deserialize)]
pub struct AddFundsForm {
    /// The amount to add in dollars.
    pub amount: f64,
    /// Text detailing where the money came from.
    #[serde(default)]
    pub description: Option<String>,
}

/// A route handler for adding funds to the account, redirects to the
/// dashboard view on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_addition(
    State(state): State<LedgerState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<AddFundsForm>,
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

    if let Err(error) = apply_addition(
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
mod post_addition_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        ledger::{Account, count_transactions, create_account, get_account_by_user},
        password::PasswordHash,
        user::{UserID, create_user},
    };

    use super::{AddFundsForm, LedgerState, post_addition};

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

        let state = LedgerState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, account)
    }

    fn reload(state: &LedgerState, user_id: UserID) -> Account {
        get_account_by_user(user_id, &state.db_connection.lock().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn addition_increases_balances_and_redirects_to_dashboard() {
        let (state, account) = get_test_state();
        let form = AddFundsForm {
            amount: 500.0,
            description: Some("pay day".to_owned()),
        };

        let response = post_addition(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/dashboard");
        let account = reload(&state, account.user_id);
        assert_eq!(account.current_balance, 500.0);
        assert_eq!(account.total_amount, 500.0);
    }

    #[tokio::test]
    async fn negative_amount_returns_unprocessable_entity_and_writes_nothing() {
        let (state, account) = get_test_state();
        let form = AddFundsForm {
            amount: -5.0,
            description: None,
        };

        let response = post_addition(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let account = reload(&state, account.user_id);
        assert_eq!(account.current_balance, 0.0);
        assert_eq!(account.total_amount, 0.0);
        assert_eq!(
            count_transactions(&state.db_connection.lock().unwrap()).unwrap(),
            0
        );
    }
}
