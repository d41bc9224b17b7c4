//! Defines the endpoint for setting the account's savings target.
use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{alert::Alert, endpoints, ledger::get_account_by_user, user::UserID};

use super::{add_expense_endpoint::LedgerState, operations::set_target};

/// The form data for setting the savings target.
#[derive(Debug, Deserialize)]
pub struct SetTargetForm {
    /// The new savings target in dollars.
    pub amount: f64,
}

/// A route handler for setting the savings target, redirects to the dashboard
/// view on success.
///
/// Overwrites the previous target, there is no history of past targets.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn put_target(
    State(state): State<LedgerState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<SetTargetForm>,
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

    if let Err(error) = set_target(account.id, form.amount, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod put_target_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        ledger::{Account, create_account, get_account_by_user},
        password::PasswordHash,
        user::{UserID, create_user},
    };

    use super::{LedgerState, SetTargetForm, put_target};

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
    async fn target_is_set_and_redirects_to_dashboard() {
        let (state, account) = get_test_state();
        let form = SetTargetForm { amount: 1000.0 };

        let response = put_target(
            State(state.clone()),
            Extension(account.user_id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(HX_REDIRECT).unwrap(), "/dashboard");
        let account = reload(&state, account.user_id);
        assert_eq!(account.target_amount, 1000.0);
    }

    #[tokio::test]
    async fn target_overwrites_previous_value() {
        let (state, account) = get_test_state();

        put_target(
            State(state.clone()),
            Extension(account.user_id),
            Form(SetTargetForm { amount: 1000.0 }),
        )
        .await;
        put_target(
            State(state.clone()),
            Extension(account.user_id),
            Form(SetTargetForm { amount: 250.0 }),
        )
        .await;

        let account = reload(&state, account.user_id);
        assert_eq!(account.target_amount, 250.0);
    }

    #[tokio::test]
    async fn negative_target_returns_unprocessable_entity() {
        let (state, account) = get_test_state();

        let response = put_target(
            State(state.clone()),
            Extension(account.user_id),
            Form(SetTargetForm { amount: -1.0 }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let account = reload(&state, account.user_id);
        assert_eq!(account.target_amount, 0.0);
    }
}
