//! Defines the route handler for the page that displays the full transaction
//! history as a table.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    ledger::{Transaction, TransactionKind, get_account_by_user, get_transactions_by_account},
    navigation::NavBar,
    timezone::get_local_offset,
    user::UserID,
};

const AMOUNT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const AMOUNT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading the account's transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Running totals for the transaction history.
struct HistoryTotals {
    additions: f64,
    expenses: f64,
}

/// Render the full transaction history for the logged-in user, newest first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get account for {user_id}: {error}"))?;
    let transactions = get_transactions_by_account(account.id, None, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let totals = transactions.iter().fold(
        HistoryTotals {
            additions: 0.0,
            expenses: 0.0,
        },
        |mut totals, transaction| {
            match transaction.kind {
                TransactionKind::Addition => totals.additions += transaction.amount,
                TransactionKind::Expense => totals.expenses += transaction.amount,
            }
            totals
        },
    );

    Ok(transactions_view(&transactions, &totals, local_offset).into_response())
}

fn transactions_view(
    transactions: &[Transaction],
    totals: &HistoryTotals,
    local_offset: UtcOffset,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="w-full flex justify-between items-baseline mb-4"
            {
                h1 class="text-2xl font-bold" { "Transactions" }

                span class="text-sm text-gray-600 dark:text-gray-400"
                {
                    "Added " (format_currency(totals.additions))
                    ", spent " (format_currency(totals.expenses))
                }
            }

            div class="w-full overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }
                    tbody
                    {
                        @if transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    colspan="4"
                                    data-empty-state="true"
                                    class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No transactions yet."
                                }
                            }
                        }

                        @for transaction in transactions {
                            (transaction_row(transaction, local_offset))
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
    let (sign, amount_color) = match transaction.kind {
        TransactionKind::Addition => ("+", AMOUNT_GREEN_STYLE),
        TransactionKind::Expense => ("-", AMOUNT_RED_STYLE),
    };

    html!(
        tr data-transaction-row="true" class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                (transaction.created_at.to_offset(local_offset).date())
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.description)
            }

            td class={(TABLE_CELL_STYLE) " text-right"}
            {
                span class={(amount_color) " whitespace-nowrap"}
                {
                    (sign) (format_currency(transaction.amount))
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(delete_url)
                    hx-confirm={
                        "Are you sure you want to delete this transaction?
                        Your balance will be adjusted as if it never happened."
                    }
                    hx-target="closest tr"
                    hx-target-error="#alert-container"
                    hx-swap="delete"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    )
}
