//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handler

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use time::UtcOffset;

use crate::{
    AppState, Error,
    dashboard::{
        cards::balance_cards_view,
        charts::{DashboardChart, breakdown_chart, charts_script},
        forms::ledger_forms_view,
        tables::recent_transactions_table,
    },
    endpoints,
    html::{HeadElement, base, dollar_input_styles, format_currency},
    ledger::{Account, Summary, compute_summary, get_account_by_user},
    navigation::NavBar,
    timezone::get_local_offset,
    user::UserID,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the account and its transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the logged-in user's account.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let account = get_account_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get account for {user_id}: {error}"))?;
    let summary = compute_summary(&account, &connection)
        .inspect_err(|error| tracing::error!("could not compute account summary: {error}"))?;

    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    if summary.recent.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar, &account).into_response());
    }

    Ok(dashboard_view(nav_bar, &account, &summary, local_offset).into_response())
}

/// Renders the dashboard when the account has no transactions yet.
///
/// Shows a prompt and the ledger forms so the first addition can be recorded
/// right away.
fn dashboard_no_data_view(nav_bar: NavBar, account: &Account) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p class="mb-8"
            {
                "Your balance overview will show up here once you record your
                first transaction. Start by adding some funds below."
            }

            (ledger_forms_view(account))
        }
    );

    base("Dashboard", &[dollar_input_styles()], &content)
}

/// Renders the main dashboard page with the balance cards, breakdown chart,
/// recent transactions and the ledger forms.
fn dashboard_view(
    nav_bar: NavBar,
    account: &Account,
    summary: &Summary,
    local_offset: UtcOffset,
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let chart = DashboardChart {
        id: "breakdown-chart",
        options: breakdown_chart(&summary.breakdown).to_string(),
    };

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            @if account.current_balance < 0.0 {
                (overdrawn_banner(account.current_balance))
            }

            (balance_cards_view(account, summary))

            section
                id="charts"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}

                    (recent_transactions_table(&summary.recent, local_offset))
                }
            }

            (ledger_forms_view(account))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&[chart]),
        dollar_input_styles(),
    ];

    base("Dashboard", &scripts, &content)
}

/// The warning banner shown when the balance has gone negative.
fn overdrawn_banner(current_balance: f64) -> Markup {
    html!(
        div
            id="overdrawn-banner"
            role="alert"
            class="w-full p-4 mb-4 text-sm text-red-800 rounded-lg
                bg-red-50 dark:bg-gray-800 dark:text-red-400"
        {
            span class="font-medium" { "Your balance is overdrawn. " }
            "You have spent " (format_currency(current_balance.abs()))
            " more than you added."
        }
    )
}
