//! The analytics page: rule-based spending insights for the user's account.
//!
//! Each rule looks at the account balances and transaction totals and emits
//! a suggestion card. The rules are simple thresholds, no external services
//! are involved.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{PAGE_CONTAINER_STYLE, base, format_currency},
    ledger::{Account, Summary, compute_summary, get_account_by_user},
    navigation::NavBar,
    user::UserID,
};

/// How many days the daily spending average is computed over.
const DAILY_AVERAGE_PERIOD_DAYS: f64 = 30.0;

/// The fraction of the current daily average to aim for.
const DAILY_AVERAGE_GOAL_RATIO: f64 = 0.8;

/// How a suggestion should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Something needs attention right now.
    Danger,
    /// Heading in the wrong direction.
    Warning,
    /// Doing well.
    Success,
    /// Neutral observation.
    Info,
}

/// A single insight card shown on the analytics page.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// A decorative emoji for the card.
    pub emoji: &'static str,
    /// The card heading.
    pub title: &'static str,
    /// The card body text.
    pub message: String,
    /// How the card is styled.
    pub tone: Tone,
}

/// Build the list of suggestions for an account.
///
/// Rules that have no data to work with (e.g. the target progress rule when
/// no target is set) are skipped, so a fresh account gets an empty list.
pub fn build_suggestions(account: &Account, summary: &Summary) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if let Some(suggestion) = spending_rate_suggestion(account, summary) {
        suggestions.push(suggestion);
    }

    if let Some(suggestion) = target_progress_suggestion(account) {
        suggestions.push(suggestion);
    }

    if let Some(suggestion) = daily_average_suggestion(summary) {
        suggestions.push(suggestion);
    }

    if let Some(suggestion) = balance_health_suggestion(account) {
        suggestions.push(suggestion);
    }

    if let Some(suggestion) = savings_ratio_suggestion(summary) {
        suggestions.push(suggestion);
    }

    suggestions
}

/// How much of the money ever added has been spent.
fn spending_rate_suggestion(account: &Account, summary: &Summary) -> Option<Suggestion> {
    if account.total_amount <= 0.0 {
        return None;
    }

    let expense_percentage = summary.total_expenses / account.total_amount * 100.0;

    let suggestion = if expense_percentage > 70.0 {
        Suggestion {
            emoji: "⚠️",
            title: "High Spending Alert",
            message: format!(
                "You have spent {expense_percentage:.0}% of everything you added. \
                Consider cutting back before the balance runs out."
            ),
            tone: Tone::Danger,
        }
    } else if expense_percentage > 50.0 {
        Suggestion {
            emoji: "💸",
            title: "Moderate Spending",
            message: format!(
                "You have spent {expense_percentage:.0}% of everything you added. \
                Keep an eye on it."
            ),
            tone: Tone::Warning,
        }
    } else {
        Suggestion {
            emoji: "✅",
            title: "Good Spending Control",
            message: format!(
                "You have only spent {expense_percentage:.0}% of everything you added. \
                Nice work."
            ),
            tone: Tone::Success,
        }
    };

    Some(suggestion)
}

/// How far along the savings target the balance is.
fn target_progress_suggestion(account: &Account) -> Option<Suggestion> {
    if account.target_amount <= 0.0 {
        return None;
    }

    let progress = account.current_balance / account.target_amount * 100.0;

    let suggestion = if progress >= 100.0 {
        Suggestion {
            emoji: "🎉",
            title: "Target Achieved!",
            message: format!(
                "Your balance has reached your {} target. Time to set a new goal?",
                format_currency(account.target_amount)
            ),
            tone: Tone::Success,
        }
    } else if progress >= 75.0 {
        Suggestion {
            emoji: "🔥",
            title: "Almost There!",
            message: format!("You are {progress:.0}% of the way to your savings target."),
            tone: Tone::Info,
        }
    } else if progress >= 50.0 {
        Suggestion {
            emoji: "📈",
            title: "Halfway There",
            message: format!("You are {progress:.0}% of the way to your savings target."),
            tone: Tone::Info,
        }
    } else {
        Suggestion {
            emoji: "🌱",
            title: "Keep Building",
            message: format!(
                "You are {progress:.0}% of the way to your savings target. \
                Small, regular additions add up."
            ),
            tone: Tone::Info,
        }
    };

    Some(suggestion)
}

/// The average spent per day over the last month, with a goal to aim for.
fn daily_average_suggestion(summary: &Summary) -> Option<Suggestion> {
    if summary.total_expenses <= 0.0 {
        return None;
    }

    let daily_average = summary.total_expenses / DAILY_AVERAGE_PERIOD_DAYS;
    let goal = daily_average * DAILY_AVERAGE_GOAL_RATIO;

    Some(Suggestion {
        emoji: "📅",
        title: "Daily Spending",
        message: format!(
            "You spend about {} per day. Aim for {} per day to build a buffer.",
            format_currency(daily_average),
            format_currency(goal)
        ),
        tone: Tone::Info,
    })
}

/// Whether the balance is dangerously low or comfortably high relative to
/// the total ever added. Between the two thresholds no card is shown.
fn balance_health_suggestion(account: &Account) -> Option<Suggestion> {
    if account.total_amount <= 0.0 {
        return None;
    }

    if account.current_balance < account.total_amount * 0.1 {
        return Some(Suggestion {
            emoji: "🚨",
            title: "Low Balance Warning",
            message: format!(
                "Your balance of {} is less than 10% of everything you added.",
                format_currency(account.current_balance)
            ),
            tone: Tone::Danger,
        });
    }

    if account.current_balance > account.total_amount * 0.5 {
        return Some(Suggestion {
            emoji: "💪",
            title: "Healthy Balance",
            message: format!(
                "Your balance of {} is more than half of everything you added.",
                format_currency(account.current_balance)
            ),
            tone: Tone::Success,
        });
    }

    None
}

/// How much of what was added gets spent.
fn savings_ratio_suggestion(summary: &Summary) -> Option<Suggestion> {
    if summary.total_additions <= 0.0 {
        return None;
    }

    let ratio = summary.total_expenses / summary.total_additions;

    let suggestion = if ratio < 0.3 {
        Suggestion {
            emoji: "🏆",
            title: "Excellent Savings Rate",
            message: format!("You keep {:.0}% of everything you add.", (1.0 - ratio) * 100.0),
            tone: Tone::Success,
        }
    } else if ratio < 0.5 {
        Suggestion {
            emoji: "👍",
            title: "Good Savings Habit",
            message: format!("You keep {:.0}% of everything you add.", (1.0 - ratio) * 100.0),
            tone: Tone::Success,
        }
    } else {
        Suggestion {
            emoji: "🧾",
            title: "Review Your Budget",
            message: format!(
                "You spend {:.0}% of everything you add. A lower ratio leaves more \
                room for savings.",
                ratio * 100.0
            ),
            tone: Tone::Warning,
        }
    };

    Some(suggestion)
}

// ==== ROUTES ====

/// The state needed for the analytics page.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading the account and its transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the analytics page with insight cards for the logged-in user.
pub async fn get_analytics_page(
    State(state): State<AnalyticsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account_by_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get account for {user_id}: {error}"))?;
    let summary = compute_summary(&account, &connection)
        .inspect_err(|error| tracing::error!("could not compute account summary: {error}"))?;

    let suggestions = build_suggestions(&account, &summary);

    Ok(analytics_view(&suggestions).into_response())
}

fn tone_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Danger => "text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
        Tone::Warning => "text-yellow-800 bg-yellow-50 dark:bg-gray-800 dark:text-yellow-300",
        Tone::Success => "text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400",
        Tone::Info => "text-blue-800 bg-blue-50 dark:bg-gray-800 dark:text-blue-400",
    }
}

fn analytics_view(suggestions: &[Suggestion]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ANALYTICS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-8" { "Insights" }

            @if suggestions.is_empty() {
                p
                {
                    "Add some transactions and your spending insights will
                    show up here."
                }
            } @else {
                div class="grid grid-cols-1 md:grid-cols-2 gap-4 w-full max-w-screen-md"
                {
                    @for suggestion in suggestions {
                        (suggestion_card(suggestion))
                    }
                }
            }
        }
    );

    base("Insights", &[], &content)
}

fn suggestion_card(suggestion: &Suggestion) -> Markup {
    html!(
        div
            data-suggestion-card="true"
            class={"rounded-lg p-4 shadow-md " (tone_style(suggestion.tone))}
        {
            div class="text-3xl mb-2" { (suggestion.emoji) }
            h3 class="text-lg font-semibold mb-2" { (suggestion.title) }
            p class="text-sm" { (suggestion.message) }
        }
    )
}


#[cfg(test)]
mod analytics_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        ledger::{apply_addition, apply_expense, create_account, set_target},
        password::PasswordHash,
        test_utils::{assert_valid_html, parse_html_document},
        user::{UserID, create_user},
    };

    use super::{AnalyticsState, get_analytics_page};

    fn get_test_state_with_user() -> (AnalyticsState, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user = create_user(
            "foo@bar.baz",
            PasswordHash::new_unchecked("hunter2"),
            &connection,
        )
        .unwrap();
        create_account(user.id, &connection).unwrap();

        let state = AnalyticsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        (state, user.id)
    }

    #[tokio::test]
    async fn analytics_page_shows_suggestion_cards() {
        let (state, user_id) = get_test_state_with_user();
        {
            let connection = state.db_connection.lock().unwrap();
            let account = crate::ledger::get_account_by_user(user_id, &connection).unwrap();
            apply_addition(account.id, 1000.0, "", &connection).unwrap();
            apply_expense(account.id, 200.0, "", &connection).unwrap();
            set_target(account.id, 1000.0, &connection).unwrap();
        }

        let response = get_analytics_page(State(state), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let card_selector = Selector::parse("div[data-suggestion-card='true']").unwrap();
        let cards: Vec<_> = html.select(&card_selector).collect();
        assert!(
            cards.len() >= 4,
            "want at least 4 suggestion cards, got {}",
            cards.len()
        );
        assert!(html.html().contains("Good Spending Control"));
        assert!(html.html().contains("Almost There!"));
    }

    #[tokio::test]
    async fn analytics_page_shows_prompt_without_data() {
        let (state, user_id) = get_test_state_with_user();

        let response = get_analytics_page(State(state), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(html.html().contains("insights will"));
    }
}
