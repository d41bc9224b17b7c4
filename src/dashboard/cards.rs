//! Card components for the dashboard balance overview.
//!
//! Shows the current balance, the cumulative amount added, the total spent
//! and the savings target as a row of cards.

use maud::{Markup, html};

use crate::{
    html::{currency_rounded_with_tooltip, format_currency},
    ledger::{Account, Summary},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400 mb-1";
const CARD_AMOUNT_STYLE: &str = "text-3xl font-bold";

/// Renders the row of balance cards at the top of the dashboard.
pub(super) fn balance_cards_view(account: &Account, summary: &Summary) -> Markup {
    let balance_color = if account.current_balance < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full mx-auto mb-4" {
            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Current Balance" }
                    div class={(CARD_AMOUNT_STYLE) " " (balance_color)} {
                        (currency_rounded_with_tooltip(account.current_balance))
                    }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Total Added" }
                    div class=(CARD_AMOUNT_STYLE) {
                        (currency_rounded_with_tooltip(account.total_amount))
                    }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Total Spent" }
                    div class=(CARD_AMOUNT_STYLE) {
                        (currency_rounded_with_tooltip(summary.total_expenses))
                    }
                }

                div class=(CARD_STYLE) {
                    div class=(CARD_LABEL_STYLE) { "Savings Target" }
                    div class=(CARD_AMOUNT_STYLE) {
                        (currency_rounded_with_tooltip(account.target_amount))
                    }
                    @if summary.breakdown.remaining_to_target > 0.0 {
                        div class="text-sm text-gray-600 dark:text-gray-400 mt-1" {
                            (format_currency(summary.breakdown.remaining_to_target)) " to go"
                        }
                    } @else if account.target_amount > 0.0 {
                        div class="text-sm text-green-600 dark:text-green-400 mt-1" {
                            "Target reached"
                        }
                    }
                }
            }
        }
    }
}
