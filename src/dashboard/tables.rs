//! Table views for dashboard data display.
//!
//! Renders the most recent transactions as a compact table next to the
//! breakdown chart.

use maud::{Markup, html};
use time::UtcOffset;

use crate::{
    endpoints,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, link},
    ledger::{Transaction, TransactionKind},
};

const AMOUNT_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const AMOUNT_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders a signed, colored amount: green with a plus sign for additions,
/// red with a minus sign for expenses.
pub(super) fn signed_amount(transaction: &Transaction) -> Markup {
    let (sign, color) = match transaction.kind {
        TransactionKind::Addition => ("+", AMOUNT_GREEN_STYLE),
        TransactionKind::Expense => ("-", AMOUNT_RED_STYLE),
    };

    html! {
        span class={(color) " whitespace-nowrap"} {
            (sign) (format_currency(transaction.amount))
        }
    }
}

/// Renders the table of the most recent transactions, newest first.
pub(super) fn recent_transactions_table(
    transactions: &[Transaction],
    local_offset: UtcOffset,
) -> Markup {
    html! {
        div {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Recent Transactions" }
                (link(endpoints::TRANSACTIONS_VIEW, "View all"))
            }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }
                    tbody {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) {
                                    (transaction.created_at.to_offset(local_offset).date())
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    (transaction.description)
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} {
                                    (signed_amount(transaction))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
