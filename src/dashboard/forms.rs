//! The dashboard forms for recording additions and expenses and for setting
//! the savings target.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    ledger::Account,
};

const FORM_CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md space-y-4";

/// Renders the three ledger forms side by side: add funds, add expense and
/// set target.
pub(super) fn ledger_forms_view(account: &Account) -> Markup {
    html! {
        section class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                (add_funds_form())
                (add_expense_form())
                (set_target_form(account.target_amount))
            }
        }
    }
}

fn add_funds_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::ADDITIONS)
            hx-target-error="#alert-container"
            class=(FORM_CARD_STYLE)
        {
            h3 class="text-xl font-semibold" { "Add Funds" }

            (amount_input("addition-amount"))
            (description_input("addition-description", "Pay day"))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Funds" }
        }
    }
}

fn add_expense_form() -> Markup {
    html! {
        form
            hx-post=(endpoints::EXPENSES)
            hx-target-error="#alert-container"
            class=(FORM_CARD_STYLE)
        {
            h3 class="text-xl font-semibold" { "Add Expense" }

            (amount_input("expense-amount"))
            (description_input("expense-description", "Groceries"))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}

fn set_target_form(target_amount: f64) -> Markup {
    html! {
        form
            hx-put=(endpoints::TARGET)
            hx-target-error="#alert-container"
            class=(FORM_CARD_STYLE)
        {
            h3 class="text-xl font-semibold" { "Savings Target" }

            div {
                label
                    for="target-amount"
                    class=(FORM_LABEL_STYLE)
                {
                    "Amount"
                }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="target-amount"
                        type="number"
                        step="0.01"
                        min="0"
                        required
                        value=(format!("{target_amount:.2}"))
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Set Target" }
        }
    }
}

fn amount_input(id: &str) -> Markup {
    html! {
        div {
            label
                for=(id)
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id=(id)
                    type="number"
                    step="0.01"
                    placeholder="0.01"
                    min="0.01"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn description_input(id: &str, placeholder: &str) -> Markup {
    html! {
        div {
            label
                for=(id)
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id=(id)
                type="text"
                placeholder=(placeholder)
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
