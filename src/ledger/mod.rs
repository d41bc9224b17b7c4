//! The balance ledger: accounts, transactions and the operations that keep
//! the two consistent.
//!
//! Every mutation runs as a single SQL transaction and expresses balance
//! changes as relative updates, so concurrent writers serialize on the
//! database write lock instead of clobbering each other's balances.

mod account;
mod add_expense_endpoint;
mod add_funds_endpoint;
mod delete_transaction_endpoint;
mod operations;
mod set_target_endpoint;
mod transaction;

pub use account::{Account, AccountID, create_account, create_account_table, get_account_by_user};
pub use add_expense_endpoint::{AddExpenseForm, LedgerState, post_expense};
pub use add_funds_endpoint::{AddFundsForm, post_addition};
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use operations::{
    BalanceBreakdown, Summary, apply_addition, apply_expense, compute_summary, delete_transaction,
    set_target,
};
pub use set_target_endpoint::{SetTargetForm, put_target};
pub use transaction::{
    Transaction, TransactionID, TransactionKind, create_transaction_table, get_transaction,
    get_transactions_by_account, sum_amount_by_kind,
};

#[cfg(test)]
pub use transaction::count_transactions;
