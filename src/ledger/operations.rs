//! The operations that mutate the ledger.
//!
//! Each operation runs inside a single immediate SQL transaction: the balance
//! update and the transaction row commit together or not at all. Balance
//! changes are written as relative updates (`current_balance =
//! current_balance + ?`) so two concurrent requests serialize on the database
//! write lock and neither update is lost.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    ledger::{
        Account, AccountID, Transaction, TransactionID, TransactionKind, get_transaction,
        get_transactions_by_account, sum_amount_by_kind,
    },
};

use super::transaction::insert_transaction;

/// How many transactions the summary includes as "recent".
const RECENT_TRANSACTION_COUNT: u32 = 5;

/// A point-in-time read of an account's position, used by the dashboard and
/// its chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// The sum of all addition amounts.
    pub total_additions: f64,
    /// The last few transactions, newest first.
    pub recent: Vec<Transaction>,
    /// The chart breakdown of where the money sits.
    pub breakdown: BalanceBreakdown,
}

/// The slices of the dashboard breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceBreakdown {
    /// The spendable balance.
    pub available: f64,
    /// The sum of all expenses.
    pub spent: f64,
    /// How much is still missing to reach the savings target. Zero when the
    /// target has been reached or no target is set.
    pub remaining_to_target: f64,
}

/// Add money to an account.
///
/// Increases both the cumulative total and the current balance by `amount`
/// and records an addition transaction, all in one SQL transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::AmountNotPositive] if `amount` is zero or negative. Nothing is
///   written in that case.
/// - [Error::InvalidAccount] if `account_id` does not refer to a real
///   account.
/// - [Error::SqlError] if there is some other SQL error.
pub fn apply_addition(
    account_id: AccountID,
    amount: f64,
    description: &str,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if amount <= 0.0 {
        return Err(Error::AmountNotPositive(amount));
    }

    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let rows_updated = sql_transaction.execute(
        "UPDATE account
         SET total_amount = total_amount + ?1, current_balance = current_balance + ?1
         WHERE id = ?2",
        (amount, account_id),
    )?;

    if rows_updated == 0 {
        return Err(Error::InvalidAccount(account_id));
    }

    let transaction = insert_transaction(
        account_id,
        TransactionKind::Addition,
        amount,
        description,
        &sql_transaction,
    )?;

    sql_transaction.commit()?;

    Ok(transaction)
}

/// Spend money from an account.
///
/// Decreases the current balance by `amount` (the cumulative total is
/// untouched) and records an expense transaction, all in one SQL
/// transaction. The balance is allowed to go negative, overspending is
/// tracked rather than rejected.
///
/// # Errors
/// This function will return a:
/// - [Error::AmountNotPositive] if `amount` is zero or negative. Nothing is
///   written in that case.
/// - [Error::InvalidAccount] if `account_id` does not refer to a real
///   account.
/// - [Error::SqlError] if there is some other SQL error.
pub fn apply_expense(
    account_id: AccountID,
    amount: f64,
    description: &str,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if amount <= 0.0 {
        return Err(Error::AmountNotPositive(amount));
    }

    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let rows_updated = sql_transaction.execute(
        "UPDATE account SET current_balance = current_balance - ?1 WHERE id = ?2",
        (amount, account_id),
    )?;

    if rows_updated == 0 {
        return Err(Error::InvalidAccount(account_id));
    }

    let transaction = insert_transaction(
        account_id,
        TransactionKind::Expense,
        amount,
        description,
        &sql_transaction,
    )?;

    sql_transaction.commit()?;

    Ok(transaction)
}

/// Set the savings target for an account.
///
/// Overwrites the previous target. No transaction row is recorded, setting
/// the same target twice is a no-op.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeTarget] if `amount` is negative.
/// - [Error::InvalidAccount] if `account_id` does not refer to a real
///   account.
/// - [Error::SqlError] if there is some other SQL error.
pub fn set_target(account_id: AccountID, amount: f64, connection: &Connection) -> Result<(), Error> {
    if amount < 0.0 {
        return Err(Error::NegativeTarget(amount));
    }

    let rows_updated = connection.execute(
        "UPDATE account SET target_amount = ?1 WHERE id = ?2",
        (amount, account_id),
    )?;

    if rows_updated == 0 {
        return Err(Error::InvalidAccount(account_id));
    }

    Ok(())
}

/// Delete a transaction and reverse its effect on the account balances.
///
/// The transaction must belong to `account_id`: deleting another account's
/// transaction fails with [Error::Forbidden] and changes nothing. Reversal
/// depends on the kind: deleting an expense restores the balance, deleting
/// an addition removes the amount from both the balance and the cumulative
/// total. The reversal and the row deletion commit as a unit.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `transaction_id` does not refer to
///   a transaction in the database.
/// - [Error::Forbidden] if the transaction belongs to a different account.
/// - [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    account_id: AccountID,
    transaction_id: TransactionID,
    connection: &Connection,
) -> Result<(), Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let transaction = get_transaction(transaction_id, &sql_transaction).map_err(|error| {
        match error {
            Error::NotFound => Error::DeleteMissingTransaction,
            error => error,
        }
    })?;

    if transaction.account_id != account_id {
        return Err(Error::Forbidden);
    }

    match transaction.kind {
        TransactionKind::Expense => {
            sql_transaction.execute(
                "UPDATE account SET current_balance = current_balance + ?1 WHERE id = ?2",
                (transaction.amount, account_id),
            )?;
        }
        TransactionKind::Addition => {
            sql_transaction.execute(
                "UPDATE account
                 SET current_balance = current_balance - ?1, total_amount = total_amount - ?1
                 WHERE id = ?2",
                (transaction.amount, account_id),
            )?;
        }
    }

    sql_transaction.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1",
        (transaction_id,),
    )?;

    sql_transaction.commit()?;

    Ok(())
}

/// Compute the read-only summary of an account's position.
///
/// Pure read, no side effects: the per-kind totals, the last few
/// transactions (newest first), and the breakdown used by the dashboard
/// chart.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn compute_summary(account: &Account, connection: &Connection) -> Result<Summary, Error> {
    let total_expenses = sum_amount_by_kind(account.id, TransactionKind::Expense, connection)?;
    let total_additions = sum_amount_by_kind(account.id, TransactionKind::Addition, connection)?;
    let recent =
        get_transactions_by_account(account.id, Some(RECENT_TRANSACTION_COUNT), connection)?;

    let breakdown = BalanceBreakdown {
        available: account.current_balance,
        spent: total_expenses,
        remaining_to_target: (account.target_amount - account.current_balance).max(0.0),
    };

    Ok(Summary {
        total_expenses,
        total_additions,
        recent,
        breakdown,
    })
}
