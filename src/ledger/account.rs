//! Defines the account model and its database queries.
//!
//! An account holds the running balances for one user: the cumulative amount
//! ever added, the spendable balance, and the savings target. The balances
//! are only ever changed through the operations in
//! [crate::ledger::operations], which keep them consistent with the
//! transaction ledger.

use rusqlite::{Connection, Row};

use crate::{Error, user::UserID};

/// Alias for the integer type used for account IDs.
pub type AccountID = i64;

/// The running balances for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The ID of the account.
    pub id: AccountID,
    /// The ID of the user that owns the account.
    pub user_id: UserID,
    /// The cumulative sum of all additions ever applied. Not reduced by
    /// expenses.
    pub total_amount: f64,
    /// The spendable balance. Recoverable as the sum of additions minus the
    /// sum of expenses.
    pub current_balance: f64,
    /// The user's savings goal. Independent of the balance.
    pub target_amount: f64,
}

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL UNIQUE,
                total_amount REAL NOT NULL DEFAULT 0,
                current_balance REAL NOT NULL DEFAULT 0,
                target_amount REAL NOT NULL DEFAULT 0,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Create an account for `user_id` with all amounts zero.
///
/// Called from user registration inside the same SQL transaction that
/// creates the user row.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if `user_id` does not refer to a valid user or the
///   user already has an account, or if there is some other SQL error.
pub fn create_account(user_id: UserID, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "INSERT INTO account (user_id)
             VALUES (?1)
             RETURNING id, user_id, total_amount, current_balance, target_amount",
        )?
        .query_row((user_id.as_i64(),), map_account_row)?;

    Ok(account)
}

/// Get the account owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `user_id` does not have an account,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_account_by_user(user_id: UserID, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare(
            "SELECT id, user_id, total_amount, current_balance, target_amount
             FROM account WHERE user_id = :user_id",
        )?
        .query_row(&[(":user_id", &user_id.as_i64())], map_account_row)?;

    Ok(account)
}

/// Map a database row to an Account.
pub fn map_account_row(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = UserID::new(row.get(1)?);
    let total_amount = row.get(2)?;
    let current_balance = row.get(3)?;
    let target_amount = row.get(4)?;

    Ok(Account {
        id,
        user_id,
        total_amount,
        current_balance,
        target_amount,
    })
}
