//! Defines the core data models and database queries for ledger transactions.

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, ledger::AccountID};

/// Alias for the integer type used for transaction IDs.
pub type TransactionID = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction took money out of an account or put money in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money spent. Decreases the current balance.
    Expense,
    /// Money added. Increases both the current balance and the total amount.
    Addition,
}

impl TransactionKind {
    /// The string stored in the database for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Addition => "addition",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "expense" => Ok(TransactionKind::Expense),
            "addition" => Ok(TransactionKind::Addition),
            other => Err(FromSqlError::Other(
                format!("unknown transaction kind \"{other}\"").into(),
            )),
        }
    }
}

/// A single entry in the ledger: an event where money was either spent or
/// added.
///
/// The amount is a positive magnitude, the sign is implied by `kind`.
/// Transactions are immutable once created, the only way to undo one is to
/// delete it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// The ID of the account the transaction belongs to.
    pub account_id: AccountID,
    /// Whether money was spent or added.
    pub kind: TransactionKind,
    /// The amount of money, always positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Insert a transaction row into the database.
///
/// This is the raw insert used by the ledger operations. It does not touch
/// the account balances, callers must update them in the same SQL
/// transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAccount] if `account_id` does not refer to a real account,
/// - or [Error::SqlError] if there is some other SQL error.
pub(super) fn insert_transaction(
    account_id: AccountID,
    kind: TransactionKind,
    amount: f64,
    description: &str,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (account_id, kind, amount, description, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, account_id, kind, amount, description, created_at",
        )?
        .query_row(
            (
                account_id,
                kind,
                amount,
                description,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidAccount(account_id),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_transaction(id: TransactionID, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, account_id, kind, amount, description, created_at
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions for `account_id`, newest first.
///
/// Rows are ordered by `created_at` descending with the ID as a tie-break,
/// so "the last N transactions" is always well defined even when several
/// rows share a timestamp.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_account(
    account_id: AccountID,
    limit: Option<u32>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let transactions = connection
        .prepare(
            "SELECT id, account_id, kind, amount, description, created_at
             FROM \"transaction\"
             WHERE account_id = :account_id
             ORDER BY created_at DESC, id DESC
             LIMIT :limit",
        )?
        .query_map(
            &[
                (":account_id", &account_id),
                (":limit", &limit.map(i64::from).unwrap_or(-1)),
            ],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(transactions)
}

/// Sum the amounts of all transactions of `kind` for `account_id`.
///
/// Returns zero when the account has no transactions of that kind.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn sum_amount_by_kind(
    account_id: AccountID,
    kind: TransactionKind,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .prepare(
            "SELECT COALESCE(SUM(amount), 0) FROM \"transaction\"
             WHERE account_id = :account_id AND kind = :kind",
        )?
        .query_row(
            &[
                (":account_id", &account_id as &dyn ToSql),
                (":kind", &kind),
            ],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                account_id INTEGER NOT NULL,
                kind TEXT NOT NULL CHECK(kind IN ('expense', 'addition')),
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index for the newest-first listing and the per-kind sums.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_account_created
         ON \"transaction\"(account_id, created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let account_id = row.get(1)?;
    let kind = row.get(2)?;
    let amount = row.get(3)?;
    let description = row.get(4)?;
    let created_at = row.get(5)?;

    Ok(Transaction {
        id,
        account_id,
        kind,
        amount,
        description,
        created_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
