//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing and whether it sold, as delivered by the seed feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID assigned by the seed feed, either an integer or a string.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price, never negative.
    pub price: f64,
    /// A free-form category label, e.g. "electronics".
    pub category: String,
    /// Whether the product sold.
    pub sold: bool,
    /// When the sale was recorded. Only the month is used for filtering.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URL to an image of the product.
    #[serde(default)]
    pub image: Option<String>,
}

impl Transaction {
    /// The calendar month of the sale date in UTC, from 1 to 12.
    pub fn sale_month(&self) -> u8 {
        self.date_of_sale.to_offset(UtcOffset::UTC).month() as u8
    }
}

#[cfg(test)]
impl Transaction {
    /// Create a transaction for tests with placeholder text fields.
    pub fn build(id: i64, price: f64, date_of_sale: OffsetDateTime) -> TransactionBuilder {
        TransactionBuilder {
            transaction: Transaction {
                id: TransactionId::Integer(id),
                title: format!("Product #{id}"),
                description: String::new(),
                price,
                category: "misc".to_owned(),
                sold: false,
                date_of_sale,
                image: None,
            },
        }
    }
}

/// Fills in the optional parts of a test [Transaction].
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

#[cfg(test)]
impl TransactionBuilder {
    pub fn title(mut self, title: &str) -> Self {
        self.transaction.title = title.to_owned();
        self
    }

    pub fn text_id(mut self, id: &str) -> Self {
        self.transaction.id = TransactionId::from(id);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.transaction.description = description.to_owned();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.transaction.category = category.to_owned();
        self
    }

    pub fn sold(mut self, sold: bool) -> Self {
        self.transaction.sold = sold;
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.transaction.image = Some(image.to_owned());
        self
    }

    pub fn finish(self) -> Transaction {
        self.transaction
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

const INSERT_TRANSACTION: &str = "INSERT INTO sale_transaction
    (id, title, description, price, category, sold, date_of_sale, sale_month, image,
    title_folded, description_folded)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

/// Insert a single transaction.
///
/// The sale date is stored in UTC. Lowercase copies of the title and
/// description are stored for case-insensitive search.
///
/// # Errors
/// This function will return a [Error::SqlError] if the ID already exists or
/// there is some other SQL error.
pub fn insert_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    connection
        .prepare_cached(INSERT_TRANSACTION)?
        .execute((
            &transaction.id,
            &transaction.title,
            &transaction.description,
            transaction.price,
            &transaction.category,
            transaction.sold,
            transaction.date_of_sale.to_offset(UtcOffset::UTC),
            transaction.sale_month(),
            &transaction.image,
            transaction.title.to_lowercase(),
            transaction.description.to_lowercase(),
        ))?;

    Ok(())
}

/// Replace every stored transaction with `transactions`.
///
/// The delete and the inserts run in a single SQL transaction, so on error the
/// previous contents are kept.
///
/// # Errors
/// This function will return a [Error::SqlError] if any insert fails, e.g.
/// because of a duplicate ID.
pub fn replace_all_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    let deleted = tx.execute("DELETE FROM sale_transaction", ())?;
    tracing::debug!("deleted {deleted} transactions");

    for transaction in transactions {
        insert_transaction(transaction, &tx)?;
    }

    tx.commit()?;

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    let count: i64 = connection.query_row("SELECT COUNT(id) FROM sale_transaction;", [], |row| {
        row.get(0)
    })?;

    Ok(count as u64)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_transaction (
                id NOT NULL PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                image TEXT,
                title_folded TEXT NOT NULL,
                description_folded TEXT NOT NULL
                )",
        (),
    )?;

    // Every read filters on the month.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_month ON sale_transaction(sale_month);",
        (),
    )?;

    Ok(())
}

/// The columns read by [map_transaction_row], in order.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        date_of_sale: row.get(6)?,
        image: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
