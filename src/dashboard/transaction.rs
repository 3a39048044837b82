//! Database queries for retrieving dashboard transaction data.
//!
//! This module provides a simplified transaction view for dashboard
//! aggregations. It leaves out the ID and description, which no chart uses.

use rusqlite::Connection;
use serde::Serialize;
use time::{Month, OffsetDateTime};

use crate::Error;

/// A simplified transaction view for dashboard aggregations.
///
/// This is also the shape of the transactions in the combined dashboard
/// response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Sale {
    pub title: String,
    pub price: f64,
    pub sold: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    pub category: String,
    pub image_url: Option<String>,
}

/// Gets the transactions sold in `month` of any year, ordered by ID.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Row mapping fails
pub(super) fn get_sales_in_month(month: Month, connection: &Connection) -> Result<Vec<Sale>, Error> {
    let mut stmt = connection.prepare(
        "SELECT title, price, sold, date_of_sale, category, image
        FROM sale_transaction
        WHERE sale_month = ?1
        ORDER BY id ASC",
    )?;

    stmt.query_map([month as u8], |row| {
        Ok(Sale {
            title: row.get(0)?,
            price: row.get(1)?,
            sold: row.get(2)?,
            date_of_sale: row.get(3)?,
            category: row.get(4)?,
            image_url: row.get(5)?,
        })
    })?
    .collect::<Result<Vec<Sale>, rusqlite::Error>>()
    .map_err(|error| error.into())
}
