//! Database query helpers for the paginated transaction list.

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    pagination::{Page, page_count},
};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// One page of transactions plus how many pages there are in total.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The transactions on the requested page, ordered by ID.
    pub transactions: Vec<Transaction>,
    /// The number of pages needed to show every matching transaction.
    pub total_pages: u64,
}

/// Defines which transactions [query_transactions] returns.
#[derive(Debug, Clone, Copy)]
pub struct TransactionQuery<'a> {
    /// Only transactions sold in this month, in any year.
    pub month: Month,
    /// Case-insensitive text to look for in the title or description.
    /// Case is folded with Unicode rules, so "ÉCOLE" finds "école".
    ///
    /// If the text is a number `n`, transactions priced from `n` up to but not
    /// including `n + 1` also match. Empty text matches everything.
    pub search: Option<&'a str>,
    /// The page of results to return.
    pub page: Page,
}

/// Get a page of the transactions matching `query`, ordered by ID.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn query_transactions(
    query: TransactionQuery,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let mut where_clause_parts = vec!["sale_month = ?1".to_owned()];
    let mut query_parameters = vec![Value::Integer(query.month as i64)];

    if let Some(search) = query.search.filter(|search| !search.is_empty()) {
        let text_param = query_parameters.len() + 1;
        query_parameters.push(Value::Text(search.to_lowercase()));

        let mut search_parts = vec![
            format!("instr(title_folded, ?{text_param}) > 0"),
            format!("instr(description_folded, ?{text_param}) > 0"),
        ];

        if let Some(price) = parse_price_search(search) {
            search_parts.push(format!(
                "(price >= ?{} AND price < ?{})",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Real(price));
            query_parameters.push(Value::Real(price + 1.0));
        }

        where_clause_parts.push(format!("({})", search_parts.join(" OR ")));
    }

    let where_clause = where_clause_parts.join(" AND ");

    let match_count: i64 = connection.query_row(
        &format!("SELECT COUNT(id) FROM sale_transaction WHERE {where_clause}"),
        params_from_iter(query_parameters.iter()),
        |row| row.get(0),
    )?;

    let limit_param = query_parameters.len() + 1;
    let page_query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction WHERE {where_clause} \
        ORDER BY id ASC LIMIT ?{limit_param} OFFSET ?{}",
        limit_param + 1,
    );
    query_parameters.push(Value::Integer(query.page.limit()));
    query_parameters.push(Value::Integer(query.page.offset()));

    let transactions = connection
        .prepare(&page_query)?
        .query_map(params_from_iter(query_parameters.iter()), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        transactions,
        total_pages: page_count(match_count as u64, query.page.size),
    })
}

/// Interpret a search term as a price, e.g. "15" or " 15.5 ".
fn parse_price_search(search: &str) -> Option<f64> {
    search
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}
