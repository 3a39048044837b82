//! Transaction storage and listing.
//!
//! This module contains everything related to individual transactions:
//! - The `Transaction` model and the SQLite table that stores it
//! - The paginated, searchable month query
//! - The route handler for listing transactions

mod core;
mod list_endpoint;
mod query;

#[cfg(test)]
pub use core::insert_transaction;
pub use core::{Transaction, count_transactions, create_transaction_table, replace_all_transactions};
pub use list_endpoint::get_transactions_endpoint;
