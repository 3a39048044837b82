//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, seed::FeedClient,
    transaction::count_transactions,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The config that controls how pages of transactions are sized.
    pub pagination_config: PaginationConfig,

    /// The client used to reload transactions from the seed feed.
    pub feed_client: FeedClient,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models. `feed_url` is where the seed data is fetched from.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        feed_url: &str,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;
        tracing::info!(
            "Opened database with {} transactions",
            count_transactions(&db_connection)?
        );

        Ok(Self {
            pagination_config,
            feed_client: FeedClient::new(feed_url),
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}
