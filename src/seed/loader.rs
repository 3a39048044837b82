//! Replaces the stored transactions with the contents of the seed feed.

use std::sync::Mutex;

use rusqlite::Connection;

use crate::{Error, transaction::replace_all_transactions};

use super::feed::FeedClient;

/// Fetch the seed feed and make it the complete contents of the store.
///
/// The feed is downloaded and validated before the store is touched, and the
/// swap happens in one SQL transaction, so the previous transactions survive
/// any failure.
///
/// Returns the number of transactions loaded.
///
/// # Errors
/// This function will return a:
/// - [Error::UpstreamFetch] or [Error::InvalidFeed] if the feed could not be
///   used, see [FeedClient::fetch],
/// - [Error::DatabaseLockError] if the database lock is poisoned,
/// - or [Error::SqlError] if the transactions could not be written.
pub async fn reinitialize(feed: &FeedClient, connection: &Mutex<Connection>) -> Result<usize, Error> {
    let transactions = feed.fetch().await?;

    let connection = connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let count = replace_all_transactions(&transactions, &connection)?;
    tracing::info!("loaded {count} transactions from {}", feed.url());

    Ok(count)
}
