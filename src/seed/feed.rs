//! HTTP client for the external seed feed.

use std::{collections::HashSet, time::Duration};

use reqwest::Client;

use crate::{Error, transaction::Transaction};

/// How long to wait for the seed feed before giving up.
const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the complete list of transactions from the seed feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http_client: Client,
    url: String,
}

impl FeedClient {
    /// Create a client for the feed at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            url: url.into(),
        }
    }

    /// The URL the feed is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and validate the feed.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpstreamFetch] if the request fails or the feed responds with
    ///   a non-success status code,
    /// - or [Error::InvalidFeed] if the body is not a JSON list of
    ///   transactions, a price is negative or an ID appears more than once.
    pub async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("fetching seed feed from {}", self.url);

        let response = self
            .http_client
            .get(&self.url)
            .timeout(FEED_TIMEOUT)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| Error::UpstreamFetch(error.to_string()))?;

        let transactions = response
            .json::<Vec<Transaction>>()
            .await
            .map_err(|error| Error::InvalidFeed(error.to_string()))?;

        validate_feed(&transactions)?;

        Ok(transactions)
    }
}

/// Check the feed before anything is written to the store.
fn validate_feed(transactions: &[Transaction]) -> Result<(), Error> {
    let mut ids = HashSet::with_capacity(transactions.len());

    for transaction in transactions {
        if !transaction.price.is_finite() || transaction.price < 0.0 {
            return Err(Error::InvalidFeed(format!(
                "transaction {} has invalid price {}",
                transaction.id, transaction.price
            )));
        }

        if !ids.insert(&transaction.id) {
            return Err(Error::InvalidFeed(format!(
                "transaction ID {} appears more than once",
                transaction.id
            )));
        }
    }

    Ok(())
}
