//! The endpoint for browsing and searching a month of transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    month::required_month,
    pagination::{Page, PaginationConfig},
};

use super::query::{TransactionPage, TransactionQuery, query_transactions};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls how pages of transactions are sized.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query string accepted by [get_transactions_endpoint].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The month name, e.g. "March". Required.
    pub month: Option<String>,
    /// Text to look for in the title or description, or a price.
    pub search: Option<String>,
    /// The one-based page number.
    pub page: Option<u64>,
    /// The number of transactions per page.
    pub per_page: Option<u64>,
}

/// Respond with a page of the transactions sold in the requested month.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionListState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Response {
    match list_transactions(&state, query) {
        Ok(page) => Json(page).into_response(),
        Err(error) => error.into_json_response("Failed to fetch transactions"),
    }
}

fn list_transactions(
    state: &TransactionListState,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<TransactionPage, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;

    let month = required_month(query.month.as_deref())?;
    let page = Page::new(query.page, query.per_page, &state.pagination_config)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    query_transactions(
        TransactionQuery {
            month,
            search: query.search.as_deref(),
            page,
        },
        &connection,
    )
}
