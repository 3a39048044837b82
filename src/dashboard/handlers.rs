//! Dashboard HTTP handlers.
//!
//! Each handler resolves the requested month, loads that month's sales once
//! and responds with one or more aggregates as JSON.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;
use time::Month;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            compute_category_breakdown, compute_combined, compute_histogram, compute_statistics,
        },
        transaction::{Sale, get_sales_in_month},
    },
    month::MonthQuery,
};

/// The state needed for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl DashboardState {
    fn sales_in_month(&self, month: Month) -> Result<Vec<Sale>, Error> {
        let connection = self
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_sales_in_month(month, &connection)
    }
}

/// Unwrap the query string, reporting a malformed one as [Error::InvalidQuery].
fn month_query(query: Result<Query<MonthQuery>, QueryRejection>) -> Result<MonthQuery, Error> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| Error::InvalidQuery(rejection.body_text()))
}

fn json_or_error<T: Serialize>(result: Result<T, Error>, failure_message: &str) -> Response {
    match result {
        Ok(body) => Json(body).into_response(),
        Err(error) => error.into_json_response(failure_message),
    }
}

/// Sales totals for the requested month.
///
/// An absent month is reported as missing rather than invalid.
pub async fn get_statistics_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let result = month_query(query)
        .and_then(|query| query.required())
        .and_then(|month| state.sales_in_month(month))
        .map(|sales| compute_statistics(&sales));

    json_or_error(result, "Failed to fetch statistics")
}

/// The price-range histogram for the requested month.
pub async fn get_bar_chart_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let result = month_query(query)
        .and_then(|query| query.valid())
        .and_then(|month| state.sales_in_month(month))
        .map(|sales| compute_histogram(&sales));

    json_or_error(result, "Failed to fetch bar chart data")
}

/// The per-category item counts for the requested month.
pub async fn get_pie_chart_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let result = month_query(query)
        .and_then(|query| query.valid())
        .and_then(|month| state.sales_in_month(month))
        .map(|sales| compute_category_breakdown(&sales));

    json_or_error(result, "Failed to fetch pie chart data")
}

/// The transactions, statistics, histogram and category counts for the
/// requested month in a single response.
pub async fn get_combined_data_endpoint(
    State(state): State<DashboardState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Response {
    let result = month_query(query)
        .and_then(|query| query.valid())
        .and_then(|month| state.sales_in_month(month))
        .map(compute_combined);

    json_or_error(result, "Failed to fetch combined data")
}
