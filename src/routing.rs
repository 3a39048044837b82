//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;

use crate::{
    AppState,
    dashboard::{
        get_bar_chart_endpoint, get_combined_data_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    endpoints,
    seed::initialize_data_endpoint,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let transaction_routes = Router::new()
        .route(endpoints::LIST, get(get_transactions_endpoint))
        .route(endpoints::INITIALIZE_DATA, get(initialize_data_endpoint))
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_DATA, get(get_combined_data_endpoint));

    Router::new()
        .nest(endpoints::TRANSACTIONS_API, transaction_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "The requested resource could not be found." })),
    )
        .into_response()
}
