//! The endpoint that reloads the store from the seed feed.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::AppState;

use super::{feed::FeedClient, loader::reinitialize};

/// The state needed for reloading the seed data.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection for writing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client for the seed feed.
    pub feed_client: FeedClient,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            feed_client: state.feed_client.clone(),
        }
    }
}

/// Replace every stored transaction with the current contents of the seed feed.
///
/// Responds with 201 Created on success.
pub async fn initialize_data_endpoint(State(state): State<SeedState>) -> Response {
    match reinitialize(&state.feed_client, &state.db_connection).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Data initialized successfully!" })),
        )
            .into_response(),
        Err(error) => error.into_json_response("Failed to initialize data"),
    }
}
