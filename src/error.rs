//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to clients that omit the month on endpoints that accept
/// any month.
pub const MONTH_REQUIRED_MESSAGE: &str = "Month is required";

/// The message sent to clients that omit the month or send something other
/// than a canonical month name.
pub const INVALID_MONTH_MESSAGE: &str = "A valid month is required (e.g., January, February)";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not include the `month` query parameter.
    #[error("month is required")]
    MissingMonth,

    /// The `month` query parameter was not one of the twelve English month
    /// names, e.g. "March". Matching is case-sensitive.
    #[error("\"{0}\" is not a valid month name")]
    InvalidMonth(String),

    /// The query string could not be parsed, e.g. a page number that is not a
    /// positive integer.
    #[error("{0}")]
    InvalidQuery(String),

    /// The seed feed could not be reached or responded with a non-success
    /// status code.
    #[error("could not fetch the seed feed: {0}")]
    UpstreamFetch(String),

    /// The seed feed responded, but the body was not a list of valid
    /// transactions.
    ///
    /// Nothing is written to the store when this happens.
    #[error("the seed feed contained invalid data: {0}")]
    InvalidFeed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The server was started with settings that cannot work together, e.g. a
    /// default page size larger than the maximum page size.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Something went wrong")
    }
}

impl Error {
    /// Convert the error into a JSON response with a `message` field.
    ///
    /// Client errors keep their own message. Any other error becomes a 500
    /// response that uses `failure_message` and carries the error text in an
    /// `error` field.
    pub(crate) fn into_json_response(self, failure_message: &str) -> Response {
        match self {
            Error::MissingMonth => bad_request(MONTH_REQUIRED_MESSAGE),
            Error::InvalidMonth(month) => {
                tracing::debug!("rejected month {month:?}");
                bad_request(INVALID_MONTH_MESSAGE)
            }
            Error::InvalidQuery(message) => bad_request(&message),
            error => {
                tracing::error!("{failure_message}: {error}");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": failure_message,
                        "error": error.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": message })),
    )
        .into_response()
}
