//! REST API endpoints for points of sale.
//!
//! Listing is read-only and cheap; updating re-ingests the whole upstream feed
//! and replaces the stored data.

use crate::{
    ApiApplication,
    envelope::{Failure, Success, failure, success},
    openapi::{ADMIN_TAG, QUERY_TAG},
};
use aide::axum::{
    ApiRouter,
    routing::{get_with, post_with},
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use pos_core::{
    models::{Map, PointOfSaleId, PointOfSaleRecord},
    ports::{Application as _, IngestFailure, IngestReport, QueryFailure},
};
use tracing::{Level, event};

/// Query parameters for listing open points of sale.
///
/// Both are kept as strings so that malformed values are reported in the
/// response envelope rather than rejected by the extractor.
#[derive(serde::Deserialize, schemars::JsonSchema)]
struct OpenAt {
    /// Day of the week, `0` (Sunday) to `6` (Saturday). Defaults to today.
    day: Option<String>,
    /// Time of day as `H:MM` or `HH:MM`. Defaults to the current time.
    time: Option<String>,
}

/// Creates a router with point-of-sale endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route(
            "/",
            get_with(list_open::<T>, |op| op.tag(QUERY_TAG)),
        )
        .api_route(
            "/update",
            post_with(update::<T>, |op| op.tag(ADMIN_TAG)),
        )
}

/// List the points of sale open at a given day and time.
///
/// The response maps each point of sale id to its record, in the order the
/// points of sale were ingested. Only the opening windows that match the
/// query are included.
///
/// # Returns
///
/// - `200 OK`: The matching points of sale
/// - `400 Bad Request`: `day` or `time` is malformed
/// - `500 Internal Server Error`: Database query failed
async fn list_open<T: ApiApplication>(
    State(app): State<T>,
    Query(OpenAt { day, time }): Query<OpenAt>,
) -> Result<Success<Map<PointOfSaleId, PointOfSaleRecord>>, Failure> {
    app.list_open(day.as_deref(), time.as_deref())
        .await
        .map(|records| success(None, records))
        .map_err(|err| match err {
            QueryFailure::Query(err) => {
                event!(Level::DEBUG, err = err.to_string(), "rejected query");
                failure(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid parameter provided - {err}"),
                )
            }
            QueryFailure::Storage(err) => {
                event!(Level::ERROR, err = err.to_string());
                failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load data from the database",
                )
            }
        })
}

/// Re-ingest the upstream feed.
///
/// Fetches the feed, normalizes every entry and replaces the stored points of
/// sale in a single batch. The report lists how much was written and which
/// entries were skipped.
///
/// # Returns
///
/// - `200 OK`: The feed was ingested
/// - `500 Internal Server Error`: The feed, an entry or the database failed
async fn update<T: ApiApplication>(State(app): State<T>) -> Result<Success<IngestReport>, Failure> {
    app.refresh()
        .await
        .map(|report| success(Some("Points of sale successfully updated".to_owned()), report))
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            let message = match err {
                IngestFailure::Feed(_) => "Failed to retrieve the points-of-sale feed".to_owned(),
                IngestFailure::MalformedHours { id, source } => {
                    format!("Malformed opening hours for {id} - {source}")
                }
                IngestFailure::DuplicateId(id) => format!("Duplicate point of sale {id}"),
                IngestFailure::Storage(_) => "Failed to save data to the database".to_owned(),
            };
            failure(StatusCode::INTERNAL_SERVER_ERROR, message)
        })
}
