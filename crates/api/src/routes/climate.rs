use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use crate::{
    analysis::{
        self, compute_date_stats, find_most_active_station_window, try_parse_date, DateStat,
    },
    db::{ObservationFilter, Station},
    AppState,
};

/// User-facing message for a missing or unparsable start date. Validation
/// happens here, before any store query runs.
pub const START_DATE_REQUIRED: &str = "start date is required in date format YYYY-MM-DD";

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PrecipitationReading {
    pub date: Date,
    pub precipitation: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct TemperatureReading {
    pub date: Date,
    pub temperature: f64,
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "All dated precipitation readings", body = Vec<PrecipitationReading>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation store")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, (StatusCode, String)> {
    let observations = state
        .climate_db
        .observations(&ObservationFilter::default())
        .await
        .map_err(|err| {
            error!("error listing precipitation readings: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("failed to read observations"),
            )
        })?;

    let readings = observations
        .into_iter()
        .map(|observation| PrecipitationReading {
            date: observation.date,
            precipitation: observation.precipitation,
        })
        .collect();

    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "All station records", body = Vec<Station>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation store")
    ))]
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Station>>, (StatusCode, String)> {
    let stations = state.climate_db.stations().await.map_err(|err| {
        error!("error listing stations: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("failed to read stations"),
        )
    })?;

    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Trailing-year temperature observations of the most active station, most recent first", body = Vec<TemperatureReading>),
        (status = NOT_FOUND, description = "The store holds no observations"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation store")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureReading>>, (StatusCode, String)> {
    let window = find_most_active_station_window(state.climate_db.as_ref())
        .await
        .map_err(map_analysis_error)?;

    let mut observations = state
        .climate_db
        .observations(&ObservationFilter::station_range(
            &window.station_id,
            window.start,
            window.end,
        ))
        .await
        .map_err(|err| {
            error!("error reading window observations: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("failed to read observations"),
            )
        })?;

    observations.sort_by(|a, b| b.date.cmp(&a.date));

    let readings = observations
        .into_iter()
        .map(|observation| TemperatureReading {
            date: observation.date,
            temperature: observation.temperature,
        })
        .collect();

    Ok(Json(readings))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Per-date temperature stats for dates on or after start", body = Vec<DateStat>),
        (status = BAD_REQUEST, description = "Missing or unparsable start date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation store")
    ))]
pub async fn temperature_stats_open(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<DateStat>>, (StatusCode, String)> {
    date_stats(&state, &start, None).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "End date, YYYY-MM-DD; an unparsable end degrades to an open-ended range"),
    ),
    responses(
        (status = OK, description = "Per-date temperature stats between start and end inclusive", body = Vec<DateStat>),
        (status = BAD_REQUEST, description = "Missing or unparsable start date"),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the observation store")
    ))]
pub async fn temperature_stats_closed(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<DateStat>>, (StatusCode, String)> {
    date_stats(&state, &start, Some(&end)).await
}

/// A bare /api/v1.0/ carries no start date, which fails validation.
pub async fn missing_start() -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, String::from(START_DATE_REQUIRED))
}

async fn date_stats(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<Json<Vec<DateStat>>, (StatusCode, String)> {
    let start = try_parse_date(start)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, String::from(START_DATE_REQUIRED)))?;
    // Unparsable end dates degrade to an open-ended range instead of failing
    let end = end.and_then(try_parse_date);

    let stats = compute_date_stats(state.climate_db.as_ref(), start, end)
        .await
        .map_err(|err| {
            error!("error computing date stats: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("failed to compute temperature stats"),
            )
        })?;

    Ok(Json(stats))
}

fn map_analysis_error(err: analysis::Error) -> (StatusCode, String) {
    match err {
        analysis::Error::EmptyStore => (StatusCode::NOT_FOUND, err.to_string()),
        other => {
            error!("error deriving activity window: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("failed to derive activity window"),
            )
        }
    }
}
