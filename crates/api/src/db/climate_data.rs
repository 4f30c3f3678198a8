use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read contract of the observation store.
///
/// The store is an externally supplied, read-only table pair; its schema is a
/// declared contract, never reflected at runtime.
#[async_trait]
pub trait ClimateData: Sync + Send {
    async fn stations(&self) -> Result<Vec<Station>, Error>;
    async fn observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, Error>;
    /// Observation counts per station, for activity ranking
    async fn observation_counts(&self) -> Result<Vec<StationCount>, Error>;
}

/// Narrows an observation query; all fields are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ObservationFilter {
    pub station_id: Option<String>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

impl ObservationFilter {
    pub fn date_range(date_from: Date, date_to: Option<Date>) -> Self {
        Self {
            station_id: None,
            date_from: Some(date_from),
            date_to,
        }
    }

    pub fn station_range(station_id: &str, date_from: Date, date_to: Date) -> Self {
        Self {
            station_id: Some(station_id.to_owned()),
            date_from: Some(date_from),
            date_to: Some(date_to),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow, ToSchema)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// A single dated reading attributed to one station.
///
/// `(station_id, date)` is not unique; duplicate dates simply contribute
/// multiple values to that date's aggregates.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow, ToSchema)]
pub struct Observation {
    pub station_id: String,
    pub date: Date,
    pub precipitation: Option<f64>,
    pub temperature: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, FromRow, ToSchema)]
pub struct StationCount {
    pub station_id: String,
    pub observations: i64,
}
