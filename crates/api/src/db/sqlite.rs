use std::{str::FromStr, time::Duration};

use log::info;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    QueryBuilder,
};

use super::{ClimateData, Error, Observation, ObservationFilter, Station, StationCount};

/// Read-only access to the observation store.
///
/// Connections are checked out of the pool per query and returned on every
/// exit path; no handle outlives a request.
pub struct ClimateDb {
    pool: SqlitePool,
}

impl ClimateDb {
    pub async fn connect(path: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .pragma("query_only", "ON")
            .pragma("busy_timeout", "5000")
            .pragma("cache_size", "-64000");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("SQLite climate store opened read-only at: {}", path);

        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl ClimateData for ClimateDb {
    async fn stations(&self) -> Result<Vec<Station>, Error> {
        let stations = sqlx::query_as::<_, Station>(
            "SELECT station_id, name, latitude, longitude, elevation
             FROM stations
             ORDER BY station_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    async fn observations(&self, filter: &ObservationFilter) -> Result<Vec<Observation>, Error> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT station_id, date, precipitation, temperature FROM observations",
        );

        let mut clause = " WHERE ";
        if let Some(station_id) = &filter.station_id {
            query.push(clause).push("station_id = ").push_bind(station_id);
            clause = " AND ";
        }
        if let Some(date_from) = filter.date_from {
            query.push(clause).push("date >= ").push_bind(date_from);
            clause = " AND ";
        }
        if let Some(date_to) = filter.date_to {
            query.push(clause).push("date <= ").push_bind(date_to);
        }
        // Deterministic order regardless of storage iteration order
        query.push(" ORDER BY date, station_id");

        let observations = query
            .build_query_as::<Observation>()
            .fetch_all(&self.pool)
            .await?;

        Ok(observations)
    }

    async fn observation_counts(&self) -> Result<Vec<StationCount>, Error> {
        let counts = sqlx::query_as::<_, StationCount>(
            "SELECT station_id, COUNT(*) AS observations
             FROM observations
             GROUP BY station_id
             ORDER BY station_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
