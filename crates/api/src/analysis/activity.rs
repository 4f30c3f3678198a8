use time::Date;

use super::{dates::one_year_before, Error};
use crate::db::{ClimateData, ObservationFilter};

/// Trailing one-year analysis window anchored on the busiest station's most
/// recent reading. Invariant: `start == one_year_before(end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityWindow {
    pub station_id: String,
    pub station_name: String,
    pub start: Date,
    pub end: Date,
}

/// Rank stations by observation count and derive the trailing-year window for
/// the winner. Equal counts fall to the lexicographically smallest station id
/// so the result never depends on storage iteration order.
pub async fn find_most_active_station_window(
    store: &dyn ClimateData,
) -> Result<ActivityWindow, Error> {
    let counts = store.observation_counts().await?;
    let busiest = counts
        .into_iter()
        .max_by(|a, b| {
            a.observations
                .cmp(&b.observations)
                .then_with(|| b.station_id.cmp(&a.station_id))
        })
        .ok_or(Error::EmptyStore)?;

    let station_name = store
        .stations()
        .await?
        .into_iter()
        .find(|station| station.station_id == busiest.station_id)
        .map(|station| station.name)
        .ok_or_else(|| Error::UnknownStation(busiest.station_id.clone()))?;

    let observations = store
        .observations(&ObservationFilter {
            station_id: Some(busiest.station_id.clone()),
            ..ObservationFilter::default()
        })
        .await?;
    let end = observations
        .iter()
        .map(|observation| observation.date)
        .max()
        .ok_or(Error::EmptyStore)?;

    Ok(ActivityWindow {
        station_id: busiest.station_id,
        station_name,
        start: one_year_before(end),
        end,
    })
}
