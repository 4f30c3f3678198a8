use itertools::Itertools;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

use super::Error;
use crate::db::{ClimateData, Observation, ObservationFilter};

/// Aggregated temperature summary for all observations sharing one date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DateStat {
    pub date: Date,
    pub tmin: f64,
    pub tavg: f64,
    pub tmax: f64,
}

/// Per-date (min, avg, max) temperature summaries for `date >= start`, capped
/// at `end` when present. An empty range yields an empty sequence.
pub async fn compute_date_stats(
    store: &dyn ClimateData,
    start: Date,
    end: Option<Date>,
) -> Result<Vec<DateStat>, Error> {
    let observations = store
        .observations(&ObservationFilter::date_range(start, end))
        .await?;

    Ok(aggregate_by_date(&observations))
}

/// Group observations by date and reduce each group to its temperature
/// extremes and arithmetic mean, ascending by date. Duplicate
/// `(station, date)` readings simply contribute more values to the group.
pub fn aggregate_by_date(observations: &[Observation]) -> Vec<DateStat> {
    let grouped = observations
        .iter()
        .map(|observation| (observation.date, observation.temperature))
        .into_group_map();

    let mut stats: Vec<DateStat> = grouped
        .into_iter()
        .map(|(date, temperatures)| {
            let tmin = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
            let tmax = temperatures
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let tavg = temperatures.iter().sum::<f64>() / temperatures.len() as f64;
            DateStat {
                date,
                tmin,
                tavg,
                tmax,
            }
        })
        .collect();

    stats.sort_by_key(|stat| stat.date);
    stats
}
