pub mod analysis;
pub mod db;
pub mod routes;
mod startup;
mod utils;

pub use analysis::{
    aggregate_by_date, compute_date_stats, find_most_active_station_window, one_year_before,
    try_parse_date, ActivityWindow, DateStat,
};
pub use db::{ClimateData, ClimateDb, Observation, ObservationFilter, Station, StationCount};
pub use routes::*;
pub use startup::*;
pub use utils::*;
