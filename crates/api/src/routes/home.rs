use axum::Json;
use serde_json::{json, Value};

/// Handler for the route index (GET /)
///
/// Lists the fixed GET routes; the parameterized stats routes are documented
/// at /docs. The list is declared rather than reflected from the router.
pub async fn index_handler() -> Json<Value> {
    Json(json!({
        "api": "Climate Observations API",
        "routes": [
            { "path": "/", "endpoint": "index" },
            { "path": "/api/v1.0/precipitation", "endpoint": "precipitation" },
            { "path": "/api/v1.0/stations", "endpoint": "stations" },
            { "path": "/api/v1.0/tobs", "endpoint": "tobs" },
            { "path": "/api/v1.0/", "endpoint": "temperature_stats" },
        ],
    }))
}
