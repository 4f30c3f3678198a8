use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::{
    analysis, db,
    db::{ClimateData, ClimateDb},
    routes,
    routes::{
        get_stations, index_handler, missing_start, precipitation, temperature_stats_closed,
        temperature_stats_open, tobs,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::precipitation,
        routes::climate::get_stations,
        routes::climate::tobs,
        routes::climate::temperature_stats_open,
        routes::climate::temperature_stats_closed,
    ),
    components(
        schemas(
                db::Station,
                analysis::DateStat,
                routes::climate::PrecipitationReading,
                routes::climate::TemperatureReading
            )
    ),
    tags(
        (name = "climate observations api", description = "a read-only RESTful api serving historical precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(database: &str) -> Result<AppState, anyhow::Error> {
    let climate_db = Arc::new(
        ClimateDb::connect(database)
            .await
            .map_err(|e| anyhow!("error opening climate store: {}", e))?,
    );

    Ok(AppState { climate_db })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        // API routes; the parameterized stats routes accept trailing slashes too
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(get_stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/", get(missing_start))
        .route("/api/v1.0/{start}", get(temperature_stats_open))
        .route("/api/v1.0/{start}/", get(temperature_stats_open))
        .route("/api/v1.0/{start}/{end}", get(temperature_stats_closed))
        .route("/api/v1.0/{start}/{end}/", get(temperature_stats_closed))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
