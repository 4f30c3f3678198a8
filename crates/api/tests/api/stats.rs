use crate::helpers::{apply_filter, observation, spawn_app, MockClimateAccess};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use climate_api::DateStat;
use hyper::Method;
use serde_json::from_slice;
use std::sync::Arc;
use time::macros::date;
use tower::ServiceExt;

fn sample_observations() -> Vec<climate_api::Observation> {
    vec![
        observation("A", date!(2016 - 12 - 31), 55.0),
        observation("A", date!(2017 - 01 - 01), 60.0),
        observation("B", date!(2017 - 01 - 01), 70.0),
        observation("B", date!(2017 - 01 - 02), 80.0),
    ]
}

#[tokio::test]
async fn open_range_aggregates_from_start_ascending() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .withf(|filter| {
            filter.station_id.is_none()
                && filter.date_from == Some(date!(2017 - 01 - 01))
                && filter.date_to.is_none()
        })
        .times(1)
        .returning(|filter| Ok(apply_filter(&sample_observations(), filter)));
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/2017-01-01")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let stats: Vec<DateStat> = from_slice(&body).unwrap();

    assert_eq!(
        stats,
        vec![
            DateStat {
                date: date!(2017 - 01 - 01),
                tmin: 60.0,
                tavg: 65.0,
                tmax: 70.0,
            },
            DateStat {
                date: date!(2017 - 01 - 02),
                tmin: 80.0,
                tavg: 80.0,
                tmax: 80.0,
            },
        ]
    );
}

#[tokio::test]
async fn closed_range_caps_at_the_end_date() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .withf(|filter| {
            filter.date_from == Some(date!(2016 - 12 - 01))
                && filter.date_to == Some(date!(2017 - 01 - 01))
        })
        .times(1)
        .returning(|filter| Ok(apply_filter(&sample_observations(), filter)));
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/2016-12-01/2017-01-01")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let stats: Vec<DateStat> = from_slice(&body).unwrap();

    let dates: Vec<_> = stats.iter().map(|s| s.date).collect();
    assert_eq!(dates, vec![date!(2016 - 12 - 31), date!(2017 - 01 - 01)]);
    for stat in &stats {
        assert!(stat.tmin <= stat.tavg && stat.tavg <= stat.tmax);
    }
}

#[tokio::test]
async fn start_after_end_yields_an_empty_sequence() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .times(1)
        .returning(|filter| Ok(apply_filter(&sample_observations(), filter)));
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/2017-06-01/2017-01-01")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let stats: Vec<DateStat> = from_slice(&body).unwrap();
    assert!(stats.is_empty());
}

#[tokio::test]
async fn unparsable_start_fails_validation_before_any_query() {
    // No expectations on the store: reaching it would fail the test
    let climate_data = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/not-a-date")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let message = String::from_utf8(body.to_vec()).unwrap();
    assert!(message.contains("start date is required"));
}

#[tokio::test]
async fn bare_stats_route_requires_a_start_date() {
    let climate_data = MockClimateAccess::new();
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unparsable_end_degrades_to_an_open_range() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .withf(|filter| {
            filter.date_from == Some(date!(2017 - 01 - 01)) && filter.date_to.is_none()
        })
        .times(1)
        .returning(|filter| Ok(apply_filter(&sample_observations(), filter)));
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/2017-01-01/eventually")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn trailing_slash_routes_are_served_too() {
    let mut climate_data = MockClimateAccess::new();
    climate_data
        .expect_observations()
        .times(1)
        .returning(|filter| Ok(apply_filter(&sample_observations(), filter)));
    let test_app = spawn_app(Arc::new(climate_data));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1.0/2017-01-01/")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .oneshot(request)
        .await
        .expect("Failed to execute request.");
    assert!(response.status().is_success());
}
