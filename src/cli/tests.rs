//! Tests for the CLI module

use super::*;
use crate::catalog::{builtin_samples, landmarks, Sample};
use crate::collect::CollectionRunner;
use crate::config::{CollectorConfig, WarehouseConfig};
use crate::error::Result;
use crate::normalize::NormalizedRow;
use crate::output::TableSink;
use crate::pricing::{PriceQuote, PriceSource};
use crate::types::{CoordinatePair, Coordinates, JsonValue, Place};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

struct FixedSource(JsonValue);

#[async_trait]
impl PriceSource for FixedSource {
    async fn fetch(&self, _origin: Coordinates, _destination: Coordinates) -> Result<PriceQuote> {
        Ok(PriceQuote::from_raw(self.0.clone()))
    }
}

#[derive(Default)]
struct CountingSink(Arc<Mutex<usize>>);

/// Tracks how many fetches are in flight at once
#[derive(Default)]
struct OverlapSource {
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl PriceSource for OverlapSource {
    async fn fetch(&self, _origin: Coordinates, _destination: Coordinates) -> Result<PriceQuote> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(PriceQuote::from_raw(quote_body()))
    }
}

#[async_trait]
impl TableSink for CountingSink {
    async fn append(&self, rows: &[NormalizedRow]) -> Result<()> {
        *self.0.lock().unwrap() += rows.len();
        Ok(())
    }
}

fn quote_body() -> JsonValue {
    json!({
        "search_id": "abc-123",
        "timestamp": "2025-03-01T14:05:09Z",
        "results": [{
            "prices": [
                {"provider": "Uber", "product": "UberXL", "price_min": 2550, "distance_meters": 1609},
                {"provider": "Lyft", "product": "Lyft", "price_min": 1100,
                 "est_pickup_wait_time": {"min": 240}, "est_time_after_pickup_till_dropoff": 630},
                {"provider": "Uber", "product": "UberX", "price_min": 1200}
            ]
        }]
    })
}

fn two_pair_sample() -> Sample {
    Sample::new(
        "Sample1",
        vec![
            Place::new(1, "Times Square", 40.758_896, -73.985_130),
            Place::new(2, "Empire State Building", 40.748_817, -73.985_428),
        ],
        vec![CoordinatePair::new(1, 1, 2), CoordinatePair::new(2, 2, 1)],
    )
    .unwrap()
}

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn test_parse_quote_command() {
    let cli = Cli::try_parse_from([
        "ride-price-collector",
        "quote",
        "--from",
        "Times Square",
        "--to",
        "40.7128,-74.0060",
        "--save-json",
    ])
    .unwrap();

    match cli.command {
        Commands::Quote {
            from,
            to,
            print_response,
            save_json,
            warehouse,
        } => {
            assert_eq!(from, "Times Square");
            assert_eq!(to, "40.7128,-74.0060");
            assert!(!print_response);
            assert!(save_json);
            assert!(!warehouse);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "ride-price-collector",
        "collect",
        "--output",
        "gs://rides",
        "--pacing-secs",
        "0.5",
        "-v",
    ])
    .unwrap();

    assert!(matches!(cli.command, Commands::Collect));
    assert_eq!(cli.output.as_deref(), Some("gs://rides"));
    assert_eq!(cli.pacing_secs, Some(0.5));
    assert!(cli.verbose);
}

// only test that sets PORT
#[test]
fn test_parse_serve_port_sources() {
    std::env::set_var("PORT", "9100");
    let from_env = Cli::try_parse_from(["ride-price-collector", "serve"]).unwrap();
    let from_flag = Cli::try_parse_from(["ride-price-collector", "serve", "--port", "9200"]).unwrap();
    std::env::remove_var("PORT");
    let default = Cli::try_parse_from(["ride-price-collector", "serve"]).unwrap();

    assert!(matches!(from_env.command, Commands::Serve { port: 9100 }));
    assert!(matches!(from_flag.command, Commands::Serve { port: 9200 }));
    assert!(matches!(default.command, Commands::Serve { port: 8080 }));
}

#[test]
fn test_parse_quote_requires_both_ends() {
    assert!(Cli::try_parse_from(["ride-price-collector", "quote", "--from", "jfk"]).is_err());
}

#[test]
fn test_apply_overrides() {
    let cli = Cli::try_parse_from([
        "ride-price-collector",
        "collect",
        "--output",
        "/tmp/rides",
        "--csv-object",
        "prices.csv",
        "--warehouse-path",
        "/tmp/rides.duckdb",
        "--pacing-secs",
        "0.25",
    ])
    .unwrap();

    let base = CollectorConfig {
        warehouse: Some(WarehouseConfig {
            path: None,
            table: "custom_table".to_string(),
        }),
        ..CollectorConfig::default()
    };
    let config = cli.apply_overrides(base).unwrap();

    assert_eq!(config.output, "/tmp/rides");
    assert_eq!(config.csv_object, "prices.csv");
    assert_eq!(config.pacing, Duration::from_millis(250));
    assert_eq!(
        config.warehouse,
        Some(WarehouseConfig {
            path: Some(PathBuf::from("/tmp/rides.duckdb")),
            table: "custom_table".to_string(),
        })
    );
}

#[test]
fn test_apply_overrides_rejects_negative_pacing() {
    let cli = Cli::try_parse_from(["ride-price-collector", "collect", "--pacing-secs=-1"]).unwrap();
    let err = cli.apply_overrides(CollectorConfig::default()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_apply_overrides_without_flags_keeps_config() {
    let cli = Cli::try_parse_from(["ride-price-collector", "places"]).unwrap();
    let config = cli.apply_overrides(CollectorConfig::default()).unwrap();
    assert_eq!(config, CollectorConfig::default());
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_render_quote_groups_and_sorts() {
    let quote = PriceQuote::from_raw(quote_body());
    let text = render_quote(&quote.response);

    let uber = text.find("Uber OPTIONS:").unwrap();
    let lyft = text.find("Lyft OPTIONS:").unwrap();
    assert!(uber < lyft);

    let uberx = text.find("UberX ").unwrap();
    let uberxl = text.find("UberXL").unwrap();
    assert!(uberx < uberxl);

    assert!(text.contains("$25.50"));
    assert!(text.contains("$11.00"));
    assert!(text.contains("4 min"));
    assert!(text.contains("10.5 min"));
    assert!(text.contains("1.00 miles"));
    assert!(text.contains("Search ID: abc-123"));
    assert!(text.contains("Timestamp: 2025-03-01T14:05:09Z"));
}

#[test]
fn test_render_quote_without_options() {
    let quote = PriceQuote::from_raw(json!({"results": []}));
    assert_eq!(render_quote(&quote.response), "No ride options available\n");
}

#[test]
fn test_render_places_and_samples() {
    let places = render_places(&landmarks());
    assert!(places.contains("times_square"));
    assert!(places.contains("(40.758896, -73.985130)"));

    let samples = render_samples(&builtin_samples());
    assert!(samples.contains("Sample1 (10 pairs)"));
    assert!(samples.contains("Sample2 (10 pairs)"));
    assert!(samples.contains("15 Central Park West -> Goldman Sachs HQ"));
}

#[test]
fn test_render_samples_marks_unknown_places() {
    let sample = Sample::new(
        "Broken",
        vec![Place::new(1, "Only", 40.0, -73.0)],
        vec![CoordinatePair::new(1, 1, 7)],
    )
    .unwrap();
    assert!(render_samples(&[sample]).contains("Only -> <unknown place 7>"));
}

// ============================================================================
// HTTP trigger
// ============================================================================

fn trigger_router() -> (axum::Router, Arc<Mutex<usize>>) {
    let sink = CountingSink::default();
    let appended = Arc::clone(&sink.0);
    let runner = CollectionRunner::new(vec![two_pair_sample()], Box::new(FixedSource(quote_body())))
        .with_table(Box::new(sink));
    (router(runner), appended)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = trigger_router();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: JsonValue = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_get_trigger_runs_a_cycle() {
    let (app, appended) = trigger_router();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        "Successfully collected data for 6 ride options"
    );
    assert_eq!(*appended.lock().unwrap(), 6);
}

#[tokio::test]
async fn test_post_triggers_append_each_time() {
    let (app, appended) = trigger_router();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(*appended.lock().unwrap(), 12);
}

#[tokio::test]
async fn test_concurrent_triggers_are_serialized() {
    let source = OverlapSource::default();
    let peak = Arc::clone(&source.peak);
    let sink = CountingSink::default();
    let appended = Arc::clone(&sink.0);
    let runner = CollectionRunner::new(vec![two_pair_sample()], Box::new(source))
        .with_table(Box::new(sink));
    let app = router(runner);

    let request = || Request::builder().uri("/").body(Body::empty()).unwrap();
    let (a, b) = tokio::join!(app.clone().oneshot(request()), app.clone().oneshot(request()));

    assert_eq!(a.unwrap().status(), StatusCode::OK);
    assert_eq!(b.unwrap().status(), StatusCode::OK);
    assert_eq!(*appended.lock().unwrap(), 12);
    assert_eq!(peak.load(Ordering::SeqCst), 1);
}
