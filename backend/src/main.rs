//! Power Consumption Dashboard - Backend Server
//!
//! Loads the power consumption dataset once at startup and serves the
//! aggregated views and interaction queries the dashboard charts consume.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use shared::DashboardContext;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod routes;

pub use config::Config;

/// Application state shared across handlers.
///
/// The dashboard context is an immutable snapshot; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<DashboardContext>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pcd_server=debug,shared=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Power Consumption Dashboard Server");
    tracing::info!("Environment: {}", config.environment);

    // Ingest and aggregate once; without valid data there is no dashboard
    let readings = shared::ingest::ingest_path(&config.data.path)
        .with_context(|| format!("failed to load dataset {}", config.data.path))?;
    let mut context = DashboardContext::build(&readings).context("failed to aggregate dataset")?;
    if let Some(year) = config.data.year {
        tracing::info!("Heatmap clicks resolve against configured year {}", year);
        context = context.with_year(year);
    }

    let state = AppState {
        context: Arc::new(context),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_address()))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Power Consumption Dashboard API v1.0"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::Value;
    use shared::{ingest::enrich, RawReading};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let readings: Vec<_> = [(2017, 1, 2), (2017, 1, 3), (2017, 2, 6)]
            .into_iter()
            .flat_map(|(y, m, d)| {
                let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                (0..24).map(move |hour| {
                    enrich(RawReading {
                        timestamp: date.and_hms_opt(hour, 0, 0).unwrap(),
                        temperature: Decimal::from(12),
                        humidity: Decimal::from(70),
                        wind_speed: Decimal::ONE,
                        general_diffuse_flows: Decimal::ZERO,
                        diffuse_flows: Decimal::ZERO,
                        zone1: Decimal::from(10),
                        zone2: Decimal::from(20),
                        zone3: Decimal::from(30),
                    })
                })
            })
            .collect();

        let config = Config {
            environment: "test".to_string(),
            server: crate::config::ServerConfig::default(),
            data: crate::config::DataConfig {
                path: "unused.csv".to_string(),
                year: None,
            },
        };

        AppState {
            context: Arc::new(DashboardContext::build(&readings).unwrap()),
            config: Arc::new(config),
        }
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = create_app(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["days"], 3);
        assert_eq!(body["year"], 2017);
    }

    #[tokio::test]
    async fn test_daily_view() {
        let (status, body) = get_json("/api/v1/views/daily").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["date"], "2017-01-02");
        assert_eq!(body[0]["day_name"], "Monday");
    }

    #[tokio::test]
    async fn test_daily_view_out_of_range_is_empty() {
        let (status, body) = get_json("/api/v1/views/daily?start=2018-01-01&end=2018-02-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hourly_view() {
        let (status, body) = get_json("/api/v1/views/hourly?date=2017-01-03").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 24);

        let (status, body) = get_json("/api/v1/views/hourly?date=2017-07-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_click_resolves_and_degrades() {
        let (status, body) = get_json("/api/v1/click?week=1&day=Monday").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["date"], "2017-01-02");
        assert_eq!(body["hourly"].as_array().unwrap().len(), 24);

        let (status, body) = get_json("/api/v1/click?week=1&day=Blursday").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["date"].is_null());
        assert!(body["hourly"].as_array().unwrap().is_empty());

        let (status, body) = get_json("/api/v1/click").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["date"].is_null());
    }

    #[tokio::test]
    async fn test_zone_breakdown() {
        let (status, body) = get_json("/api/v1/breakdown/zones?months=January,February").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_data"], true);
        assert_eq!(body["shares"].as_array().unwrap().len(), 3);

        let (status, body) = get_json("/api/v1/breakdown/zones").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["has_data"], false);

        let (status, body) = get_json("/api/v1/breakdown/zones?months=Brumaire").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNKNOWN_MONTH");
    }

    #[tokio::test]
    async fn test_monthly_breakdown_order() {
        let (status, body) = get_json("/api/v1/breakdown/months?months=February,January").await;
        assert_eq!(status, StatusCode::OK);
        let shares = body.as_array().unwrap();
        assert_eq!(shares.len(), 6);
        assert_eq!(shares[0]["month"], "January");
        assert_eq!(shares[5]["month"], "February");
    }

    #[tokio::test]
    async fn test_chart_endpoints() {
        let (status, body) = get_json("/api/v1/charts/heatmap?column=PowerConsumption_Zone1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["measure"], "Zone1");
        assert_eq!(body["cells"].as_array().unwrap().len(), 3);

        let (status, body) = get_json("/api/v1/charts/scatter?x=Temperature&y=Humidity").await;
        assert_eq!(status, StatusCode::OK);
        // one point per hourly row: 3 days of 24 hours
        assert_eq!(body["points"].as_array().unwrap().len(), 72);
        assert_eq!(body["name"], "Temperature vs. Humidity");

        let (status, body) = get_json("/api/v1/charts/bubble?x=Pressure").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "UNKNOWN_MEASURE");

        let (status, body) = get_json("/api/v1/charts/line").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (status, body) = get_json("/api/v1/charts/hourly-bar?date=2017-01-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 24);
        assert_eq!(body[0]["hour_no"], 1);

        let (status, body) = get_json("/api/v1/charts/zone-scatter").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["x_title"], "Temperature (°C)");

        let (status, body) = get_json("/api/v1/charts/zone-scatter?x=Zone1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
        assert_eq!(body["error"]["field"], "x");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get_json("/api/v1/nothing-here").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
