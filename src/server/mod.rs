//! HTTP API layer
//!
//! Exposes the analysis as a single synchronous request/response
//! exchange: `GET /analysis` runs the pipeline over the loaded price
//! table and returns the report as JSON. The price table is loaded once
//! at startup and shared read-only across requests; every request runs
//! an independent pipeline invocation with no shared mutable state.
//!
//! Error mapping at this boundary:
//! - `InsufficientData` (bad `k` for the universe) -> 400
//! - `DegenerateInput` (universe the algorithms cannot analyze) -> 422
//! - `InvalidInput` (malformed underlying data) -> 500

use crate::analysis::PortfolioAnalyzer;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::types::{AnalysisReport, CentralityMeasure, PriceTable};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Immutable state shared across handlers.
pub struct AppState {
    prices: PriceTable,
    defaults: AnalysisConfig,
}

impl AppState {
    pub fn new(prices: PriceTable, defaults: AnalysisConfig) -> Self {
        Self { prices, defaults }
    }
}

/// Per-request overrides of the configured analysis parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisParams {
    /// Portfolio size k.
    pub k: Option<usize>,
    /// Centrality measure: degree | betweenness | closeness.
    pub centrality: Option<CentralityMeasure>,
    /// Per-period risk-free rate.
    pub risk_free_rate: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn error_response(err: AnalysisError) -> ApiError {
    tracing::error!("Analysis failed: {}", err);
    let status = match &err {
        AnalysisError::InsufficientData { .. } => StatusCode::BAD_REQUEST,
        AnalysisError::DegenerateInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::InvalidInput(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

/// Run the pipeline with the configured defaults plus any overrides.
async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisParams>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let config = AnalysisConfig {
        portfolio_size: params.k.unwrap_or(state.defaults.portfolio_size),
        centrality: params.centrality.unwrap_or(state.defaults.centrality),
        risk_free_rate: params
            .risk_free_rate
            .unwrap_or(state.defaults.risk_free_rate),
    };

    let analyzer = PortfolioAnalyzer::new(config);
    let report = analyzer
        .analyze(&state.prices)
        .map_err(error_response)?;
    Ok(Json(report))
}

/// List the loaded ticker universe.
async fn get_tickers(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.prices.tickers().to_vec())
}

/// Health check
async fn health_check() -> &'static str {
    "OK"
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/tickers", get(get_tickers))
        .route("/analysis", get(get_analysis))
        .with_state(state)
}

/// Start the API server
pub async fn start_server(
    state: Arc<AppState>,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!("Analysis API starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
