use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use common::{AnalysisReport, Error, Period};

use crate::AppState;

pub fn analysis_router() -> Router<AppState> {
    Router::new()
        .route("/api/strategies", get(get_strategies))
        .route("/api/analyze/:ticker", get(get_analysis))
}

// ─── Strategy catalogue ───────────────────────────────────────────────────────

async fn get_strategies() -> Json<Value> {
    let strategies = strategy::describe_strategies();
    Json(json!({ "strategies": strategies }))
}

// ─── Analysis ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct AnalyzeQuery {
    period: Option<String>,
}

async fn get_analysis(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    Query(q): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let period = match q.period.as_deref() {
        Some(raw) => raw.parse::<Period>()?,
        None => state.default_period,
    };

    info!(%ticker, %period, "Analysis requested");
    let report = state.analyzer.analyze(&ticker, period).await?;
    Ok(Json(report))
}

/// Engine errors rendered as `{ "error": ... }` with a matching status code.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::InvalidPeriod(_) | Error::InvalidTicker(_) => StatusCode::BAD_REQUEST,
            Error::NoData { .. } => StatusCode::NOT_FOUND,
            Error::Provider(_) | Error::Http(_) | Error::InvalidSeries(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %self.0, "Analysis request failed");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
