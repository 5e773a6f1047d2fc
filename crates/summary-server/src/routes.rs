//! HTTP routes for the summary endpoint.

use std::collections::BTreeMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use summary::{DateKey, Summary, SummaryError, SummaryStore};
use tower_http::trace::TraceLayer;
use tracing::{error, instrument};

const INVALID_DATE: &str = "La fecha no tiene un formato válido.";
const INTERNAL_ERROR: &str = "Error interno.";

/// Build the application router around a shared store.
pub(crate) fn router(store: SummaryStore) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/resumen/:date", get(summary_for_date))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Query parameters for `/resumen/:date`.
#[derive(Debug, Deserialize)]
struct SummaryQuery {
    /// Number of days to cover, starting at the path date.
    dias: Option<String>,
}

/// Wire form of a [`Summary`].
#[derive(Debug, Serialize)]
struct SummaryResponse {
    total: f64,
    #[serde(rename = "comprasPorTDC")]
    compras_por_tdc: BTreeMap<String, u64>,
    #[serde(rename = "noCompraron")]
    no_compraron: u64,
    #[serde(rename = "compraMasAlta")]
    compra_mas_alta: f64,
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        Self {
            total: summary.total,
            compras_por_tdc: summary.purchases_by_method,
            no_compraron: summary.non_purchasers,
            compra_mas_alta: summary.highest_purchase,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    mensaje: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Request failure mapped to a status code and a `{"mensaje": ...}` body.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal,
}

impl From<SummaryError> for ApiError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::InvalidArgument { .. }
            | SummaryError::Fetch(_)
            | SummaryError::Validation(_) => Self::BadRequest(err.to_string()),
            SummaryError::Cache(_) | SummaryError::Other(_) => {
                error!(error = %err, "`/resumen/:date` failed");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, mensaje) = match self {
            Self::BadRequest(mensaje) => (StatusCode::BAD_REQUEST, mensaje),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
        };
        (status, Json(ErrorResponse { mensaje })).into_response()
    }
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Summary of one day, or of `dias` days starting at that day.
#[instrument(skip(store))]
async fn summary_for_date(
    State(store): State<SummaryStore>,
    Path(date): Path<String>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let date: DateKey = date
        .parse()
        .map_err(|_| ApiError::BadRequest(INVALID_DATE.to_string()))?;

    let summary = match query.dias.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => {
            let days = raw
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| ApiError::BadRequest(invalid_days_message(&date)))?;
            store.get_range(date, days).await?
        }
        None => store.get(date).await?,
    };

    Ok(Json(summary.into()))
}

fn invalid_days_message(date: &DateKey) -> String {
    format!(
        "Los días a obtener deben ser mayor o igual a 1. Usa `/resumen/{}-{}-{}`.",
        date.year(),
        date.month(),
        date.day()
    )
}
