use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::{ReportError, StoreError};
use crate::report::assemble::{generate_report, StatsReport};
use crate::report::period::{PeriodKind, PeriodRequest};
use crate::store::PgRecordSource;
use crate::AppState;

/// Query parameters for the statistics endpoint. `month` is 0-based.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub period: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// Error envelope returned for any failed report. The caller must
/// treat the whole report as failed; partial statistics are never
/// returned.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Statistics report endpoint handler.
///
/// Handles GET requests to `/api/reports/stats`, resolving the
/// requested comparison period against the current UTC date.
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsReport>, (StatusCode, Json<ErrorEnvelope>)> {
    let request = parse_request(&query).map_err(reject)?;

    let source = PgRecordSource::new(state.db.clone());
    let now = Utc::now().date_naive();

    let report = generate_report(&source, request, now)
        .await
        .map_err(reject)?;

    Ok(Json(report))
}

fn parse_request(query: &StatsQuery) -> Result<PeriodRequest, ReportError> {
    Ok(PeriodRequest {
        kind: PeriodKind::parse(query.period.as_deref())?,
        year: query.year,
        month: query.month,
    })
}

fn reject(err: ReportError) -> (StatusCode, Json<ErrorEnvelope>) {
    error!("report request failed: {err}");
    let status = match &err {
        ReportError::InvalidPeriod(_)
        | ReportError::InvalidMonth(_)
        | ReportError::InvalidYear(_) => StatusCode::BAD_REQUEST,
        ReportError::Store(StoreError::SourceNotFound(_)) => StatusCode::NOT_FOUND,
        ReportError::Store(StoreError::Query(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorEnvelope {
            error: err.to_string(),
        }),
    )
}
