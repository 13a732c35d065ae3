use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use tracing::debug;

use super::{parse_user_id, AppState};
use crate::analytics::{compute_metrics, compute_series};
use crate::error::AppError;
use crate::models::analytics::{FilterQuery, MetricsResult, SeriesResult};

// Summary metrics over the coarse-filtered records
pub async fn get_metrics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<MetricsResult>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let since = query.granularity().window_start(state.today());
    let records = state.records.list(user_id, since).await?;

    let metrics = compute_metrics(&records);
    debug!(%user_id, record_count = metrics.record_count, "metrics computed");

    Ok(Json(metrics))
}

// Chart series; the window comes from the granularity, so every record is loaded
pub async fn get_chart_data(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<SeriesResult>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let granularity = query.granularity();
    let records = state.records.list(user_id, None).await?;

    let series = compute_series(&records, granularity, state.today())?;
    debug!(%user_id, ?granularity, buckets = series.labels.len(), "chart data computed");

    Ok(Json(series))
}
