use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use super::{parse_user_id, AppState};
use crate::analytics::parse_record_date;
use crate::error::AppError;
use crate::models::analytics::FilterQuery;
use crate::models::record::{
    CreateRecordRequest, NewRecord, RecordChanges, RecordType, UpdateRecordRequest,
};

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::BadRequest(format!("Missing required field: {field}"))),
    }
}

fn not_null<T>(value: Option<Option<T>>, field: &str) -> Result<Option<T>, AppError> {
    match value {
        Some(None) => Err(AppError::BadRequest(format!("Field {field} must not be null."))),
        value => Ok(value.flatten()),
    }
}

fn validate_date(date: String) -> Result<String, AppError> {
    parse_record_date(&date)
        .map(|_| date)
        .map_err(|_| AppError::BadRequest("Invalid date format. Use YYYY-MM-DD.".to_string()))
}

fn validate_amount(amount: f64) -> Result<f64, AppError> {
    if !amount.is_finite() {
        return Err(AppError::BadRequest("Invalid amount format.".to_string()));
    }
    if amount < 0.0 {
        return Err(AppError::BadRequest("Amount must be non-negative.".to_string()));
    }
    Ok(amount)
}

fn validate_type(tag: &str) -> Result<RecordType, AppError> {
    RecordType::from_tag(tag)
        .ok_or_else(|| AppError::BadRequest("Type must be \"income\" or \"expense\".".to_string()))
}

fn parse_record_id(record_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(record_id)
        .map_err(|_| AppError::BadRequest("Invalid record ID format.".to_string()))
}

impl CreateRecordRequest {
    fn validate(self, user_id: Uuid) -> Result<NewRecord, AppError> {
        let date = validate_date(required(self.date, "date")?)?;
        let category = required(self.category, "category")?;
        let amount = self
            .amount
            .ok_or_else(|| AppError::BadRequest("Missing required field: amount".to_string()))
            .and_then(validate_amount)?;
        let record_type = validate_type(&required(self.record_type, "type")?)?;

        Ok(NewRecord {
            user_id,
            date,
            category,
            amount,
            record_type,
            description: self.description.unwrap_or_default(),
        })
    }
}

impl UpdateRecordRequest {
    fn validate(self) -> Result<RecordChanges, AppError> {
        Ok(RecordChanges {
            date: not_null(self.date, "date")?
                .map(validate_date)
                .transpose()?,
            category: not_null(self.category, "category")?
                .map(|category| required(Some(category), "category"))
                .transpose()?,
            amount: not_null(self.amount, "amount")?
                .map(validate_amount)
                .transpose()?,
            record_type: not_null(self.record_type, "type")?
                .as_deref()
                .map(validate_type)
                .transpose()?,
            description: not_null(self.description, "description")?,
        })
    }
}

// Create new record for a user
pub async fn create_record(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user_id = parse_user_id(&user_id)?;
    let Json(payload) = payload?;
    let record = state.records.insert(payload.validate(user_id)?).await?;

    info!(record_id = %record.id, %user_id, "record created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Record added successfully.",
            "id": record.id,
            "data": record
        })),
    ))
}

// Get records for a user, newest first
pub async fn list_records(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let since = query.granularity().window_start(state.today());
    let records = state.records.list(user_id, since).await?;

    Ok(Json(json!({
        "status": "success",
        "data": records
    })))
}

// Update record fields that are present in the payload
pub async fn update_record(
    State(state): State<AppState>,
    Path((user_id, record_id)): Path<(String, String)>,
    payload: Result<Json<UpdateRecordRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let record_id = parse_record_id(&record_id)?;
    let Json(payload) = payload?;
    let changes = payload.validate()?;

    if changes.is_empty() {
        return Ok(Json(json!({
            "status": "success",
            "message": "Nothing to update."
        })));
    }

    let record = state
        .records
        .update(user_id, record_id, changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found.".to_string()))?;

    info!(%record_id, %user_id, "record updated");

    Ok(Json(json!({
        "status": "success",
        "message": "Record updated successfully.",
        "data": record
    })))
}

// Delete a record owned by the user
pub async fn delete_record(
    State(state): State<AppState>,
    Path((user_id, record_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let record_id = parse_record_id(&record_id)?;

    if !state.records.delete(user_id, record_id).await? {
        return Err(AppError::NotFound("Record not found.".to_string()));
    }

    info!(%record_id, %user_id, "record deleted");

    Ok(Json(json!({
        "status": "success",
        "message": "Record deleted successfully."
    })))
}
