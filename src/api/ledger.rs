//! Ledger handlers: records, their embedded transactions, and daily records.
//!
//! Transactions have no collection of their own. Updating or deleting one
//! finds the owning record, edits its list, and rewrites the whole record.

use axum::{
    Json,
    extract::{Path, State},
};

use super::dto::{
    CreateDailyRecordRequest, CreateRecordRequest, MessageResponse, UpdateTransactionRequest,
    parse_identity,
};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use super::handlers::AppState;
use crate::domain::{DailyRecord, DocumentId, Record, Transaction};
use crate::infrastructure::{DocumentRepository, RecordRepository};

const INVALID_TRANSACTION_ID: &str = "ID de transacción inválido";
const TRANSACTION_NOT_FOUND: &str = "Transacción no encontrada";
const TRANSACTION_DELETED: &str = "Transacción eliminada correctamente";

// =============================================================================
// Records
// =============================================================================

/// `GET /api/records`: all records by ascending date.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<Record>>, ApiErrorResponse> {
    let records = state.records.list().await?;
    Ok(Json(records))
}

/// `POST /api/records`: stores a record with its transactions.
///
/// Transactions without a well-formed `_id` get a generated one.
///
/// # Errors
///
/// Returns 400 for a malformed body and 500 if the store fails.
pub async fn create_record(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateRecordRequest>,
) -> Result<Json<Record>, ApiErrorResponse> {
    let record = request.into_record(DocumentId::generate());
    let stored = state.records.insert(&record).await?;

    tracing::info!(
        record_id = %stored.record_id,
        transactions = stored.transactions.len(),
        "Record created"
    );
    Ok(Json(stored))
}

// =============================================================================
// Transactions
// =============================================================================

/// Loads the record that owns `transaction_id`.
async fn owning_record(
    state: &AppState,
    transaction_id: &DocumentId,
) -> Result<Record, ApiErrorResponse> {
    state
        .records
        .find_by_transaction(transaction_id)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND))
}

/// `PUT /api/transactions/{id}`: patches the fields present in the body.
///
/// # Errors
///
/// Returns 400 for a malformed identity or body, 404 if no record holds the
/// transaction, and 500 if the store fails.
pub async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateTransactionRequest>,
) -> Result<Json<Transaction>, ApiErrorResponse> {
    let transaction_id = parse_identity(&id, INVALID_TRANSACTION_ID)?;
    let mut record = owning_record(&state, &transaction_id).await?;

    let updated = record
        .patch_transaction(&transaction_id, request.into())
        .ok_or_else(|| ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND))?;

    state
        .records
        .update(&record.record_id, &record)
        .await?
        .ok_or_else(|| ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND))?;

    tracing::info!(
        record_id = %record.record_id,
        transaction_id = %transaction_id,
        "Transaction updated"
    );
    Ok(Json(updated))
}

/// `DELETE /api/transactions/{id}`: removes one transaction from its record.
///
/// # Errors
///
/// Returns 400 for a malformed identity, 404 if no record holds the
/// transaction, and a masked 500 if the store fails.
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    let transaction_id = parse_identity(&id, INVALID_TRANSACTION_ID)?;

    let mut record = state
        .records
        .find_by_transaction(&transaction_id)
        .await
        .map_err(|error| ApiErrorResponse::masked(&error, "delete_transaction"))?
        .ok_or_else(|| ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND))?;

    tracing::debug!(
        record_id = %record.record_id,
        transactions = record.transactions.len(),
        "Record before transaction removal"
    );

    if !record.remove_transaction(&transaction_id) {
        return Err(ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND));
    }

    state
        .records
        .update(&record.record_id, &record)
        .await
        .map_err(|error| ApiErrorResponse::masked(&error, "delete_transaction"))?
        .ok_or_else(|| ApiErrorResponse::not_found(TRANSACTION_NOT_FOUND))?;

    tracing::info!(
        record_id = %record.record_id,
        transaction_id = %transaction_id,
        remaining = record.transactions.len(),
        "Transaction deleted"
    );
    Ok(Json(MessageResponse {
        message: TRANSACTION_DELETED,
    }))
}

// =============================================================================
// Daily Records
// =============================================================================

/// `GET /api/daily-records`: all daily records by ascending date.
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_daily_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<DailyRecord>>, ApiErrorResponse> {
    let daily_records = state.daily_records.list().await?;
    Ok(Json(daily_records))
}

/// `POST /api/daily-records`: stores a day's summary. The balance is kept as sent.
///
/// # Errors
///
/// Returns 400 for a malformed body and 500 if the store fails.
pub async fn create_daily_record(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateDailyRecordRequest>,
) -> Result<Json<DailyRecord>, ApiErrorResponse> {
    let daily_record = request.into_daily_record(DocumentId::generate());
    let stored = state.daily_records.insert(&daily_record).await?;

    tracing::info!(daily_record_id = %stored.daily_record_id, "Daily record created");
    Ok(Json(stored))
}
