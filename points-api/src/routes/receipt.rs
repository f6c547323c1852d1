//! Receipt submission and points lookup endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use points_core::{Receipt, ReceiptId, ScoredReceipt};

use crate::dto::{PointsResponse, ProcessReceiptResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Score a receipt, store it under a fresh id, and return the id
///
/// The body is decoded as JSON whatever its content type. Only a body that
/// does not decode into the receipt shape is a 400.
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessReceiptResponse>> {
    let receipt: Receipt = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid receipt: {}", e)))?;

    let scored = ScoredReceipt::new(receipt);
    state.store.store(&scored).await?;

    tracing::info!(
        receipt_id = %scored.id,
        points = scored.points,
        "Receipt processed"
    );

    Ok(Json(ProcessReceiptResponse {
        id: scored.id.to_string(),
    }))
}

/// Get the points awarded to a stored receipt
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let id = ReceiptId::from(id);
    let scored = state.store.fetch(&id).await?;

    tracing::debug!(receipt_id = %id, points = scored.points, "Points fetched");

    Ok(Json(PointsResponse {
        points: scored.points,
    }))
}
