//! Transfer API handler
//!
//! Field presence is checked here; amount sign, distinct accounts and every
//! balance rule are left to the account service.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use common::decimal::Amount;
use common::model::transfer::{TransferReceipt, TransferRequest};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Transfer request body
///
/// All fields are optional at the wire level so a missing field produces a
/// readable validation message instead of a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    /// Account to debit
    pub sender_account_id: Option<String>,
    /// Account to credit
    pub receiver_account_id: Option<String>,
    /// Amount to move
    #[schema(value_type = Option<String>)]
    pub transaction_amount: Option<Amount>,
}

impl TryFrom<TransferPayload> for TransferRequest {
    type Error = ApiError;

    fn try_from(payload: TransferPayload) -> Result<Self, Self::Error> {
        let sender = payload
            .sender_account_id
            .ok_or_else(|| ApiError::BadRequest("Sender Account id must be present".to_string()))?;
        let receiver = payload
            .receiver_account_id
            .ok_or_else(|| ApiError::BadRequest("Receiver Account id must be present".to_string()))?;
        let amount = payload
            .transaction_amount
            .ok_or_else(|| ApiError::BadRequest("Transaction Amount cannot be absent.".to_string()))?;

        Ok(TransferRequest::new(sender, receiver, amount))
    }
}

/// Transfer funds between two accounts
#[utoipa::path(
    post,
    path = "/api/v1/accounts/transfer",
    request_body = TransferPayload,
    responses(
        (status = 200, description = "Transfer committed", body = TransferReceipt),
        (status = 400, description = "Invalid request or insufficient balance"),
        (status = 404, description = "Sender or receiver account not found"),
        (status = 500, description = "Transfer could not be completed")
    ),
    tag = "transfer"
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferPayload>, JsonRejection>,
) -> Result<ApiResponse<TransferReceipt>, ApiError> {
    let Json(payload) = payload?;
    let request = TransferRequest::try_from(payload)?;

    let request_id = Uuid::new_v4().to_string();
    info!("Transfer [{}] requested: {}", request_id, request);

    let receipt = state.account_service.transfer(&request).await?;

    Ok(ApiResponse::tracked(receipt, request_id))
}
