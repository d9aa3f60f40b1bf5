//! Account API handlers
//!
//! Handles endpoints related to account management:
//! - Create account
//! - Get account details

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::decimal::Amount;
use common::model::account::Account;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Create account request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    /// Unique account ID
    pub account_id: Option<String>,
    /// Opening balance, zero when omitted
    #[serde(default)]
    #[schema(value_type = String)]
    pub balance: Amount,
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account successfully created", body = Account),
        (status = 400, description = "Invalid request or duplicate account ID"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Account>), ApiError> {
    let Json(request) = payload?;

    let account_id = request
        .account_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Account id must be present".to_string()))?;

    let account = state
        .account_service
        .create_account(Account::with_balance(account_id, request.balance))
        .await?;

    Ok((StatusCode::CREATED, ApiResponse::new(account)))
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(
        ("id" = String, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account details retrieved successfully", body = Account),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "account"
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Account>, ApiError> {
    let account = state.account_service.get_account(&id).await?;

    Ok(ApiResponse::new(account))
}
