//! Transfer request model

use serde::{Deserialize, Serialize};

use crate::decimal::Amount;
use crate::error::{Error, Result};
use crate::model::account::Account;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// A request to move funds from one account to another
///
/// Not persisted; it lives only for the duration of one transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Account to debit
    pub sender_account_id: String,
    /// Account to credit
    pub receiver_account_id: String,
    /// Amount to move, never negative
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub transaction_amount: Amount,
}

impl TransferRequest {
    /// Create a new transfer request
    pub fn new(
        sender_account_id: impl Into<String>,
        receiver_account_id: impl Into<String>,
        transaction_amount: Amount,
    ) -> Self {
        Self {
            sender_account_id: sender_account_id.into(),
            receiver_account_id: receiver_account_id.into(),
            transaction_amount,
        }
    }

    /// Check the request's shape before any account is touched
    ///
    /// Self-transfers are rejected: they would move nothing and only cost a
    /// lock round-trip.
    pub fn validate(&self) -> Result<()> {
        if self.sender_account_id.trim().is_empty() {
            return Err(Error::ValidationError("Sender Account id must be present".to_string()));
        }

        if self.receiver_account_id.trim().is_empty() {
            return Err(Error::ValidationError("Receiver Account id must be present".to_string()));
        }

        if self.transaction_amount < Amount::ZERO {
            return Err(Error::ValidationError("transaction amount must be positive.".to_string()));
        }

        if self.sender_account_id == self.receiver_account_id {
            return Err(Error::ValidationError(
                "Sender and receiver accounts must be different".to_string(),
            ));
        }

        Ok(())
    }
}

/// Both accounts as committed by a successful transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    /// Sender after the debit
    pub sender: Account,
    /// Receiver after the credit
    pub receiver: Account,
}

impl std::fmt::Display for TransferRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.sender_account_id, self.receiver_account_id, self.transaction_amount
        )
    }
}
