//! Account models and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Amount;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Account model
///
/// The balance may hold any sign at rest. Only the debit side of a transfer is
/// checked for sufficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account ID
    pub account_id: String,
    /// Current balance
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub balance: Amount,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a zero balance
    pub fn new(account_id: impl Into<String>) -> Self {
        Self::with_balance(account_id, Amount::ZERO)
    }

    /// Create a new account with an initial balance
    pub fn with_balance(account_id: impl Into<String>, balance: Amount) -> Self {
        let now = Utc::now();
        Self {
            account_id: account_id.into(),
            balance,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the balance covers the given amount
    pub fn can_cover(&self, amount: Amount) -> bool {
        self.balance >= amount
    }

    /// Remove funds from the balance
    ///
    /// No sufficiency check happens here; callers decide under the account lock.
    pub fn debit(&mut self, amount: Amount) {
        self.balance -= amount;
        self.updated_at = Utc::now();
    }

    /// Add funds to the balance
    pub fn credit(&mut self, amount: Amount) {
        self.balance += amount;
        self.updated_at = Utc::now();
    }
}
