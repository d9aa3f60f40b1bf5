//! Notifications sent to account holders after a balance change

use async_trait::async_trait;
use common::error::Result;
use common::model::account::Account;
use tracing::info;

/// Message sent to the sender once the debit is committed
pub const DEBIT_MESSAGE: &str = "Amount has been debited from the Account";

/// Message sent to the receiver once the credit is committed
pub const CREDIT_MESSAGE: &str = "Amount has been credited to the Account";

/// Outbound port for transfer notifications
///
/// Implementations may fail; the transfer has already committed by the time
/// they are called and never rolls back because of them.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Notify the holder of `account` about a transfer
    async fn notify_about_transfer(&self, account: &Account, message: &str) -> Result<()>;
}

/// Notification service that only writes a log line
///
/// Stands in for e-mail delivery until a real channel is wired up.
#[derive(Debug, Default, Clone)]
pub struct LoggingNotificationService;

impl LoggingNotificationService {
    /// Create a new logging notification service
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationService for LoggingNotificationService {
    async fn notify_about_transfer(&self, account: &Account, message: &str) -> Result<()> {
        info!(account_id = %account.account_id, "Sending notification: {}", message);
        Ok(())
    }
}
