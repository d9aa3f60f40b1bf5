//! Account service implementation
//!
//! Besides account creation and lookup, the service executes transfers. A
//! transfer holds the locks of both accounts from the existence checks through
//! the notification calls:
//!
//! 1. validate the request shape
//! 2. lock both accounts in the registry's global order
//! 3. check that both accounts exist
//! 4. check the sender's balance covers the amount
//! 5. persist the debit, then the credit
//! 6. notify both holders
//! 7. release the locks
//!
//! Any error after step 2 still releases both locks, since they are held by a
//! guard that is dropped on every return path.
//!
//! Steps 2 to 7 run on their own spawned task. A caller that stops polling
//! (a disconnected HTTP client, an expired `timeout`) only stops waiting for
//! the receipt; the debit and credit are still written as a pair.

use std::sync::Arc;

use common::decimal::Amount;
use common::error::{Error, ErrorExt, Result};
use common::model::account::Account;
use common::model::transfer::{TransferReceipt, TransferRequest};
use tracing::{debug, error, info, warn};

use crate::config::AccountServiceConfig;
use crate::locks::LockRegistry;
use crate::notification::{LoggingNotificationService, NotificationService, CREDIT_MESSAGE, DEBIT_MESSAGE};
use crate::repository::{AccountRepository, InMemoryAccountRepository};

/// Message returned when a transfer is rejected for lack of funds
pub const INSUFFICIENT_BALANCE_MESSAGE: &str = "Not Enough Balance to initiate transaction";

/// Message prefix for transfers that failed while touching storage
pub const TRANSFER_FAILED_MESSAGE: &str = "Could not complete the request";

/// Account service for managing balances and executing transfers
#[derive(Clone)]
pub struct AccountService {
    /// Repository for account data
    repo: Arc<dyn AccountRepository>,
    /// Per-account locks shared by every transfer
    locks: Arc<LockRegistry>,
    /// Outbound notifications
    notifier: Arc<dyn NotificationService>,
    /// Timeouts and logging switches
    config: AccountServiceConfig,
}

impl AccountService {
    /// Create a new account service backed by memory, using environment config
    pub fn new() -> Self {
        Self::with_config(AccountServiceConfig::from_env())
    }

    /// Create a new in-memory account service with a configuration
    pub fn with_config(config: AccountServiceConfig) -> Self {
        Self::with_components(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(LockRegistry::new()),
            Arc::new(LoggingNotificationService::new()),
            config,
        )
    }

    /// Create a new account service from explicit collaborators
    pub fn with_components(
        repo: Arc<dyn AccountRepository>,
        locks: Arc<LockRegistry>,
        notifier: Arc<dyn NotificationService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            repo,
            locks,
            notifier,
            config,
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &AccountServiceConfig {
        &self.config
    }

    /// Create a new account
    pub async fn create_account(&self, account: Account) -> Result<Account> {
        if account.account_id.trim().is_empty() {
            return Err(Error::ValidationError("Account id must be present".to_string()));
        }

        info!("Creating account {} with balance {}", account.account_id, account.balance);
        self.repo.create_account(account).await
    }

    /// Get an account by ID
    pub async fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repo
            .get_account(account_id)
            .await?
            .ok_or_else(|| Error::AccountNotFound(format!("Account not found: {}", account_id)))
    }

    /// Move funds from the sender to the receiver
    ///
    /// Fails with `ValidationError` for malformed requests (including
    /// self-transfers), `AccountNotFound` when either account is unknown,
    /// `InsufficientBalance` when the sender cannot cover the amount, and
    /// `TransferFailed` on lock timeouts or storage faults. Only the last one
    /// is worth retrying.
    pub async fn transfer(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        request.validate()?;

        let service = self.clone();
        let owned = request.clone();
        let task = tokio::spawn(async move { service.execute(&owned).await });

        match task.await {
            Ok(outcome) => outcome,
            Err(join_err) => {
                error!("Transfer task for {} did not complete: {}", request, join_err);
                Err(Error::TransferFailed(format!(
                    "{}: transfer task aborted: {}",
                    TRANSFER_FAILED_MESSAGE, join_err
                )))
            }
        }
    }

    /// Locked section of a transfer, from lock acquisition to release
    async fn execute(&self, request: &TransferRequest) -> Result<TransferReceipt> {
        let sender_id = request.sender_account_id.as_str();
        let receiver_id = request.receiver_account_id.as_str();
        let amount = request.transaction_amount;

        let guard = self
            .locks
            .acquire_pair(sender_id, receiver_id, self.config.lock_timeout)
            .await
            .with_context(|| format!("{} for transfer {}", TRANSFER_FAILED_MESSAGE, request))?;

        if !self.repo.exists(sender_id).await.map_err(|e| storage_fault("sender lookup", e))? {
            warn!("Rejected transfer {}: unknown sender", request);
            return Err(Error::AccountNotFound("Sender Account not found".to_string()));
        }

        if !self.repo.exists(receiver_id).await.map_err(|e| storage_fault("receiver lookup", e))? {
            warn!("Rejected transfer {}: unknown receiver", request);
            return Err(Error::AccountNotFound("Receiver Account not found".to_string()));
        }

        // Re-read under the locks; nothing else can move these balances now.
        let sender = self.load(sender_id).await?;
        let receiver = self.load(receiver_id).await?;

        if !sender.can_cover(amount) {
            warn!(
                "Rejected transfer {}: balance {} below amount",
                request, sender.balance
            );
            return Err(Error::InsufficientBalance(INSUFFICIENT_BALANCE_MESSAGE.to_string()));
        }

        let receipt = self.apply(sender, receiver, amount).await?;

        // Notifications run while the locks are still held. Each call is bounded
        // by `notification_timeout`, so a slow channel delays this pair of
        // accounts by at most twice that and never fails the transfer.
        self.notify(&receipt.sender, DEBIT_MESSAGE).await;
        self.notify(&receipt.receiver, CREDIT_MESSAGE).await;

        drop(guard);

        if self.config.transaction_logging {
            info!(
                "Transfer {} committed: sender balance {}, receiver balance {}",
                request, receipt.sender.balance, receipt.receiver.balance
            );
        } else {
            info!("Transfer {} committed", request);
        }

        Ok(receipt)
    }

    /// Fetch an account already known to exist
    async fn load(&self, account_id: &str) -> Result<Account> {
        self.repo
            .get_account(account_id)
            .await
            .map_err(|e| storage_fault("account read", e))?
            .ok_or_else(|| {
                Error::TransferFailed(format!(
                    "{}: account {} vanished while locked",
                    TRANSFER_FAILED_MESSAGE, account_id
                ))
            })
    }

    /// Persist the debit and the credit
    ///
    /// If the credit cannot be stored, the sender's previous state is written
    /// back. When that also fails the accounts disagree, which is logged as an
    /// error and reported in the returned `TransferFailed`.
    async fn apply(&self, mut sender: Account, mut receiver: Account, amount: Amount) -> Result<TransferReceipt> {
        let sender_before = sender.clone();

        sender.debit(amount);
        let sender = self.repo.save_account(sender).await.map_err(|e| {
            error!("Failed to persist debit of {} from {}: {}", amount, sender_before.account_id, e);
            storage_fault("debit", e)
        })?;
        debug!("Debited {} from {}", amount, sender.account_id);

        receiver.credit(amount);
        let receiver_id = receiver.account_id.clone();
        let receiver = match self.repo.save_account(receiver).await {
            Ok(receiver) => receiver,
            Err(credit_err) => {
                error!("Failed to persist credit of {} to {}: {}", amount, receiver_id, credit_err);
                return Err(self.revert_debit(sender_before, &receiver_id, credit_err).await);
            }
        };
        debug!("Credited {} to {}", amount, receiver.account_id);

        Ok(TransferReceipt { sender, receiver })
    }

    /// Write back the sender's pre-transfer state after a failed credit
    async fn revert_debit(&self, sender_before: Account, receiver_id: &str, credit_err: Error) -> Error {
        let sender_id = sender_before.account_id.clone();

        match self.repo.save_account(sender_before).await {
            Ok(_) => {
                warn!("Reverted debit on {} after failed credit to {}", sender_id, receiver_id);
                Error::TransferFailed(format!(
                    "{}: credit to {} failed and the debit was reverted: {}",
                    TRANSFER_FAILED_MESSAGE, receiver_id, credit_err
                ))
            }
            Err(revert_err) => {
                error!(
                    "Inconsistent balances: {} was debited but {} was not credited, revert failed: {}",
                    sender_id, receiver_id, revert_err
                );
                Error::TransferFailed(format!(
                    "{}: {} was debited but {} was not credited and the debit could not be reverted: {}",
                    TRANSFER_FAILED_MESSAGE, sender_id, receiver_id, revert_err
                ))
            }
        }
    }

    /// Send one notification, swallowing failures
    async fn notify(&self, account: &Account, message: &str) {
        let timeout = self.config.notification_timeout;

        match tokio::time::timeout(timeout, self.notifier.notify_about_transfer(account, message)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Notification to {} failed: {}", account.account_id, e),
            Err(_) => warn!("Notification to {} timed out after {:?}", account.account_id, timeout),
        }
    }
}

impl Default for AccountService {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_fault(step: &str, err: Error) -> Error {
    Error::TransferFailed(format!("{} ({}): {}", TRANSFER_FAILED_MESSAGE, step, err))
}
