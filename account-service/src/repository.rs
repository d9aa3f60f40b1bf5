//! Repository for account data

use async_trait::async_trait;
use common::error::{Error, Result};
use common::model::account::Account;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

/// Account repository trait defining the interface for account data storage
///
/// The repository only guarantees memory safety for concurrent writers. Callers
/// that read a balance and write it back must hold the account's lock from
/// [`crate::locks::LockRegistry`] for the whole read-modify-write.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Whether an account with this ID exists
    async fn exists(&self, account_id: &str) -> Result<bool>;

    /// Get an account by ID
    async fn get_account(&self, account_id: &str) -> Result<Option<Account>>;

    /// Insert a new account, failing with `DuplicateId` if the ID is taken
    async fn create_account(&self, account: Account) -> Result<Account>;

    /// Overwrite the stored state of an existing account
    async fn save_account(&self, account: Account) -> Result<Account>;
}

/// In-memory repository for account data
pub struct InMemoryAccountRepository {
    /// Accounts by ID
    pub accounts: DashMap<String, Account>,
}

impl InMemoryAccountRepository {
    /// Create a new in-memory account repository
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn exists(&self, account_id: &str) -> Result<bool> {
        Ok(self.accounts.contains_key(account_id))
    }

    async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        Ok(self.accounts.get(account_id).map(|a| a.clone()))
    }

    async fn create_account(&self, account: Account) -> Result<Account> {
        // The entry holds the shard lock, so two racing creators of one ID
        // cannot both observe a vacant slot.
        match self.accounts.entry(account.account_id.clone()) {
            Entry::Occupied(_) => Err(Error::duplicate_id(&account.account_id)),
            Entry::Vacant(slot) => {
                debug!("Inserted account {}", account.account_id);
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }

    async fn save_account(&self, account: Account) -> Result<Account> {
        match self.accounts.get_mut(&account.account_id) {
            Some(mut stored) => {
                *stored = account.clone();
                Ok(account)
            }
            None => Err(Error::AccountNotFound(format!(
                "Account not found: {}",
                account.account_id
            ))),
        }
    }
}
