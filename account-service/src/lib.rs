//! Account service for managing balances and executing transfers

pub mod service;
pub mod repository;
pub mod locks;
pub mod notification;
pub mod config;

pub use service::AccountService;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use locks::{AccountLock, LockRegistry, PairGuard};
pub use notification::{LoggingNotificationService, NotificationService};
pub use config::AccountServiceConfig;
