//! Key-value storage abstraction the ledger and auth session persist through.

use anyhow::Result;
use async_trait::async_trait;

pub const BUDGETS_KEY: &str = "budgets";
pub const EXPENSES_KEY: &str = "expenses";
pub const CATEGORIES_KEY: &str = "categories";
pub const AUTH_USER_KEY: &str = "auth-user";

/// String keyed, string valued storage. Values are JSON payloads.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}
