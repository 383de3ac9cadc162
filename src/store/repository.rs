//! Mirrors a [`Ledger`] to key-value storage.

use crate::core::ledger::{CategoryUpdate, Ledger, NewExpense};
use crate::core::model::{Budget, Category, Expense, YearMonth};
use crate::core::storage::{BUDGETS_KEY, CATEGORIES_KEY, EXPENSES_KEY, KeyValueStorage};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the application's ledger and writes each mutated collection back to
/// storage. A mutation whose write fails is rolled back in memory, so the
/// ledger never runs ahead of what storage holds.
pub struct LedgerRepository {
    ledger: Ledger,
    storage: Arc<dyn KeyValueStorage>,
}

impl LedgerRepository {
    /// Creates a repository around the seeded ledger without reading storage.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            ledger: Ledger::seeded(),
            storage,
        }
    }

    /// Creates a repository and restores whatever storage holds.
    pub async fn open(storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut repo = Self::new(storage);
        repo.load().await;
        repo
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Restores each collection from storage. A missing or malformed payload
    /// leaves the in-memory collection untouched.
    pub async fn load(&mut self) {
        if let Some(budgets) = self.read::<Budget>(BUDGETS_KEY).await {
            self.ledger.set_budgets(budgets);
        }
        if let Some(expenses) = self.read::<Expense>(EXPENSES_KEY).await {
            self.ledger.set_expenses(expenses);
        }
        if let Some(categories) = self.read::<Category>(CATEGORIES_KEY).await {
            self.ledger.set_categories(categories);
        }
        debug!(
            categories = self.ledger.categories().len(),
            budgets = self.ledger.budgets().len(),
            expenses = self.ledger.expenses().len(),
            "Loaded ledger"
        );
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<Vec<T>> {
        let payload = self.storage.get(key).await?;
        match serde_json::from_str(&payload) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed stored data");
                None
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let payload = serde_json::to_string(items)
            .with_context(|| format!("Failed to serialize {key}"))?;
        self.storage.set(key, payload).await
    }

    /// Writes all three collections.
    pub async fn persist(&self) -> Result<()> {
        self.write(BUDGETS_KEY, self.ledger.budgets()).await?;
        self.write(EXPENSES_KEY, self.ledger.expenses()).await?;
        self.write(CATEGORIES_KEY, self.ledger.categories()).await
    }

    pub async fn update_budget(
        &mut self,
        category_id: u32,
        amount: i64,
        period: YearMonth,
    ) -> Result<Budget> {
        let previous = self.ledger.budgets().to_vec();
        let budget = self
            .ledger
            .update_budget(category_id, amount, period, Utc::now())?
            .clone();
        if let Err(e) = self.write(BUDGETS_KEY, self.ledger.budgets()).await {
            self.ledger.set_budgets(previous);
            return Err(e);
        }
        info!(category_id, amount, %period, "Budget saved");
        Ok(budget)
    }

    /// Returns `None` without touching storage when the category is unknown.
    pub async fn update_category(
        &mut self,
        category_id: u32,
        update: CategoryUpdate,
    ) -> Result<Option<Category>> {
        let previous = self.ledger.categories().to_vec();
        let Some(category) = self
            .ledger
            .update_category(category_id, update, Utc::now())
            .cloned()
        else {
            debug!(category_id, "No category to update");
            return Ok(None);
        };
        if let Err(e) = self.write(CATEGORIES_KEY, self.ledger.categories()).await {
            self.ledger.set_categories(previous);
            return Err(e);
        }
        info!(category_id, "Category saved");
        Ok(Some(category))
    }

    pub async fn add_expense(&mut self, expense: NewExpense) -> Result<Expense> {
        let previous = self.ledger.expenses().to_vec();
        let expense = self.ledger.add_expense(expense, Utc::now())?.clone();
        if let Err(e) = self.write(EXPENSES_KEY, self.ledger.expenses()).await {
            self.ledger.set_expenses(previous);
            return Err(e);
        }
        info!(expense_id = expense.id, amount = expense.amount, "Expense saved");
        Ok(expense)
    }

    /// Removes all stored ledger data and resets the in-memory ledger.
    pub async fn clear_storage(&mut self) -> Result<()> {
        for key in [BUDGETS_KEY, EXPENSES_KEY, CATEGORIES_KEY] {
            self.storage.remove(key).await?;
        }
        self.ledger.clear();
        info!("Cleared stored ledger data");
        Ok(())
    }
}
