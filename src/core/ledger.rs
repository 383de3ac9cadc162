//! In-memory household ledger and its mutations.
//!
//! The ledger knows nothing about persistence; see `store::repository` for the
//! layer that mirrors it to a key-value storage.

use crate::core::constants::MAX_AMOUNT;
use crate::core::fixtures;
use crate::core::model::{Budget, Category, DEFAULT_USER_ID, Expense, YearMonth};
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Budget amount must not be negative (got {0})")]
    NegativeBudget(i64),
    #[error("Expense amount must be greater than zero (got {0})")]
    NonPositiveExpense(i64),
    #[error("Amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(i64),
    #[error("No {0} ids left")]
    IdExhausted(&'static str),
}

/// Field changes applied by [`Ledger::update_category`]. `None` leaves the
/// current value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub category_id: u32,
    pub amount: i64,
    pub spent_at: NaiveDate,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new(categories: Vec<Category>, budgets: Vec<Budget>, expenses: Vec<Expense>) -> Self {
        Self {
            categories,
            budgets,
            expenses,
        }
    }

    /// A ledger holding the built-in sample data.
    pub fn seeded() -> Self {
        Self::new(
            fixtures::seed_categories(),
            fixtures::seed_budgets(),
            fixtures::seed_expenses(),
        )
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn category(&self, category_id: u32) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub(crate) fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub(crate) fn set_budgets(&mut self, budgets: Vec<Budget>) {
        self.budgets = budgets;
    }

    pub(crate) fn set_expenses(&mut self, expenses: Vec<Expense>) {
        self.expenses = expenses;
    }

    /// Sets the budget for a category and month, updating the existing row
    /// when there is one.
    pub fn update_budget(
        &mut self,
        category_id: u32,
        amount: i64,
        period: YearMonth,
        now: DateTime<Utc>,
    ) -> Result<&Budget, LedgerError> {
        if amount < 0 {
            return Err(LedgerError::NegativeBudget(amount));
        }
        if amount > MAX_AMOUNT {
            return Err(LedgerError::AmountTooLarge(amount));
        }

        let index = match self
            .budgets
            .iter()
            .position(|b| b.is_for(category_id, period))
        {
            Some(index) => {
                let budget = &mut self.budgets[index];
                budget.amount = amount;
                budget.updated_at = now;
                debug!(budget_id = budget.id, amount, "Updated budget");
                index
            }
            None => {
                let id = next_id(self.budgets.iter().map(|b| b.id), "budget")?;
                self.budgets.push(Budget {
                    id,
                    category_id,
                    amount,
                    year: period.year,
                    month: period.month,
                    created_at: now,
                    updated_at: now,
                });
                debug!(budget_id = id, category_id, %period, amount, "Created budget");
                self.budgets.len() - 1
            }
        };

        Ok(&self.budgets[index])
    }

    /// Applies `update` to the category with `category_id`. Returns `None`
    /// when no such category exists.
    pub fn update_category(
        &mut self,
        category_id: u32,
        update: CategoryUpdate,
        now: DateTime<Utc>,
    ) -> Option<&Category> {
        let category = self.categories.iter_mut().find(|c| c.id == category_id)?;

        category.name = update.name;
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(icon) = update.icon {
            category.icon = icon;
        }
        if let Some(color) = update.color {
            category.color = Some(color);
        }
        category.updated_at = now;
        debug!(category_id, "Updated category");

        Some(&*category)
    }

    pub fn add_expense(
        &mut self,
        expense: NewExpense,
        now: DateTime<Utc>,
    ) -> Result<&Expense, LedgerError> {
        if expense.amount <= 0 {
            return Err(LedgerError::NonPositiveExpense(expense.amount));
        }
        if expense.amount > MAX_AMOUNT {
            return Err(LedgerError::AmountTooLarge(expense.amount));
        }

        let id = next_id(self.expenses.iter().map(|e| e.id), "expense")?;
        self.expenses.push(Expense {
            id,
            user_id: DEFAULT_USER_ID,
            category_id: expense.category_id,
            amount: expense.amount,
            spent_at: expense.spent_at,
            note: expense.note,
            created_at: now,
            updated_at: now,
        });
        debug!(expense_id = id, "Added expense");

        Ok(&self.expenses[self.expenses.len() - 1])
    }

    pub fn reset_categories(&mut self) {
        self.categories = fixtures::reset_categories();
    }

    /// Drops all budgets and expenses and restores the reset category set.
    pub fn clear(&mut self) {
        self.budgets.clear();
        self.expenses.clear();
        self.reset_categories();
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::seeded()
    }
}

fn next_id(ids: impl Iterator<Item = u32>, kind: &'static str) -> Result<u32, LedgerError> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(LedgerError::IdExhausted(kind))
}
