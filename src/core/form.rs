//! Input validation for the expense entry and budget detail screens.

use crate::core::analytics;
use crate::core::constants::{MAX_AMOUNT, is_available_icon, is_color_option};
use crate::core::ledger::{CategoryUpdate, Ledger, NewExpense};
use crate::core::model::{Category, YearMonth};
use chrono::{Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Amount must not exceed {max}", max = MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Category {0} has no budget for this month")]
    CategoryNotSelectable(u32),
    #[error("Category {0} not found")]
    CategoryNotFound(u32),
    #[error("Unknown icon: {0}")]
    UnknownIcon(String),
    #[error("Unknown color: {0}")]
    UnknownColor(String),
}

/// State of the expense entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub category_id: Option<u32>,
    pub amount: Option<i64>,
    pub spent_at: Option<NaiveDate>,
    pub note: String,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            category_id: None,
            amount: None,
            spent_at: Some(Local::now().date_naive()),
            note: String::new(),
        }
    }
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories an expense can be logged against: those with a positive
    /// budget in `period`.
    pub fn selectable_categories(ledger: &Ledger, period: YearMonth) -> Vec<Category> {
        analytics::all_categories_with_budgets(ledger, period)
            .into_iter()
            .filter(|b| b.amount_or_zero() > 0)
            .map(|b| b.category)
            .collect()
    }

    pub fn validate(&self, ledger: &Ledger, period: YearMonth) -> Result<NewExpense, FormError> {
        let category_id = self.category_id.ok_or(FormError::Required("Category"))?;
        let amount = self.amount.ok_or(FormError::Required("Amount"))?;
        let spent_at = self.spent_at.ok_or(FormError::Required("Date"))?;

        let amount = validate_amount(amount)?;
        if !Self::selectable_categories(ledger, period)
            .iter()
            .any(|c| c.id == category_id)
        {
            return Err(FormError::CategoryNotSelectable(category_id));
        }

        let note = self.note.trim();
        Ok(NewExpense {
            category_id,
            amount,
            spent_at,
            note: (!note.is_empty()).then(|| note.to_string()),
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Edits submitted from the budget detail screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryUpdate, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Required("Name"));
        }
        if let Some(icon) = self.icon.as_deref().filter(|i| !is_available_icon(i)) {
            return Err(FormError::UnknownIcon(icon.to_string()));
        }
        if let Some(color) = self.color.as_deref().filter(|c| !is_color_option(c)) {
            return Err(FormError::UnknownColor(color.to_string()));
        }

        let description = self.description.trim();
        Ok(CategoryUpdate {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            icon: self.icon.clone(),
            color: self.color.clone(),
        })
    }
}

fn validate_amount(amount: i64) -> Result<i64, FormError> {
    if amount <= 0 {
        Err(FormError::NonPositiveAmount)
    } else if amount > MAX_AMOUNT {
        Err(FormError::AmountTooLarge)
    } else {
        Ok(amount)
    }
}

/// A budget saved from the detail screen must be positive.
pub fn validate_budget_amount(amount: i64) -> Result<i64, FormError> {
    validate_amount(amount)
}
