//! Household ledger records and the derived views built from them.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A calendar month, the unit every budget and aggregate is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month: {month}"));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Number of days in the month.
    pub fn days(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .map_or(30, |last| last.day())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("Invalid month: {s} (expected YYYY-MM)"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| anyhow!("Invalid year in {s}"))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| anyhow!("Invalid month in {s}"))?;
        Self::new(year, month)
    }
}

/// A spending bucket such as food or transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "categoryId")]
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A monthly spending cap for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(rename = "budgetId")]
    pub id: u32,
    pub category_id: u32,
    pub amount: i64,
    pub year: i32,
    pub month: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn period(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    pub fn is_for(&self, category_id: u32, period: YearMonth) -> bool {
        self.category_id == category_id && self.period() == period
    }
}

/// A single recorded spend against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(rename = "expenseId")]
    pub id: u32,
    #[serde(default = "default_user_id")]
    pub user_id: u32,
    pub category_id: u32,
    pub amount: i64,
    pub spent_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_USER_ID: u32 = 1;

fn default_user_id() -> u32 {
    DEFAULT_USER_ID
}

/// A category's budget for one month together with what has been spent.
///
/// `amount` is `None` when the budget is unset: either no row exists for the
/// month or the row holds zero. `budget_id` is `None` only for entries
/// synthesized for categories without a row.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetWithCategory {
    pub budget_id: Option<u32>,
    pub category: Category,
    pub amount: Option<i64>,
    pub period: YearMonth,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub current_expense: i64,
    pub usage_percentage: i64,
    pub remaining_amount: i64,
}

impl BudgetWithCategory {
    pub fn is_unset(&self) -> bool {
        self.amount.is_none()
    }

    /// Budget amount with unset treated as zero.
    pub fn amount_or_zero(&self) -> i64 {
        self.amount.unwrap_or(0)
    }

    pub fn is_over_budget(&self) -> bool {
        self.amount
            .is_some_and(|amount| self.current_expense > amount)
    }
}

/// An expense joined with its category; the category color is always set.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWithCategory {
    pub expense: Expense,
    pub category: Category,
}

/// One tile of the budget overview.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetItem {
    pub id: u32,
    pub icon: String,
    pub label: String,
    pub value: i64,
    pub amount: i64,
    pub color: String,
}
