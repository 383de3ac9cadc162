//! Provides the monthly aggregates shown on the dashboard and budget screens.
//!
//! Every function here is a pure calculation over a [`Ledger`].
use crate::core::constants::{DASHBOARD_CATEGORY_LIMIT, DEFAULT_COLOR};
use crate::core::ledger::Ledger;
use crate::core::model::{
    Budget, BudgetItem, BudgetWithCategory, Category, ExpenseWithCategory, YearMonth,
};
use tracing::debug;

/// Rounded percentage of `spent` against `budget`; zero when nothing is
/// budgeted.
pub fn usage_percentage(spent: i64, budget: i64) -> i64 {
    if budget == 0 {
        return 0;
    }
    (spent as f64 / budget as f64 * 100.0).round() as i64
}

/// Adds up amounts, clamping at the `i64` bounds instead of overflowing.
pub fn sum_amounts(amounts: impl Iterator<Item = i64>) -> i64 {
    amounts.fold(0, i64::saturating_add)
}

/// Sum of a category's expenses within `period`.
pub fn category_expense(ledger: &Ledger, category_id: u32, period: YearMonth) -> i64 {
    let amounts = ledger
        .expenses()
        .iter()
        .filter(|e| e.category_id == category_id && period.contains(e.spent_at))
        .map(|e| e.amount);
    sum_amounts(amounts)
}

fn join_budget(ledger: &Ledger, budget: &Budget, category: &Category) -> BudgetWithCategory {
    let current_expense = category_expense(ledger, budget.category_id, budget.period());
    BudgetWithCategory {
        budget_id: Some(budget.id),
        category: category.clone(),
        amount: (budget.amount != 0).then_some(budget.amount),
        period: budget.period(),
        created_at: Some(budget.created_at),
        updated_at: Some(budget.updated_at),
        current_expense,
        usage_percentage: usage_percentage(current_expense, budget.amount),
        remaining_amount: budget.amount.saturating_sub(current_expense),
    }
}

fn unset_budget(ledger: &Ledger, category: &Category, period: YearMonth) -> BudgetWithCategory {
    let current_expense = category_expense(ledger, category.id, period);
    BudgetWithCategory {
        budget_id: None,
        category: category.clone(),
        amount: None,
        period,
        created_at: None,
        updated_at: None,
        current_expense,
        usage_percentage: 0,
        remaining_amount: current_expense.saturating_neg(),
    }
}

/// Budgets of `period` joined with their category and month spend. Budgets
/// whose category no longer exists are dropped.
pub fn budgets_with_categories(ledger: &Ledger, period: YearMonth) -> Vec<BudgetWithCategory> {
    ledger
        .budgets()
        .iter()
        .filter(|b| b.period() == period)
        .filter_map(|budget| match ledger.category(budget.category_id) {
            Some(category) => Some(join_budget(ledger, budget, category)),
            None => {
                debug!(
                    budget_id = budget.id,
                    category_id = budget.category_id,
                    "Skipping budget without category"
                );
                None
            }
        })
        .collect()
}

/// Every category with its budget for `period`, synthesizing an unset entry
/// where no budget row exists. Truncated to the dashboard tile count.
pub fn all_categories_with_budgets(ledger: &Ledger, period: YearMonth) -> Vec<BudgetWithCategory> {
    let existing = budgets_with_categories(ledger, period);

    ledger
        .categories()
        .iter()
        .map(|category| {
            existing
                .iter()
                .find(|b| b.category.id == category.id)
                .cloned()
                .unwrap_or_else(|| unset_budget(ledger, category, period))
        })
        .take(DASHBOARD_CATEGORY_LIMIT)
        .collect()
}

pub fn budget_by_category_id(
    ledger: &Ledger,
    category_id: u32,
    period: YearMonth,
) -> Option<BudgetWithCategory> {
    budgets_with_categories(ledger, period)
        .into_iter()
        .find(|b| b.category.id == category_id)
}

pub fn total_budget(ledger: &Ledger, period: YearMonth) -> i64 {
    let amounts = ledger
        .budgets()
        .iter()
        .filter(|b| b.period() == period)
        .map(|b| b.amount);
    sum_amounts(amounts)
}

pub fn total_expense(ledger: &Ledger, period: YearMonth) -> i64 {
    let amounts = ledger
        .expenses()
        .iter()
        .filter(|e| period.contains(e.spent_at))
        .map(|e| e.amount);
    sum_amounts(amounts)
}

/// Percentage of the month's total budget already spent.
pub fn budget_progress(ledger: &Ledger, period: YearMonth) -> i64 {
    usage_percentage(total_expense(ledger, period), total_budget(ledger, period))
}

/// Expenses of `period`, newest first, each with its category. Expenses
/// whose category is gone are left out.
pub fn expenses_with_categories(
    ledger: &Ledger,
    period: YearMonth,
    limit: Option<usize>,
) -> Vec<ExpenseWithCategory> {
    let mut expenses: Vec<ExpenseWithCategory> = ledger
        .expenses()
        .iter()
        .filter(|e| period.contains(e.spent_at))
        .filter_map(|expense| {
            let mut category = ledger.category(expense.category_id)?.clone();
            category
                .color
                .get_or_insert_with(|| DEFAULT_COLOR.to_string());
            Some(ExpenseWithCategory {
                expense: expense.clone(),
                category,
            })
        })
        .collect();

    expenses.sort_by(|a, b| b.expense.spent_at.cmp(&a.expense.spent_at));

    // A limit of zero means no limit.
    match limit {
        Some(limit) if limit > 0 => expenses.into_iter().take(limit).collect(),
        _ => expenses,
    }
}

/// Overview tiles for `period`.
pub fn budget_items_for_display(ledger: &Ledger, period: YearMonth) -> Vec<BudgetItem> {
    all_categories_with_budgets(ledger, period)
        .into_iter()
        .map(|budget| BudgetItem {
            id: budget.category.id,
            value: budget.usage_percentage,
            amount: budget.amount_or_zero(),
            icon: budget.category.icon,
            label: budget.category.name,
            color: budget
                .category
                .color
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        })
        .collect()
}
