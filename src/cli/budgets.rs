use super::ui;
use crate::core::analytics;
use crate::core::constants::{AVAILABLE_ICONS, COLOR_OPTIONS};
use crate::core::form::{FormError, validate_budget_amount};
use crate::core::ledger::Ledger;
use crate::core::model::{BudgetWithCategory, Category, YearMonth};
use crate::store::repository::LedgerRepository;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Budget tiles for every category, as shown on the home screen.
pub fn overview(ledger: &Ledger, period: YearMonth, currency: &str) -> String {
    let items = analytics::budget_items_for_display(ledger, period);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Category"),
        ui::header_cell("Icon"),
        ui::header_cell("Budget"),
        ui::header_cell("Usage"),
    ]);
    for item in &items {
        table.add_row(vec![
            Cell::new(item.id).set_alignment(CellAlignment::Right),
            ui::category_cell(&item.label, Some(item.color.as_str())),
            Cell::new(&item.icon),
            ui::budget_cell(currency, (item.amount != 0).then_some(item.amount)),
            ui::usage_cell(item.value),
        ]);
    }

    format!(
        "Budgets: {}\n\n{}",
        ui::style_text(&period.to_string(), ui::StyleType::Title),
        table
    )
}

/// A category and its budget for one month.
#[derive(Debug, Clone)]
pub struct BudgetDetail {
    pub category: Category,
    pub budget: Option<BudgetWithCategory>,
}

impl BudgetDetail {
    pub fn build(ledger: &Ledger, category_id: u32, period: YearMonth) -> Result<Self, FormError> {
        let category = ledger
            .category(category_id)
            .cloned()
            .ok_or(FormError::CategoryNotFound(category_id))?;
        Ok(Self {
            category,
            budget: analytics::budget_by_category_id(ledger, category_id, period),
        })
    }

    pub fn render(&self, period: YearMonth, currency: &str) -> String {
        let mut output = format!(
            "{} ({})\n",
            ui::style_text(&self.category.name, ui::StyleType::Title),
            period
        );
        if let Some(description) = &self.category.description {
            output.push_str(&format!("{}\n", ui::style_text(description, ui::StyleType::Subtle)));
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Field"), ui::header_cell("Value")]);
        table.add_row(vec![Cell::new("Icon"), Cell::new(&self.category.icon)]);
        table.add_row(vec![
            Cell::new("Color"),
            ui::category_cell(
                self.category.color.as_deref().unwrap_or("-"),
                self.category.color.as_deref(),
            ),
        ]);
        match &self.budget {
            Some(budget) => {
                table.add_row(vec![Cell::new("Budget"), ui::budget_cell(currency, budget.amount)]);
                table.add_row(vec![
                    Cell::new("Spent"),
                    ui::amount_cell(currency, budget.current_expense),
                ]);
                table.add_row(vec![
                    Cell::new("Remaining"),
                    ui::remaining_cell(currency, budget.remaining_amount),
                ]);
                table.add_row(vec![Cell::new("Usage"), ui::usage_cell(budget.usage_percentage)]);
            }
            None => {
                table.add_row(vec![Cell::new("Budget"), ui::budget_cell(currency, None)]);
            }
        }
        output.push('\n');
        output.push_str(&table.to_string());

        output.push_str(&format!(
            "\n\nIcons: {}\nColors: {}",
            ui::style_text(&AVAILABLE_ICONS.join(", "), ui::StyleType::Subtle),
            ui::style_text(
                &COLOR_OPTIONS
                    .iter()
                    .map(|c| c.value)
                    .collect::<Vec<_>>()
                    .join(", "),
                ui::StyleType::Subtle
            )
        ));
        output
    }
}

pub fn detail(ledger: &Ledger, category_id: u32, period: YearMonth, currency: &str) -> Result<String> {
    Ok(BudgetDetail::build(ledger, category_id, period)?.render(period, currency))
}

/// Saves a positive budget for an existing category.
pub async fn set(
    repo: &mut LedgerRepository,
    category_id: u32,
    amount: i64,
    period: YearMonth,
    currency: &str,
) -> Result<String> {
    let amount = validate_budget_amount(amount)?;
    let detail = BudgetDetail::build(repo.ledger(), category_id, period)?;

    repo.update_budget(category_id, amount, period).await?;

    Ok(format!(
        "Budget for {} in {} set to {}",
        detail.category.name,
        period,
        ui::style_text(&ui::format_amount(currency, amount), ui::StyleType::TotalValue)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;
    use std::sync::Arc;

    fn september() -> YearMonth {
        YearMonth::new(2025, 9).unwrap()
    }

    #[test]
    fn test_detail_unknown_category() {
        let ledger = Ledger::seeded();
        let err = BudgetDetail::build(&ledger, 42, september()).unwrap_err();
        assert_eq!(err, FormError::CategoryNotFound(42));
    }

    #[test]
    fn test_detail_without_budget() {
        let ledger = Ledger::seeded();
        let detail = BudgetDetail::build(&ledger, 9, september()).unwrap();
        assert_eq!(detail.category.name, "その他");
        assert!(detail.budget.is_none());
        assert!(detail.render(september(), "¥").contains("unset"));
    }

    #[test]
    fn test_overview_lists_nine() {
        let ledger = Ledger::seeded();
        let output = overview(&ledger, september(), "¥");
        for name in ["食費", "交通費", "美容", "その他"] {
            assert!(output.contains(name), "missing {name}");
        }
    }

    #[tokio::test]
    async fn test_set_budget() {
        let mut repo = LedgerRepository::open(Arc::new(MemoryStorage::new())).await;

        set(&mut repo, 9, 3000, september(), "¥").await.unwrap();
        let budget = analytics::budget_by_category_id(repo.ledger(), 9, september()).unwrap();
        assert_eq!(budget.amount, Some(3000));

        let err = set(&mut repo, 9, 0, september(), "¥").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormError>(),
            Some(&FormError::NonPositiveAmount)
        );

        let err = set(&mut repo, 99, 100, september(), "¥").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormError>(),
            Some(&FormError::CategoryNotFound(99))
        );
    }
}
