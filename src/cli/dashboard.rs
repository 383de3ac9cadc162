use super::ui;
use crate::core::analytics;
use crate::core::ledger::Ledger;
use crate::core::model::{BudgetWithCategory, ExpenseWithCategory, YearMonth};
use chrono::{Datelike, NaiveDate};
use comfy_table::Cell;

/// One summary card at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCard {
    pub title: &'static str,
    pub value: String,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub period: YearMonth,
    pub total_budget: i64,
    pub total_expense: i64,
    pub total_remaining: i64,
    pub total_progress: i64,
    pub budgets: Vec<BudgetWithCategory>,
    pub recent_expenses: Vec<ExpenseWithCategory>,
    pub top_expense_category: Option<BudgetWithCategory>,
    pub over_budget_categories: Vec<BudgetWithCategory>,
    pub month_elapsed: i64,
}

/// How far through `period` we are as of `today`, in percent.
pub fn month_elapsed(period: YearMonth, today: NaiveDate) -> i64 {
    let current = YearMonth::of(today);
    if period < current {
        100
    } else if period > current {
        0
    } else {
        (today.day() as f64 / period.days() as f64 * 100.0).round() as i64
    }
}

impl DashboardView {
    pub fn build(
        ledger: &Ledger,
        period: YearMonth,
        today: NaiveDate,
        recent_limit: usize,
    ) -> Self {
        let budgets = analytics::budgets_with_categories(ledger, period);
        let total_budget = analytics::total_budget(ledger, period);
        let total_expense = analytics::total_expense(ledger, period);

        // First category wins a tie.
        let top_expense_category = budgets
            .iter()
            .filter(|b| b.current_expense > 0)
            .fold(None::<&BudgetWithCategory>, |best, b| match best {
                Some(best) if best.current_expense >= b.current_expense => Some(best),
                _ => Some(b),
            })
            .cloned();

        let over_budget_categories = budgets
            .iter()
            .filter(|b| b.is_over_budget())
            .cloned()
            .collect();

        Self {
            period,
            total_budget,
            total_expense,
            total_remaining: total_budget.saturating_sub(total_expense),
            total_progress: analytics::budget_progress(ledger, period),
            recent_expenses: analytics::expenses_with_categories(
                ledger,
                period,
                Some(recent_limit),
            ),
            top_expense_category,
            over_budget_categories,
            month_elapsed: month_elapsed(period, today),
            budgets,
        }
    }

    pub fn cards(&self, currency: &str) -> Vec<DashboardCard> {
        vec![
            DashboardCard {
                title: "Budget",
                value: ui::format_amount(currency, self.total_budget),
                icon: "mdi-wallet",
                color: "primary",
            },
            DashboardCard {
                title: "Spent",
                value: ui::format_amount(currency, self.total_expense),
                icon: "mdi-cash-minus",
                color: "error",
            },
            DashboardCard {
                title: "Remaining",
                value: ui::format_amount(currency, self.total_remaining),
                icon: "mdi-piggy-bank",
                color: if self.total_remaining >= 0 {
                    "success"
                } else {
                    "error"
                },
            },
            DashboardCard {
                title: "Usage",
                value: format!("{}%", self.total_progress),
                icon: "mdi-chart-pie",
                color: ui::progress_status(self.total_progress),
            },
        ]
    }

    pub fn render(&self, currency: &str) -> String {
        let mut output = format!(
            "Dashboard: {}\n\n",
            ui::style_text(&self.period.to_string(), ui::StyleType::Title)
        );

        let cards = self.cards(currency);
        let mut summary = ui::new_styled_table();
        summary.set_header(cards.iter().map(|c| ui::header_cell(c.title)));
        summary.add_row(
            cards
                .iter()
                .map(|c| Cell::new(&c.value).fg(ui::status_color(c.color))),
        );
        output.push_str(&summary.to_string());

        if self.budgets.is_empty() {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text("No budgets set for this month.", ui::StyleType::Subtle)
            ));
        } else {
            let mut table = ui::new_styled_table();
            table.set_header(vec![
                ui::header_cell("Category"),
                ui::header_cell("Budget"),
                ui::header_cell("Spent"),
                ui::header_cell("Remaining"),
                ui::header_cell("Usage"),
            ]);
            for budget in &self.budgets {
                table.add_row(vec![
                    ui::category_cell(&budget.category.name, budget.category.color.as_deref()),
                    ui::budget_cell(currency, budget.amount),
                    ui::amount_cell(currency, budget.current_expense),
                    ui::remaining_cell(currency, budget.remaining_amount),
                    ui::usage_cell(budget.usage_percentage),
                ]);
            }
            output.push_str("\n\n");
            output.push_str(&table.to_string());
        }

        if let Some(top) = &self.top_expense_category {
            output.push_str(&format!(
                "\n\nTop spending: {} ({})",
                ui::style_text(&top.category.name, ui::StyleType::TotalLabel),
                ui::format_amount(currency, top.current_expense)
            ));
        }
        if !self.over_budget_categories.is_empty() {
            let names: Vec<&str> = self
                .over_budget_categories
                .iter()
                .map(|b| b.category.name.as_str())
                .collect();
            output.push_str(&format!(
                "\nOver budget: {}",
                ui::style_text(&names.join(", "), ui::StyleType::Error)
            ));
        }

        output.push_str(&format!(
            "\nMonth elapsed: {}%",
            ui::style_text(&self.month_elapsed.to_string(), ui::StyleType::TotalLabel)
        ));

        output.push_str(&ui::separator());
        output.push_str(&super::expenses::render_expenses(
            "Recent expenses",
            &self.recent_expenses,
            currency,
        ));

        output
    }
}
