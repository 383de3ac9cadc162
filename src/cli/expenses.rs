use super::ui;
use crate::core::analytics;
use crate::core::form::ExpenseForm;
use crate::core::model::{Expense, ExpenseWithCategory, YearMonth};
use crate::store::repository::LedgerRepository;
use anyhow::{Result, anyhow};
use comfy_table::Cell;

pub fn render_expenses(title: &str, expenses: &[ExpenseWithCategory], currency: &str) -> String {
    let mut output = format!("{}\n", ui::style_text(title, ui::StyleType::TotalLabel));

    if expenses.is_empty() {
        output.push_str(&ui::style_text("No expenses recorded.", ui::StyleType::Subtle));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Note"),
    ]);
    for item in expenses {
        table.add_row(vec![
            Cell::new(item.expense.spent_at.format("%Y-%m-%d")),
            ui::category_cell(&item.category.name, item.category.color.as_deref()),
            ui::amount_cell(currency, item.expense.amount),
            Cell::new(item.expense.note.as_deref().unwrap_or("")),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

/// Expense list for a month, newest first.
pub fn list(
    repo: &LedgerRepository,
    period: YearMonth,
    limit: Option<usize>,
    currency: &str,
) -> String {
    let expenses = analytics::expenses_with_categories(repo.ledger(), period, limit);
    let total = analytics::sum_amounts(expenses.iter().map(|e| e.expense.amount));

    let mut output = render_expenses(&format!("Expenses: {period}"), &expenses, currency);
    if !expenses.is_empty() {
        output.push_str(&format!(
            "\n\nTotal: {}",
            ui::style_text(&ui::format_amount(currency, total), ui::StyleType::TotalValue)
        ));
    }
    output
}

/// Validates and saves the form. The form is reset after a successful save.
///
/// Categories are selectable when they have a positive budget in the month
/// the expense is dated.
pub async fn save(repo: &mut LedgerRepository, form: &mut ExpenseForm) -> Result<Expense> {
    let spent_at = form.spent_at.ok_or_else(|| anyhow!("Date is required"))?;
    let period = YearMonth::of(spent_at);

    let expense = form.validate(repo.ledger(), period)?;
    let saved = repo.add_expense(expense).await?;
    form.reset();
    Ok(saved)
}

pub async fn add(repo: &mut LedgerRepository, mut form: ExpenseForm, currency: &str) -> Result<String> {
    let expense = save(repo, &mut form).await?;
    let category = repo
        .ledger()
        .category(expense.category_id)
        .map_or("?", |c| c.name.as_str());

    Ok(format!(
        "Recorded {} for {} on {}",
        ui::style_text(&ui::format_amount(currency, expense.amount), ui::StyleType::TotalValue),
        category,
        expense.spent_at
    ))
}
