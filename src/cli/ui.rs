use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Formats an amount with thousands separators, e.g. `¥32,500`.
pub fn format_amount(currency: &str, amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{currency}{grouped}")
}

/// Right aligned amount cell.
pub fn amount_cell(currency: &str, amount: i64) -> Cell {
    Cell::new(format_amount(currency, amount)).set_alignment(CellAlignment::Right)
}

/// Amount cell for a budget; unset budgets show a dimmed placeholder.
pub fn budget_cell(currency: &str, amount: Option<i64>) -> Cell {
    amount.map_or(
        Cell::new("unset")
            .fg(Color::DarkGrey)
            .set_alignment(CellAlignment::Right),
        |a| amount_cell(currency, a),
    )
}

/// Remaining amount, red once overspent.
pub fn remaining_cell(currency: &str, remaining: i64) -> Cell {
    let cell = amount_cell(currency, remaining);
    if remaining < 0 {
        cell.fg(Color::Red)
    } else {
        cell.fg(Color::Green)
    }
}

/// Usage percentage with the same thresholds as the dashboard cards.
pub fn usage_cell(usage: i64) -> Cell {
    Cell::new(format!("{usage}%"))
        .fg(status_color(progress_status(usage)))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Status name for a usage percentage.
pub fn progress_status(usage: i64) -> &'static str {
    if usage > 100 {
        "error"
    } else if usage > 80 {
        "warning"
    } else {
        "success"
    }
}

/// Terminal color for a category or status color name.
pub fn status_color(name: &str) -> Color {
    match name {
        "primary" | "blue" => Color::Blue,
        "secondary" | "pink" => Color::Magenta,
        "purple" => Color::DarkMagenta,
        "success" | "green" => Color::Green,
        "info" => Color::Cyan,
        "warning" | "orange" => Color::Yellow,
        "error" | "red" => Color::Red,
        _ => Color::Reset,
    }
}

/// Category name cell tinted with the category color.
pub fn category_cell(name: &str, color: Option<&str>) -> Cell {
    Cell::new(name).fg(status_color(color.unwrap_or(crate::core::constants::DEFAULT_COLOR)))
}

/// Creates a spinner shown while waiting on a slow call.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// A separator line matching the terminal width.
pub fn separator() -> String {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    format!("\n{}\n", "─".repeat(term_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("¥", 0), "¥0");
        assert_eq!(format_amount("¥", 999), "¥999");
        assert_eq!(format_amount("¥", 32500), "¥32,500");
        assert_eq!(format_amount("¥", 1234567), "¥1,234,567");
        assert_eq!(format_amount("¥", -100), "-¥100");
        assert_eq!(format_amount("$", -105000), "-$105,000");
    }

    #[test]
    fn test_progress_status() {
        assert_eq!(progress_status(0), "success");
        assert_eq!(progress_status(80), "success");
        assert_eq!(progress_status(81), "warning");
        assert_eq!(progress_status(100), "warning");
        assert_eq!(progress_status(101), "error");
    }
}
