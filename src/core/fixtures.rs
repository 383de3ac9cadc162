//! Seed data a fresh ledger starts from.

use crate::core::model::{Budget, Category, DEFAULT_USER_ID, Expense};
use chrono::{DateTime, NaiveDate, Utc};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn midnight(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn category(id: u32, name: &str, description: &str, icon: &str, color: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        description: Some(description.to_string()),
        icon: icon.to_string(),
        color: Some(color.to_string()),
        created_at: midnight(2025, 1, 1),
        updated_at: midnight(2025, 1, 1),
    }
}

pub fn seed_categories() -> Vec<Category> {
    vec![
        category(1, "食費", "食材費、外食費など", "mdi-food", "primary"),
        category(2, "交通費", "電車賃、ガソリン代など", "mdi-train", "primary"),
        category(3, "娯楽", "映画、ゲーム、レジャーなど", "mdi-movie", "primary"),
        category(4, "光熱費", "電気代、ガス代、水道代", "mdi-lightning-bolt", "primary"),
        category(5, "通信費", "携帯代、インターネット代", "mdi-cellphone", "primary"),
        category(6, "医療費", "病院代、薬代など", "mdi-medical-bag", "primary"),
        category(7, "衣類", "服、靴、アクセサリーなど", "mdi-tshirt-crew", "primary"),
        category(8, "美容", "化粧品、美容院など", "mdi-face-woman", "primary"),
        category(9, "その他", "その他の支出", "mdi-dots-horizontal", "primary"),
    ]
}

/// The smaller category set restored by a reset.
pub fn reset_categories() -> Vec<Category> {
    vec![
        category(1, "食費", "食材費、外食費など", "mdi-food", "primary"),
        category(2, "交通費", "電車賃、ガソリン代など", "mdi-train", "primary"),
        category(3, "娯楽", "映画、ゲーム、レジャーなど", "mdi-movie", "primary"),
        category(4, "光熱費", "電気、ガス、水道代など", "mdi-lightning-bolt", "warning"),
        category(5, "その他", "その他の支出", "mdi-dots-horizontal", "secondary"),
    ]
}

pub fn seed_budgets() -> Vec<Budget> {
    // Categories 6 and 7 carry explicit zero budgets.
    [(1, 50000), (2, 15000), (3, 20000), (4, 12000), (5, 8000), (6, 0), (7, 0)]
        .into_iter()
        .map(|(id, amount)| Budget {
            id,
            category_id: id,
            amount,
            year: 2025,
            month: 9,
            created_at: midnight(2025, 9, 1),
            updated_at: midnight(2025, 9, 1),
        })
        .collect()
}

pub fn seed_expenses() -> Vec<Expense> {
    [
        (1, 1, 32500, 15, "食材費など"),
        (2, 2, 4500, 10, "電車代"),
        (3, 3, 17000, 20, "映画・レジャー"),
    ]
    .into_iter()
    .map(|(id, category_id, amount, day, note)| Expense {
        id,
        user_id: DEFAULT_USER_ID,
        category_id,
        amount,
        spent_at: date(2025, 9, day),
        note: Some(note.to_string()),
        created_at: midnight(2025, 9, day),
        updated_at: midnight(2025, 9, day),
    })
    .collect()
}
