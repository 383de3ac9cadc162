use super::ui;
use crate::core::form::{CategoryForm, FormError};
use crate::core::ledger::Ledger;
use crate::store::repository::LedgerRepository;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn list(ledger: &Ledger) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell("Description"),
        ui::header_cell("Icon"),
        ui::header_cell("Color"),
    ]);
    for category in ledger.categories() {
        table.add_row(vec![
            Cell::new(category.id).set_alignment(CellAlignment::Right),
            ui::category_cell(&category.name, category.color.as_deref()),
            Cell::new(category.description.as_deref().unwrap_or("")),
            Cell::new(&category.icon),
            Cell::new(category.color.as_deref().unwrap_or("")),
        ]);
    }
    table.to_string()
}

pub async fn edit(repo: &mut LedgerRepository, category_id: u32, form: CategoryForm) -> Result<String> {
    let update = form.validate()?;
    let category = repo
        .update_category(category_id, update)
        .await?
        .ok_or(FormError::CategoryNotFound(category_id))?;

    Ok(format!(
        "Saved category {}",
        ui::style_text(&category.name, ui::StyleType::TotalLabel)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStorage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_edit_category() {
        let mut repo = LedgerRepository::open(Arc::new(MemoryStorage::new())).await;
        let form = CategoryForm {
            name: " 日用品 ".to_string(),
            description: "洗剤など".to_string(),
            icon: Some("mdi-shopping".to_string()),
            color: None,
        };

        edit(&mut repo, 9, form).await.unwrap();
        let category = repo.ledger().category(9).unwrap();
        assert_eq!(category.name, "日用品");
        assert_eq!(category.description.as_deref(), Some("洗剤など"));
        assert_eq!(category.icon, "mdi-shopping");
        assert_eq!(category.color.as_deref(), Some("primary"));
        assert!(list(repo.ledger()).contains("日用品"));
    }

    #[tokio::test]
    async fn test_edit_unknown_category() {
        let mut repo = LedgerRepository::open(Arc::new(MemoryStorage::new())).await;
        let form = CategoryForm {
            name: "x".to_string(),
            ..Default::default()
        };

        let err = edit(&mut repo, 12, form).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FormError>(),
            Some(&FormError::CategoryNotFound(12))
        );
    }
}
