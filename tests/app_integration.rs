use chrono::NaiveDate;
use kakeibo::core::auth::{AuthError, DEMO_EMAIL, DEMO_PASSWORD, LoginCredentials};
use kakeibo::core::config::{AppConfig, AuthConfig, StorageBackend};
use kakeibo::core::form::{CategoryForm, ExpenseForm, FormError};
use kakeibo::core::model::YearMonth;
use kakeibo::core::storage::{AUTH_USER_KEY, BUDGETS_KEY, KeyValueStorage};
use kakeibo::store::memory::MemoryStorage;
use kakeibo::{App, AppCommand};
use std::fs;
use std::sync::Arc;
use tracing::info;

mod test_utils {
    use super::*;

    pub fn config() -> AppConfig {
        AppConfig {
            storage: StorageBackend::Memory,
            auth: AuthConfig { delay_ms: 0 },
            ..Default::default()
        }
    }

    pub fn demo_login() -> AppCommand {
        AppCommand::Login(LoginCredentials {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        })
    }

    pub fn september() -> Option<YearMonth> {
        Some(YearMonth::new(2025, 9).unwrap())
    }

    /// An app over `storage` with the demo user logged in.
    pub async fn logged_in(storage: Arc<MemoryStorage>) -> App {
        let mut app = App::open(config(), storage).await;
        app.execute(demo_login()).await.expect("login failed");
        app
    }
}

#[test_log::test(tokio::test)]
async fn test_commands_require_login() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = App::open(test_utils::config(), storage).await;

    let err = app
        .execute(AppCommand::Dashboard { period: None })
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<AuthError>(),
        Some(&AuthError::NotAuthenticated)
    );

    let whoami = app.execute(AppCommand::Whoami).await.unwrap();
    assert!(whoami.contains("Not logged in"));
}

#[test_log::test(tokio::test)]
async fn test_session_survives_restart() {
    let storage = Arc::new(MemoryStorage::new());
    test_utils::logged_in(Arc::clone(&storage)).await;
    assert!(storage.get(AUTH_USER_KEY).await.is_some());

    let mut app = App::open(test_utils::config(), storage.clone()).await;
    assert!(app.session().is_authenticated());

    // Logging in again just shows the dashboard.
    let output = app.execute(test_utils::demo_login()).await.unwrap();
    assert!(output.contains("Dashboard"));

    app.execute(AppCommand::Logout).await.unwrap();
    let app = App::open(test_utils::config(), storage).await;
    assert!(!app.session().is_authenticated());
}

#[test_log::test(tokio::test)]
async fn test_wrong_password_rejected() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = App::open(test_utils::config(), storage).await;

    let err = app
        .execute(AppCommand::Login(LoginCredentials {
            email: DEMO_EMAIL.to_string(),
            password: "letmein".to_string(),
        }))
        .await
        .unwrap_err();
    info!(%err, "Login rejected");
    assert_eq!(err.to_string(), "Email address or password is incorrect");
}

#[test_log::test(tokio::test)]
async fn test_budget_flow_persists_across_restart() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = test_utils::logged_in(Arc::clone(&storage)).await;

    // Medical has an explicit zero budget: not selectable for expenses yet.
    let mut form = ExpenseForm::new();
    form.category_id = Some(6);
    form.amount = Some(4000);
    form.spent_at = NaiveDate::from_ymd_opt(2025, 9, 8);
    let err = app
        .execute(AppCommand::AddExpense(form.clone()))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<FormError>(),
        Some(&FormError::CategoryNotSelectable(6))
    );

    app.execute(AppCommand::SetBudget {
        category_id: 6,
        amount: 10000,
        period: test_utils::september(),
    })
    .await
    .unwrap();
    app.execute(AppCommand::AddExpense(form)).await.unwrap();

    let budgets_before = app.repository().ledger().budgets().len();
    app.execute(AppCommand::SetBudget {
        category_id: 6,
        amount: 12000,
        period: test_utils::september(),
    })
    .await
    .unwrap();
    assert_eq!(app.repository().ledger().budgets().len(), budgets_before);

    let restarted = App::open(test_utils::config(), storage).await;
    assert_eq!(restarted.repository().ledger(), app.repository().ledger());

    let medical = kakeibo::core::analytics::budget_by_category_id(
        restarted.repository().ledger(),
        6,
        YearMonth::new(2025, 9).unwrap(),
    )
    .unwrap();
    assert_eq!(medical.amount, Some(12000));
    assert_eq!(medical.current_expense, 4000);
    assert_eq!(medical.usage_percentage, 33);
    assert_eq!(medical.remaining_amount, 8000);
}

#[test_log::test(tokio::test)]
async fn test_oversized_amounts_rejected_and_dashboard_still_renders() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = test_utils::logged_in(Arc::clone(&storage)).await;

    let err = app
        .execute(AppCommand::SetBudget {
            category_id: 8,
            amount: i64::MAX,
            period: test_utils::september(),
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<FormError>(),
        Some(&FormError::AmountTooLarge)
    );
    assert!(storage.get(BUDGETS_KEY).await.is_none());

    let mut form = ExpenseForm::new();
    form.category_id = Some(1);
    form.amount = Some(i64::MAX);
    form.spent_at = NaiveDate::from_ymd_opt(2025, 9, 8);
    assert!(app.execute(AppCommand::AddExpense(form)).await.is_err());

    // Rows stored by an older build bypass validation but must not crash.
    storage
        .set(
            BUDGETS_KEY,
            r#"[{"budgetId":1,"categoryId":1,"amount":9223372036854775807,"year":2025,"month":9,"createdAt":"2025-09-01T00:00:00Z","updatedAt":"2025-09-01T00:00:00Z"},{"budgetId":2,"categoryId":2,"amount":9223372036854775807,"year":2025,"month":9,"createdAt":"2025-09-01T00:00:00Z","updatedAt":"2025-09-01T00:00:00Z"}]"#
                .to_string(),
        )
        .await
        .unwrap();
    let mut app = App::open(test_utils::config(), storage).await;
    for command in [
        AppCommand::Dashboard {
            period: test_utils::september(),
        },
        AppCommand::Budgets {
            period: test_utils::september(),
        },
    ] {
        app.execute(command).await.unwrap();
    }
}

#[test_log::test(tokio::test)]
async fn test_screens_render() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = test_utils::logged_in(storage).await;

    let dashboard = app
        .execute(AppCommand::Dashboard {
            period: test_utils::september(),
        })
        .await
        .unwrap();
    assert!(dashboard.contains("¥105,000"));
    assert!(dashboard.contains("Recent expenses"));

    let budgets = app
        .execute(AppCommand::Budgets {
            period: test_utils::september(),
        })
        .await
        .unwrap();
    assert!(budgets.contains("その他"));

    let detail = app
        .execute(AppCommand::Budget {
            category_id: 1,
            period: test_utils::september(),
        })
        .await
        .unwrap();
    assert!(detail.contains("¥17,500"));

    let expenses = app
        .execute(AppCommand::Expenses {
            period: test_utils::september(),
            limit: None,
        })
        .await
        .unwrap();
    assert!(expenses.contains("¥54,000"));

    assert!(
        app.execute(AppCommand::Budget {
            category_id: 99,
            period: None
        })
        .await
        .is_err()
    );
}

#[test_log::test(tokio::test)]
async fn test_edit_category_and_reset() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = test_utils::logged_in(Arc::clone(&storage)).await;

    app.execute(AppCommand::EditCategory {
        category_id: 2,
        form: CategoryForm {
            name: "交通".to_string(),
            description: String::new(),
            icon: Some("mdi-car".to_string()),
            color: Some("orange".to_string()),
        },
    })
    .await
    .unwrap();
    let categories = app.execute(AppCommand::Categories).await.unwrap();
    assert!(categories.contains("mdi-car"));

    app.execute(AppCommand::SetBudget {
        category_id: 2,
        amount: 5000,
        period: None,
    })
    .await
    .unwrap();
    assert!(storage.get(BUDGETS_KEY).await.is_some());

    app.execute(AppCommand::Reset).await.unwrap();
    assert!(storage.get(BUDGETS_KEY).await.is_none());
    assert_eq!(app.repository().ledger().categories().len(), 5);
    assert!(app.repository().ledger().budgets().is_empty());
    // Reset leaves the session alone.
    assert!(app.session().is_authenticated());
}

#[test_log::test(tokio::test)]
async fn test_run_command_with_config_file() {
    let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        currency: "¥"
        data_path: "{}"
        storage: memory
        auth:
          delay_ms: 0
    "#,
        data_dir.path().display()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = kakeibo::run_command(
        test_utils::demo_login(),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Login command failed with: {:?}",
        result.err()
    );

    // Memory storage starts over each run, so the session is gone.
    let result = kakeibo::run_command(
        AppCommand::Dashboard { period: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
async fn test_run_command_with_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    let result = kakeibo::run_command(AppCommand::Whoami, Some(missing.to_str().unwrap())).await;
    assert!(result.is_err());
}
