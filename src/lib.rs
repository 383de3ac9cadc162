pub mod cli;
pub mod core;
pub mod store;

use crate::core::auth::{LoginCredentials, RegisterCredentials};
use crate::core::config::AppConfig;
use crate::core::form::{CategoryForm, ExpenseForm};
use crate::core::model::YearMonth;
use crate::core::storage::KeyValueStorage;
use crate::store::repository::LedgerRepository;
use crate::store::session::AuthSession;
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Login(LoginCredentials),
    Register(RegisterCredentials),
    Logout,
    Whoami,
    Dashboard {
        period: Option<YearMonth>,
    },
    Budgets {
        period: Option<YearMonth>,
    },
    Budget {
        category_id: u32,
        period: Option<YearMonth>,
    },
    SetBudget {
        category_id: u32,
        amount: i64,
        period: Option<YearMonth>,
    },
    Categories,
    EditCategory {
        category_id: u32,
        form: CategoryForm,
    },
    AddExpense(ExpenseForm),
    Expenses {
        period: Option<YearMonth>,
        limit: Option<usize>,
    },
    Reset,
}

impl AppCommand {
    /// Commands reachable without a logged-in user.
    fn is_public(&self) -> bool {
        matches!(
            self,
            AppCommand::Login(_) | AppCommand::Register(_) | AppCommand::Whoami
        )
    }
}

/// One application instance: configuration, the ledger and the auth session,
/// all sharing one storage.
pub struct App {
    config: AppConfig,
    repo: LedgerRepository,
    session: AuthSession,
}

impl App {
    pub async fn open(config: AppConfig, storage: Arc<dyn KeyValueStorage>) -> Self {
        let repo = LedgerRepository::open(Arc::clone(&storage)).await;
        let session = AuthSession::restore(storage, config.auth.delay()).await;
        Self {
            config,
            repo,
            session,
        }
    }

    pub fn repository(&self) -> &LedgerRepository {
        &self.repo
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Runs `command` and returns what should be printed.
    pub async fn execute(&mut self, command: AppCommand) -> Result<String> {
        if !command.is_public() {
            self.session.require_user()?;
        }

        let currency = self.config.currency.clone();
        let currency = currency.as_str();
        let current = YearMonth::current();

        match command {
            AppCommand::Login(_) if self.session.is_authenticated() => {
                info!("Already logged in, showing dashboard");
                Ok(self.dashboard(current))
            }
            AppCommand::Login(credentials) => cli::auth::login(&mut self.session, credentials).await,
            AppCommand::Register(credentials) => {
                cli::auth::register(&mut self.session, credentials).await
            }
            AppCommand::Logout => cli::auth::logout(&mut self.session).await,
            AppCommand::Whoami => Ok(cli::auth::whoami(&self.session)),
            AppCommand::Dashboard { period } => Ok(self.dashboard(period.unwrap_or(current))),
            AppCommand::Budgets { period } => Ok(cli::budgets::overview(
                self.repo.ledger(),
                period.unwrap_or(current),
                currency,
            )),
            AppCommand::Budget {
                category_id,
                period,
            } => cli::budgets::detail(
                self.repo.ledger(),
                category_id,
                period.unwrap_or(current),
                currency,
            ),
            AppCommand::SetBudget {
                category_id,
                amount,
                period,
            } => {
                cli::budgets::set(
                    &mut self.repo,
                    category_id,
                    amount,
                    period.unwrap_or(current),
                    currency,
                )
                .await
            }
            AppCommand::Categories => Ok(cli::categories::list(self.repo.ledger())),
            AppCommand::EditCategory { category_id, form } => {
                cli::categories::edit(&mut self.repo, category_id, form).await
            }
            AppCommand::AddExpense(form) => cli::expenses::add(&mut self.repo, form, currency).await,
            AppCommand::Expenses { period, limit } => Ok(cli::expenses::list(
                &self.repo,
                period.unwrap_or(current),
                limit,
                currency,
            )),
            AppCommand::Reset => {
                self.repo.clear_storage().await?;
                Ok("Stored data cleared; categories reset".to_string())
            }
        }
    }

    fn dashboard(&self, period: YearMonth) -> String {
        cli::dashboard::DashboardView::build(
            self.repo.ledger(),
            period,
            Local::now().date_naive(),
            self.config.dashboard.recent_expenses,
        )
        .render(&self.config.currency)
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("kakeibo starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let storage = store::open_storage(&config)?;
    let mut app = App::open(config, storage).await;

    let output = app.execute(command).await?;
    println!("{output}");
    Ok(())
}
