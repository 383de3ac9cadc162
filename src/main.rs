use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use kakeibo::core::auth::{LoginCredentials, RegisterCredentials};
use kakeibo::core::form::{CategoryForm, ExpenseForm};
use kakeibo::core::log::init_logging;
use kakeibo::core::model::YearMonth;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Log in with the demo account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Display the monthly dashboard
    Dashboard {
        /// Month as YYYY-MM, defaults to the current month
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Display budget usage for every category
    Budgets {
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Display one category's budget
    Budget {
        category_id: u32,
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Set a category's budget for a month
    SetBudget {
        category_id: u32,
        amount: i64,
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// List categories
    Categories,
    /// Edit a category
    EditCategory {
        category_id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Record an expense
    AddExpense {
        #[arg(long)]
        category: u32,
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
        /// Date as YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// List a month's expenses, newest first
    Expenses {
        #[arg(short, long)]
        month: Option<YearMonth>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Remove stored data and reset categories
    Reset,
}

impl From<Commands> for kakeibo::AppCommand {
    fn from(cmd: Commands) -> kakeibo::AppCommand {
        match cmd {
            Commands::Login { email, password } => {
                kakeibo::AppCommand::Login(LoginCredentials { email, password })
            }
            Commands::Register {
                name,
                email,
                password,
                confirm_password,
            } => kakeibo::AppCommand::Register(RegisterCredentials {
                name,
                email,
                password,
                confirm_password,
            }),
            Commands::Logout => kakeibo::AppCommand::Logout,
            Commands::Whoami => kakeibo::AppCommand::Whoami,
            Commands::Dashboard { month } => kakeibo::AppCommand::Dashboard { period: month },
            Commands::Budgets { month } => kakeibo::AppCommand::Budgets { period: month },
            Commands::Budget { category_id, month } => kakeibo::AppCommand::Budget {
                category_id,
                period: month,
            },
            Commands::SetBudget {
                category_id,
                amount,
                month,
            } => kakeibo::AppCommand::SetBudget {
                category_id,
                amount,
                period: month,
            },
            Commands::Categories => kakeibo::AppCommand::Categories,
            Commands::EditCategory {
                category_id,
                name,
                description,
                icon,
                color,
            } => kakeibo::AppCommand::EditCategory {
                category_id,
                form: CategoryForm {
                    name,
                    description,
                    icon,
                    color,
                },
            },
            Commands::AddExpense {
                category,
                amount,
                date,
                note,
            } => {
                let mut form = ExpenseForm::new();
                form.category_id = Some(category);
                form.amount = Some(amount);
                if date.is_some() {
                    form.spent_at = date;
                }
                form.note = note;
                kakeibo::AppCommand::AddExpense(form)
            }
            Commands::Expenses { month, limit } => kakeibo::AppCommand::Expenses {
                period: month,
                limit,
            },
            Commands::Reset => kakeibo::AppCommand::Reset,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => kakeibo::cli::setup::setup().map(|message| println!("{message}")),
        Some(cmd) => kakeibo::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
