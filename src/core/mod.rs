//! Core household ledger logic: records, aggregates, validation

pub mod analytics;
pub mod auth;
pub mod config;
pub mod constants;
pub mod fixtures;
pub mod form;
pub mod ledger;
pub mod log;
pub mod model;
pub mod storage;

// Re-export main types for cleaner imports
pub use ledger::{CategoryUpdate, Ledger, LedgerError, NewExpense};
pub use model::{Budget, BudgetItem, BudgetWithCategory, Category, Expense, YearMonth};
pub use storage::KeyValueStorage;
