//! Terminal screens: each renders to a string the binary prints

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod setup;
pub mod ui;
