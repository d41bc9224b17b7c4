//! Dashboard module
//!
//! Provides an overview page showing the account balances, a breakdown
//! chart, the most recent transactions and the forms for recording
//! additions, expenses and the savings target.

mod cards;
mod charts;
mod forms;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
