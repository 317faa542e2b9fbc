//! Core business logic - framework-agnostic savings goal operations.
//!
//! Nothing in here knows about Discord. The bot layer drives a
//! [`tracker::SavingsTracker`] and renders the plain views it derives.

/// Completion-time estimation
pub mod estimate;
/// Currency, percentage, progress bar, and date formatting
pub mod format;
/// Data-URI image payloads
pub mod image;
/// Savings record and history data model
pub mod models;
/// Load/save of the collection in the key-value table
pub mod persistence;
/// Overdue contribution reminders
pub mod reminder;
/// In-memory record store
pub mod store;
/// Action orchestration: mutate, persist, report
pub mod tracker;
/// Deposits and withdrawals
pub mod transaction;
/// List/detail view controller
pub mod view;
