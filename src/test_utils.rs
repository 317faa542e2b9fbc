//! Shared test utilities.
//!
//! Helpers for setting up an in-memory database and building records with
//! sensible defaults.

use crate::{
    config::Settings,
    core::{
        models::{Frequency, RecordFields, RecordId},
        store::SavingsStore,
        tracker::SavingsTracker,
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Loads a tracker with default settings over a fresh in-memory database.
pub async fn setup_tracker() -> Result<SavingsTracker> {
    let db = setup_test_db().await?;
    SavingsTracker::load(db, Settings::default()).await
}

/// Weekly goal fields with no image.
pub fn fields(name: &str, goal: i64, saving_amount: i64) -> RecordFields {
    RecordFields {
        name: name.to_string(),
        goal,
        saving_amount,
        frequency: Frequency::Weekly,
        image: None,
    }
}

/// The "Laptop" goal: 10,000,000 saved at 500,000 a month.
pub fn laptop_fields() -> RecordFields {
    RecordFields {
        name: "Laptop".to_string(),
        goal: 10_000_000,
        saving_amount: 500_000,
        frequency: Frequency::Monthly,
        image: None,
    }
}

/// A store holding one weekly goal of `goal` saved at 10 per week.
///
/// # Panics
/// Panics if `goal` is not positive.
#[allow(clippy::unwrap_used)]
pub fn store_with_record(goal: i64) -> (SavingsStore, RecordId) {
    let mut store = SavingsStore::new();
    let id = store.create(fields("Goal", goal, 10)).unwrap().id;
    (store, id)
}
