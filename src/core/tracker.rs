//! Tracker service - runs user actions against the store and keeps storage in sync.
//!
//! Each mutating action follows the same shape: validate and apply the change in
//! memory, then overwrite the stored collection. Validation, lookup, and balance
//! errors return before anything changes. A failed write does not undo the change;
//! it is reported through [`Persistence::Failed`] and can be retried with
//! [`SavingsTracker::retry_save`].

use crate::{
    config::{DisplaySettings, Settings},
    core::{
        models::{RecordFields, RecordId, SavingsRecord},
        persistence, reminder,
        store::{SavingsStore, SortOrder, Tab},
        transaction,
        view::{DetailView, ListItem, View, ViewController},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::instrument;

/// Outcome of writing the collection after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// The collection on disk matches memory
    Saved,
    /// The write failed; memory holds the newer state
    Failed(String),
}

impl Persistence {
    /// Whether the write succeeded.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// A change that was applied in memory, plus what happened when saving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied<T> {
    /// Result of the in-memory operation
    pub value: T,
    /// Result of the follow-up write
    pub persistence: Persistence,
}

/// Owns the record store, the view controller, and the database handle.
#[derive(Debug)]
pub struct SavingsTracker {
    db: DatabaseConnection,
    settings: Settings,
    store: SavingsStore,
    controller: ViewController,
    dirty: bool,
}

impl SavingsTracker {
    /// Loads the stored collection and starts on the list view.
    pub async fn load(db: DatabaseConnection, settings: Settings) -> Result<Self> {
        let records = persistence::load_records(&db, &settings.storage.key).await?;
        tracing::info!(
            "Loaded {} savings goals from '{}'",
            records.len(),
            settings.storage.key
        );

        Ok(Self {
            db,
            settings,
            store: SavingsStore::from_records(records),
            controller: ViewController::new(),
            dirty: false,
        })
    }

    /// The record store.
    #[must_use]
    pub const fn store(&self) -> &SavingsStore {
        &self.store
    }

    /// The view controller.
    #[must_use]
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Display settings used for derived views.
    #[must_use]
    pub const fn display(&self) -> &DisplaySettings {
        &self.settings.display
    }

    /// Whether memory holds changes that failed to save.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Cards for the list view.
    #[must_use]
    pub fn list_view(&self) -> Vec<ListItem> {
        self.controller.list_view(&self.store, &self.settings.display)
    }

    /// The open record's detail view, if any.
    #[must_use]
    pub fn detail_view(&self) -> Option<DetailView> {
        self.controller
            .detail_view(&self.store, &self.settings.display)
    }

    /// Opens the detail view. Unknown ids are ignored and return `false`.
    pub fn open_detail(&mut self, id: RecordId) -> bool {
        self.controller.open_detail(&self.store, id)
    }

    /// Returns to the list view.
    pub fn go_home(&mut self) {
        self.controller.go_home();
    }

    /// Selects the list tab.
    pub fn set_filter(&mut self, tab: Tab) {
        self.controller.set_filter(tab);
    }

    /// Selects the list order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.controller.set_sort(sort);
    }

    /// Creates a new goal.
    #[instrument(skip(self, fields))]
    pub async fn create_record(&mut self, fields: RecordFields) -> Result<Applied<SavingsRecord>> {
        let record = self.store.create(fields)?;
        tracing::info!(record_id = record.id, "Created savings goal");
        Ok(self.persisted(record).await)
    }

    /// Edits a goal's name, amounts, frequency, and (optionally) image.
    #[instrument(skip(self, fields))]
    pub async fn edit_record(
        &mut self,
        id: RecordId,
        fields: RecordFields,
    ) -> Result<Applied<SavingsRecord>> {
        let record = self.store.update(id, fields)?;
        if self.controller.view() == View::Detail(id) {
            self.controller.open_detail(&self.store, id);
        }
        tracing::info!(record_id = id, "Edited savings goal");
        Ok(self.persisted(record).await)
    }

    /// Deletes a goal permanently. Unknown ids are a no-op and return `None`.
    #[instrument(skip(self))]
    pub async fn delete_record(&mut self, id: RecordId) -> Option<Applied<SavingsRecord>> {
        let removed = self.store.delete(id)?;
        self.controller.forget_if_missing(&self.store);
        tracing::info!(record_id = id, "Deleted savings goal");
        Some(self.persisted(removed).await)
    }

    /// Deposits into the open record.
    #[instrument(skip(self))]
    pub async fn deposit(&mut self, amount: i64) -> Result<Applied<SavingsRecord>> {
        let id = self.current_record()?;
        let record = transaction::apply_deposit(&mut self.store, id, amount)?;
        Ok(self.persisted(record).await)
    }

    /// Withdraws from the open record.
    #[instrument(skip(self))]
    pub async fn withdraw(&mut self, amount: i64) -> Result<Applied<SavingsRecord>> {
        let id = self.current_record()?;
        let record = transaction::apply_withdrawal(&mut self.store, id, amount)?;
        Ok(self.persisted(record).await)
    }

    /// Turns reminders for the open record on or off.
    #[instrument(skip(self))]
    pub async fn set_reminder(&mut self, on: bool) -> Result<Applied<SavingsRecord>> {
        let id = self.current_record()?;
        let record = self.store.set_reminder(id, on)?.clone();
        Ok(self.persisted(record).await)
    }

    /// Flips reminders for the open record.
    #[instrument(skip(self))]
    pub async fn toggle_reminder(&mut self) -> Result<Applied<SavingsRecord>> {
        let id = self.current_record()?;
        let on = !self.store.find_by_id(id)?.reminder_on;
        self.set_reminder(on).await
    }

    /// Writes the collection again after an earlier failure.
    ///
    /// # Errors
    /// Returns [`Error::Storage`] if the write fails again.
    pub async fn retry_save(&mut self) -> Result<()> {
        persistence::save_records(&self.db, &self.settings.storage.key, self.store.records())
            .await
            .inspect_err(|e| tracing::warn!("Retrying save failed: {e}"))?;
        self.dirty = false;
        tracing::info!("Saved savings goals after retry");
        Ok(())
    }

    /// Reminder-enabled goals whose contribution is overdue at `now`.
    #[must_use]
    pub fn due_reminders(&self, now: DateTime<Utc>) -> Vec<&SavingsRecord> {
        reminder::due_reminders(&self.store, now)
    }

    fn current_record(&self) -> Result<RecordId> {
        self.controller.current_record().ok_or(Error::NoRecordOpen)
    }

    async fn persisted<T>(&mut self, value: T) -> Applied<T> {
        let persistence = match persistence::save_records(
            &self.db,
            &self.settings.storage.key,
            self.store.records(),
        )
        .await
        {
            Ok(()) => {
                self.dirty = false;
                Persistence::Saved
            }
            Err(e) => {
                tracing::warn!("Failed to save savings goals: {e}");
                self.dirty = true;
                Persistence::Failed(e.to_string())
            }
        };

        Applied { value, persistence }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::models::TransactionKind;
    use crate::test_utils::{fields, laptop_fields, setup_test_db, setup_tracker};
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_load_empty_database() -> Result<()> {
        let tracker = setup_tracker().await?;
        assert!(tracker.store().is_empty());
        assert_eq!(tracker.controller().view(), View::List);
        assert!(tracker.list_view().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_deposit_persist() -> Result<()> {
        let db = setup_test_db().await?;
        let settings = Settings::default();
        let mut tracker = SavingsTracker::load(db.clone(), settings.clone()).await?;

        let created = tracker.create_record(laptop_fields()).await?;
        assert!(created.persistence.is_saved());

        assert!(tracker.open_detail(created.value.id));
        let deposited = tracker.deposit(500_000).await?;
        assert_eq!(deposited.value.collected, 500_000);

        let reloaded = SavingsTracker::load(db, settings).await?;
        let record = reloaded.store().find_by_id(created.value.id)?;
        assert_eq!(record.collected, 500_000);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].kind, TransactionKind::Deposit);
        Ok(())
    }

    #[tokio::test]
    async fn test_transactions_require_open_record() -> Result<()> {
        let mut tracker = setup_tracker().await?;
        tracker.create_record(laptop_fields()).await?;

        assert!(matches!(tracker.deposit(10).await, Err(Error::NoRecordOpen)));
        assert!(matches!(tracker.withdraw(10).await, Err(Error::NoRecordOpen)));
        assert!(matches!(
            tracker.set_reminder(true).await,
            Err(Error::NoRecordOpen)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejected_withdrawal_is_not_persisted() -> Result<()> {
        let db = setup_test_db().await?;
        let mut tracker = SavingsTracker::load(db.clone(), Settings::default()).await?;
        let id = tracker.create_record(laptop_fields()).await?.value.id;
        tracker.open_detail(id);
        tracker.deposit(100).await?;

        let result = tracker.withdraw(500).await;
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
        assert_eq!(tracker.store().find_by_id(id)?.collected, 100);

        let reloaded = SavingsTracker::load(db, Settings::default()).await?;
        assert_eq!(reloaded.store().find_by_id(id)?.history.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_edit_preserves_history_and_refreshes_detail() -> Result<()> {
        let mut tracker = setup_tracker().await?;
        let created = tracker.create_record(laptop_fields()).await?.value;
        tracker.open_detail(created.id);
        tracker.deposit(250_000).await?;

        let mut edit = laptop_fields();
        edit.name = "Work Laptop".to_string();
        let edited = tracker.edit_record(created.id, edit).await?.value;

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.created_date, created.created_date);
        assert_eq!(edited.collected, 250_000);
        assert_eq!(edited.history.len(), 1);

        let detail = tracker.detail_view().unwrap();
        assert_eq!(detail.item.name, "Work Laptop");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_open_record_returns_to_list() -> Result<()> {
        let mut tracker = setup_tracker().await?;
        let keep = tracker.create_record(fields("Keep", 100, 10)).await?.value;
        let drop = tracker.create_record(fields("Drop", 100, 10)).await?.value;
        tracker.open_detail(drop.id);

        let removed = tracker.delete_record(drop.id).await.unwrap();
        assert_eq!(removed.value.id, drop.id);
        assert_eq!(tracker.controller().view(), View::List);
        assert_eq!(tracker.store().len(), 1);
        assert!(tracker.store().find_by_id(keep.id).is_ok());

        assert!(tracker.delete_record(drop.id).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_reminder_toggle_persists() -> Result<()> {
        let db = setup_test_db().await?;
        let mut tracker = SavingsTracker::load(db.clone(), Settings::default()).await?;
        let id = tracker.create_record(laptop_fields()).await?.value.id;
        tracker.open_detail(id);

        let applied = tracker.set_reminder(true).await?;
        assert!(applied.value.reminder_on);

        let reloaded = SavingsTracker::load(db, Settings::default()).await?;
        assert!(reloaded.store().find_by_id(id)?.reminder_on);

        assert!(!tracker.toggle_reminder().await?.value.reminder_on);
        assert!(tracker.toggle_reminder().await?.value.reminder_on);
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_memory_and_retry_saves() -> Result<()> {
        let db = setup_test_db().await?;
        let mut tracker = SavingsTracker::load(db.clone(), Settings::default()).await?;
        let id = tracker.create_record(laptop_fields()).await?.value.id;
        tracker.open_detail(id);

        db.execute_unprepared("DROP TABLE system_state").await?;

        let applied = tracker.deposit(1_000).await?;
        assert!(matches!(applied.persistence, Persistence::Failed(_)));
        assert_eq!(applied.value.collected, 1_000);
        assert_eq!(tracker.store().find_by_id(id)?.collected, 1_000);
        assert!(tracker.is_dirty());

        assert!(matches!(
            tracker.retry_save().await,
            Err(Error::Storage { .. })
        ));
        assert!(tracker.is_dirty());

        crate::config::database::create_tables(&db).await?;
        tracker.retry_save().await?;
        assert!(!tracker.is_dirty());

        let reloaded = SavingsTracker::load(db, Settings::default()).await?;
        assert_eq!(reloaded.store().find_by_id(id)?.collected, 1_000);
        Ok(())
    }

    #[tokio::test]
    async fn test_custom_storage_key() -> Result<()> {
        let db = setup_test_db().await?;
        let mut settings = Settings::default();
        settings.storage.key = "alt_goals".to_string();

        let mut tracker = SavingsTracker::load(db.clone(), settings).await?;
        tracker.create_record(laptop_fields()).await?;

        let default_tracker = SavingsTracker::load(db, Settings::default()).await?;
        assert!(default_tracker.store().is_empty());
        Ok(())
    }
}
