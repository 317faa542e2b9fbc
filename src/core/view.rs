//! View controller - list/detail navigation and the derived display data.
//!
//! The controller only remembers which view is active, which record is open, and
//! how the list is filtered and sorted. Everything shown to the user is derived
//! fresh from the store on each call, so it can never go stale.

use crate::{
    config::DisplaySettings,
    core::{
        estimate::estimate,
        format::percent_complete,
        models::{Frequency, HistoryEntry, RecordId, SavingsRecord},
        store::{SavingsStore, SortOrder, Tab},
    },
};
use chrono::{DateTime, Utc};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The filtered, sorted list of goals
    #[default]
    List,
    /// A single goal, identified by the current record id
    Detail(RecordId),
}

/// One card of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    /// Record id, used to open the detail view
    pub id: RecordId,
    /// Display label
    pub name: String,
    /// Data URI of the uploaded image, or the placeholder URL
    pub image: String,
    /// Target amount
    pub goal: u64,
    /// Planned contribution per period
    pub saving_amount: u64,
    /// Contribution cadence
    pub frequency: Frequency,
    /// Progress, floored, 0 to 100
    pub percent_complete: u8,
    /// Human-readable completion estimate
    pub estimation: String,
}

/// Everything the detail view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// The same summary the list shows
    pub item: ListItem,
    /// Balance collected so far
    pub collected: u64,
    /// Amount still missing, never negative
    pub remaining: u64,
    /// When the goal was created
    pub created_date: DateTime<Utc>,
    /// Transactions, newest first
    pub history: Vec<HistoryEntry>,
    /// Whether reminders are on
    pub reminder_on: bool,
}

/// List/detail state machine plus the list's filter and sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewController {
    view: View,
    tab: Tab,
    sort: SortOrder,
}

impl ViewController {
    /// Starts on the list view with no record open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active view.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    /// Id of the open record, if the detail view is showing.
    #[must_use]
    pub const fn current_record(&self) -> Option<RecordId> {
        match self.view {
            View::List => None,
            View::Detail(id) => Some(id),
        }
    }

    /// The active list tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// The active list order.
    #[must_use]
    pub const fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Opens the detail view for `id`. Unknown ids leave the state untouched and
    /// return `false`.
    pub fn open_detail(&mut self, store: &SavingsStore, id: RecordId) -> bool {
        if store.find_by_id(id).is_err() {
            tracing::debug!(record_id = id, "Ignoring open for unknown record");
            return false;
        }
        self.view = View::Detail(id);
        true
    }

    /// Returns to the list view and clears the current record.
    pub fn go_home(&mut self) {
        self.view = View::List;
    }

    /// Selects the list tab.
    pub fn set_filter(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Selects the list order.
    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    /// Drops back to the list if the open record no longer exists.
    pub fn forget_if_missing(&mut self, store: &SavingsStore) {
        if let View::Detail(id) = self.view {
            if store.find_by_id(id).is_err() {
                self.view = View::List;
            }
        }
    }

    /// Cards for the list view under the current filter and sort.
    #[must_use]
    pub fn list_view(&self, store: &SavingsStore, display: &DisplaySettings) -> Vec<ListItem> {
        store
            .list(self.tab, self.sort)
            .iter()
            .map(|record| list_item(record, display))
            .collect()
    }

    /// The detail view for the open record, or `None` on the list view.
    #[must_use]
    pub fn detail_view(&self, store: &SavingsStore, display: &DisplaySettings) -> Option<DetailView> {
        let id = self.current_record()?;
        let record = store.find_by_id(id).ok()?;
        Some(detail_view(record, display))
    }
}

/// Derives a list card from a record.
#[must_use]
pub fn list_item(record: &SavingsRecord, display: &DisplaySettings) -> ListItem {
    ListItem {
        id: record.id,
        name: record.name.clone(),
        image: record
            .image
            .clone()
            .unwrap_or_else(|| display.placeholder_image.clone()),
        goal: record.goal,
        saving_amount: record.saving_amount,
        frequency: record.frequency.clone(),
        percent_complete: percent_complete(record.collected, record.goal),
        estimation: estimate(record.remaining(), record.saving_amount, &record.frequency)
            .to_string(),
    }
}

/// Derives the detail view from a record.
#[must_use]
pub fn detail_view(record: &SavingsRecord, display: &DisplaySettings) -> DetailView {
    DetailView {
        item: list_item(record, display),
        collected: record.collected,
        remaining: record.remaining(),
        created_date: record.created_date,
        history: record.history.iter().rev().cloned().collect(),
        reminder_on: record.reminder_on,
    }
}
