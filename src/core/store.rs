//! Savings record store - the in-memory collection of savings goals.
//!
//! The store owns every record in insertion order and exposes the CRUD contract:
//! create, update, delete, find by id, and a filtered, sorted listing. It never
//! touches durable storage; the tracker persists the collection after each change.

use crate::{
    core::models::{RecordFields, RecordId, SavingsRecord},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Which tab of the list view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Goals still being saved for (`collected < goal`)
    #[default]
    Active,
    /// Goals whose balance reached the target
    Complete,
}

impl Tab {
    /// Whether `record` belongs on this tab.
    #[must_use]
    pub const fn matches(self, record: &SavingsRecord) -> bool {
        match self {
            Self::Active => !record.is_complete(),
            Self::Complete => record.is_complete(),
        }
    }
}

/// Field the list view is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Case-insensitive name order
    #[default]
    Name,
    /// Numeric goal amount
    Goal,
}

/// Ascending or descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// A sort key combined with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    /// Field to compare
    pub key: SortKey,
    /// Direction of the comparison
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates a sort order.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(self, a: &SavingsRecord, b: &SavingsRecord) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Goal => a.goal.cmp(&b.goal),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A filtered, sorted view of the store. Iterate it as many times as needed.
#[derive(Debug, Clone)]
pub struct Listing<'a> {
    records: Vec<&'a SavingsRecord>,
}

impl<'a> Listing<'a> {
    /// Iterates the listed records in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a SavingsRecord> + '_ {
        self.records.iter().copied()
    }

    /// Number of listed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing matched the filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids of the listed records, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|record| record.id).collect()
    }
}

/// In-memory collection of savings records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavingsStore {
    records: Vec<SavingsRecord>,
    last_id: RecordId,
}

impl SavingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a collection loaded from storage.
    #[must_use]
    pub fn from_records(records: Vec<SavingsRecord>) -> Self {
        let last_id = records.iter().map(|record| record.id).max().unwrap_or(0);
        Self { records, last_id }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[SavingsRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lists records on `tab`, ordered by `sort`. The sort is stable, so records with
    /// equal keys keep their insertion order.
    #[must_use]
    pub fn list(&self, tab: Tab, sort: SortOrder) -> Listing<'_> {
        let mut records: Vec<&SavingsRecord> =
            self.records.iter().filter(|record| tab.matches(record)).collect();
        records.sort_by(|a, b| sort.compare(a, b));
        Listing { records }
    }

    /// Finds a record by id.
    pub fn find_by_id(&self, id: RecordId) -> Result<&SavingsRecord> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or(Error::RecordNotFound { id })
    }

    pub(crate) fn find_by_id_mut(&mut self, id: RecordId) -> Result<&mut SavingsRecord> {
        self.records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(Error::RecordNotFound { id })
    }

    /// Creates a record with zero balance and empty history, stamped with the
    /// current time.
    pub fn create(&mut self, fields: RecordFields) -> Result<SavingsRecord> {
        self.create_at(fields, Utc::now())
    }

    /// Creates a record stamped with `now`. Ids derive from `now` in milliseconds and
    /// are bumped past the largest id seen so far, so they never collide.
    pub fn create_at(&mut self, fields: RecordFields, now: DateTime<Utc>) -> Result<SavingsRecord> {
        let (name, goal, saving_amount) = validate_fields(&fields)?;

        let next = self.last_id.checked_add(1).ok_or_else(|| Error::Validation {
            message: "No record ids left; the largest id is already in use".to_string(),
        })?;
        let id = now.timestamp_millis().max(next);
        self.last_id = id;

        let record = SavingsRecord {
            id,
            name,
            image: fields.image,
            goal,
            saving_amount,
            frequency: fields.frequency,
            collected: 0,
            created_date: now,
            history: Vec::new(),
            reminder_on: false,
        };

        self.records.push(record.clone());
        Ok(record)
    }

    /// Replaces the editable fields of a record. Identity, creation date, balance,
    /// history, and the reminder flag are kept; the image is only replaced when a
    /// new one is supplied.
    pub fn update(&mut self, id: RecordId, fields: RecordFields) -> Result<SavingsRecord> {
        let (name, goal, saving_amount) = validate_fields(&fields)?;
        let record = self.find_by_id_mut(id)?;

        record.name = name;
        record.goal = goal;
        record.saving_amount = saving_amount;
        record.frequency = fields.frequency;
        if let Some(image) = fields.image {
            record.image = Some(image);
        }

        Ok(record.clone())
    }

    /// Removes a record permanently. Returns `None` when the id is unknown.
    pub fn delete(&mut self, id: RecordId) -> Option<SavingsRecord> {
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }

    /// Sets the reminder flag of a record.
    pub fn set_reminder(&mut self, id: RecordId, on: bool) -> Result<&SavingsRecord> {
        let record = self.find_by_id_mut(id)?;
        record.reminder_on = on;
        Ok(&*record)
    }
}

/// Checks presence and positivity, returning the trimmed name and unsigned amounts.
fn validate_fields(fields: &RecordFields) -> Result<(String, u64, u64)> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Name cannot be empty".to_string(),
        });
    }

    let goal = positive(fields.goal, "Goal")?;
    let saving_amount = positive(fields.saving_amount, "Saving amount")?;

    if fields.frequency.label().trim().is_empty() {
        return Err(Error::Validation {
            message: "Frequency cannot be empty".to_string(),
        });
    }

    Ok((name.to_string(), goal, saving_amount))
}

fn positive(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| Error::Validation {
            message: format!("{field} must be greater than zero (got {value})"),
        })
}
