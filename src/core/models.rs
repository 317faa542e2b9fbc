//! Savings record data model.
//!
//! These types are both the in-memory representation and the persisted JSON shape.
//! Field names serialize in camelCase (`savingAmount`, `createdDate`, `reminderOn`),
//! a missing image serializes as the empty string, and timestamps are RFC 3339 UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a savings record.
pub type RecordId = i64;

/// How often the owner plans to contribute to a goal.
///
/// Unknown labels are kept verbatim in [`Frequency::Other`] so that they survive a
/// load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// One contribution per day
    Daily,
    /// One contribution per week
    Weekly,
    /// One contribution per calendar month
    Monthly,
    /// Any other cadence, estimated in generic periods
    Other(String),
}

impl Frequency {
    /// Label shown to the user and written to storage.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Other(value),
        }
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money added to the goal
    Deposit,
    /// Money taken out of the goal
    Withdrawal,
}

impl TransactionKind {
    /// `+` for deposits, `-` for withdrawals.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Deposit => '+',
            Self::Withdrawal => '-',
        }
    }
}

/// One recorded deposit or withdrawal. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the transaction happened
    pub date: DateTime<Utc>,
    /// Magnitude of the transaction, always positive
    pub amount: u64,
    /// Deposit or withdrawal
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

/// A single savings goal with its target, plan, balance, and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsRecord {
    /// Unique, immutable identifier
    pub id: RecordId,
    /// Display label
    pub name: String,
    /// Encoded image payload (data URI), if one was uploaded
    #[serde(default, with = "image_payload")]
    pub image: Option<String>,
    /// Target amount in whole currency units
    pub goal: u64,
    /// Planned contribution per period
    pub saving_amount: u64,
    /// Contribution cadence
    pub frequency: Frequency,
    /// Deposited minus withdrawn; never negative, may exceed `goal`
    pub collected: u64,
    /// Creation time, set once
    pub created_date: DateTime<Utc>,
    /// Append-only transaction log in chronological order
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Whether the owner wants contribution reminders
    #[serde(default)]
    pub reminder_on: bool,
}

impl SavingsRecord {
    /// A record is complete once the collected balance reaches the goal.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.collected >= self.goal
    }

    /// Amount still missing, clamped at zero.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.goal.saturating_sub(self.collected)
    }

    /// Timestamp of the most recent deposit, if any.
    #[must_use]
    pub fn last_deposit(&self) -> Option<DateTime<Utc>> {
        self.history
            .iter()
            .rev()
            .find(|entry| entry.kind == TransactionKind::Deposit)
            .map(|entry| entry.date)
    }
}

/// Editable fields of a record, as submitted by the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// Display label
    pub name: String,
    /// Target amount; must be positive
    pub goal: i64,
    /// Contribution per period; must be positive
    pub saving_amount: i64,
    /// Contribution cadence
    pub frequency: Frequency,
    /// Newly uploaded image; `None` keeps the existing one on edit
    pub image: Option<String>,
}

/// Stores `None` as `""` so the persisted shape always carries an `image` string.
mod image_payload {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(image: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(image.as_deref().unwrap_or_default())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|payload| !payload.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;

    fn sample_record() -> SavingsRecord {
        SavingsRecord {
            id: 1_700_000_000_000,
            name: "Laptop".to_string(),
            image: None,
            goal: 10_000_000,
            saving_amount: 500_000,
            frequency: Frequency::Monthly,
            collected: 0,
            created_date: Utc.with_ymd_and_hms(2026, 1, 5, 8, 30, 0).unwrap(),
            history: Vec::new(),
            reminder_on: false,
        }
    }

    #[test]
    fn test_frequency_parsing_is_case_insensitive() {
        assert_eq!(Frequency::from("weekly".to_string()), Frequency::Weekly);
        assert_eq!(Frequency::from("DAILY".to_string()), Frequency::Daily);
        assert_eq!(
            Frequency::from("Quarterly".to_string()),
            Frequency::Other("Quarterly".to_string())
        );
    }

    #[test]
    fn test_record_serializes_in_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["savingAmount"], 500_000);
        assert_eq!(json["frequency"], "Monthly");
        assert_eq!(json["image"], "");
        assert_eq!(json["reminderOn"], false);
        assert!(json["createdDate"].as_str().unwrap().starts_with("2026-01-05T08:30:00"));
    }

    #[test]
    fn test_history_entry_uses_type_field() {
        let entry = HistoryEntry {
            date: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
            amount: 250,
            kind: TransactionKind::Withdrawal,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "withdrawal");
        assert_eq!(json["amount"], 250);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": 7,
            "name": "Bike",
            "goal": 300,
            "savingAmount": 50,
            "frequency": "Fortnightly",
            "collected": 0,
            "createdDate": "2026-03-01T00:00:00Z"
        }"#;
        let record: SavingsRecord = serde_json::from_str(json).unwrap();
        assert!(record.image.is_none());
        assert!(record.history.is_empty());
        assert!(!record.reminder_on);
        assert_eq!(record.frequency, Frequency::Other("Fortnightly".to_string()));
    }

    #[test]
    fn test_unknown_frequency_survives_round_trip() {
        let mut record = sample_record();
        record.frequency = Frequency::Other("Fortnightly".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""frequency":"Fortnightly""#));

        let restored: SavingsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
        assert_eq!(
            restored.frequency,
            Frequency::Other("Fortnightly".to_string())
        );
    }

    #[test]
    fn test_remaining_is_clamped() {
        let mut record = sample_record();
        record.collected = 12_000_000;
        assert!(record.is_complete());
        assert_eq!(record.remaining(), 0);
    }
}
