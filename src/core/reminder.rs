//! Contribution reminders.
//!
//! A goal with reminders on is due when a full period of its frequency has passed
//! since the last deposit (or since creation, if nothing was deposited yet).

use crate::core::{
    models::{Frequency, SavingsRecord},
    store::SavingsStore,
};
use chrono::{DateTime, Duration, Months, Utc};

/// When the next contribution is expected after `since`. `None` for cadences the
/// tracker cannot schedule.
#[must_use]
pub fn next_contribution(frequency: &Frequency, since: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match frequency {
        Frequency::Daily => Some(since + Duration::days(1)),
        Frequency::Weekly => Some(since + Duration::days(7)),
        Frequency::Monthly => since.checked_add_months(Months::new(1)),
        Frequency::Other(_) => None,
    }
}

/// Whether `record` should be nudged at `now`.
#[must_use]
pub fn is_due(record: &SavingsRecord, now: DateTime<Utc>) -> bool {
    if !record.reminder_on || record.is_complete() {
        return false;
    }

    let since = record.last_deposit().unwrap_or(record.created_date);
    next_contribution(&record.frequency, since).is_some_and(|next| now >= next)
}

/// Reminder-enabled, unfinished records whose contribution is overdue, in
/// insertion order.
#[must_use]
pub fn due_reminders(store: &SavingsStore, now: DateTime<Utc>) -> Vec<&SavingsRecord> {
    store
        .records()
        .iter()
        .filter(|record| is_due(record, now))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{models::RecordFields, transaction};
    use chrono::TimeZone;

    fn created_at(store: &mut SavingsStore, frequency: Frequency, now: DateTime<Utc>) -> i64 {
        let fields = RecordFields {
            name: "Goal".to_string(),
            goal: 1_000,
            saving_amount: 100,
            frequency,
            image: None,
        };
        let id = store.create_at(fields, now).unwrap().id;
        store.set_reminder(id, true).unwrap();
        id
    }

    #[test]
    fn test_weekly_due_after_seven_days() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let mut store = SavingsStore::new();
        created_at(&mut store, Frequency::Weekly, start);

        assert!(due_reminders(&store, start + Duration::days(6)).is_empty());
        assert_eq!(due_reminders(&store, start + Duration::days(7)).len(), 1);
    }

    #[test]
    fn test_monthly_uses_calendar_months() {
        let start = Utc.with_ymd_and_hms(2026, 1, 31, 9, 0, 0).unwrap();
        let next = next_contribution(&Frequency::Monthly, start).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 2, 28, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_deposit_resets_the_clock() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let mut store = SavingsStore::new();
        let id = created_at(&mut store, Frequency::Daily, start);

        transaction::apply_deposit_at(&mut store, id, 100, start + Duration::hours(20)).unwrap();

        assert!(due_reminders(&store, start + Duration::hours(30)).is_empty());
        assert_eq!(due_reminders(&store, start + Duration::hours(44)).len(), 1);
    }

    #[test]
    fn test_disabled_complete_and_other_are_never_due() {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let later = start + Duration::days(365);
        let mut store = SavingsStore::new();

        let off = created_at(&mut store, Frequency::Daily, start);
        store.set_reminder(off, false).unwrap();

        let done = created_at(&mut store, Frequency::Daily, start);
        transaction::apply_deposit_at(&mut store, done, 1_000, start).unwrap();

        created_at(&mut store, Frequency::Other("Yearly-ish".to_string()), start);

        assert!(due_reminders(&store, later).is_empty());
    }
}
