//! Transaction business logic - deposits and withdrawals against a savings record.
//!
//! Every operation validates first and mutates second: the amount check, the
//! balance check, and the overflow check all run before the balance or the history
//! is touched, so a failed transaction leaves the record exactly as it was.

use crate::{
    core::{
        models::{HistoryEntry, RecordId, SavingsRecord, TransactionKind},
        store::SavingsStore,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};

/// Adds `amount` to the record's balance and logs a deposit dated now.
pub fn apply_deposit(store: &mut SavingsStore, id: RecordId, amount: i64) -> Result<SavingsRecord> {
    apply_deposit_at(store, id, amount, Utc::now())
}

/// Takes `amount` out of the record's balance and logs a withdrawal dated now.
pub fn apply_withdrawal(
    store: &mut SavingsStore,
    id: RecordId,
    amount: i64,
) -> Result<SavingsRecord> {
    apply_withdrawal_at(store, id, amount, Utc::now())
}

/// Deposit with an explicit timestamp.
pub fn apply_deposit_at(
    store: &mut SavingsStore,
    id: RecordId,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<SavingsRecord> {
    let magnitude = validate_amount(amount)?;
    let record = store.find_by_id_mut(id)?;

    let new_balance = record
        .collected
        .checked_add(magnitude)
        .ok_or(Error::InvalidAmount { amount })?;

    record.collected = new_balance;
    record.history.push(HistoryEntry {
        date: now,
        amount: magnitude,
        kind: TransactionKind::Deposit,
    });

    tracing::debug!(record_id = id, amount = magnitude, "Deposit applied");
    Ok(record.clone())
}

/// Withdrawal with an explicit timestamp.
pub fn apply_withdrawal_at(
    store: &mut SavingsStore,
    id: RecordId,
    amount: i64,
    now: DateTime<Utc>,
) -> Result<SavingsRecord> {
    let magnitude = validate_amount(amount)?;
    let record = store.find_by_id_mut(id)?;

    if magnitude > record.collected {
        return Err(Error::InsufficientFunds {
            available: record.collected,
            requested: magnitude,
        });
    }

    record.collected -= magnitude;
    record.history.push(HistoryEntry {
        date: now,
        amount: magnitude,
        kind: TransactionKind::Withdrawal,
    });

    tracing::debug!(record_id = id, amount = magnitude, "Withdrawal applied");
    Ok(record.clone())
}

fn validate_amount(amount: i64) -> Result<u64> {
    u64::try_from(amount)
        .ok()
        .filter(|magnitude| *magnitude > 0)
        .ok_or(Error::InvalidAmount { amount })
}
