//! Persistence adapter - mirrors the savings collection into the key-value table.
//!
//! The whole collection is one JSON array stored under a single key in
//! `system_state`. Every save overwrites that row; there are no partial writes.

use crate::{
    core::models::SavingsRecord,
    entities::{SystemState, system_state},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};

/// Reads the collection stored under `key`. A missing key is an empty collection.
pub async fn load_records<C>(db: &C, key: &str) -> Result<Vec<SavingsRecord>>
where
    C: ConnectionTrait,
{
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(key))
        .one(db)
        .await?;

    let Some(state) = state else {
        tracing::info!("No saved collection under '{key}', starting empty");
        return Ok(Vec::new());
    };

    let records: Vec<SavingsRecord> = serde_json::from_str(&state.value)?;
    tracing::debug!("Loaded {} savings records from '{key}'", records.len());
    Ok(records)
}

/// Overwrites the collection stored under `key`.
///
/// # Errors
/// Any database failure is reported as [`Error::Storage`] so the caller can tell
/// it apart from validation problems and offer a retry.
pub async fn save_records<C>(db: &C, key: &str, records: &[SavingsRecord]) -> Result<()>
where
    C: ConnectionTrait,
{
    let value = serde_json::to_string(records)?;
    write_value(db, key, value).await.map_err(|e| Error::Storage {
        message: e.to_string(),
    })?;

    tracing::debug!("Saved {} savings records under '{key}'", records.len());
    Ok(())
}

async fn write_value<C>(db: &C, key: &str, value: String) -> std::result::Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(key))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{models::Frequency, store::SavingsStore, transaction};
    use crate::test_utils::{fields, laptop_fields, setup_test_db};

    const KEY: &str = "test_goals";

    #[tokio::test]
    async fn test_load_missing_key_is_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let records = load_records(&db, KEY).await?;
        assert!(records.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_round_trip_preserves_every_field() -> Result<()> {
        let db = setup_test_db().await?;

        let mut store = SavingsStore::new();
        let laptop = store.create(laptop_fields())?;
        let mut bike = fields("Bike", 300, 50);
        bike.image = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let bike = store.create(bike)?;
        transaction::apply_deposit(&mut store, laptop.id, 500_000)?;
        transaction::apply_withdrawal(&mut store, laptop.id, 100_000)?;
        store.set_reminder(bike.id, true)?;
        let mut camera = fields("Camera", 900, 30);
        camera.frequency = Frequency::Other("Fortnightly".to_string());
        store.create(camera)?;

        save_records(&db, KEY, store.records()).await?;
        let loaded = load_records(&db, KEY).await?;

        assert_eq!(loaded, store.records());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_collection() -> Result<()> {
        let db = setup_test_db().await?;

        let mut store = SavingsStore::new();
        let first = store.create(fields("First", 100, 10))?;
        save_records(&db, KEY, store.records()).await?;

        store.delete(first.id);
        store.create(fields("Second", 200, 20))?;
        save_records(&db, KEY, store.records()).await?;

        let loaded = load_records(&db, KEY).await?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Second");

        let rows = SystemState::find().all(&db).await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_keys_are_independent() -> Result<()> {
        let db = setup_test_db().await?;

        let mut store = SavingsStore::new();
        store.create(fields("Only", 100, 10))?;
        save_records(&db, KEY, store.records()).await?;

        assert!(load_records(&db, "other_key").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_failure_is_storage_error() -> Result<()> {
        let db = setup_test_db().await?;
        db.execute_unprepared("DROP TABLE system_state").await?;

        let result = save_records(&db, KEY, &[]).await;
        assert!(matches!(result, Err(Error::Storage { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_corrupt_value_is_serialization_error() -> Result<()> {
        let db = setup_test_db().await?;
        let state = system_state::ActiveModel {
            key: Set(KEY.to_string()),
            value: Set("not json".to_string()),
            updated_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        state.insert(&db).await?;

        let result = load_records(&db, KEY).await;
        assert!(matches!(result, Err(Error::Serialization(_))));
        Ok(())
    }
}
