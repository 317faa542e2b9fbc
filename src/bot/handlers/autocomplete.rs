//! Autocomplete handlers for Discord slash command parameters.
//!
//! Goals are picked by id, but the user types a name; suggestions show the name and
//! submit the id.

use crate::{
    bot::BotData,
    core::{models::RecordId, store::SavingsStore},
    errors::Error,
};
use poise::serenity_prelude as serenity;

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

/// Goals whose name contains `partial` (case-insensitive), as `(label, id)` pairs
/// sorted by name. Completed goals are marked in the label.
#[must_use]
pub fn matching_goals(store: &SavingsStore, partial: &str) -> Vec<(String, RecordId)> {
    let partial_lower = partial.to_lowercase();

    let mut matching: Vec<_> = store
        .records()
        .iter()
        .filter(|record| record.name.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort_by_key(|record| record.name.to_lowercase());

    matching
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|record| {
            let label = if record.is_complete() {
                format!("{} ✅", record.name)
            } else {
                record.name.clone()
            };
            (label, record.id)
        })
        .collect()
}

/// Provides autocomplete suggestions for goal parameters.
pub async fn autocomplete_goal(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<serenity::AutocompleteChoice> {
    let tracker = ctx.data().tracker.lock().await;

    matching_goals(tracker.store(), partial)
        .into_iter()
        .map(|(label, id)| serenity::AutocompleteChoice::new(label, id))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::transaction;
    use crate::test_utils::fields;

    #[test]
    fn test_matching_goals_filters_and_sorts() {
        let mut store = SavingsStore::new();
        let bike = store.create(fields("Bike", 300, 10)).unwrap().id;
        store.create(fields("Laptop", 1_000, 10)).unwrap();
        let bag = store.create(fields("bag", 50, 10)).unwrap().id;

        let matches = matching_goals(&store, "B");
        assert_eq!(
            matches,
            vec![("bag".to_string(), bag), ("Bike".to_string(), bike)]
        );
        assert_eq!(matching_goals(&store, "").len(), 3);
    }

    #[test]
    fn test_matching_goals_marks_complete() {
        let mut store = SavingsStore::new();
        let id = store.create(fields("Shoes", 100, 10)).unwrap().id;
        transaction::apply_deposit(&mut store, id, 100).unwrap();

        assert_eq!(
            matching_goals(&store, "sho"),
            vec![("Shoes ✅".to_string(), id)]
        );
    }

    #[test]
    fn test_matching_goals_limit() {
        let mut store = SavingsStore::new();
        for index in 0..30 {
            store.create(fields(&format!("Goal {index:02}"), 100, 10)).unwrap();
        }
        assert_eq!(matching_goals(&store, "goal").len(), MAX_SUGGESTIONS);
    }
}
