//! Habit tracking model.
//!
//! # Invariants
//! - `records` holds exactly the days the habit was completed.
//! - There is no explicit "not completed" entry; absence means not done.
//! - On the wire records are a `{"YYYY-MM-DD": true}` object; `false`
//!   entries and keys that are not valid days are dropped on decode.

use super::{new_entity_id, Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A habit and the set of days it was completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: EntityId,
    pub name: String,
    #[serde(with = "day_records")]
    pub records: BTreeSet<NaiveDate>,
}

impl Entity for Habit {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Habit {
    /// Creates a habit with no completed days.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            records: BTreeSet::new(),
        }
    }

    /// Flips the record for `day` and returns the new completion state.
    pub fn toggle_day(&mut self, day: NaiveDate) -> bool {
        if self.records.remove(&day) {
            false
        } else {
            self.records.insert(day);
            true
        }
    }

    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.records.contains(&day)
    }

    /// Number of days the habit was completed.
    pub fn completed_days(&self) -> usize {
        self.records.len()
    }
}

/// Partial update for a habit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitPatch {
    pub name: Option<String>,
}

impl HabitPatch {
    pub fn apply_to(self, habit: &mut Habit) {
        if let Some(name) = self.name {
            habit.name = name;
        }
    }
}

mod day_records {
    use crate::model::calendar::{day_key, parse_day_key};
    use chrono::NaiveDate;
    use log::warn;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S: Serializer>(
        records: &BTreeSet<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(records.len()))?;
        for day in records {
            map.serialize_entry(&day_key(*day), &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeSet<NaiveDate>, D::Error> {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        let mut records = BTreeSet::new();
        let mut skipped = 0usize;
        for (key, done) in raw {
            match parse_day_key(&key) {
                Some(day) if done => {
                    records.insert(day);
                }
                Some(_) => {}
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!("event=habit_records_decode module=model status=partial skipped_keys={skipped}");
        }
        Ok(records)
    }
}
