//! Timeline projection over tasks.
//!
//! # Responsibility
//! - Bucket tasks by the local calendar day of their deadline.
//! - Split buckets into past and upcoming relative to "now".
//!
//! # Invariants
//! - Pure read: never mutates or persists, never cached across calls.
//! - Buckets are ascending by day; tasks within a bucket ascending by
//!   deadline, ties kept in collection order.
//! - `past` holds days strictly before today; today belongs to `upcoming`.

use crate::model::calendar::local_day;
use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Tasks sharing one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBucket {
    pub day: NaiveDate,
    pub tasks: Vec<Task>,
}

/// Day-grouped task view split around the current day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    /// Calendar day the split was computed against.
    pub today: NaiveDate,
    pub past: Vec<DayBucket>,
    pub upcoming: Vec<DayBucket>,
}

impl Timeline {
    /// The upcoming bucket whose day is today, if any task is due today.
    pub fn today_bucket(&self) -> Option<&DayBucket> {
        self.upcoming.iter().find(|bucket| bucket.day == self.today)
    }

    /// Buckets in chronological order, past first.
    pub fn buckets(&self) -> impl Iterator<Item = &DayBucket> {
        self.past.iter().chain(self.upcoming.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty() && self.upcoming.is_empty()
    }
}

/// Groups `tasks` into day buckets and splits them around `now`.
///
/// Days are taken in the time zone of `now`.
pub fn build_timeline<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> Timeline {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|task| task.deadline);

    let mut by_day: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
    for task in sorted {
        by_day
            .entry(local_day(&task.deadline, &tz))
            .or_default()
            .push(task.clone());
    }

    let (past, upcoming): (Vec<DayBucket>, Vec<DayBucket>) = by_day
        .into_iter()
        .map(|(day, tasks)| DayBucket { day, tasks })
        .partition(|bucket| bucket.day < today);

    Timeline {
        today,
        past,
        upcoming,
    }
}
