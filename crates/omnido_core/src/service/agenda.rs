//! Day agenda and upcoming-deadline summaries over tasks.
//!
//! Read-only consumers (calendar badges, the background notifier) use these
//! projections; none of them mutate or persist.

use crate::model::calendar::local_day;
use crate::model::task::Task;
use crate::model::EntityId;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt::{Display, Formatter};

/// Default number of entries in a deadline summary.
pub const DEFAULT_REMINDER_LIMIT: usize = 8;
const MAX_TITLE_CHARS: usize = 25;
const SECONDS_PER_HOUR: i64 = 3600;
const HOURS_PER_DAY: i64 = 24;

/// Tasks due on one calendar day, split by completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAgenda {
    pub day: NaiveDate,
    pub pending: Vec<Task>,
    pub done: Vec<Task>,
}

/// Collects tasks whose deadline falls on `day` in time zone `tz`.
pub fn day_agenda<Tz: TimeZone>(tasks: &[Task], day: NaiveDate, tz: &Tz) -> DayAgenda {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|task| local_day(&task.deadline, tz) == day)
        .collect();
    due.sort_by_key(|task| task.deadline);

    let (done, pending): (Vec<Task>, Vec<Task>) =
        due.into_iter().cloned().partition(|task| task.completed);
    DayAgenda { day, pending, done }
}

/// Number of unfinished tasks due on `day`.
pub fn pending_count_on<Tz: TimeZone>(tasks: &[Task], day: NaiveDate, tz: &Tz) -> usize {
    tasks
        .iter()
        .filter(|task| !task.completed && local_day(&task.deadline, tz) == day)
        .count()
}

/// Whole time remaining before a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLeft {
    Days(i64),
    Hours(i64),
}

impl TimeLeft {
    fn between(now: DateTime<Utc>, deadline: DateTime<Utc>) -> Self {
        let hours = (deadline - now).num_seconds() / SECONDS_PER_HOUR;
        let days = hours / HOURS_PER_DAY;
        if days > 0 {
            Self::Days(days)
        } else {
            Self::Hours(hours)
        }
    }
}

impl Display for TimeLeft {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Days(days) => write!(f, "{days}d left"),
            Self::Hours(hours) => write!(f, "{hours}h left"),
        }
    }
}

/// One entry of the upcoming-deadline summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineReminder {
    pub task_id: EntityId,
    /// Title shortened for compact display.
    pub display_title: String,
    pub deadline: DateTime<Utc>,
    pub time_left: TimeLeft,
}

/// Unfinished tasks due strictly after `now`, soonest first, at most `limit`.
pub fn upcoming_deadlines(tasks: &[Task], now: DateTime<Utc>, limit: usize) -> Vec<DeadlineReminder> {
    let mut future: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.completed && task.deadline > now)
        .collect();
    future.sort_by_key(|task| task.deadline);

    future
        .into_iter()
        .take(limit)
        .map(|task| DeadlineReminder {
            task_id: task.id,
            display_title: shorten_title(&task.title),
            deadline: task.deadline,
            time_left: TimeLeft::between(now, task.deadline),
        })
        .collect()
}

fn shorten_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut short: String = title.chars().take(MAX_TITLE_CHARS).collect();
        short.push_str("...");
        short
    } else {
        title.to_string()
    }
}
