use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use omnido_core::{
    build_timeline, day_agenda, pending_count_on, EntityStore, MemoryKvRepository, Task,
};

fn offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    offset()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn splits_around_local_midnight() {
    let tasks = vec![
        Task::new("tomorrow", local(2026, 3, 11, 9, 0)),
        Task::new("just after midnight", local(2026, 3, 10, 0, 1)),
        Task::new("late yesterday", local(2026, 3, 9, 23, 59)),
    ];
    let now = offset().with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    let timeline = build_timeline(&tasks, &now);

    assert_eq!(timeline.today, day(2026, 3, 10));
    assert_eq!(timeline.past.len(), 1);
    assert_eq!(timeline.past[0].day, day(2026, 3, 9));
    assert_eq!(timeline.past[0].tasks[0].title, "late yesterday");

    let upcoming: Vec<NaiveDate> = timeline.upcoming.iter().map(|b| b.day).collect();
    assert_eq!(upcoming, vec![day(2026, 3, 10), day(2026, 3, 11)]);

    let today = timeline.today_bucket().unwrap();
    assert_eq!(today.tasks[0].title, "just after midnight");
}

#[test]
fn local_day_differs_from_utc_day() {
    // 00:30 local at +02:00 is still the previous day in UTC.
    let tasks = vec![Task::new("early", local(2026, 3, 10, 0, 30))];
    let now = offset().with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap();

    let local_view = build_timeline(&tasks, &now);
    assert!(local_view.past.is_empty());
    assert_eq!(local_view.upcoming[0].day, day(2026, 3, 10));

    let utc_view = build_timeline(&tasks, &now.with_timezone(&Utc));
    assert_eq!(utc_view.today, day(2026, 3, 10));
    assert_eq!(utc_view.past.len(), 1);
    assert_eq!(utc_view.past[0].day, day(2026, 3, 9));
}

#[test]
fn buckets_are_chronological_within_and_across_days() {
    let tasks = vec![
        Task::new("c", local(2026, 3, 12, 18, 0)),
        Task::new("a", local(2026, 3, 12, 7, 0)),
        Task::new("old", local(2026, 2, 1, 7, 0)),
        Task::new("b", local(2026, 3, 12, 12, 0)),
    ];
    let now = offset().with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    let timeline = build_timeline(&tasks, &now);

    let titles: Vec<&str> = timeline
        .buckets()
        .flat_map(|bucket| bucket.tasks.iter().map(|task| task.title.as_str()))
        .collect();
    assert_eq!(titles, vec!["old", "a", "b", "c"]);
    assert!(timeline.today_bucket().is_none());
}

#[test]
fn completed_tasks_stay_in_their_bucket() {
    let mut finished = Task::new("finished", local(2026, 3, 10, 9, 0));
    finished.toggle();
    let tasks = vec![finished, Task::new("open", local(2026, 3, 10, 10, 0))];
    let now = offset().with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    let timeline = build_timeline(&tasks, &now);
    assert_eq!(timeline.today_bucket().unwrap().tasks.len(), 2);

    let agenda = day_agenda(&tasks, day(2026, 3, 10), &offset());
    assert_eq!(agenda.pending.len(), 1);
    assert_eq!(agenda.done.len(), 1);
    assert_eq!(pending_count_on(&tasks, day(2026, 3, 10), &offset()), 1);
}

#[test]
fn store_timeline_uses_given_clock() {
    let repo = MemoryKvRepository::new().with_entry("tasks", b"[]".to_vec());
    let mut store = EntityStore::open(repo);
    store.add_task("due", local(2026, 3, 11, 9, 0));

    let now = offset().with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
    let timeline = store.timeline_at(&now);
    assert!(timeline.past.is_empty());
    assert_eq!(timeline.upcoming.len(), 1);

    let later = offset().with_ymd_and_hms(2026, 3, 12, 12, 0, 0).unwrap();
    assert_eq!(store.timeline_at(&later).past.len(), 1);
}

#[test]
fn empty_store_has_empty_timeline() {
    let repo = MemoryKvRepository::new().with_entry("tasks", b"[]".to_vec());
    let store = EntityStore::open(repo);
    assert!(store.timeline().is_empty());
}
