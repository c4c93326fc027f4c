//! CLI smoke entry point.
//!
//! Opens the configured store and prints a short summary of its contents.
//! Settings come from `OMNIDO_DATA_PATH`, `OMNIDO_LOG_LEVEL` and
//! `OMNIDO_LOG_DIR`, defaulting to the per-user data directory.

use chrono::{Local, Utc};
use log::info;
use omnido_core::db::open_db;
use omnido_core::{
    day_key, init_logging, CoreConfig, EntityStore, SqliteKvRepository, DEFAULT_REMINDER_LIMIT,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("omnido: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let config = CoreConfig::resolve()?;
    let log_dir = absolutize(&config.log_dir)?;
    init_logging(config.log_level, &log_dir)?;

    if let Some(parent) = config.data_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|err| {
                format!("cannot create data directory `{}`: {err}", parent.display())
            })?;
        }
    }

    let conn = open_db(&config.data_path).map_err(|err| err.to_string())?;
    let repo = SqliteKvRepository::try_new(&conn).map_err(|err| err.to_string())?;
    let store = EntityStore::open(repo);
    info!("event=cli_probe module=cli status=ok");

    println!("omnido_core version={}", omnido_core::core_version());
    println!("data_path={}", config.data_path.display());
    println!(
        "tasks={} projects={} habits={} notes={} mindmaps={}",
        store.tasks().len(),
        store.projects().len(),
        store.habits().len(),
        store.notes().len(),
        store.mind_maps().len()
    );

    let timeline = store.timeline_at(&Local::now());
    println!(
        "timeline today={} past_days={} upcoming_days={}",
        day_key(timeline.today),
        timeline.past.len(),
        timeline.upcoming.len()
    );
    for bucket in timeline.buckets() {
        let open = bucket.tasks.iter().filter(|task| !task.completed).count();
        println!(
            "  {} tasks={} open={}",
            day_key(bucket.day),
            bucket.tasks.len(),
            open
        );
    }

    let reminders = store.upcoming_deadlines(Utc::now(), DEFAULT_REMINDER_LIMIT);
    println!("upcoming deadlines={}", reminders.len());
    for reminder in reminders {
        println!("  [{}] {}", reminder.time_left, reminder.display_title);
    }

    Ok(())
}

// A relative `OMNIDO_LOG_DIR` is taken against the working directory.
fn absolutize(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?;
    Ok(cwd.join(path))
}
