//! Key/value repository contracts with SQLite and in-memory implementations.
//!
//! # Responsibility
//! - Provide `get`/`put` of opaque bytes by collection key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `put` replaces the whole value stored under a key.
//! - A missing key is `Ok(None)`, never an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from key/value repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// The backend refused the write.
    WriteRejected(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "key/value repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "key/value repository requires table `{table}`")
            }
            Self::WriteRejected(key) => write!(f, "write rejected for key `{key}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::WriteRejected(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage key of one persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionKey {
    Tasks,
    Projects,
    Habits,
    Notes,
    MindMaps,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 5] = [
        Self::Tasks,
        Self::Projects,
        Self::Habits,
        Self::Notes,
        Self::MindMaps,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Habits => "habits",
            Self::Notes => "notes",
            Self::MindMaps => "mindmaps",
        }
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte storage addressed by string keys.
///
/// No transactions and no atomicity across keys.
pub trait KvRepository {
    /// Returns the bytes stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &[u8]) -> RepoResult<()>;
}

impl<R: KvRepository + ?Sized> KvRepository for &mut R {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> RepoResult<()> {
        (**self).put(key, value)
    }
}

/// SQLite-backed key/value repository over `kv_entries`.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when `kv_entries` is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_kv_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_kv_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'kv_entries'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("kv_entries"));
    }

    Ok(())
}

/// Volatile key/value repository.
///
/// Keeps a log of every accepted write, and can be told to reject writes to
/// exercise failure handling.
#[derive(Debug, Clone, Default)]
pub struct MemoryKvRepository {
    entries: BTreeMap<String, Vec<u8>>,
    write_log: Vec<(String, Vec<u8>)>,
    reject_writes: bool,
}

impl MemoryKvRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates one key without recording a write.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Makes subsequent `put` calls fail (or succeed again).
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    /// Every accepted write, oldest first.
    pub fn writes(&self) -> &[(String, Vec<u8>)] {
        &self.write_log
    }

    /// Accepted writes for one key, oldest first.
    pub fn writes_for(&self, key: &str) -> Vec<&[u8]> {
        self.write_log
            .iter()
            .filter(|(written_key, _)| written_key == key)
            .map(|(_, value)| value.as_slice())
            .collect()
    }
}

impl KvRepository for MemoryKvRepository {
    fn get(&self, key: &str) -> RepoResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> RepoResult<()> {
        if self.reject_writes {
            return Err(RepoError::WriteRejected(key.to_string()));
        }
        self.entries.insert(key.to_string(), value.to_vec());
        self.write_log.push((key.to_string(), value.to_vec()));
        Ok(())
    }
}
